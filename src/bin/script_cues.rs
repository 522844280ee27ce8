use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use script_cues::alignment::script_prep::{normalize_script, punctuate_paragraphs};
use script_cues::alignment::word_cues::{DEFAULT_WORDS_PER_CUE, DEFAULT_WRAP_WIDTH};
use script_cues::subtitle::filter::SubtitleOverlay;
use script_cues::subtitle::writer::write_cues;
use script_cues::types::load_tokens;
use script_cues::{
    group_word_cues, AlignerConfig, AlignmentInput, SubtitleAlignerBuilder, SubtitleStyle,
};
use tracing_subscriber::EnvFilter;

#[path = "script_cues/json_report_formatter.rs"]
mod json_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StyleChoice {
    Srt,
    Vtt,
}

impl StyleChoice {
    fn style(self) -> SubtitleStyle {
        match self {
            Self::Srt => SubtitleStyle::Srt,
            Self::Vtt => SubtitleStyle::Vtt,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "script-cues")]
#[command(about = "Build SRT/WebVTT subtitles from a narration script and its speech timings")]
struct Args {
    /// Word-boundary token stream (JSON array of {offset, duration, text}).
    #[arg(long, env = "SCRIPT_CUES_TOKENS")]
    tokens: PathBuf,
    /// Narration script. Without it, cues are grouped straight from tokens.
    #[arg(long, env = "SCRIPT_CUES_SCRIPT")]
    script: Option<PathBuf>,
    #[arg(long, env = "SCRIPT_CUES_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "SCRIPT_CUES_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "SCRIPT_CUES_STYLE", value_enum)]
    style: Option<StyleChoice>,
    #[arg(long, env = "SCRIPT_CUES_MAX_WIDTH")]
    max_width: Option<usize>,
    /// The script has no spaces between words (e.g. Chinese).
    #[arg(long, env = "SCRIPT_CUES_NO_SPACES", default_value_t = false)]
    no_spaces: bool,
    #[arg(long, env = "SCRIPT_CUES_MIN_CUES")]
    min_cues: Option<usize>,
    /// Normalize brackets/line breaks (and paragraph punctuation for --no-spaces).
    #[arg(long, env = "SCRIPT_CUES_PREPARE", default_value_t = false)]
    prepare: bool,
    #[arg(long, env = "SCRIPT_CUES_WORDS_PER_CUE", default_value_t = DEFAULT_WORDS_PER_CUE)]
    words_per_cue: usize,
    /// Overlay style JSON; prints the matching subtitle filter expression.
    #[arg(long, env = "SCRIPT_CUES_OVERLAY")]
    overlay: Option<PathBuf>,
    #[arg(long, env = "SCRIPT_CUES_REPORT")]
    report: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = resolve_config(&args)?;
    let style = config.output_style;

    let tokens = load_tokens(&args.tokens).map_err(|err| err.to_string())?;
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| args.tokens.with_extension(style.extension()));

    let (alignment, cue_count) = match args.script.as_ref() {
        Some(script_path) => {
            let script = read_script(script_path, args.prepare, config.is_space_delimited)?;
            let aligner = SubtitleAlignerBuilder::new(config.clone())
                .build()
                .map_err(|err| err.to_string())?;
            let output = aligner.align(&AlignmentInput { script, tokens });
            aligner
                .write(&output, &out_path)
                .map_err(|err| err.to_string())?;
            let cue_count = if output.is_usable() { output.cues.len() } else { 0 };
            (Some(output.report), cue_count)
        }
        None => {
            let cues = group_word_cues(&tokens, args.words_per_cue, DEFAULT_WRAP_WIDTH)
                .map_err(|err| err.to_string())?;
            write_cues(&out_path, &cues, style).map_err(|err| err.to_string())?;
            (None, cues.len())
        }
    };
    println!("{}", out_path.display());

    let overlay_filter = match args.overlay.as_ref() {
        Some(path) => {
            let overlay = load_overlay(path)?;
            let filter = overlay
                .filter_expression(&out_path)
                .map_err(|err| err.to_string())?;
            println!("{filter}");
            Some(filter)
        }
        None => None,
    };

    if let Some(report_path) = args.report.as_ref() {
        let report = json_report_formatter::RunReport {
            schema_version: 1,
            meta: json_report_formatter::RunMeta {
                generated_at: Utc::now().to_rfc3339(),
                tokens_path: args.tokens.display().to_string(),
                script_path: args.script.as_ref().map(|p| p.display().to_string()),
                subtitle_path: out_path.display().to_string(),
                style: style.extension().to_string(),
                max_subtitle_width: config.max_subtitle_width,
            },
            alignment,
            cue_count,
            overlay_filter,
        };
        json_report_formatter::write_report(report_path, &report)?;
        println!("{}", report_path.display());
    }

    Ok(())
}

fn resolve_config(args: &Args) -> Result<AlignerConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => AlignerConfig::load(path).map_err(|err| err.to_string())?,
        None => AlignerConfig::default(),
    };
    if let Some(style) = args.style {
        config.output_style = style.style();
    }
    if let Some(max_width) = args.max_width {
        config.max_subtitle_width = max_width;
    }
    if args.no_spaces {
        config.is_space_delimited = false;
    }
    if let Some(min_cues) = args.min_cues {
        config.min_cue_count = min_cues;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(config)
}

fn read_script(path: &Path, prepare: bool, is_space_delimited: bool) -> Result<String, String> {
    let raw = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read script '{}': {err}", path.display()))?;
    if !prepare {
        return Ok(raw);
    }
    let raw = if is_space_delimited {
        raw
    } else {
        punctuate_paragraphs(&raw)
    };
    Ok(normalize_script(&raw))
}

fn load_overlay(path: &Path) -> Result<SubtitleOverlay, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read overlay style '{}': {err}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|err| format!("Failed to parse overlay style '{}': {err}", path.display()))
}
