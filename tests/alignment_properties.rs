use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use script_cues::alignment::cues::assemble_cues;
use script_cues::alignment::segmentation::{is_line_delimiter, normalize_whitespace};
use script_cues::{
    align_script, correct_widths, format_timestamp, fuzzy_eq, parse_timestamp, segment,
    AlignerConfig, AlignmentError, SubtitleStyle, Token, TokenSpacing,
};

const SEED: u64 = 42;
const ROUNDS: usize = 200;
const TICKS_PER_MILLISECOND: u64 = 10_000;

fn random_word(rng: &mut StdRng) -> String {
    let len = rng.gen_range(1..=8);
    (0..len)
        .map(|_| char::from(b'a' + rng.gen_range(0..26u8)))
        .collect()
}

#[test]
fn punctuated_script_round_trips_through_alignment() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let delimiters = [",", ".", ";", ":", "!", "?"];

    for _ in 0..ROUNDS {
        let line_count = rng.gen_range(3..12);
        let lines: Vec<Vec<String>> = (0..line_count)
            .map(|_| {
                let words = rng.gen_range(1..=4);
                (0..words).map(|_| random_word(&mut rng)).collect()
            })
            .collect();

        let mut script = String::new();
        for words in &lines {
            script.push_str(&words.join(" "));
            script.push_str(delimiters.choose(&mut rng).copied().unwrap_or("."));
            script.push(' ');
        }

        let mut tokens = Vec::new();
        let mut clock = 0u64;
        for word in lines.iter().flatten() {
            let duration = rng.gen_range(0..2_000_000);
            tokens.push(Token::new(word.clone(), clock, duration));
            clock += duration + rng.gen_range(0..500_000);
        }

        let output = align_script(&script, &tokens, &AlignerConfig::default())
            .expect("default config is valid");

        assert_eq!(output.cues.len(), lines.len(), "script: {script}");
        assert!(output.report.diagnostics.is_empty(), "script: {script}");
        for (idx, (cue, words)) in output.cues.iter().zip(&lines).enumerate() {
            assert_eq!(cue.index as usize, idx + 1);
            assert_eq!(cue.text, words.join(" "));
            assert!(cue.start_ticks < cue.end_ticks);
        }
        for pair in output.cues.windows(2) {
            assert!(pair[0].start_ticks <= pair[1].start_ticks);
        }
    }
}

#[test]
fn fuzzy_eq_is_reflexive_and_symmetric() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let alphabet: Vec<char> = "ab c,.!?'\"()“”《》，。你好…".chars().collect();

    for _ in 0..ROUNDS {
        let mut sample = || -> String {
            let len = rng.gen_range(0..10);
            (0..len)
                .map(|_| *alphabet.choose(&mut rng).unwrap_or(&'a'))
                .collect()
        };
        let a = sample();
        let b = sample();
        assert!(fuzzy_eq(&a, &a), "{a:?}");
        assert_eq!(fuzzy_eq(&a, &b), fuzzy_eq(&b, &a), "{a:?} vs {b:?}");
    }
}

#[test]
fn formatted_timestamps_parse_back_to_millisecond_precision() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..ROUNDS {
        let ticks = rng.gen_range(0..100 * 3600 * 10_000_000u64);
        let truncated = ticks - ticks % TICKS_PER_MILLISECOND;
        for style in [SubtitleStyle::Srt, SubtitleStyle::Vtt] {
            let formatted = format_timestamp(ticks, style);
            assert_eq!(parse_timestamp(&formatted), Some(truncated), "{formatted}");
        }
    }
}

#[test]
fn width_correction_bounds_every_piece() {
    let mut rng = StdRng::seed_from_u64(SEED);
    for _ in 0..ROUNDS {
        let max_width = rng.gen_range(10..=30);
        let fragment_count = rng.gen_range(1..40);
        let fragments: Vec<String> = (0..fragment_count)
            .map(|_| {
                let len = rng.gen_range(1..=5);
                (0..len)
                    .map(|_| char::from(b'a' + rng.gen_range(0..26u8)))
                    .collect()
            })
            .collect();
        let tokens: Vec<Token> = fragments
            .iter()
            .enumerate()
            .map(|(i, f)| Token::new(f.clone(), i as u64 * 100, 100))
            .collect();
        let line = fragments.concat();

        let corrected = correct_widths(
            &tokens,
            vec![line.clone()],
            max_width,
            TokenSpacing::Concatenate,
        );
        assert_eq!(corrected.concat(), line);
        assert!(
            corrected.iter().all(|l| l.chars().count() <= max_width),
            "max_width={max_width} corrected={corrected:?}"
        );

        let assembly = assemble_cues(&tokens, &corrected, TokenSpacing::Concatenate);
        assert_eq!(assembly.cues.len(), corrected.len());
        for pair in assembly.cues.windows(2) {
            assert_eq!(pair[0].end_ticks, pair[1].start_ticks);
        }
    }
}

#[test]
fn long_unspaced_line_is_split_into_four_contiguous_cues() {
    let words: Vec<String> = (0..40).map(|i| format!("w{i:03}x")).collect();
    let tokens: Vec<Token> = words
        .iter()
        .enumerate()
        .map(|(i, w)| Token::new(w.clone(), i as u64 * 10_000_000, 10_000_000))
        .collect();
    let script = format!("{}。", words.concat());
    let config = AlignerConfig {
        max_subtitle_width: 50,
        is_space_delimited: false,
        ..AlignerConfig::default()
    };

    let output = align_script(&script, &tokens, &config).expect("valid config");

    assert_eq!(output.lines.len(), 4);
    assert!(output.lines.iter().all(|l| l.chars().count() <= 50));
    assert_eq!(output.cues.len(), 4);
    for (idx, cue) in output.cues.iter().enumerate() {
        assert_eq!(cue.start_ticks, idx as u64 * 100_000_000);
        assert_eq!(cue.end_ticks, (idx as u64 + 1) * 100_000_000);
    }
    assert_eq!(output.report.over_width_cue_count, 0);
    assert!(output.report.diagnostics.is_empty());
}

#[test]
fn malformed_escape_is_kept_verbatim() {
    let tokens = vec![
        Token::new("Save", 0, 10),
        Token::new("%ZZ", 10, 10),
        Token::new("today", 20, 10),
        Token::new("Caf%C3%A9", 30, 10),
        Token::new("open", 40, 10),
        Token::new("Bye", 50, 10),
    ];
    let output = align_script(
        "Save %ZZ today. Café open. Bye.",
        &tokens,
        &AlignerConfig::default(),
    )
    .expect("valid config");

    let texts: Vec<&str> = output.cues.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Save %ZZ today", "Café open", "Bye"]);
    assert!(output.is_usable());
}

#[test]
fn segmentation_never_drops_speakable_text() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let delimiters = ['，', '。', '、', '！', ',', '.', '?'];
    for _ in 0..ROUNDS {
        let mut script = String::new();
        let mut letters = String::new();
        for _ in 0..rng.gen_range(1..10) {
            let word = random_word(&mut rng);
            letters.push_str(&word);
            script.push_str(&word);
            if rng.gen_bool(0.5) {
                script.push(*delimiters.choose(&mut rng).unwrap_or(&'.'));
            } else {
                script.push(' ');
            }
        }
        let max_width = if rng.gen_bool(0.5) {
            Some(rng.gen_range(1..10))
        } else {
            None
        };
        let lines = segment(&script, max_width);
        let rejoined: String = lines.concat().chars().filter(|c| !c.is_whitespace()).collect();
        assert_eq!(rejoined, letters, "script: {script}");
        if let Some(width) = max_width {
            assert!(lines.iter().all(|l| l.chars().count() <= width));
        }
    }
}

#[test]
fn candidate_lines_reconstruct_the_script_without_delimiters() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let alphabet: Vec<char> = "abcXYZ019$#\"'(@)-&你好世界“《".chars().collect();
    let delimiters: Vec<char> = "?,.;:!…？，。、；：！".chars().collect();

    for _ in 0..ROUNDS {
        let mut words = Vec::new();
        for _ in 0..rng.gen_range(1..12) {
            let len = rng.gen_range(1..=6);
            let mut word: String = (0..len)
                .map(|_| *alphabet.choose(&mut rng).unwrap_or(&'a'))
                .collect();
            if rng.gen_bool(0.4) {
                word.push(*delimiters.choose(&mut rng).unwrap_or(&'.'));
            }
            words.push(word);
        }
        let script = words.join(" ");

        let expected: String = normalize_whitespace(&script)
            .chars()
            .filter(|&c| !is_line_delimiter(c))
            .collect();
        let lines = segment(&script, None);
        assert_eq!(lines.join(" "), expected, "script: {script}");
    }
}

#[test]
fn zero_width_config_is_rejected() {
    let config = AlignerConfig {
        max_subtitle_width: 0,
        ..AlignerConfig::default()
    };
    let result = align_script("a. b. c.", &[], &config);
    assert!(matches!(result, Err(AlignmentError::InvalidConfig { .. })));
}
