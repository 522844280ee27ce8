use std::path::Path;

use serde::Deserialize;

use crate::error::AlignmentError;

/// Styling for the burned-in subtitle overlay handed to the video encoder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SubtitleOverlay {
    pub fonts_dir: Option<String>,
    pub font_name: Option<String>,
    pub font_size: Option<u32>,
    /// `#RRGGBB` or an ASS `&H00BBGGRR` literal.
    pub text_color: Option<String>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<u32>,
    pub margin_bottom: Option<u32>,
}

impl SubtitleOverlay {
    /// Builds a `subtitles=` filter expression for the given subtitle file.
    pub fn filter_expression(&self, subtitle_path: &Path) -> Result<String, AlignmentError> {
        let mut filter = format!("subtitles={}", subtitle_path.display());
        if let Some(dir) = &self.fonts_dir {
            filter.push_str(&format!(":fontsdir={dir}"));
        }

        let mut style: Vec<String> = Vec::new();
        let styled = self.fonts_dir.is_some() || self.font_name.is_some();
        if styled {
            if let Some(name) = &self.font_name {
                style.push(format!("FontName={name}"));
            }
            if let Some(size) = self.font_size {
                style.push(format!("FontSize={size}"));
            }
            if let Some(color) = &self.text_color {
                style.push(format!("PrimaryColour={}", hex_to_ass_color(color)?));
            }
            if let Some(color) = &self.stroke_color {
                style.push(format!("OutlineColour={}", hex_to_ass_color(color)?));
            }
            if let Some(width) = self.stroke_width {
                style.push(format!("Outline={width}"));
            }
        }
        style.push("Alignment=2".to_string());
        style.push("WrapStyle=1".to_string());
        if styled {
            if let Some(margin) = self.margin_bottom {
                style.push(format!("MarginV={margin}"));
            }
        }

        filter.push_str(&format!(":force_style='{}'", style.join(",")));
        Ok(filter)
    }
}

/// Converts `#RRGGBB` to the `&H00BBGGRR` order ASS expects.
pub fn hex_to_ass_color(color: &str) -> Result<String, AlignmentError> {
    if color.starts_with("&H00") {
        return Ok(color.to_string());
    }
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AlignmentError::invalid_input(format!(
            "invalid hex color {color:?}, expected #RRGGBB"
        )));
    }
    let (r, rest) = hex.split_at(2);
    let (g, b) = rest.split_at(2);
    Ok(format!("&H00{b}{g}{r}"))
}
