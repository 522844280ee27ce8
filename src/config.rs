use std::path::Path;

use serde::Deserialize;

use crate::error::AlignmentError;
use crate::types::{SubtitleStyle, TokenSpacing};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AlignerConfig {
    pub max_subtitle_width: usize,
    pub output_style: SubtitleStyle,
    pub is_space_delimited: bool,
    /// Alignments producing fewer cues than this are treated as shortfalls.
    pub min_cue_count: usize,
}

impl AlignerConfig {
    /// Wide enough that no real line gets split.
    pub const DEFAULT_MAX_SUBTITLE_WIDTH: usize = 9999;
    pub const DEFAULT_MIN_CUE_COUNT: usize = 3;

    pub fn load(path: &Path) -> Result<Self, AlignmentError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AlignmentError::io("read aligner config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| AlignmentError::json("parse aligner config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AlignmentError> {
        if self.max_subtitle_width == 0 {
            return Err(AlignmentError::invalid_config(
                "max_subtitle_width must be a positive integer",
            ));
        }
        Ok(())
    }

    pub fn token_spacing(&self) -> TokenSpacing {
        TokenSpacing::from_space_delimited(self.is_space_delimited)
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            max_subtitle_width: Self::DEFAULT_MAX_SUBTITLE_WIDTH,
            output_style: SubtitleStyle::Srt,
            is_space_delimited: true,
            min_cue_count: Self::DEFAULT_MIN_CUE_COUNT,
        }
    }
}
