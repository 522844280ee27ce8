use crate::types::TokenSpacing;

/// Decoded token text accumulated since the last matched line.
///
/// Fragments are stored exactly as they were appended to `text` (including
/// the joining space for space-delimited scripts), so summing fragment widths
/// gives character offsets into the buffered text.
#[derive(Debug, Clone)]
pub(crate) struct TokenBuffer {
    spacing: TokenSpacing,
    text: String,
    fragments: Vec<String>,
}

impl TokenBuffer {
    pub(crate) fn new(spacing: TokenSpacing) -> Self {
        Self {
            spacing,
            text: String::new(),
            fragments: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, decoded: &str) {
        let fragment = match self.spacing {
            TokenSpacing::Concatenate => decoded.to_string(),
            TokenSpacing::SpaceDelimited => {
                let word = decoded.trim();
                if word.is_empty() {
                    return;
                }
                if self.text.is_empty() {
                    word.to_string()
                } else {
                    format!(" {word}")
                }
            }
        };
        self.text.push_str(&fragment);
        self.fragments.push(fragment);
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.fragments.clear();
    }
}
