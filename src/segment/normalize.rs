use anyhow::{Context, Result};
use regex::Regex;

/// Cleans OCR glyph noise before segmentation.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    dash_run: Regex,
    spaced_slash: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dash_run: Regex::new(r"[-–—=~]+").context("failed to compile dash-run regex")?,
            spaced_slash: Regex::new(r"[ \t]*/[ \t]*")
                .context("failed to compile spaced-slash regex")?,
        })
    }

    /// Any run of dash-like glyphs becomes one `-`; slashes lose their
    /// surrounding spaces. Line breaks are left alone.
    pub fn normalize(&self, text: &str) -> String {
        let dashes = self.dash_run.replace_all(text, "-");
        self.spaced_slash.replace_all(&dashes, "/").into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_dash_glyphs_collapse_to_one_hyphen() {
        let normalizer = TextNormalizer::new().expect("normalizer should build");
        assert_eq!(normalizer.normalize("A —–- B"), "A - B");
        assert_eq!(normalizer.normalize("DEATHS=~ 400"), "DEATHS- 400");
    }

    #[test]
    fn slashes_lose_surrounding_spaces() {
        let normalizer = TextNormalizer::new().expect("normalizer should build");
        assert_eq!(normalizer.normalize("A / B"), "A/B");
        assert_eq!(normalizer.normalize("A/B"), "A/B");
        assert_eq!(normalizer.normalize("A /\nB"), "A/\nB");
    }

    #[test]
    fn normalizing_twice_changes_nothing() {
        let normalizer = TextNormalizer::new().expect("normalizer should build");
        let once = normalizer.normalize("MODE-— Civil war / insurgency");
        assert_eq!(normalizer.normalize(&once), once);
    }
}
