//! Recovers labeled fields from one OCR'd event card.

mod fuzzy;
mod header_dates;
mod labels;
mod normalize;
mod primary;
mod record;
mod secondary;

use anyhow::Result;

pub use labels::{ALL_LABELS, FieldLabel};
pub use record::Record;

use header_dates::extract_start_end;
use normalize::TextNormalizer;
use primary::PrimarySegmenter;
use secondary::SecondarySegmenter;

/// Runs every stage over a document. Holds no per-document state, so one
/// instance is shared across worker threads.
pub struct Segmenter {
    normalizer: TextNormalizer,
    primary: PrimarySegmenter,
    secondary: Vec<SecondarySegmenter>,
}

impl Segmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            normalizer: TextNormalizer::new()?,
            primary: PrimarySegmenter::top_level(),
            secondary: SecondarySegmenter::composite_fields(),
        })
    }

    pub fn structure(&self, file_path: &str, content: &str) -> Record {
        let mut record = Record::new(file_path);
        let cleaned = self.normalizer.normalize(content);

        self.primary.segment(&cleaned, &mut record);
        for segmenter in &self.secondary {
            segmenter.segment(&mut record);
        }
        extract_start_end(&mut record);
        record.trim_values();

        record
    }
}
