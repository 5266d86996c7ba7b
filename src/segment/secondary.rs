use super::fuzzy::{FuzzyLabelSet, LabelMatcher};
use super::labels::FieldLabel;
use super::record::Record;

pub const SUB_LABEL_FLOOR: f64 = 0.5;

/// Re-reads a composite field word by word and moves text that follows an
/// embedded sub-label into that sub-label's field.
pub struct SecondarySegmenter<M = FuzzyLabelSet> {
    outer: FieldLabel,
    matcher: M,
}

impl SecondarySegmenter<FuzzyLabelSet> {
    pub fn for_field(outer: FieldLabel) -> Self {
        Self::with_matcher(outer, FuzzyLabelSet::new(outer.nested_labels()))
    }

    /// One segmenter per composite field of the card layout.
    pub fn composite_fields() -> Vec<Self> {
        [FieldLabel::Mode, FieldLabel::Deaths]
            .into_iter()
            .map(Self::for_field)
            .collect()
    }
}

impl<M: LabelMatcher> SecondarySegmenter<M> {
    pub fn with_matcher(outer: FieldLabel, matcher: M) -> Self {
        Self { outer, matcher }
    }

    pub fn segment(&self, record: &mut Record) {
        let value = record.take_field(self.outer);
        if value.is_empty() {
            return;
        }

        let mut current = self.outer;
        for word in value.split_whitespace() {
            // A hit on the label already in effect is value text, e.g. the
            // "Forces" in "FORCE- Ground Forces".
            let switch_to = self
                .matcher
                .matches(word, SUB_LABEL_FLOOR)
                .first()
                .map(|candidate| candidate.label)
                .filter(|label| *label != current);

            match switch_to {
                Some(label) => current = label,
                None => record.append_word(current, word),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::fuzzy::CandidateMatch;

    fn record_with(label: FieldLabel, value: &str) -> Record {
        let mut record = Record::new("doc.txt");
        record.set_field(label, value);
        record
    }

    #[test]
    fn mode_value_splits_into_magnitude_and_combatants() {
        let mut record = record_with(
            FieldLabel::Mode,
            "Civil war\nMAGNITUDE- Major COMBATANTS- 20000 regulars",
        );
        SecondarySegmenter::for_field(FieldLabel::Mode).segment(&mut record);

        assert_eq!(record.field(FieldLabel::Mode), "Civil war");
        assert_eq!(record.field(FieldLabel::Magnitude), "Major");
        assert_eq!(record.field(FieldLabel::Combatants), "20000 regulars");
    }

    #[test]
    fn force_value_text_does_not_relabel_itself() {
        let mut record = record_with(FieldLabel::Deaths, "4000 FORCE- Ground Forces");
        SecondarySegmenter::for_field(FieldLabel::Deaths).segment(&mut record);

        assert_eq!(record.field(FieldLabel::Deaths), "4000");
        assert_eq!(record.field(FieldLabel::Force), "Ground Forces");
    }

    #[test]
    fn hits_on_the_current_label_leave_value_unsplit() {
        struct AlwaysDeaths;
        impl LabelMatcher for AlwaysDeaths {
            fn matches(&self, _query: &str, _min_score: f64) -> Vec<CandidateMatch> {
                vec![CandidateMatch {
                    score: 1.0,
                    label: FieldLabel::Deaths,
                }]
            }
        }

        let mut record = record_with(FieldLabel::Deaths, "about  500\nkilled");
        SecondarySegmenter::with_matcher(FieldLabel::Deaths, AlwaysDeaths).segment(&mut record);

        assert_eq!(record.field(FieldLabel::Deaths), "about 500 killed");
        assert!(record.field(FieldLabel::Force).is_empty());
    }

    #[test]
    fn empty_field_is_left_alone() {
        let mut record = Record::new("doc.txt");
        for segmenter in SecondarySegmenter::composite_fields() {
            segmenter.segment(&mut record);
        }
        assert!(record.fields().all(|(_, value)| value.is_empty()));
    }
}
