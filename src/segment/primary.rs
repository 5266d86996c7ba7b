//! Line-by-line field assignment.
//!
//! Each line either opens a field (its leading token fuzzily matches a label)
//! or continues the most recently opened one. Before any label is seen,
//! continuation text goes to the header.

use std::collections::BTreeSet;

use super::fuzzy::{CandidateMatch, FuzzyLabelSet, LabelMatcher};
use super::labels::{FieldLabel, TOP_LEVEL_LABELS};
use super::record::{Record, Target};

/// Above this a label is trusted even if it was already seen.
pub const HIGH_CONFIDENCE: f64 = 0.75;
/// Candidates must score strictly above this to be considered at all.
pub const LOW_CONFIDENCE_FLOOR: f64 = 0.3;

/// Labels begin within the first three characters of a line.
const MIN_LABEL_CHARS: usize = 3;

pub struct PrimarySegmenter<M = FuzzyLabelSet> {
    matcher: M,
    vocabulary: &'static [FieldLabel],
}

impl PrimarySegmenter<FuzzyLabelSet> {
    pub fn top_level() -> Self {
        Self::with_matcher(FuzzyLabelSet::new(&TOP_LEVEL_LABELS), &TOP_LEVEL_LABELS)
    }
}

impl<M: LabelMatcher> PrimarySegmenter<M> {
    pub fn with_matcher(matcher: M, vocabulary: &'static [FieldLabel]) -> Self {
        Self {
            matcher,
            vocabulary,
        }
    }

    pub fn segment(&self, text: &str, record: &mut Record) {
        let mut state = SegmentState::new(self.vocabulary);

        for line in text.lines() {
            let (label_text, value_text) = split_label(line);
            let candidates = self.candidates(label_text);

            match state.choose(&candidates) {
                Some(label) => {
                    state.accept(label);
                    if !value_text.is_empty() {
                        record.append_line(Target::Field(label), value_text);
                    }
                }
                None => record.append_line(state.continuation_target(), line),
            }
        }
    }

    fn candidates(&self, label_text: &str) -> Vec<CandidateMatch> {
        let mut candidates = self.matcher.matches(label_text, LOW_CONFIDENCE_FLOOR);
        candidates.retain(|candidate| candidate.score > LOW_CONFIDENCE_FLOOR);
        candidates
    }
}

struct SegmentState {
    carry_over: Option<FieldLabel>,
    available: BTreeSet<FieldLabel>,
}

impl SegmentState {
    fn new(vocabulary: &[FieldLabel]) -> Self {
        Self {
            carry_over: None,
            available: vocabulary.iter().copied().collect(),
        }
    }

    fn choose(&self, candidates: &[CandidateMatch]) -> Option<FieldLabel> {
        match candidates.first() {
            Some(top) if top.score > HIGH_CONFIDENCE => Some(top.label),
            _ => candidates
                .iter()
                .find(|candidate| self.available.contains(&candidate.label))
                .map(|candidate| candidate.label),
        }
    }

    fn accept(&mut self, label: FieldLabel) {
        self.available.remove(&label);
        self.carry_over = Some(label);
    }

    fn continuation_target(&self) -> Target {
        self.carry_over.map_or(Target::Header, Target::Field)
    }
}

/// Splits a line at the first whitespace found from the fourth character on;
/// that whitespace character belongs to neither half. Lines of one or two
/// characters are all label.
pub fn split_label(line: &str) -> (&str, &str) {
    if line.chars().count() <= 2 {
        return (line, "");
    }

    let boundary = line
        .char_indices()
        .enumerate()
        .find(|(position, (_, character))| {
            *position >= MIN_LABEL_CHARS && character.is_whitespace()
        })
        .map(|(_, found)| found);

    match boundary {
        Some((index, character)) => (&line[..index], &line[index + character.len_utf8()..]),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> Record {
        let mut record = Record::new("doc.txt");
        PrimarySegmenter::top_level().segment(text, &mut record);
        record
    }

    /// Hands out scripted candidates keyed by the label text.
    struct ScriptedMatcher(Vec<(&'static str, Vec<CandidateMatch>)>);

    impl LabelMatcher for ScriptedMatcher {
        fn matches(&self, query: &str, _min_score: f64) -> Vec<CandidateMatch> {
            self.0
                .iter()
                .find(|(key, _)| *key == query)
                .map(|(_, found)| found.clone())
                .unwrap_or_default()
        }
    }

    fn candidate(score: f64, label: FieldLabel) -> CandidateMatch {
        CandidateMatch { score, label }
    }

    #[test]
    fn split_label_stops_at_first_whitespace_after_three_chars() {
        assert_eq!(split_label("REGION(S)- Middle East"), ("REGION(S)-", "Middle East"));
        assert_eq!(split_label("A B CDE fgh"), ("A B", "CDE fgh"));
        assert_eq!(split_label("NOSPACE"), ("NOSPACE", ""));
        assert_eq!(split_label("ab"), ("ab", ""));
        assert_eq!(split_label(""), ("", ""));
    }

    #[test]
    fn continuation_line_joins_previous_field() {
        let record = segment("REGION(S)- Middle East\nand North Africa");
        assert_eq!(record.field(FieldLabel::Regions), "Middle East\nand North Africa");
        assert!(record.header.is_empty());
    }

    #[test]
    fn lines_before_any_label_go_to_header() {
        let record = segment("0042 BORDER WAR\n1932 1935\nDEATHS- 400");
        assert_eq!(record.header, "0042 BORDER WAR\n1932 1935");
        assert_eq!(record.field(FieldLabel::Deaths), "400");
    }

    #[test]
    fn garbled_labels_still_open_their_fields() {
        let record = segment("ACTOR5- Bolivia\nDEATH5- 100000\nSOURCE(S)- Richardson");
        assert_eq!(record.field(FieldLabel::Actors), "Bolivia");
        assert_eq!(record.field(FieldLabel::Deaths), "100000");
        assert_eq!(record.field(FieldLabel::Sources), "Richardson");
    }

    #[test]
    fn unlabeled_lines_are_kept_exactly_once() {
        let text = "001 WAR\nREGION(S)- Europe\nand the Balkans\nMODE- Interstate\nlong and bloody";
        let record = segment(text);

        let mut buffers = vec![record.header.clone()];
        buffers.extend(record.fields().map(|(_, value)| value.to_string()));
        for line in ["001 WAR", "and the Balkans", "long and bloody"] {
            let occurrences = buffers
                .iter()
                .flat_map(|buffer| buffer.lines())
                .filter(|stored| *stored == line)
                .count();
            assert_eq!(occurrences, 1, "line {line:?}");
        }
    }

    #[test]
    fn high_confidence_repeat_appends_instead_of_overwriting() {
        let record = segment("ISSUE(S)- Territory\nISSUE(S)- Religion");
        assert_eq!(record.field(FieldLabel::Issues), "Territory\nReligion");
    }

    #[test]
    fn consumed_label_is_not_reassigned_at_low_confidence() {
        let matcher = ScriptedMatcher(vec![
            ("LOC", vec![candidate(0.5, FieldLabel::Locations)]),
            ("MODE-", vec![candidate(1.0, FieldLabel::Mode)]),
        ]);
        let segmenter = PrimarySegmenter::with_matcher(matcher, &TOP_LEVEL_LABELS);
        let mut record = Record::new("doc.txt");
        segmenter.segment("LOC Paris\nMODE- Siege\nLOC again", &mut record);

        assert_eq!(record.field(FieldLabel::Locations), "Paris");
        assert_eq!(record.field(FieldLabel::Mode), "Siege\nLOC again");
    }

    #[test]
    fn low_confidence_picks_best_candidate_still_available() {
        let matcher = ScriptedMatcher(vec![
            ("NATION(S)-", vec![candidate(0.9, FieldLabel::Nations)]),
            (
                "NAT",
                vec![
                    candidate(0.6, FieldLabel::Nations),
                    candidate(0.4, FieldLabel::Locations),
                ],
            ),
        ]);
        let segmenter = PrimarySegmenter::with_matcher(matcher, &TOP_LEVEL_LABELS);
        let mut record = Record::new("doc.txt");
        segmenter.segment("NATION(S)- Peru\nNAT Lima", &mut record);

        assert_eq!(record.field(FieldLabel::Nations), "Peru");
        assert_eq!(record.field(FieldLabel::Locations), "Lima");
    }

    #[test]
    fn candidates_at_the_floor_are_ignored() {
        let matcher = ScriptedMatcher(vec![(
            "XYZ",
            vec![candidate(LOW_CONFIDENCE_FLOOR, FieldLabel::Regions)],
        )]);
        let segmenter = PrimarySegmenter::with_matcher(matcher, &TOP_LEVEL_LABELS);
        let mut record = Record::new("doc.txt");
        segmenter.segment("XYZ text", &mut record);

        assert_eq!(record.header, "XYZ text");
        assert!(record.field(FieldLabel::Regions).is_empty());
    }
}
