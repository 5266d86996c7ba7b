//! Approximate label lookup.
//!
//! Candidates are found by shared character n-grams (trigrams first, then
//! bigrams) and ranked by normalized Levenshtein similarity of the lowercased
//! strings, so a garbled "DEATHS-" such as "DEATH5-" still resolves.

use std::collections::HashMap;

use super::labels::FieldLabel;

const GRAM_SIZE_UPPER: usize = 3;
const GRAM_SIZE_LOWER: usize = 2;
const RESCORE_LIMIT: usize = 50;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CandidateMatch {
    pub score: f64,
    pub label: FieldLabel,
}

/// Ranks the labels of a fixed vocabulary against free text.
pub trait LabelMatcher: Send + Sync {
    /// Candidates with `score >= min_score`, best first. Empty when nothing
    /// clears the floor.
    fn matches(&self, query: &str, min_score: f64) -> Vec<CandidateMatch>;
}

#[derive(Debug, Clone)]
struct VocabularyEntry {
    label: FieldLabel,
    lowered: String,
    grams: Vec<GramVector>,
}

#[derive(Debug, Clone)]
struct GramVector {
    size: usize,
    counts: HashMap<String, usize>,
    magnitude: f64,
}

impl GramVector {
    fn new(value: &str, size: usize) -> Self {
        let mut counts = HashMap::<String, usize>::new();
        for gram in iterate_grams(value, size) {
            *counts.entry(gram).or_insert(0) += 1;
        }
        let magnitude = counts
            .values()
            .map(|count| (count * count) as f64)
            .sum::<f64>()
            .sqrt();

        Self {
            size,
            counts,
            magnitude,
        }
    }

    fn dot(&self, other: &GramVector) -> usize {
        self.counts
            .iter()
            .filter_map(|(gram, count)| other.counts.get(gram).map(|theirs| count * theirs))
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct FuzzyLabelSet {
    entries: Vec<VocabularyEntry>,
}

impl FuzzyLabelSet {
    pub fn new(labels: &[FieldLabel]) -> Self {
        let entries = labels
            .iter()
            .map(|label| {
                let lowered = label.as_str().to_lowercase();
                let grams = (GRAM_SIZE_LOWER..=GRAM_SIZE_UPPER)
                    .rev()
                    .map(|size| GramVector::new(&lowered, size))
                    .collect();
                VocabularyEntry {
                    label: *label,
                    lowered,
                    grams,
                }
            })
            .collect();

        Self { entries }
    }

    fn matches_for_size(&self, lowered: &str, size: usize, min_score: f64) -> Vec<CandidateMatch> {
        let query = GramVector::new(lowered, size);
        if query.magnitude == 0.0 {
            return Vec::new();
        }

        let mut cosine_ranked = self
            .entries
            .iter()
            .filter_map(|entry| {
                let vector = entry.grams.iter().find(|vector| vector.size == size)?;
                let dot = query.dot(vector);
                if dot == 0 {
                    return None;
                }
                Some((dot as f64 / (query.magnitude * vector.magnitude), entry))
            })
            .collect::<Vec<_>>();
        cosine_ranked.sort_by(|left, right| right.0.total_cmp(&left.0));
        cosine_ranked.truncate(RESCORE_LIMIT);

        let mut rescored = cosine_ranked
            .into_iter()
            .map(|(_, entry)| CandidateMatch {
                score: levenshtein_similarity(&entry.lowered, lowered),
                label: entry.label,
            })
            .collect::<Vec<_>>();
        rescored.sort_by(|left, right| right.score.total_cmp(&left.score));
        rescored.retain(|candidate| candidate.score >= min_score);
        rescored
    }
}

impl LabelMatcher for FuzzyLabelSet {
    fn matches(&self, query: &str, min_score: f64) -> Vec<CandidateMatch> {
        if query.is_empty() {
            return Vec::new();
        }

        let lowered = query.to_lowercase();
        if let Some(entry) = self.entries.iter().find(|entry| entry.lowered == lowered) {
            return vec![CandidateMatch {
                score: 1.0,
                label: entry.label,
            }];
        }

        for size in (GRAM_SIZE_LOWER..=GRAM_SIZE_UPPER).rev() {
            let found = self.matches_for_size(&lowered, size, min_score);
            if !found.is_empty() {
                return found;
            }
        }

        Vec::new()
    }
}

/// `1 - distance / longer length`, on characters.
fn levenshtein_similarity(stored: &str, query: &str) -> f64 {
    let longest = stored.chars().count().max(query.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - strsim::levenshtein(stored, query) as f64 / longest as f64
}

fn simplify(value: &str) -> String {
    value
        .chars()
        .filter(|character| {
            character.is_ascii_alphanumeric()
                || matches!(*character, ',' | ' ' | '\u{C0}'..='\u{FF}')
        })
        .collect()
}

fn iterate_grams(value: &str, size: usize) -> Vec<String> {
    let mut padded = format!("-{}-", simplify(value)).chars().collect::<Vec<char>>();
    while padded.len() < size {
        padded.push('-');
    }

    padded
        .windows(size)
        .map(|window| window.iter().collect())
        .collect()
}
