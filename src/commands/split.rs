//! Splits one OCR dump of consecutive event cards into one file per card.
//!
//! Cards are separated by a decorative banner that tesseract renders as
//! strings of K, E and R. Each corpus garbles it differently, so the banner
//! test is a `SeparatorRule`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::SplitArgs;
use crate::util::ensure_parent_directory;

pub trait SeparatorRule {
    fn is_separator(&self, line: &str) -> bool;
}

/// Banner renderings seen with tesseract 4 and the default English model.
pub struct TesseractBannerRule;

const BANNER_FRAGMENTS: [&str; 11] = [
    "ISOS IO IO",
    "SUNECREERE EE",
    "REECE EERE",
    "TIKI HARRIE",
    "HERRERA KR",
    "REIRAIIAA",
    "HARKER",
    "KEKE KHER",
    "MRE MERE",
    "AISIAR ATI",
    "KAKA RIKER",
];
const BANNER_PREFIXES: [&str; 3] = ["THAKUR", "HREM", "KEARAUKKIUK"];
const BANNER_LINES: [&str; 2] = ["RAKES", "RUKIA"];

const KER_COUNT_LIMIT: usize = 15;
const KER_RATIO_LIMIT: f64 = 0.6;
const KER_RATIO_MIN_CHARS: usize = 8;

impl SeparatorRule for TesseractBannerRule {
    fn is_separator(&self, line: &str) -> bool {
        if BANNER_FRAGMENTS.iter().any(|fragment| line.contains(fragment))
            || BANNER_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
            || BANNER_LINES.iter().any(|banner| *banner == line)
        {
            return true;
        }

        let length = line.chars().count();
        let ker = line
            .chars()
            .filter(|character| matches!(*character, 'K' | 'E' | 'R'))
            .count();
        ker > KER_COUNT_LIMIT
            || (length > KER_RATIO_MIN_CHARS && ker as f64 / length as f64 > KER_RATIO_LIMIT)
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitOutcome {
    /// Zero-based line index and text of every separator.
    pub separators: Vec<(usize, String)>,
    /// Text between separators, blank lines removed. A segment may be empty.
    pub segments: Vec<String>,
}

pub fn split_events(content: &str, rule: &dyn SeparatorRule) -> SplitOutcome {
    let mut outcome = SplitOutcome::default();
    let mut current = Vec::<&str>::new();

    for (index, line) in content.split('\n').enumerate() {
        if rule.is_separator(line) {
            outcome.separators.push((index, line.to_string()));
            outcome.segments.push(current.join("\n"));
            current.clear();
        } else if !line.trim().is_empty() {
            current.push(line);
        }
    }
    outcome.segments.push(current.join("\n"));

    outcome
}

/// `dir/name.txt` and 3 give `dir/name-3.txt`.
fn numbered_path(path: &Path, number: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(extension) => format!("{stem}-{number}.{}", extension.to_string_lossy()),
        None => format!("{stem}-{number}"),
    };
    path.with_file_name(file_name)
}

pub fn run(args: SplitArgs) -> Result<()> {
    let content = fs::read_to_string(&args.input_path)
        .with_context(|| format!("failed to read {}", args.input_path.display()))?;

    let outcome = split_events(&content, &TesseractBannerRule);
    for (index, line) in &outcome.separators {
        info!(
            input = %args.input_path.display(),
            line_number = index + 1,
            line = %line,
            "separator"
        );
    }

    ensure_parent_directory(&args.output_path)?;
    let mut written = 0usize;
    for (index, segment) in outcome.segments.iter().enumerate() {
        if segment.is_empty() {
            continue;
        }
        let path = numbered_path(&args.output_path, index + 1);
        fs::write(&path, segment)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written += 1;
    }

    info!(
        input = %args.input_path.display(),
        separators = outcome.separators.len(),
        events_written = written,
        "split completed"
    );

    Ok(())
}
