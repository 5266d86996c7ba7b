use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::model::{DocumentFailure, SourceEntry};
use crate::segment::{Record, Segmenter};
use crate::util::sha256_hex;

#[derive(Debug)]
pub(super) struct StructuredDocument {
    pub record: Record,
    pub source: SourceEntry,
}

#[derive(Debug, Default)]
pub(super) struct BatchOutcome {
    pub documents: Vec<StructuredDocument>,
    pub failures: Vec<DocumentFailure>,
}

/// Files matching `pattern`, sorted by path so output order is reproducible.
pub(super) fn discover_inputs(pattern: &str) -> Result<Vec<PathBuf>> {
    let matches =
        glob::glob(pattern).with_context(|| format!("invalid input glob: {pattern}"))?;

    let mut paths = Vec::new();
    for entry in matches {
        let path = entry.with_context(|| format!("failed to read glob entry for {pattern}"))?;
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();
    paths.dedup();

    if paths.is_empty() {
        bail!("no input files match {pattern}");
    }

    Ok(paths)
}

/// Structures every document on the current rayon pool. A document that
/// cannot be read is reported and left out; the rest still go through.
pub(super) fn structure_batch(segmenter: &Segmenter, paths: &[PathBuf]) -> BatchOutcome {
    let results = paths
        .par_iter()
        .map(|path| {
            structure_file(segmenter, path).map_err(|error| DocumentFailure {
                path: path.display().to_string(),
                reason: format!("{error:#}"),
            })
        })
        .collect::<Vec<_>>();

    let mut outcome = BatchOutcome::default();
    for result in results {
        match result {
            Ok(document) => outcome.documents.push(document),
            Err(failure) => {
                warn!(path = %failure.path, reason = %failure.reason, "skipping document");
                outcome.failures.push(failure);
            }
        }
    }

    outcome
}

fn structure_file(segmenter: &Segmenter, path: &Path) -> Result<StructuredDocument> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let sha256 = sha256_hex(&bytes);
    let content = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;

    let file_path = path.display().to_string();
    let record = segmenter.structure(&file_path, &content);
    debug!(
        path = %file_path,
        header_only = record.fields().all(|(_, value)| value.is_empty()),
        "structured document"
    );

    Ok(StructuredDocument {
        record,
        source: SourceEntry {
            path: file_path,
            sha256,
        },
    })
}
