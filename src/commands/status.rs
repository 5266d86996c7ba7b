use std::fs;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::StructureRunManifest;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_path = &args.manifest_path;
    info!(manifest = %manifest_path.display(), "status requested");

    if !manifest_path.exists() {
        warn!(path = %manifest_path.display(), "structure run manifest missing");
        return Ok(());
    }

    let raw = fs::read(manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    let manifest: StructureRunManifest = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

    info!(
        run_id = %manifest.run_id,
        started_at = %manifest.started_at,
        finished_at = %manifest.finished_at,
        input_glob = %manifest.input_glob,
        output_path = %manifest.output_path,
        matched = manifest.counts.matched_count,
        structured = manifest.counts.structured_count,
        failed = manifest.counts.failed_count,
        dated = manifest.counts.dated_count,
        header_only = manifest.counts.header_only_count,
        "loaded structure run manifest"
    );

    for fill in &manifest.field_fill {
        info!(field = %fill.field, filled = fill.filled, "field fill");
    }

    for failure in &manifest.failures {
        warn!(path = %failure.path, reason = %failure.reason, "document failed");
    }

    Ok(())
}
