use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use crate::cli::StructureArgs;
use crate::model::{FieldFill, StructureCounts, StructureRunManifest};
use crate::segment::{ALL_LABELS, Segmenter};
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty};

mod batch;
mod csv_output;

use batch::*;
use csv_output::*;

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: StructureArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));
    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| args.output_path.with_extension("manifest.json"));

    info!(input_glob = %args.input_glob, run_id = %run_id, "starting structure");

    let paths = discover_inputs(&args.input_glob)?;
    info!(document_count = paths.len(), "discovered input documents");

    let segmenter = Segmenter::new()?;
    let outcome = match args.jobs {
        Some(jobs) => rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build worker pool")?
            .install(|| structure_batch(&segmenter, &paths)),
        None => structure_batch(&segmenter, &paths),
    };

    write_records(
        &args.output_path,
        outcome.documents.iter().map(|document| &document.record),
    )?;
    info!(
        path = %args.output_path.display(),
        rows = outcome.documents.len(),
        "wrote record table"
    );

    let manifest = build_manifest(&args, run_id, started_at, paths.len(), outcome);
    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote run manifest");
    info!(
        structured = manifest.counts.structured_count,
        failed = manifest.counts.failed_count,
        dated = manifest.counts.dated_count,
        "structure completed"
    );

    Ok(())
}

fn build_manifest(
    args: &StructureArgs,
    run_id: String,
    started_at: String,
    matched_count: usize,
    outcome: BatchOutcome,
) -> StructureRunManifest {
    let records = outcome
        .documents
        .iter()
        .map(|document| &document.record)
        .collect::<Vec<_>>();

    let counts = StructureCounts {
        matched_count,
        structured_count: records.len(),
        failed_count: outcome.failures.len(),
        dated_count: records
            .iter()
            .filter(|record| record.start.is_some() && record.end.is_some())
            .count(),
        header_only_count: records
            .iter()
            .filter(|record| record.fields().all(|(_, value)| value.is_empty()))
            .count(),
    };

    let field_fill = ALL_LABELS
        .iter()
        .map(|label| FieldFill {
            field: label.as_str().to_string(),
            filled: records
                .iter()
                .filter(|record| !record.field(*label).is_empty())
                .count(),
        })
        .collect();

    StructureRunManifest {
        manifest_version: MANIFEST_VERSION,
        run_id,
        started_at,
        finished_at: now_utc_string(),
        input_glob: args.input_glob.clone(),
        output_path: args.output_path.display().to_string(),
        counts,
        field_fill,
        failures: outcome.failures,
        sources: outcome
            .documents
            .into_iter()
            .map(|document| document.source)
            .collect(),
    }
}
