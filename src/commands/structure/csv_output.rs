use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::WriterBuilder;

use crate::segment::{ALL_LABELS, Record};
use crate::util::ensure_parent_directory;

const LEADING_COLUMNS: [&str; 4] = ["filePath", "HEADER", "START", "END"];

pub(super) fn header_row() -> Vec<&'static str> {
    LEADING_COLUMNS
        .into_iter()
        .chain(ALL_LABELS.iter().map(|label| label.as_str()))
        .collect()
}

fn record_row(record: &Record) -> Vec<&str> {
    let mut row = vec![
        record.file_path.as_str(),
        record.header.as_str(),
        record.start.as_deref().unwrap_or(""),
        record.end.as_deref().unwrap_or(""),
    ];
    row.extend(ALL_LABELS.iter().map(|label| record.field(*label)));
    row
}

pub(super) fn write_records<'a>(
    path: &Path,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<()> {
    ensure_parent_directory(path)?;
    let file = File::create(path)
        .with_context(|| format!("failed to create csv file: {}", path.display()))?;

    render_records(file, records)
        .with_context(|| format!("failed to write csv file: {}", path.display()))
}

pub(super) fn render_records<'a, W: Write>(
    sink: W,
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<()> {
    let mut writer = WriterBuilder::new().from_writer(sink);
    writer.write_record(header_row())?;
    for record in records {
        writer.write_record(record_row(record))?;
    }
    writer.flush()?;

    Ok(())
}
