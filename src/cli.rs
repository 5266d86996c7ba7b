use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "conflict-records",
    version,
    about = "Structure OCR'd conflict event cards into a single table"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a multi-event OCR dump into one file per event card.
    Split(SplitArgs),
    /// Recover labeled fields from per-event files and write a CSV.
    Structure(StructureArgs),
    /// Summarize the last structure run.
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    #[arg(long)]
    pub input_path: PathBuf,

    /// Event files are named after this path with `-<n>` before the extension.
    #[arg(long)]
    pub output_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct StructureArgs {
    #[arg(long, default_value = "5-ocr-split/*.txt")]
    pub input_glob: String,

    #[arg(long, default_value = "6-csv/entries.csv")]
    pub output_path: PathBuf,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    /// Worker threads; defaults to one per core.
    #[arg(long)]
    pub jobs: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "6-csv/entries.manifest.json")]
    pub manifest_path: PathBuf,
}
