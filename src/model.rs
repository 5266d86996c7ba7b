use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    pub path: String,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFailure {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureCounts {
    pub matched_count: usize,
    pub structured_count: usize,
    pub failed_count: usize,
    pub dated_count: usize,
    pub header_only_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldFill {
    pub field: String,
    pub filled: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub finished_at: String,
    pub input_glob: String,
    pub output_path: String,
    pub counts: StructureCounts,
    pub field_fill: Vec<FieldFill>,
    pub failures: Vec<DocumentFailure>,
    pub sources: Vec<SourceEntry>,
}
