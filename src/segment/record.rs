use std::collections::BTreeMap;

use super::labels::{ALL_LABELS, FieldLabel};

/// Where unlabeled text lands.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Target {
    Header,
    Field(FieldLabel),
}

/// One structured event, built from one source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub file_path: String,
    pub header: String,
    pub start: Option<String>,
    pub end: Option<String>,
    fields: BTreeMap<FieldLabel, String>,
}

impl Record {
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            header: String::new(),
            start: None,
            end: None,
            fields: ALL_LABELS
                .iter()
                .map(|label| (*label, String::new()))
                .collect(),
        }
    }

    pub fn field(&self, label: FieldLabel) -> &str {
        self.fields.get(&label).map(String::as_str).unwrap_or("")
    }

    /// Fields in column order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldLabel, &str)> {
        self.fields.iter().map(|(label, value)| (*label, value.as_str()))
    }

    pub fn set_field(&mut self, label: FieldLabel, value: &str) {
        self.fields.insert(label, value.to_string());
    }

    pub fn take_field(&mut self, label: FieldLabel) -> String {
        self.fields
            .get_mut(&label)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn append_line(&mut self, target: Target, line: &str) {
        let buffer = match target {
            Target::Header => &mut self.header,
            Target::Field(label) => self.fields.entry(label).or_default(),
        };
        append_joined(buffer, line, '\n');
    }

    pub fn append_word(&mut self, label: FieldLabel, word: &str) {
        append_joined(self.fields.entry(label).or_default(), word, ' ');
    }

    /// Strips surrounding whitespace from every value.
    pub fn trim_values(&mut self) {
        trim_in_place(&mut self.file_path);
        trim_in_place(&mut self.header);
        for value in self.start.iter_mut().chain(self.end.iter_mut()) {
            trim_in_place(value);
        }
        for value in self.fields.values_mut() {
            trim_in_place(value);
        }
    }
}

fn append_joined(buffer: &mut String, piece: &str, separator: char) {
    if !buffer.is_empty() {
        buffer.push(separator);
    }
    buffer.push_str(piece);
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}
