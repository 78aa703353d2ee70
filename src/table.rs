//! The review table: one CSV row per annotation with its generated surrogate.
//!
//! Reviewers may fill in `manual_surrogate`, which the rewrite step prefers over the generated
//! value, and tick `checked`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::annotation::Annotation;
use crate::document::DocumentSurrogates;
use crate::error::TableError;

const HEADER: [&str; 9] = [
    "doc_id",
    "ann_id",
    "text",
    "start",
    "end",
    "tag",
    "surrogate",
    "manual_surrogate",
    "checked",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurrogateRecord {
    pub doc_id: String,
    pub ann_id: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub tag: String,
    pub surrogate: Option<String>,
    pub manual_surrogate: Option<String>,
    #[serde(deserialize_with = "deserialize_flag", default)]
    pub checked: bool,
}

impl SurrogateRecord {
    pub fn from_pair(annotation: &Annotation, surrogate: Option<&str>) -> Self {
        Self {
            doc_id: annotation.doc_id.clone(),
            ann_id: annotation.ann_id.clone(),
            text: annotation.text.clone(),
            start: annotation.start,
            end: annotation.end,
            tag: annotation.tag.clone(),
            surrogate: surrogate.map(String::from),
            manual_surrogate: None,
            checked: false,
        }
    }

    /// The manual surrogate when one was entered, the generated one otherwise.
    pub fn effective_surrogate(&self) -> Option<&str> {
        match self.manual_surrogate.as_deref() {
            Some(manual) if !manual.is_empty() => Some(manual),
            _ => self.surrogate.as_deref(),
        }
    }

    pub fn annotation(&self) -> Annotation {
        Annotation::new(self.text.clone(), self.start, self.end, self.tag.clone())
            .with_doc_id(self.doc_id.clone())
            .with_ann_id(self.ann_id.clone())
    }
}

// Spreadsheet tools write `TRUE`, pandas writes `True`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected true or false, got '{}'",
            other
        ))),
    }
}

/// Table rows for every annotation of every document, documents in order and rows by start.
pub fn records_for_documents(documents: &[DocumentSurrogates]) -> Vec<SurrogateRecord> {
    documents
        .iter()
        .flat_map(|document| {
            document
                .annotation_surrogate_pairs()
                .into_iter()
                .map(|(annotation, surrogate)| SurrogateRecord::from_pair(annotation, surrogate))
        })
        .collect()
}

pub fn write_table<W: Write>(writer: W, records: &[SurrogateRecord]) -> Result<(), TableError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    // Written explicitly so an empty table still has its columns.
    writer.write_record(HEADER)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_table<R: Read>(reader: R) -> Result<Vec<SurrogateRecord>, TableError> {
    let mut reader = csv::Reader::from_reader(reader);
    let records = reader
        .deserialize()
        .collect::<Result<Vec<SurrogateRecord>, csv::Error>>()?;
    Ok(records)
}

pub fn write_table_file(path: &Path, records: &[SurrogateRecord]) -> Result<(), TableError> {
    write_table(File::create(path)?, records)
}

pub fn read_table_file(path: &Path) -> Result<Vec<SurrogateRecord>, TableError> {
    read_table(File::open(path)?)
}

/// Rows grouped by document, each group sorted by start offset.
pub fn group_by_document(
    records: Vec<SurrogateRecord>,
) -> BTreeMap<String, Vec<SurrogateRecord>> {
    let mut groups: BTreeMap<String, Vec<SurrogateRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.doc_id.clone()).or_default().push(record);
    }
    for rows in groups.values_mut() {
        rows.sort_by_key(|row| row.start);
    }
    groups
}
