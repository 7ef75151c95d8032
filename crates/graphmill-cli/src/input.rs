//! Cleaned-input reading and grouping.
//!
//! The upstream cleaning step emits one JSON array of typed text
//! fragments, each tagged with the file it came from. Only prose-like
//! fragment kinds are worth extracting from; the rest (titles, page
//! headers, table scraps) are filtered out before grouping.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use graphmill_domain::{GroupedDocument, TextFragment};
use serde::Deserialize;
use tracing::info;

use crate::error::{CliError, Result};

/// Fragment kinds that carry extractable prose.
const ACCEPTED_KINDS: [&str; 3] = ["Formula", "NarrativeText", "SingleString"];

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(rename = "type")]
    kind: String,
    text: String,
    metadata: RawMetadata,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    filename: String,
}

/// Reads the cleaned fragments and groups them per source file, in
/// first-appearance order. Each group gets a deterministic output
/// filename derived from its source.
pub fn read_documents(path: &Path) -> Result<Vec<GroupedDocument>> {
    if !path.is_file() {
        return Err(CliError::InputNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path)?;
    let items: Vec<RawItem> = serde_json::from_str(&contents)?;
    info!(items = items.len(), "read cleaned input");

    let mut documents: Vec<GroupedDocument> = Vec::new();
    let mut index_by_source: HashMap<String, usize> = HashMap::new();
    for item in items {
        if !ACCEPTED_KINDS.contains(&item.kind.as_str()) {
            continue;
        }
        let source = item.metadata.filename;
        let fragment = TextFragment {
            kind: item.kind,
            text: item.text,
            source_file: source.clone(),
        };
        match index_by_source.get(&source) {
            Some(&i) => documents[i].fragments.push(fragment),
            None => {
                index_by_source.insert(source.clone(), documents.len());
                documents.push(GroupedDocument::new(
                    convert_filename(&source),
                    vec![fragment],
                ));
            }
        }
    }
    info!(documents = documents.len(), "grouped fragments by source");
    Ok(documents)
}

/// Derives the output filename for a source file:
/// `report.pdf` becomes `report_pdf.json`, while `notes.txt` (and
/// hidden files) get a short hash suffix to keep distinct inputs from
/// colliding, e.g. `notes_0482.json`.
pub fn convert_filename(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string());

    if let Some(base) = name.strip_prefix('.') {
        return format!("{}_{}.json", base, simple_hash(&name));
    }
    match name.rsplit_once('.') {
        Some((base, "txt")) => format!("{}_{}.json", base, simple_hash(&name)),
        Some((base, ext)) => format!("{base}_{ext}.json"),
        None => format!("{name}.json"),
    }
}

/// Four decimal digits summed from the character codes of `name`.
fn simple_hash(name: &str) -> String {
    let sum: u32 = name.chars().map(|c| c as u32).sum();
    format!("{:04}", sum % 10_000)
}
