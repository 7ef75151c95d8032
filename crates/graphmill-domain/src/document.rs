//! Input document shapes
//!
//! Documents arrive pre-cleaned from an external parser as ordered fragment
//! lists grouped by source file. The pipeline only depends on this shape;
//! how the fragments were produced is out of scope.

use serde::{Deserialize, Serialize};

/// One cleaned text fragment of a source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Fragment kind as tagged by the upstream cleaner, e.g.
    /// "NarrativeText" or "Formula".
    pub kind: String,
    /// The cleaned text.
    pub text: String,
    /// Source file the fragment came from.
    pub source_file: String,
}

/// One logical input document: all fragments of a source file, in order,
/// plus the name its output artifact should carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedDocument {
    /// Deterministic output filename derived from the source filename.
    pub output_name: String,
    /// Ordered fragments making up the document body.
    pub fragments: Vec<TextFragment>,
}

impl GroupedDocument {
    /// Create a document from its parts.
    pub fn new(output_name: impl Into<String>, fragments: Vec<TextFragment>) -> Self {
        Self {
            output_name: output_name.into(),
            fragments,
        }
    }
}
