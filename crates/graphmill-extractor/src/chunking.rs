//! Byte-bounded document chunking.
//!
//! A grouped document is flattened into a single buffer (each fragment
//! followed by a newline) and then sliced into windows of at most
//! `budget` bytes. Windows never split a UTF-8 code point: when the
//! byte limit would land mid-character the window is shortened to the
//! last complete boundary. The one exception is a single code point
//! wider than the budget itself, which is emitted whole.

use graphmill_domain::GroupedDocument;

use crate::error::PipelineError;

/// Flattens `doc` and slices it into chunks of at most `budget` bytes.
///
/// Returns an empty vector for a document with no text. A zero budget
/// is rejected up front.
pub fn chunk(budget: usize, doc: &GroupedDocument) -> Result<Vec<String>, PipelineError> {
    if budget == 0 {
        return Err(PipelineError::InvalidChunkBudget(budget));
    }

    let mut buffer = String::new();
    for fragment in &doc.fragments {
        buffer.push_str(&fragment.text);
        buffer.push('\n');
    }
    if buffer.is_empty() {
        return Ok(Vec::new());
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < buffer.len() {
        let mut end = (start + budget).min(buffer.len());
        while end > start && !buffer.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // A single code point wider than the budget; take it whole
            // rather than stall.
            end = start + 1;
            while end < buffer.len() && !buffer.is_char_boundary(end) {
                end += 1;
            }
        }
        chunks.push(buffer[start..end].to_string());
        start = end;
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphmill_domain::TextFragment;
    use proptest::prelude::*;

    fn doc_of(texts: &[&str]) -> GroupedDocument {
        let fragments = texts
            .iter()
            .map(|t| TextFragment {
                kind: "NarrativeText".to_string(),
                text: t.to_string(),
                source_file: "test.pdf".to_string(),
            })
            .collect();
        GroupedDocument::new("test.json", fragments)
    }

    #[test]
    fn zero_budget_is_rejected() {
        let err = chunk(0, &doc_of(&["hello"])).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidChunkBudget(0)));
    }

    #[test]
    fn empty_document_yields_no_chunks() {
        let chunks = chunk(16, &doc_of(&[])).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn fragments_are_joined_with_newlines() {
        let chunks = chunk(1024, &doc_of(&["alpha", "beta"])).unwrap();
        assert_eq!(chunks, vec!["alpha\nbeta\n".to_string()]);
    }

    #[test]
    fn ascii_text_splits_on_exact_byte_windows() {
        // 23 characters plus the trailing newline: three windows of 8.
        let chunks = chunk(8, &doc_of(&["AAAAAAAABBBBBBBBCCCCCCC"])).unwrap();
        assert_eq!(chunks, vec!["AAAAAAAA", "BBBBBBBB", "CCCCCCC\n"]);
    }

    #[test]
    fn multibyte_characters_are_never_split() {
        // Each CJK character is 3 bytes; a 4-byte budget must fall back
        // to one character per chunk rather than cut mid-sequence.
        let chunks = chunk(4, &doc_of(&["日本語"])).unwrap();
        for c in &chunks {
            assert!(c.len() <= 4);
            assert!(std::str::from_utf8(c.as_bytes()).is_ok());
        }
        assert_eq!(chunks.concat(), "日本語\n");
    }

    #[test]
    fn oversized_code_point_is_emitted_whole() {
        // A 4-byte emoji cannot fit a 2-byte budget; it comes through intact.
        let chunks = chunk(2, &doc_of(&["🦀"])).unwrap();
        assert_eq!(chunks, vec!["🦀".to_string(), "\n".to_string()]);
    }

    proptest! {
        #[test]
        fn chunks_reassemble_to_the_flattened_buffer(
            texts in proptest::collection::vec(".{0,40}", 0..5),
            budget in 1usize..64,
        ) {
            let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
            let doc = doc_of(&refs);
            let mut expected = String::new();
            for t in &texts {
                expected.push_str(t);
                expected.push('\n');
            }
            let chunks = chunk(budget, &doc).unwrap();
            prop_assert_eq!(chunks.concat(), expected);
        }

        #[test]
        fn chunks_respect_the_budget_up_to_one_code_point(
            text in ".{0,120}",
            budget in 1usize..32,
        ) {
            let doc = doc_of(&[&text]);
            for c in chunk(budget, &doc).unwrap() {
                // A lone oversized code point is the only permitted overrun.
                prop_assert!(c.len() <= budget || c.chars().count() == 1);
            }
        }
    }
}
