//! Error sinks for failed chunks.
//!
//! When a chunk fails anywhere in its two-stage round trip, the chunk
//! text is parked under a content-derived key so a later run (or a
//! human) can retry it. Keys are stable: the same chunk always lands
//! under the same name, so repeated failures overwrite rather than
//! accumulate.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use sha2::{Digest, Sha256};

use graphmill_domain::ErrorSink;

/// Derives the sink key for a chunk: the first 16 hex characters of
/// its SHA-256 digest.
pub fn content_key(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut key = hex::encode(digest);
    key.truncate(16);
    key
}

/// Sink that writes each failed chunk to `<dir>/<key>.txt`.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    /// Creates a sink rooted at `dir`. The directory is created lazily
    /// on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ErrorSink for FileSink {
    type Error = std::io::Error;

    fn write(&self, key: &str, content: &str) -> Result<(), Self::Error> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.dir.join(format!("{key}.txt")), content)
    }
}

/// In-memory sink for tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(key, content)` pairs written so far, in write order.
    pub fn entries(&self) -> Vec<(String, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// The keys written so far.
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }
}

impl ErrorSink for MemorySink {
    type Error = std::io::Error;

    fn write(&self, key: &str, content: &str) -> Result<(), Self::Error> {
        self.entries
            .lock()
            .unwrap()
            .push((key.to_string(), content.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_key_is_stable_and_short() {
        let a = content_key("some chunk");
        let b = content_key("some chunk");
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_chunks_get_distinct_keys() {
        assert_ne!(content_key("alpha"), content_key("beta"));
    }

    #[test]
    fn file_sink_writes_under_the_key() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("errors"));
        sink.write("deadbeef", "lost chunk").unwrap();
        let stored = std::fs::read_to_string(dir.path().join("errors/deadbeef.txt")).unwrap();
        assert_eq!(stored, "lost chunk");
    }

    #[test]
    fn file_sink_overwrites_on_repeat_failure() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        sink.write("k", "first").unwrap();
        sink.write("k", "second").unwrap();
        let stored = std::fs::read_to_string(dir.path().join("k.txt")).unwrap();
        assert_eq!(stored, "second");
    }

    #[test]
    fn memory_sink_records_entries_in_order() {
        let sink = MemorySink::new();
        sink.write("a", "1").unwrap();
        sink.write("b", "2").unwrap();
        assert_eq!(sink.keys(), vec!["a", "b"]);
    }
}
