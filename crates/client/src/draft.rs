//! Local draft persistence.
//!
//! The draft is the in-progress [`ResponseDocument`]. It is written on every
//! edit and read back when a session opens. Persistence is best-effort:
//! nothing in this module returns an error to the caller.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use ikigai_core::responses::ResponseDocument;

/// Storage key used when the caller does not pick one.
pub const DEFAULT_DRAFT_KEY: &str = "ikigai-journal-responses";

/// Key-value storage for draft documents.
pub trait DraftStore {
    /// Load the draft stored under `key`, or [`ResponseDocument::initial`]
    /// when there is none or it cannot be read.
    fn load(&mut self, key: &str) -> ResponseDocument;

    /// Store `doc` under `key`. Failures are absorbed by the store.
    fn save(&mut self, key: &str, doc: &ResponseDocument);
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Drafts held for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryDraftStore {
    drafts: HashMap<String, ResponseDocument>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ResponseDocument> {
        self.drafts.get(key)
    }
}

impl DraftStore for MemoryDraftStore {
    fn load(&mut self, key: &str) -> ResponseDocument {
        self.drafts.get(key).cloned().unwrap_or_else(ResponseDocument::initial)
    }

    fn save(&mut self, key: &str, doc: &ResponseDocument) {
        self.drafts.insert(key.to_owned(), doc.clone());
    }
}

// ---------------------------------------------------------------------------
// File-backed
// ---------------------------------------------------------------------------

/// Drafts stored as one JSON file per key (`<dir>/<key>.json`).
///
/// Keys are encoded into a single file name, so no key can address a path
/// outside `dir`. Writes go to a temporary file in `dir` that is renamed
/// over the draft, leaving the previous draft intact if a write is cut
/// short. The first failed write switches the store to memory for the rest of its
/// lifetime. Edits keep working and a single warning is logged.
#[derive(Debug)]
pub struct FileDraftStore {
    dir: PathBuf,
    fallback: Option<MemoryDraftStore>,
}

impl FileDraftStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fallback: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `true` once a write has failed and drafts live in memory only.
    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    /// Path of the file holding the draft for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }

    fn read_file(&self, key: &str) -> ResponseDocument {
        let path = self.path_for(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return ResponseDocument::initial();
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Could not read draft");
                return ResponseDocument::initial();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Discarding unreadable draft");
            ResponseDocument::initial()
        })
    }

    fn write_file(&self, key: &str, doc: &ResponseDocument) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_vec_pretty(doc)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&json)?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.path_for(key))?;
        Ok(())
    }
}

/// Map a draft key to a file stem.
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte becomes
/// `%XX`. Separators and dots are always escaped.
fn encode_key(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' => stem.push(byte as char),
            other => {
                let _ = write!(stem, "%{other:02X}");
            }
        }
    }
    stem
}

impl DraftStore for FileDraftStore {
    fn load(&mut self, key: &str) -> ResponseDocument {
        if let Some(doc) = self.fallback.as_ref().and_then(|memory| memory.get(key)) {
            return doc.clone();
        }
        self.read_file(key)
    }

    fn save(&mut self, key: &str, doc: &ResponseDocument) {
        if let Some(memory) = self.fallback.as_mut() {
            memory.save(key, doc);
            return;
        }

        if let Err(e) = self.write_file(key, doc) {
            tracing::warn!(
                dir = %self.dir.display(),
                error = %e,
                "Draft storage unavailable, keeping drafts in memory"
            );
            let mut memory = MemoryDraftStore::new();
            memory.save(key, doc);
            self.fallback = Some(memory);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use ikigai_core::responses::{PromptIndex, PromptSection, ResponseField};

    fn edited() -> ResponseDocument {
        ResponseDocument::initial().update(
            ResponseField::Prompt(PromptSection::WorldNeeds, PromptIndex::Two),
            "clean water",
        )
    }

    /// A directory path that can never be created: its parent is a file.
    fn blocked_dir(tmp: &tempfile::TempDir) -> PathBuf {
        let blocker = tmp.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();
        blocker.join("drafts")
    }

    #[test]
    fn memory_store_returns_initial_for_unknown_key() {
        let mut store = MemoryDraftStore::new();
        assert_eq!(store.load(DEFAULT_DRAFT_KEY), ResponseDocument::initial());
    }

    #[test]
    fn memory_store_keeps_drafts_per_key() {
        let mut store = MemoryDraftStore::new();
        store.save("a", &edited());
        assert_eq!(store.load("a"), edited());
        assert_eq!(store.load("b"), ResponseDocument::initial());
    }

    #[test]
    fn file_store_missing_file_loads_initial() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileDraftStore::new(tmp.path());
        assert_eq!(store.load(DEFAULT_DRAFT_KEY), ResponseDocument::initial());
    }

    #[test]
    fn file_store_survives_reopen() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileDraftStore::new(tmp.path().join("nested"));
        store.save(DEFAULT_DRAFT_KEY, &edited());
        assert!(store.path_for(DEFAULT_DRAFT_KEY).exists());

        let mut reopened = FileDraftStore::new(tmp.path().join("nested"));
        assert_eq!(reopened.load(DEFAULT_DRAFT_KEY), edited());
    }

    #[test]
    fn file_store_corrupt_file_loads_initial() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileDraftStore::new(tmp.path());
        std::fs::write(store.path_for(DEFAULT_DRAFT_KEY), "{ definitely not json").unwrap();

        assert_eq!(store.load(DEFAULT_DRAFT_KEY), ResponseDocument::initial());
    }

    #[test]
    fn file_store_wrong_shape_loads_initial() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileDraftStore::new(tmp.path());
        std::fs::write(store.path_for(DEFAULT_DRAFT_KEY), r#"{"step1": 4}"#).unwrap();

        assert_eq!(store.load(DEFAULT_DRAFT_KEY), ResponseDocument::initial());
    }

    #[test]
    fn default_key_maps_to_plain_file_name() {
        let store = FileDraftStore::new("/drafts");
        assert_eq!(
            store.path_for(DEFAULT_DRAFT_KEY),
            Path::new("/drafts/ikigai-journal-responses.json")
        );
    }

    #[test]
    fn file_store_keeps_path_like_keys_inside_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("drafts");
        let mut store = FileDraftStore::new(&dir);

        for key in ["../escape", "a/b", "..", "/abs", "c:\\win"] {
            let path = store.path_for(key);
            assert_eq!(path.parent(), Some(dir.as_path()), "key {key:?} left the dir");

            store.save(key, &edited());
            assert!(!store.is_degraded());
            assert_eq!(store.load(key), edited());
        }

        assert!(!tmp.path().join("escape.json").exists());
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 5);
    }

    #[test]
    fn file_store_overwrite_leaves_no_temp_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileDraftStore::new(tmp.path());

        store.save(DEFAULT_DRAFT_KEY, &ResponseDocument::initial());
        store.save(DEFAULT_DRAFT_KEY, &edited());

        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("ikigai-journal-responses.json")]);
        assert_eq!(store.load(DEFAULT_DRAFT_KEY), edited());
    }

    #[test]
    fn file_store_degrades_to_memory_when_unwritable() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileDraftStore::new(blocked_dir(&tmp));

        store.save(DEFAULT_DRAFT_KEY, &edited());
        assert!(store.is_degraded());
        assert_eq!(store.load(DEFAULT_DRAFT_KEY), edited());

        let later = edited().update(ResponseField::Ikigai, "Teach");
        store.save(DEFAULT_DRAFT_KEY, &later);
        assert_eq!(store.load(DEFAULT_DRAFT_KEY), later);
    }
}
