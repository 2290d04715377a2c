//! Persists the whole forest to one JSON file, in full, every time.
//!
//! Blocking bodies run on a background worker thread so the interaction
//! path never waits on disk; completion comes back as a [`StoreEvent`] on
//! a channel the interaction thread drains. A shared mutex gate
//! serializes overlapping load/save bodies against each other — ordering
//! across distinct mutations stays last-writer-wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use crate::error::{ErrorCode, Result, StorageError};
use crate::logger::Logger;
use crate::node::Forest;

pub const STORE_FILE: &str = "prompts.json";

/// Completion of a background store call, delivered back to the
/// interaction thread.
#[derive(Debug)]
pub enum StoreEvent {
    Loaded(Result<Forest>),
    Saved(Result<usize>),
}

#[derive(Clone)]
pub struct Store {
    path: PathBuf,
    gate: Arc<Mutex<()>>,
    logger: Logger,
}

impl Store {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, logger: Logger) -> Self {
        Self {
            path: path.into(),
            gate: Arc::new(Mutex::new(())),
            logger,
        }
    }

    /// Store rooted at the fixed per-user location:
    /// `<platform data dir>/spellbook/prompts.json`.
    pub fn at_default_path(logger: Logger) -> Result<Self> {
        let data_dir = dirs::data_dir().ok_or_else(|| StorageError::DataDir {
            code: ErrorCode::NoDataDir,
            message: "no per-user data directory on this platform".to_string(),
        })?;
        Ok(Self::new(data_dir.join("spellbook").join(STORE_FILE), logger))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and decodes the whole resource. A missing or malformed file
    /// is an error; the caller's policy is an empty forest, not an abort.
    pub fn load(&self) -> Result<Forest> {
        let _gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        let data = fs::read(&self.path).map_err(|e| StorageError::Load {
            code: ErrorCode::FileReadFailed,
            message: format!("read failed: {e}"),
            path: self.path.clone(),
        })?;
        serde_json::from_slice(&data).map_err(|e| StorageError::Load {
            code: ErrorCode::DecodeFailed,
            message: format!("decode failed: {e}"),
            path: self.path.clone(),
        })
    }

    /// Encodes the forest and overwrites the resource in full — no
    /// partial writes, no versioning. Returns the top-level item count.
    pub fn save(&self, forest: &Forest) -> Result<usize> {
        let _gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        let data = serde_json::to_vec_pretty(forest).map_err(|e| StorageError::Save {
            code: ErrorCode::EncodeFailed,
            message: format!("encode failed: {e}"),
            path: self.path.clone(),
        })?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Save {
                code: ErrorCode::FileWriteFailed,
                message: format!("create data dir failed: {e}"),
                path: parent.to_path_buf(),
            })?;
        }
        fs::write(&self.path, data).map_err(|e| StorageError::Save {
            code: ErrorCode::FileWriteFailed,
            message: format!("write failed: {e}"),
            path: self.path.clone(),
        })?;
        Ok(forest.len())
    }

    /// Runs [`Store::load`] on a worker thread and delivers the result as
    /// a [`StoreEvent::Loaded`]. Failures are logged here; the receiver
    /// may still inspect them. The send is best-effort: a caller that has
    /// gone away just discards the completion.
    pub fn load_in_background(&self, events: Sender<StoreEvent>) -> JoinHandle<()> {
        let store = self.clone();
        thread::spawn(move || {
            let result = store.load();
            if let Err(e) = &result {
                store.logger.error("store", "load", &e.to_string());
            }
            events.send(StoreEvent::Loaded(result)).ok();
        })
    }

    /// Runs [`Store::save`] on a worker thread and delivers the result as
    /// a [`StoreEvent::Saved`]. The forest is moved in; the in-memory
    /// copy held by the caller stays the source of truth either way.
    pub fn save_in_background(&self, forest: Forest, events: Sender<StoreEvent>) -> JoinHandle<()> {
        let store = self.clone();
        thread::spawn(move || {
            let result = store.save(&forest);
            if let Err(e) = &result {
                store.logger.error("store", "save", &e.to_string());
            }
            events.send(StoreEvent::Saved(result)).ok();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Folder, Node, Prompt};
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> Store {
        Store::new(dir.path().join(STORE_FILE), Logger::new(1))
    }

    fn nested_forest() -> Forest {
        let mut sub = Folder::new("Sub");
        sub.children.push(Node::Prompt(Prompt::new("Q", "bye")));

        let mut root = Folder::new("Root");
        root.children.push(Node::Prompt(Prompt::new("P", "hi")));
        root.children.push(Node::Folder(sub));

        vec![Node::Folder(root), Node::Prompt(Prompt::new("loose", "x"))]
    }

    #[test]
    fn round_trip_reconstructs_the_forest_exactly() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let forest = nested_forest();

        let count = store.save(&forest).unwrap();
        assert_eq!(count, 2);

        // Same nodes, same ids, same nesting, same child order.
        assert_eq!(store.load().unwrap(), forest);
    }

    #[test]
    fn load_of_a_missing_resource_fails() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Load { code: ErrorCode::FileReadFailed, .. }
        ));
    }

    #[test]
    fn load_of_malformed_data_fails_whole() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        fs::write(store.path(), b"{not a forest").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(
            err,
            StorageError::Load { code: ErrorCode::DecodeFailed, .. }
        ));
    }

    #[test]
    fn save_creates_the_parent_directory_on_demand() {
        let dir = TempDir::new().unwrap();
        let store = Store::new(
            dir.path().join("spellbook").join(STORE_FILE),
            Logger::new(1),
        );

        store.save(&nested_forest()).unwrap();
        assert!(store.path().is_file());
    }

    #[test]
    fn save_overwrites_in_full() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        store.save(&nested_forest()).unwrap();
        let smaller = vec![Node::Prompt(Prompt::new("only", ""))];
        store.save(&smaller).unwrap();

        assert_eq!(store.load().unwrap(), smaller);
    }

    #[test]
    fn background_calls_deliver_completions_on_the_channel() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let forest = nested_forest();
        let (tx, rx) = mpsc::channel();

        store.save_in_background(forest.clone(), tx.clone());
        match rx.recv().unwrap() {
            StoreEvent::Saved(Ok(count)) => assert_eq!(count, forest.len()),
            other => panic!("expected Saved(Ok(_)), got {other:?}"),
        }

        store.load_in_background(tx);
        match rx.recv().unwrap() {
            StoreEvent::Loaded(Ok(loaded)) => assert_eq!(loaded, forest),
            other => panic!("expected Loaded(Ok(_)), got {other:?}"),
        }
    }

    #[test]
    fn background_load_failure_is_reported_not_panicked() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let (tx, rx) = mpsc::channel();

        let worker = store.load_in_background(tx);
        assert!(matches!(rx.recv().unwrap(), StoreEvent::Loaded(Err(_))));
        worker.join().unwrap();
    }

    #[test]
    fn overlapping_saves_never_tear_the_resource() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let (tx, rx) = mpsc::channel();

        let mut workers = Vec::new();
        for i in 0..8 {
            let body = "x".repeat(4096);
            let forest = vec![Node::Prompt(Prompt::new(format!("p{i}"), body))];
            workers.push(store.save_in_background(forest, tx.clone()));
        }
        for worker in workers {
            worker.join().unwrap();
        }
        for _ in 0..8 {
            assert!(matches!(rx.recv().unwrap(), StoreEvent::Saved(Ok(1))));
        }

        // Whichever writer won, the file decodes as one whole forest.
        let survivor = store.load().unwrap();
        assert_eq!(survivor.len(), 1);
    }
}
