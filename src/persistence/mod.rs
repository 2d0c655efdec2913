//! Best-score persistence
//!
//! The engine talks to a [`BestScoreStore`] port: the best score is read once
//! at startup and written once per game-over transition. Nothing else is
//! persisted.

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Where the best score lives between sessions
pub trait BestScoreStore: Send {
    /// Best score from a previous session; 0 when absent or unreadable
    fn load(&self) -> u32;

    /// Persist the best score
    fn save(&mut self, best: u32) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct BestScoreRecord {
    best: u32,
}

/// JSON file in the working directory (or wherever the CLI points it)
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BestScoreStore for FileStore {
    fn load(&self) -> u32 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            // Missing file is the normal first run
            Err(_) => return 0,
        };

        match serde_json::from_str::<BestScoreRecord>(&json) {
            Ok(record) => record.best,
            Err(e) => {
                warn!("ignoring unreadable best-score file {:?}: {}", self.path, e);
                0
            }
        }
    }

    fn save(&mut self, best: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {:?}", parent))?;
            }
        }

        let json = serde_json::to_string_pretty(&BestScoreRecord { best })
            .context("Failed to serialize best score")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write best score to {:?}", self.path))
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    best: u32,
    saves: u32,
}

/// In-memory store, shared by handle so tests can observe engine writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner { best, saves: 0 })),
        }
    }

    pub fn best(&self) -> u32 {
        self.inner.lock().expect("store lock poisoned").best
    }

    /// Number of times `save` has been called
    pub fn saves(&self) -> u32 {
        self.inner.lock().expect("store lock poisoned").saves
    }
}

impl BestScoreStore for MemoryStore {
    fn load(&self) -> u32 {
        self.best()
    }

    fn save(&mut self, best: u32) -> Result<()> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        inner.best = best;
        inner.saves += 1;
        Ok(())
    }
}
