//! Best-score persistence.
//!
//! The controller reads the best score once when it is created and writes it
//! back only when a round beats it.

use std::cell::Cell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{debug, warn};

use crate::config::storage::BEST_SCORE_KEY;
use crate::error::StoreError;

pub trait BestScoreStore {
    /// Stored best score, or `None` if nothing was ever written.
    fn read(&self) -> Result<Option<u32>, StoreError>;

    fn write(&mut self, best: u32) -> Result<(), StoreError>;
}

/// In-process store. Clones share the same value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Rc<Cell<Option<u32>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(best: u32) -> Self {
        Self { value: Rc::new(Cell::new(Some(best))) }
    }

    pub fn value(&self) -> Option<u32> {
        self.value.get()
    }
}

impl BestScoreStore for MemoryStore {
    fn read(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value.get())
    }

    fn write(&mut self, best: u32) -> Result<(), StoreError> {
        self.value.set(Some(best));
        Ok(())
    }
}

/// Store backed by a small JSON object on disk, e.g.
/// `{"whack-a-mole-highscore": 120}`. Other keys in the file are preserved.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn load(&self) -> Result<BTreeMap<String, u32>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

impl BestScoreStore for FileStore {
    fn read(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.load()?.get(BEST_SCORE_KEY).copied())
    }

    fn write(&mut self, best: u32) -> Result<(), StoreError> {
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(StoreError::Malformed(err)) => {
                warn!("[Store] Replacing malformed score file {}: {}", self.path.display(), err);
                BTreeMap::new()
            }
            Err(err) => return Err(err),
        };
        entries.insert(BEST_SCORE_KEY.to_string(), best);

        // Write next to the target and rename over it so the file is never half written.
        let tmp = self.tmp_path();
        fs::write(&tmp, serde_json::to_string_pretty(&entries)?)?;
        fs::rename(&tmp, &self.path)?;
        debug!("[Store] Best score {} written to {}", best, self.path.display());
        Ok(())
    }
}
