//! Storage capability injected by the host. The store never calls these
//! itself; a host saves after each mutation and loads once on startup.

use crate::Snapshot;
use crate::error::PersistError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub trait Persister: Send + Sync {
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError>;

    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, PersistError>;
}

/// Snapshot kept as a JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFilePersister {
    path: PathBuf,
}

impl JsonFilePersister {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persister for JsonFilePersister {
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let json = snapshot.to_json_pretty()?;
        // Write then rename so a crash mid-write never leaves a truncated file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(Snapshot::from_json(&raw)?))
    }
}

/// In-process stand-in for durable storage. Holds the serialized form so
/// loads go through the same decoding as the file persister.
#[derive(Debug, Default)]
pub struct MemoryPersister {
    slot: Mutex<Option<String>>,
}

impl MemoryPersister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load raw content, as if a previous session had written it.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }
}

impl Persister for MemoryPersister {
    fn save(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let json = snapshot.to_json()?;
        let mut slot = self.slot.lock().map_err(|_| PersistError::Poisoned)?;
        *slot = Some(json);
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, PersistError> {
        let slot = self.slot.lock().map_err(|_| PersistError::Poisoned)?;
        match slot.as_deref() {
            Some(raw) => Ok(Some(Snapshot::from_json(raw)?)),
            None => Ok(None),
        }
    }
}
