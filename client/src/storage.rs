//! Local persistence - the browser-storage stand-in.
//!
//! A single JSON object file maps string keys to raw string values, exactly
//! the shape of the key-value storage the original client relied on. The
//! tombstone store keeps the `deletedAlbums` / `deletedPhotos` keys, each
//! holding a literal JSON array of integers. State is read fresh at
//! construction and rewritten on every record; it is not live-synced with
//! other readers of the same file.

use crate::error::Result;
use shutter_core::{EntityId, EntityKind, TombstoneSet};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed string key-value store.
///
/// BTreeMap keeps the written file deterministic.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// Open the store, loading existing entries. A missing file is an empty
    /// store, never an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self { path, entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Set a key and rewrite the backing file.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.entries.insert(key.into(), value.into());
        self.flush()
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Persisted deletion tombstones for albums and photos.
///
/// Both sets are read from the backing store once, at construction. This is
/// a client-only visibility filter: the backend never learns about these
/// deletions and the sets are never reconciled with server truth.
#[derive(Debug)]
pub struct TombstoneStore {
    store: LocalStore,
    albums: TombstoneSet,
    photos: TombstoneSet,
}

impl TombstoneStore {
    /// Open the store, decoding both tombstone sets. Absent keys decode as
    /// empty sets; stored duplicate ids collapse.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let store = LocalStore::open(path)?;

        let albums = TombstoneSet::from_json(store.get(EntityKind::Album.storage_key()))?;
        let photos = TombstoneSet::from_json(store.get(EntityKind::Photo.storage_key()))?;

        Ok(Self {
            store,
            albums,
            photos,
        })
    }

    fn set_for(&self, kind: EntityKind) -> &TombstoneSet {
        match kind {
            EntityKind::Album => &self.albums,
            EntityKind::Photo => &self.photos,
        }
    }

    /// Record a deletion and persist the updated set immediately.
    pub fn record(&mut self, kind: EntityKind, id: EntityId) -> Result<()> {
        let set = match kind {
            EntityKind::Album => &mut self.albums,
            EntityKind::Photo => &mut self.photos,
        };

        if !set.insert(id) {
            // Already tombstoned; the file is current.
            return Ok(());
        }

        tracing::debug!(%kind, id, "recording tombstone");
        let encoded = self.set_for(kind).to_json();
        self.store.set(kind.storage_key(), encoded)
    }

    pub fn is_deleted(&self, kind: EntityKind, id: EntityId) -> bool {
        self.set_for(kind).contains(id)
    }

    /// The full tombstoned set for a kind.
    pub fn list(&self, kind: EntityKind) -> &TombstoneSet {
        self.set_for(kind)
    }
}
