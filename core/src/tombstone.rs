//! Tombstone sets for locally-deleted entities.
//!
//! The backing API is a mock that accepts DELETE calls without persisting
//! them, so a delete only sticks if the client remembers it. Each deletable
//! entity kind gets a persisted set of integer ids; anything in the set is
//! filtered from display. The set is a visibility filter, not a deletion
//! record: it is never reconciled with server truth and its scope is one
//! state file on one machine.

use crate::{
    error::{Error, Result},
    EntityId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The entity kinds that can be tombstoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Album,
    Photo,
}

impl EntityKind {
    /// Key under which this kind's tombstone array is persisted.
    pub fn storage_key(&self) -> &'static str {
        match self {
            EntityKind::Album => "deletedAlbums",
            EntityKind::Photo => "deletedPhotos",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Album => write!(f, "album"),
            EntityKind::Photo => write!(f, "photo"),
        }
    }
}

/// A set of tombstoned ids for one entity kind.
///
/// BTreeSet keeps membership idempotent and serialization order
/// deterministic. Stored duplicates collapse on load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TombstoneSet {
    ids: BTreeSet<EntityId>,
}

impl TombstoneSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an id. Returns true if it was not already present.
    pub fn insert(&mut self, id: EntityId) -> bool {
        self.ids.insert(id)
    }

    /// Check membership.
    pub fn contains(&self, id: EntityId) -> bool {
        self.ids.contains(&id)
    }

    /// Iterate ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.ids.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Decode from the persisted form: a literal JSON array of integers.
    ///
    /// `None` (absent key) decodes as the empty set, never an error.
    pub fn from_json(raw: Option<&str>) -> Result<Self> {
        let Some(raw) = raw else {
            return Ok(Self::new());
        };

        let ids: Vec<EntityId> = serde_json::from_str(raw)
            .map_err(|e| Error::InvalidTombstoneData(e.to_string()))?;

        Ok(Self {
            ids: ids.into_iter().collect(),
        })
    }

    /// Encode to the persisted form: a JSON array of integers, ascending.
    pub fn to_json(&self) -> String {
        let ids: Vec<EntityId> = self.ids.iter().copied().collect();
        // Serializing a Vec<i64> cannot fail.
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }
}

impl FromIterator<EntityId> for TombstoneSet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
