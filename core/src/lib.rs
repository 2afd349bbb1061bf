//! # Shutter Core
//!
//! State reconciliation logic for a client that browses users, albums, and
//! photos backed by a REST API whose mutations do not survive reloads.
//!
//! This crate holds the pure logic only. It merges server-fetched
//! collections with locally created entities, hides locally deleted entities
//! behind persisted tombstone sets, and tracks per-collection fetch state
//! with request fencing so a stale response can never clobber a newer one.
//!
//! ## Design Principles
//!
//! - **No IO**: the core has no knowledge of HTTP, files, or platform
//! - **Deterministic**: merging and filtering are order-stable and pure
//! - **Testable**: plain data in, plain data out, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Entities
//!
//! [`User`], [`Album`], and [`Photo`] mirror the REST API's wire shapes.
//! Everything keyed by identity implements [`Identified`], so the merge and
//! filter utilities work over any entity kind.
//!
//! ### Merge-dedupe
//!
//! [`merge_by_id`] unions two sequences keyed by id. The first occurrence of
//! an id wins and order is preserved: first-sequence elements, then the
//! second sequence's unseen ids appended.
//!
//! ### Tombstones
//!
//! Deleting an entity only hides it. [`TombstoneSet`] is a persisted set of
//! integer ids per [`EntityKind`]; [`filter_deleted`] drops tombstoned ids
//! from any collection before display. The backing API never learns about
//! these deletions, so the set is a client-only visibility filter.
//!
//! ### Fetch state
//!
//! [`CollectionState`] is the per-kind container: `Idle -> Loading ->
//! {Loaded | Errored}`. Every fetch gets a monotonically increasing
//! [`RequestToken`]; resolutions carrying anything but the latest token are
//! discarded.
//!
//! ## Quick Start
//!
//! ```rust
//! use shutter_core::{
//!     merge_by_id, filter_deleted, Album, CollectionState, FetchPolicy,
//!     TombstoneSet,
//! };
//!
//! let server = vec![
//!     Album { id: 1, user_id: 7, title: "Vacation".into() },
//!     Album { id: 2, user_id: 7, title: "Pets".into() },
//! ];
//! let local = vec![
//!     Album { id: 2, user_id: 7, title: "Pets (edited)".into() },
//!     Album { id: -1, user_id: 7, title: "Drafts".into() },
//! ];
//!
//! // Server's id 2 wins, local-only id -1 is appended.
//! let merged = merge_by_id(&server, &local);
//! assert_eq!(merged.len(), 3);
//! assert_eq!(merged[1].title, "Pets");
//!
//! // Tombstoned ids never surface.
//! let mut deleted = TombstoneSet::new();
//! deleted.insert(2);
//! let visible = filter_deleted(&merged, &deleted);
//! assert_eq!(visible.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, -1]);
//!
//! // Fetch state with fencing.
//! let mut albums = CollectionState::new();
//! let stale = albums.begin_fetch();
//! let fresh = albums.begin_fetch();
//! assert!(!albums.resolve_ok(stale, server.clone(), FetchPolicy::Replace));
//! assert!(albums.resolve_ok(fresh, server, FetchPolicy::Replace));
//! ```
//!
//! ## Persistence
//!
//! Tombstone sets serialize as literal JSON integer arrays via
//! [`TombstoneSet::to_json`] and [`TombstoneSet::from_json`]; a missing
//! stored value decodes as the empty set. The IO layer decides where the
//! arrays live.

pub mod entity;
pub mod error;
pub mod ids;
pub mod merge;
pub mod state;
pub mod tombstone;

// Re-export main types at crate root
pub use entity::{Album, Identified, NewAlbum, NewPhoto, Photo, User};
pub use error::Error;
pub use ids::LocalIdAllocator;
pub use merge::{filter_deleted, merge_by_id};
pub use state::{CollectionState, FetchPhase, FetchPolicy, RequestToken};
pub use tombstone::{EntityKind, TombstoneSet};

/// Identifier type shared by all entities. Server-assigned ids are positive;
/// locally allocated ids are negative (see [`LocalIdAllocator`]).
pub type EntityId = i64;
