//! Per-collection fetch state with request fencing.
//!
//! Each entity kind gets one [`CollectionState`]: the held sequence plus an
//! `Idle -> Loading -> {Loaded | Errored}` phase. Fetches are asynchronous
//! and may race; without fencing a slow earlier fetch resolving after a
//! faster later one would overwrite newer data. Every `begin_fetch` issues a
//! monotonically increasing token, and a resolution is applied only if it
//! carries the latest token issued for this state.

use crate::{entity::Identified, merge::merge_by_id};

/// Fence token for one in-flight fetch.
///
/// Tokens are only meaningful for the state that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// What a successful fetch does to the held sequence.
///
/// The policy is chosen per call site and must be applied consistently
/// there: the same page always resolves with the same policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// The fetched sequence wins outright.
    #[default]
    Replace,
    /// Merge-dedupe the fetched sequence into existing state. Existing
    /// elements win on duplicate ids, so locally-added entries survive a
    /// refetch.
    MergeById,
}

/// Lifecycle phase of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// Holds the human-readable message extracted from the failure.
    Errored(String),
}

/// Holds one entity kind's collection and its fetch lifecycle.
#[derive(Debug, Clone)]
pub struct CollectionState<T> {
    items: Vec<T>,
    phase: FetchPhase,
    /// Highest token issued so far; resolutions below it are stale.
    latest_token: u64,
}

impl<T> Default for CollectionState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CollectionState<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            phase: FetchPhase::Idle,
            latest_token: 0,
        }
    }

    /// The held sequence. Views filter this through the tombstone sets
    /// before rendering.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FetchPhase::Loading
    }

    /// The current error message, if the last fetch failed.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            FetchPhase::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Start a fetch: enter `Loading`, clear any previous error, and issue
    /// the fence token the eventual resolution must present.
    pub fn begin_fetch(&mut self) -> RequestToken {
        self.latest_token += 1;
        self.phase = FetchPhase::Loading;
        RequestToken(self.latest_token)
    }

    fn is_stale(&self, token: RequestToken) -> bool {
        token.0 != self.latest_token
    }

    /// Resolve a failed fetch. Returns false if the token is stale, in
    /// which case nothing changes.
    pub fn resolve_err(&mut self, token: RequestToken, message: impl Into<String>) -> bool {
        if self.is_stale(token) {
            return false;
        }
        self.phase = FetchPhase::Errored(message.into());
        true
    }

    /// Append a locally created entity. Allowed in any phase and never
    /// touches the phase or error.
    pub fn add_local(&mut self, entity: T) {
        self.items.push(entity);
    }

    /// Drop all held items without touching the phase.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Identified + Clone> CollectionState<T> {
    /// Resolve a successful fetch under the given policy. Returns false if
    /// the token is stale, in which case nothing changes.
    pub fn resolve_ok(&mut self, token: RequestToken, fetched: Vec<T>, policy: FetchPolicy) -> bool {
        if self.is_stale(token) {
            return false;
        }

        self.items = match policy {
            FetchPolicy::Replace => fetched,
            FetchPolicy::MergeById => merge_by_id(&self.items, &fetched),
        };
        self.phase = FetchPhase::Loaded;
        true
    }

    /// Replace the element with the same id, if present.
    pub fn replace(&mut self, entity: T) {
        if let Some(slot) = self.items.iter_mut().find(|e| e.id() == entity.id()) {
            *slot = entity;
        }
    }
}
