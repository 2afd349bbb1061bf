//! Local identifier allocation.
//!
//! Entities created before the server has assigned an id still need one for
//! list keys and tombstones. Timestamp-derived ids collide under rapid
//! successive creations, so the allocator is a plain monotonic counter over
//! the negative range, disjoint from the server's positive id sequence. If
//! the backend ever becomes authoritative the server-assigned id replaces
//! the local one on the next full sync.

use crate::EntityId;

/// Issues locally-unique negative ids.
#[derive(Debug, Clone, Default)]
pub struct LocalIdAllocator {
    issued: u32,
}

impl LocalIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id: -1, -2, -3, ...
    pub fn allocate(&mut self) -> EntityId {
        self.issued += 1;
        -EntityId::from(self.issued)
    }

    /// How many ids have been issued.
    pub fn issued(&self) -> u32 {
        self.issued
    }
}
