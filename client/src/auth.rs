//! Management capability.
//!
//! One designated visitor may create, edit, and delete content. The check
//! lives in the configuration layer; the rest of the code receives this
//! explicit flag and never compares user ids itself. This gates the UI, it
//! is not an access-control mechanism - the backend accepts anything.

/// Whether a session may perform management actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    can_manage: bool,
}

impl Capability {
    /// Full management: create, edit, delete.
    pub fn manager() -> Self {
        Self { can_manage: true }
    }

    /// Browse only.
    pub fn read_only() -> Self {
        Self { can_manage: false }
    }

    pub fn can_manage(&self) -> bool {
        self.can_manage
    }
}
