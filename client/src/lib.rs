//! Shutter Client - REST data client and local state for the album browser.
//!
//! This crate is the IO layer around [`shutter_core`]: it talks to the REST
//! backend, persists tombstone sets to a local state file, and exposes a
//! [`Session`](session::Session) that a view layer drives. The backend is a
//! mock API whose mutations do not survive reloads, so deletes are recorded
//! client-side and filtered from every listing.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod storage;

pub use api::ApiClient;
pub use auth::Capability;
pub use config::Config;
pub use error::{ClientError, Result};
pub use session::Session;
pub use storage::{LocalStore, TombstoneStore};
