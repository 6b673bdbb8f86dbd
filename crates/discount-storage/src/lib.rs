//! Snapshot stores for the discount code registry.
//!
//! [`JsonFileStore`] keeps the snapshot in a single JSON file and is the
//! production backend. [`InMemoryStore`] keeps it in process memory and is
//! meant for tests and ephemeral runs.

pub mod json;
pub mod memory;

pub use discount_core::{SnapshotStore, StorageError};
pub use json::JsonFileStore;
pub use memory::InMemoryStore;
