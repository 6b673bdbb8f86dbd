//! Core types and traits for the discount code registry.
//!
//! This crate provides the code value type, the in-memory code set and the
//! snapshot store contract shared by the generator, storage, registry and
//! hub crates.

pub mod code;
pub mod code_set;
pub mod error;
pub mod registry;
pub mod store;

pub use code::{DiscountCode, ALPHABET};
pub use code_set::CodeSet;
pub use error::{RegistryError, StorageError};
pub use registry::{CodeRegistry, Redemption};
pub use store::SnapshotStore;
