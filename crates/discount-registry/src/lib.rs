//! Discount code registry implementation.
//!
//! This crate provides [`RegistryService`], the authoritative set of
//! outstanding codes guarded by a single reader/writer lock and kept in sync
//! with a [`SnapshotStore`](discount_core::SnapshotStore). Core types are
//! re-exported from `discount_core`.

pub mod error;
pub mod service;
pub mod settings;

pub use discount_core::{CodeRegistry, DiscountCode, Redemption, RegistryError};
pub use error::SettingsError;
pub use service::RegistryService;
pub use settings::RegistrySettings;
