use crate::code_set::CodeSet;
use crate::error::StorageError;

/// Result type for snapshot store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable storage for full [`CodeSet`] snapshots.
///
/// Implementations are called synchronously from inside the registry's
/// writer lock, so a store never sees two concurrent `save` calls for the
/// same registry.
pub trait SnapshotStore: Send + Sync + 'static {
    /// Reads the most recent snapshot.
    ///
    /// Returns `Err(StorageError::NotFound)` if nothing has been saved yet.
    fn load(&self) -> Result<CodeSet>;

    /// Replaces the stored snapshot with the given set.
    fn save(&self, codes: &CodeSet) -> Result<()>;
}
