use thiserror::Error;

/// Errors raised while reading or writing a code snapshot.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("snapshot not found: {0}")]
    NotFound(String),
    #[error("snapshot i/o failed: {0}")]
    Io(String),
    #[error("snapshot is malformed: {0}")]
    Malformed(String),
}

/// Reasons a batch generation request was refused.
///
/// None of these leave the code set modified.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("requested {requested} codes, at most {max} allowed per request")]
    CountExceeded { requested: u16, max: u16 },
    #[error("code length {length} outside allowed range {min}..={max}")]
    LengthOutOfRange { length: u8, min: u8, max: u8 },
    #[error("only {available} unused codes of length {length} remain, requested {requested}")]
    CodespaceExhausted {
        length: u8,
        requested: u16,
        available: u64,
    },
    #[error("code generator failed: {0}")]
    Generator(String),
}
