use thiserror::Error;

/// Errors returned by code generators.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("entropy source failed: {0}")]
    Entropy(String),
    #[error("no codes of length {length} left to generate")]
    LengthExhausted { length: u8 },
}
