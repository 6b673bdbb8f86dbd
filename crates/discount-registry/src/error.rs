use thiserror::Error;

/// Invalid registry configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("minimum code length must be at least 1")]
    ZeroMinLength,
    #[error("minimum code length {min} exceeds maximum code length {max}")]
    InvertedLengthBounds { min: u8, max: u8 },
}
