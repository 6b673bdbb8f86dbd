use crate::error::SettingsError;
use std::ops::RangeInclusive;
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_CODES_PER_REQUEST: u16 = 2000;
pub const DEFAULT_MIN_CODE_LENGTH: u8 = 7;
pub const DEFAULT_MAX_CODE_LENGTH: u8 = 8;

/// Limits applied to every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct RegistrySettings {
    /// Largest `count` a single request may ask for.
    #[builder(default = DEFAULT_MAX_CODES_PER_REQUEST)]
    pub max_codes_per_request: u16,
    /// Shortest code length a request may ask for.
    #[builder(default = DEFAULT_MIN_CODE_LENGTH)]
    pub min_code_length: u8,
    /// Longest code length a request may ask for.
    #[builder(default = DEFAULT_MAX_CODE_LENGTH)]
    pub max_code_length: u8,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RegistrySettings {
    /// Checks that the length bounds describe a non-empty range of
    /// non-empty codes.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.min_code_length == 0 {
            return Err(SettingsError::ZeroMinLength);
        }

        if self.min_code_length > self.max_code_length {
            return Err(SettingsError::InvertedLengthBounds {
                min: self.min_code_length,
                max: self.max_code_length,
            });
        }

        Ok(())
    }

    pub fn length_range(&self) -> RangeInclusive<u8> {
        self.min_code_length..=self.max_code_length
    }
}
