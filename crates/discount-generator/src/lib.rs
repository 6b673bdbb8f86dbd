//! Candidate code generators.
//!
//! Generators only produce candidates; the registry decides whether a
//! candidate is new.

pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use discount_core::DiscountCode;

/// Trait for generating candidate discount codes.
///
/// Implementations are pure generators that don't interact with storage, and
/// are not required to avoid repeats.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<DiscountCode>;

    /// Generates a candidate code of exactly `length` characters.
    fn generate(&self, length: u8) -> Result<Self::Output, GeneratorError>;
}

/// Number of distinct canonical codes of the given length, or `None` if it
/// does not fit in a `u64`.
pub fn codespace_size(length: u8) -> Option<u64> {
    (discount_core::ALPHABET.len() as u64).checked_pow(u32::from(length))
}
