use crate::error::GeneratorError;
use crate::Generator;
use discount_core::{DiscountCode, ALPHABET};
use rand::rngs::OsRng;
use rand::TryRngCore;

/// Bytes at or above this value are discarded so that every alphabet
/// character is drawn with equal probability (252 = 7 * 36).
const REJECTION_THRESHOLD: u8 = (u8::MAX as usize / ALPHABET.len() * ALPHABET.len()) as u8;

/// Generates codes from the operating system's secure random source.
///
/// Random bytes are mapped onto [`ALPHABET`] with rejection sampling rather
/// than a plain modulo, which would favour the first `256 % 36` characters.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    type Output = DiscountCode;

    fn generate(&self, length: u8) -> Result<Self::Output, GeneratorError> {
        let length = usize::from(length);
        let mut code = String::with_capacity(length);
        let mut buf = [0u8; u8::MAX as usize];

        while code.len() < length {
            let chunk = &mut buf[..length - code.len()];
            OsRng
                .try_fill_bytes(chunk)
                .map_err(|e| GeneratorError::Entropy(e.to_string()))?;
            push_sampled(chunk, &mut code, length);
        }

        Ok(DiscountCode::new(code))
    }
}

/// Appends the alphabet characters for the accepted bytes, stopping once
/// `code` holds `length` characters.
fn push_sampled(bytes: &[u8], code: &mut String, length: usize) {
    for &byte in bytes {
        if code.len() == length {
            return;
        }
        if byte < REJECTION_THRESHOLD {
            code.push(char::from(ALPHABET[usize::from(byte) % ALPHABET.len()]));
        }
    }
}
