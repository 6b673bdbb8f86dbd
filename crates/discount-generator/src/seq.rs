use crate::error::GeneratorError;
use crate::{codespace_size, Generator};
use discount_core::{DiscountCode, ALPHABET};
use std::sync::atomic::{AtomicU64, Ordering};

/// A deterministic generator that counts through the codespace.
///
/// This generator produces base-36 renderings of a counter over [`ALPHABET`],
/// left-padded with `A`: length 4 yields "AAAA", "AAAB", ..., "AAA9", "AABA".
/// Useful for tests and reproducible runs; never use it to hand out real
/// codes, since they are trivially guessable.
///
/// With a period configured the counter wraps, so the generator repeats
/// itself and exercises the registry's duplicate handling.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    period: Option<u64>,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            period: self.period,
        }
    }
}

impl Default for SeqGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeqGenerator {
    /// Creates a generator starting from the first code of each length.
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    /// Creates a generator starting from a specific counter value.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            period: None,
        }
    }

    /// Creates a generator that cycles through the first `period` codes.
    ///
    /// A period of zero is treated as one.
    pub fn with_period(period: u64) -> Self {
        Self {
            counter: AtomicU64::new(0),
            period: Some(period.max(1)),
        }
    }

    fn next_value(&self) -> u64 {
        let value = self.counter.fetch_add(1, Ordering::SeqCst);
        match self.period {
            Some(period) => value % period,
            None => value,
        }
    }
}

impl Generator for SeqGenerator {
    type Output = DiscountCode;

    fn generate(&self, length: u8) -> Result<Self::Output, GeneratorError> {
        let value = self.next_value();

        if codespace_size(length).is_some_and(|size| value >= size) {
            return Err(GeneratorError::LengthExhausted { length });
        }

        Ok(DiscountCode::new(render(value, usize::from(length))))
    }
}

fn render(mut value: u64, length: usize) -> String {
    let radix = ALPHABET.len() as u64;
    let mut digits = vec![ALPHABET[0]; length];

    for slot in digits.iter_mut().rev() {
        if value == 0 {
            break;
        }
        *slot = ALPHABET[(value % radix) as usize];
        value /= radix;
    }

    digits.into_iter().map(char::from).collect()
}
