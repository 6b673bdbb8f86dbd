use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::Display;

/// The fixed character set every generated code is drawn from.
pub const ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A single-use discount code.
///
/// Generated codes contain only characters from [`ALPHABET`]. Codes read back
/// from a snapshot are taken as they were written, since an earlier
/// configuration may have produced different lengths.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscountCode(String);

impl DiscountCode {
    /// Wraps `code` as is.
    ///
    /// Generators only emit [`ALPHABET`] text; snapshot contents are trusted
    /// as written.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the code.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if every character belongs to [`ALPHABET`].
    pub fn is_canonical(&self) -> bool {
        self.0.bytes().all(|b| ALPHABET.contains(&b))
    }
}

// Hash and Eq are derived over the inner `String`, which hashes identically
// to `str`, so set lookups by `&str` are consistent.
impl Borrow<str> for DiscountCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DiscountCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for DiscountCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DiscountCode> for String {
    fn from(code: DiscountCode) -> Self {
        code.0
    }
}
