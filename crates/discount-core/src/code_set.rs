use crate::code::DiscountCode;
use serde::{Deserialize, Serialize};
use std::collections::hash_set;
use std::collections::HashSet;

/// The set of currently redeemable discount codes.
///
/// Members are pairwise distinct; iteration order is unspecified. The set
/// serializes as a flat JSON array of code strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeSet {
    codes: HashSet<DiscountCode>,
}

impl CodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a code. Returns `false` if it was already present.
    pub fn insert(&mut self, code: DiscountCode) -> bool {
        self.codes.insert(code)
    }

    /// Removes a code. Returns `true` if it was present.
    pub fn remove(&mut self, code: &str) -> bool {
        self.codes.remove(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Number of canonical codes with exactly `length` characters.
    pub fn count_with_length(&self, length: usize) -> usize {
        self.codes
            .iter()
            .filter(|code| code.len() == length && code.is_canonical())
            .count()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, DiscountCode> {
        self.codes.iter()
    }
}

impl FromIterator<DiscountCode> for CodeSet {
    fn from_iter<I: IntoIterator<Item = DiscountCode>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}

impl Extend<DiscountCode> for CodeSet {
    fn extend<I: IntoIterator<Item = DiscountCode>>(&mut self, iter: I) {
        self.codes.extend(iter);
    }
}

impl IntoIterator for CodeSet {
    type Item = DiscountCode;
    type IntoIter = hash_set::IntoIter<DiscountCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.into_iter()
    }
}

impl<'a> IntoIterator for &'a CodeSet {
    type Item = &'a DiscountCode;
    type IntoIter = hash_set::Iter<'a, DiscountCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}
