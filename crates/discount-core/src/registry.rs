use crate::code::DiscountCode;
use crate::error::RegistryError;

/// Outcome of redeeming a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redemption {
    /// The code was outstanding and has now been consumed.
    Redeemed,
    /// The code is unknown or was already redeemed.
    NotFound,
}

impl Redemption {
    /// Wire representation: `1` when redeemed, `0` otherwise.
    pub fn as_byte(self) -> u8 {
        match self {
            Redemption::Redeemed => 1,
            Redemption::NotFound => 0,
        }
    }

    pub fn is_redeemed(self) -> bool {
        matches!(self, Redemption::Redeemed)
    }
}

/// The operations a discount code registry exposes to its callers.
///
/// All methods block until the registry lock is acquired and, for writes,
/// until the snapshot has been written.
pub trait CodeRegistry: Send + Sync + 'static {
    /// Mints `count` new codes of `length` characters and returns them.
    fn generate_batch(&self, count: u16, length: u8) -> Result<Vec<DiscountCode>, RegistryError>;

    /// Consumes `code` if it is outstanding.
    fn use_code(&self, code: &str) -> Redemption;

    /// Returns `true` if `code` is outstanding.
    fn exists(&self, code: &str) -> bool;

    /// Number of outstanding codes.
    fn count(&self) -> usize;
}
