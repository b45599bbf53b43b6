//! Identifiers used throughout SwapMatch.
//!
//! Account and collection identifiers use UUIDv7 for time-ordered
//! lexicographic sorting. Order keys are content digests, not assigned
//! identifiers — see [`OrderKey`].

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// AccountId
// ---------------------------------------------------------------------------

/// Identity of a party that can own orders, funds, and assets.
///
/// The nil value ([`AccountId::ZERO`]) is reserved: it is never a legal
/// order maker and is used only as an absence marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// The reserved nil account.
    pub const ZERO: Self = Self(Uuid::nil());

    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CollectionId
// ---------------------------------------------------------------------------

/// Identity of an asset collection (the grouping unit for collection-wide
/// bids and for price index groups).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CollectionId(pub Uuid);

impl CollectionId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    #[must_use]
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(Uuid::from_bytes(bytes))
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// TokenId
// ---------------------------------------------------------------------------

/// Identity of a single item within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TokenId(pub u64);

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// OrderKey
// ---------------------------------------------------------------------------

/// Deterministic digest identifying an order.
///
/// An `OrderKey` is a domain-separated SHA-256 over every order field —
/// two orders with identical fields (including salt) always produce the
/// same key. It is the sole means of addressing an order; there is no
/// separate incrementing identifier. Keys never mutate: changing any
/// order field is modeled as cancel-old + create-new.
///
/// [`OrderKey::ZERO`] is the sentinel returned for deduplicated batch
/// entries and never identifies a real order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct OrderKey(pub [u8; 32]);

impl OrderKey {
    /// The all-zero sentinel key.
    pub const ZERO: Self = Self([0u8; 32]);

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Short hex form for log lines.
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ok:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_id_uniqueness() {
        let a = AccountId::new();
        let b = AccountId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn account_id_zero_is_nil() {
        assert!(AccountId::ZERO.is_zero());
        assert!(!AccountId::new().is_zero());
    }

    #[test]
    fn order_key_zero_sentinel() {
        assert!(OrderKey::ZERO.is_zero());
        assert!(!OrderKey([1u8; 32]).is_zero());
    }

    #[test]
    fn order_key_display_is_prefixed_hex() {
        let key = OrderKey([0xab; 32]);
        assert_eq!(format!("{key}"), "ok:abababababababab");
        assert_eq!(key.short(), "abababab");
    }

    #[test]
    fn serde_roundtrips() {
        let acct = AccountId::new();
        let json = serde_json::to_string(&acct).unwrap();
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(acct, back);

        let key = OrderKey([7u8; 32]);
        let json = serde_json::to_string(&key).unwrap();
        let back: OrderKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }

    #[test]
    fn token_id_display() {
        assert_eq!(format!("{}", TokenId(42)), "#42");
    }
}
