//! Order model for the SwapMatch exchange engine.
//!
//! An [`Order`] is an immutable trading intent. Its identity is the
//! [`OrderKey`] digest of its fields — there is no mutable order state
//! inside the order itself. Fill progress and escrow balances live in
//! separate keyed stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{AccountId, CollectionId, OrderKey, Result, SwapmatchError, TokenId};

/// Fund amounts, fixed-point integer units.
pub type Amount = u128;

/// Asset unit counts.
pub type Quantity = u64;

/// Which side of the market an order is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Side {
    /// Sell-side: the maker offers an asset for funds.
    Ask,
    /// Buy-side: the maker offers funds for an asset.
    Bid,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ask => write!(f, "ASK"),
            Self::Bid => write!(f, "BID"),
        }
    }
}

/// How an order targets assets.
///
/// Asks are always [`SaleKind::SingleItem`]. Bids may target one specific
/// item or any item within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum SaleKind {
    SingleItem,
    AnyItemInCollection,
}

impl std::fmt::Display for SaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SingleItem => write!(f, "SINGLE_ITEM"),
            Self::AnyItemInCollection => write!(f, "ANY_IN_COLLECTION"),
        }
    }
}

/// The asset standard a descriptor belongs to.
///
/// The core never branches on this beyond carrying it into the
/// asset-transfer capability, which selects the matching implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum AssetKind {
    /// One-of-one items; quantity is always 1 per token.
    Unique,
    /// Fungible-count units bundled as a position under one token id.
    Fungible,
}

/// Describes the asset units an order trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub kind: AssetKind,
    pub collection: CollectionId,
    pub token_id: TokenId,
    /// Units available: 1 for unique items, N for fungible positions.
    pub quantity: Quantity,
}

impl AssetRef {
    #[must_use]
    pub fn unique(collection: CollectionId, token_id: TokenId) -> Self {
        Self {
            kind: AssetKind::Unique,
            collection,
            token_id,
            quantity: 1,
        }
    }

    #[must_use]
    pub fn fungible(collection: CollectionId, token_id: TokenId, quantity: Quantity) -> Self {
        Self {
            kind: AssetKind::Fungible,
            collection,
            token_id,
            quantity,
        }
    }
}

/// A maker's immutable trading intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub side: Side,
    pub sale_kind: SaleKind,
    /// The order owner. Never [`AccountId::ZERO`].
    pub maker: AccountId,
    pub asset: AssetRef,
    /// Unit price, fixed-point integer. Always > 0.
    pub price: Amount,
    /// Point in time after which the order is unmatchable.
    pub expiry: DateTime<Utc>,
    /// Disambiguator so otherwise-identical orders get distinct keys.
    /// Never zero.
    pub salt: u64,
}

impl Order {
    /// Compute this order's deterministic key.
    ///
    /// Domain-separated SHA-256 over every field. Two orders with the same
    /// field values (salt included) always hash to the same key; changing
    /// any single field changes the key.
    #[must_use]
    pub fn key(&self) -> OrderKey {
        let mut hasher = Sha256::new();
        hasher.update(b"swapmatch:order:v1:");
        hasher.update([match self.side {
            Side::Ask => 0u8,
            Side::Bid => 1u8,
        }]);
        hasher.update([match self.sale_kind {
            SaleKind::SingleItem => 0u8,
            SaleKind::AnyItemInCollection => 1u8,
        }]);
        hasher.update(self.maker.0.as_bytes());
        hasher.update([match self.asset.kind {
            AssetKind::Unique => 0u8,
            AssetKind::Fungible => 1u8,
        }]);
        hasher.update(self.asset.collection.0.as_bytes());
        hasher.update(self.asset.token_id.0.to_le_bytes());
        hasher.update(self.asset.quantity.to_le_bytes());
        hasher.update(self.price.to_le_bytes());
        hasher.update(self.expiry.timestamp_millis().to_le_bytes());
        hasher.update(self.salt.to_le_bytes());
        OrderKey(hasher.finalize().into())
    }

    /// Structural validation applied at creation and edit time.
    pub fn validate(&self) -> Result<()> {
        if self.salt == 0 {
            return Err(SwapmatchError::InvalidOrder {
                reason: "salt must be non-zero".into(),
            });
        }
        if self.maker.is_zero() {
            return Err(SwapmatchError::InvalidOrder {
                reason: "maker must not be the zero account".into(),
            });
        }
        if self.price == 0 {
            return Err(SwapmatchError::InvalidOrder {
                reason: "price must be > 0".into(),
            });
        }
        if self.asset.quantity == 0 {
            return Err(SwapmatchError::InvalidOrder {
                reason: "asset quantity must be > 0".into(),
            });
        }
        if self.side == Side::Ask && self.sale_kind != SaleKind::SingleItem {
            return Err(SwapmatchError::InvalidOrder {
                reason: "ask orders must be single-item".into(),
            });
        }
        Ok(())
    }

    /// Funds a bid must escrow to back its full quantity:
    /// `price * quantity`.
    pub fn required_funds(&self) -> Result<Amount> {
        self.price
            .checked_mul(Amount::from(self.asset.quantity))
            .ok_or_else(|| SwapmatchError::InvalidOrder {
                reason: "price * quantity overflows".into(),
            })
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expiry
    }
}

/// One element of an `edit_orders` batch: replace the order at `old_key`
/// with `new_order`, carrying the old escrow over as a down payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditRequest {
    pub old_key: OrderKey,
    pub new_order: Order,
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    /// A single-item ask expiring far in the future.
    pub fn dummy_ask(maker: AccountId, asset: AssetRef, price: Amount) -> Self {
        Self {
            side: Side::Ask,
            sale_kind: SaleKind::SingleItem,
            maker,
            asset,
            price,
            expiry: Utc::now() + chrono::Duration::days(30),
            salt: 1,
        }
    }

    /// A single-item bid for exactly `asset`.
    pub fn dummy_bid(maker: AccountId, asset: AssetRef, price: Amount) -> Self {
        Self {
            side: Side::Bid,
            sale_kind: SaleKind::SingleItem,
            maker,
            asset,
            price,
            expiry: Utc::now() + chrono::Duration::days(30),
            salt: 1,
        }
    }

    /// A collection-wide bid for `quantity` units of any item in
    /// `collection`.
    pub fn dummy_collection_bid(
        maker: AccountId,
        collection: CollectionId,
        quantity: Quantity,
        price: Amount,
    ) -> Self {
        Self {
            side: Side::Bid,
            sale_kind: SaleKind::AnyItemInCollection,
            maker,
            asset: AssetRef {
                kind: AssetKind::Unique,
                collection,
                token_id: TokenId(0),
                quantity,
            },
            price,
            expiry: Utc::now() + chrono::Duration::days(30),
            salt: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_order() -> Order {
        Order::dummy_ask(
            AccountId::new(),
            AssetRef::unique(CollectionId::new(), TokenId(1)),
            1000,
        )
    }

    #[test]
    fn key_is_pure_function_of_fields() {
        let order = base_order();
        assert_eq!(order.key(), order.clone().key());
    }

    #[test]
    fn key_changes_with_every_field() {
        let order = base_order();
        let base = order.key();

        let mut o = order.clone();
        o.salt = 2;
        assert_ne!(o.key(), base, "salt");

        let mut o = order.clone();
        o.price = 1001;
        assert_ne!(o.key(), base, "price");

        let mut o = order.clone();
        o.maker = AccountId::new();
        assert_ne!(o.key(), base, "maker");

        let mut o = order.clone();
        o.asset.token_id = TokenId(2);
        assert_ne!(o.key(), base, "token id");

        let mut o = order.clone();
        o.asset.quantity = 2;
        assert_ne!(o.key(), base, "quantity");

        let mut o = order.clone();
        o.expiry += chrono::Duration::seconds(1);
        assert_ne!(o.key(), base, "expiry");
    }

    #[test]
    fn salt_disambiguates_identical_orders() {
        let a = base_order();
        let mut b = a.clone();
        b.salt = 99;
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn validate_rejects_zero_salt() {
        let mut order = base_order();
        order.salt = 0;
        assert!(matches!(
            order.validate(),
            Err(SwapmatchError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_maker() {
        let mut order = base_order();
        order.maker = AccountId::ZERO;
        assert!(order.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_price() {
        let mut order = base_order();
        order.price = 0;
        assert!(order.validate().is_err());
    }

    #[test]
    fn validate_rejects_collection_wide_ask() {
        let mut order = base_order();
        order.sale_kind = SaleKind::AnyItemInCollection;
        assert!(order.validate().is_err());
    }

    #[test]
    fn validate_accepts_collection_wide_bid() {
        let order = Order::dummy_collection_bid(AccountId::new(), CollectionId::new(), 4, 10);
        assert!(order.validate().is_ok());
    }

    #[test]
    fn required_funds_is_price_times_quantity() {
        let order = Order::dummy_collection_bid(AccountId::new(), CollectionId::new(), 4, 10);
        assert_eq!(order.required_funds().unwrap(), 40);
    }

    #[test]
    fn expiry_check() {
        let order = base_order();
        assert!(!order.is_expired(Utc::now()));
        assert!(order.is_expired(order.expiry + chrono::Duration::seconds(1)));
    }

    #[test]
    fn order_serde_roundtrip() {
        let order = base_order();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
        assert_eq!(order.key(), back.key());
    }
}
