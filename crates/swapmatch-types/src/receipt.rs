//! Settlement receipts and lifecycle events.
//!
//! Every state-changing operation emits one event per affected order so
//! embedders can build an audit trail; `match_one` additionally returns a
//! [`SettlementReceipt`] describing the exact fund split.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountId, Amount, AssetRef, OrderKey, Quantity, Side};

/// A fact recorded by the exchange. Drained by the embedder after each
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeEvent {
    /// An order entered the book and its escrow was funded.
    OrderCreated {
        key: OrderKey,
        maker: AccountId,
        side: Side,
        price: Amount,
        asset: AssetRef,
    },
    /// An order was cancelled and its remaining escrow refunded.
    OrderCancelled { key: OrderKey, maker: AccountId },
    /// An order was superseded in place; escrow carried over.
    OrderEdited {
        old_key: OrderKey,
        new_key: OrderKey,
        maker: AccountId,
    },
    /// A pairing settled.
    TradeSettled {
        ask_key: OrderKey,
        bid_key: OrderKey,
        quantity: Quantity,
        cost: Amount,
        fee: Amount,
    },
}

impl ExchangeEvent {
    /// Stable tag for log lines and coarse filtering.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OrderCreated { .. } => "ORDER_CREATED",
            Self::OrderCancelled { .. } => "ORDER_CANCELLED",
            Self::OrderEdited { .. } => "ORDER_EDITED",
            Self::TradeSettled { .. } => "TRADE_SETTLED",
        }
    }
}

/// The settlement facts of one executed match.
///
/// Conservation invariant: `cost == fee + proceeds`, with
/// `cost = unit_price * quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub ask_key: OrderKey,
    pub bid_key: OrderKey,
    /// The asset actually traded (the ask's descriptor).
    pub asset: AssetRef,
    /// Fill price per unit — always the ask's price.
    pub unit_price: Amount,
    pub quantity: Quantity,
    /// Total funds moved: `unit_price * quantity`.
    pub cost: Amount,
    /// Protocol fee cut of `cost`.
    pub fee: Amount,
    /// What the ask maker received: `cost - fee`.
    pub proceeds: Amount,
    pub seller: AccountId,
    pub buyer: AccountId,
    pub settled_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CollectionId, TokenId};

    #[test]
    fn event_kind_tags() {
        let ev = ExchangeEvent::OrderCancelled {
            key: OrderKey::ZERO,
            maker: AccountId::ZERO,
        };
        assert_eq!(ev.kind(), "ORDER_CANCELLED");
    }

    #[test]
    fn receipt_serde_roundtrip() {
        let receipt = SettlementReceipt {
            ask_key: OrderKey([1u8; 32]),
            bid_key: OrderKey([2u8; 32]),
            asset: AssetRef::unique(CollectionId::new(), TokenId(7)),
            unit_price: 1000,
            quantity: 1,
            cost: 1000,
            fee: 20,
            proceeds: 980,
            seller: AccountId::new(),
            buyer: AccountId::new(),
            settled_at: Utc::now(),
        };
        let json = serde_json::to_string(&receipt).unwrap();
        let back: SettlementReceipt = serde_json::from_str(&json).unwrap();
        assert_eq!(receipt, back);
    }
}
