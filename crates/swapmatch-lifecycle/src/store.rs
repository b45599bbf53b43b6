//! Keyed stores backing the exchange: live orders and fill states.
//!
//! The order store holds live orders only — a closed order's storage is
//! reclaimed immediately. The fill registry is the opposite: it remembers
//! every closed key forever, which is what makes CLOSED permanent and
//! replay impossible.

use std::collections::HashMap;

use swapmatch_types::{FillState, Order, OrderKey, Quantity, Result, SwapmatchError};

/// Live orders by key.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: HashMap<OrderKey, Order>,
}

impl OrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, order: Order) {
        self.orders.insert(order.key(), order);
    }

    #[must_use]
    pub fn get(&self, key: OrderKey) -> Option<&Order> {
        self.orders.get(&key)
    }

    #[must_use]
    pub fn contains(&self, key: OrderKey) -> bool {
        self.orders.contains_key(&key)
    }

    /// Reclaim a closed order's storage.
    pub fn remove(&mut self, key: OrderKey) -> Option<Order> {
        self.orders.remove(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Fill states by key. Closed keys are retained permanently.
#[derive(Debug, Default)]
pub struct FillRegistry {
    fills: HashMap<OrderKey, FillState>,
}

impl FillRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: OrderKey) -> Option<FillState> {
        self.fills.get(&key).copied()
    }

    /// State for matching purposes: a never-seen key is a fresh open
    /// order.
    #[must_use]
    pub fn state_or_open(&self, key: OrderKey) -> FillState {
        self.get(key).unwrap_or_default()
    }

    #[must_use]
    pub fn is_closed(&self, key: OrderKey) -> bool {
        self.state_or_open(key).is_closed()
    }

    /// Whether the registry has seen this key and it is still open.
    /// True for partially filled keys that were never stored, such as a
    /// fresh collection bid settled directly through a match.
    #[must_use]
    pub fn is_open(&self, key: OrderKey) -> bool {
        matches!(self.get(key), Some(FillState::Open { .. }))
    }

    /// Register a fresh open order.
    pub fn open(&mut self, key: OrderKey) {
        self.fills.insert(key, FillState::new());
    }

    /// Record `quantity` settled units against a key. Creates the entry
    /// for fresh orders settling on first contact. Returns the new fill
    /// count.
    pub fn record_fill(&mut self, key: OrderKey, quantity: Quantity) -> Result<Quantity> {
        let state = self.fills.entry(key).or_default();
        match state {
            FillState::Open { filled } => {
                *filled = filled.checked_add(quantity).ok_or_else(|| {
                    SwapmatchError::Internal(format!("fill count overflow for {key}"))
                })?;
                Ok(*filled)
            }
            FillState::Closed => Err(SwapmatchError::OrderClosed(key)),
        }
    }

    /// Close a key permanently. Idempotent.
    pub fn close(&mut self, key: OrderKey) {
        self.fills.insert(key, FillState::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapmatch_types::{AccountId, AssetRef, CollectionId, TokenId};

    fn key(n: u8) -> OrderKey {
        OrderKey([n; 32])
    }

    #[test]
    fn order_store_roundtrip() {
        let mut store = OrderStore::new();
        let order = Order::dummy_ask(
            AccountId::new(),
            AssetRef::unique(CollectionId::new(), TokenId(1)),
            10,
        );
        let k = order.key();
        store.insert(order.clone());
        assert!(store.contains(k));
        assert_eq!(store.get(k), Some(&order));

        let removed = store.remove(k).unwrap();
        assert_eq!(removed.key(), k);
        assert!(store.is_empty());
    }

    #[test]
    fn unknown_key_is_fresh_open() {
        let registry = FillRegistry::new();
        assert_eq!(registry.get(key(1)), None);
        assert_eq!(registry.state_or_open(key(1)), FillState::new());
        assert!(!registry.is_closed(key(1)));
    }

    #[test]
    fn record_fill_accumulates() {
        let mut registry = FillRegistry::new();
        registry.open(key(1));
        assert_eq!(registry.record_fill(key(1), 1).unwrap(), 1);
        assert_eq!(registry.record_fill(key(1), 2).unwrap(), 3);
        assert_eq!(registry.get(key(1)), Some(FillState::Open { filled: 3 }));
    }

    #[test]
    fn record_fill_creates_entry_for_fresh_key() {
        let mut registry = FillRegistry::new();
        assert_eq!(registry.record_fill(key(2), 1).unwrap(), 1);
        assert!(registry.is_open(key(2)));
        // A never-seen key has no entry to be open.
        assert!(!registry.is_open(key(3)));
    }

    #[test]
    fn closed_is_permanent() {
        let mut registry = FillRegistry::new();
        registry.open(key(1));
        registry.close(key(1));
        assert!(registry.is_closed(key(1)));

        let err = registry.record_fill(key(1), 1).unwrap_err();
        assert!(matches!(err, SwapmatchError::OrderClosed(_)));

        // Closing again stays closed, never resets.
        registry.close(key(1));
        assert!(registry.is_closed(key(1)));
    }
}
