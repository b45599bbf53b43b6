//! Price-ordered index of open orders.
//!
//! Uses `BTreeMap` price levels per group, with a `BTreeSet` of keys at
//! each level for deterministic iteration, and an auxiliary
//! `HashMap<OrderKey, (group, price)>` for O(log n) removal.
//!
//! Matching correctness never reads the index (pairings are explicit);
//! it serves discovery, and must stay consistent with fill state at all
//! times: a closed key must never appear here.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use swapmatch_types::{
    Amount, CollectionId, Order, OrderKey, Result, SaleKind, Side, SwapmatchError, TokenId,
};

/// The bucket an order is discoverable under.
///
/// Single-item orders are additionally grouped by token id; collection
/// bids are grouped by collection alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexGroup {
    pub side: Side,
    pub collection: CollectionId,
    pub token: Option<TokenId>,
}

impl IndexGroup {
    /// The group an order belongs to.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        Self {
            side: order.side,
            collection: order.asset.collection,
            token: match order.sale_kind {
                SaleKind::SingleItem => Some(order.asset.token_id),
                SaleKind::AnyItemInCollection => None,
            },
        }
    }
}

/// Price-ordered keys per group. Supports insert, remove, and best-first
/// traversal; no arbitrary random access.
#[derive(Debug, Default)]
pub struct PriceIndex {
    groups: HashMap<IndexGroup, BTreeMap<Amount, BTreeSet<OrderKey>>>,
    /// Reverse lookup for removal.
    index: HashMap<OrderKey, (IndexGroup, Amount)>,
}

impl PriceIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key at its price within a group.
    pub fn insert(&mut self, group: IndexGroup, price: Amount, key: OrderKey) -> Result<()> {
        if self.index.contains_key(&key) {
            return Err(SwapmatchError::DuplicateOrder(key));
        }
        self.index.insert(key, (group, price));
        self.groups
            .entry(group)
            .or_default()
            .entry(price)
            .or_default()
            .insert(key);
        Ok(())
    }

    /// Insert an order at its own price and group.
    pub fn insert_order(&mut self, order: &Order) -> Result<()> {
        self.insert(IndexGroup::for_order(order), order.price, order.key())
    }

    /// Remove a key. Returns `false` if it was not indexed.
    pub fn remove(&mut self, key: OrderKey) -> bool {
        let Some((group, price)) = self.index.remove(&key) else {
            return false;
        };
        if let Some(levels) = self.groups.get_mut(&group) {
            if let Some(level) = levels.get_mut(&price) {
                level.remove(&key);
                if level.is_empty() {
                    levels.remove(&price);
                }
            }
            if levels.is_empty() {
                self.groups.remove(&group);
            }
        }
        true
    }

    /// Best price in a group: lowest for ask groups, highest for bid
    /// groups.
    #[must_use]
    pub fn best_price(&self, group: &IndexGroup) -> Option<Amount> {
        let levels = self.groups.get(group)?;
        match group.side {
            Side::Ask => levels.keys().next().copied(),
            Side::Bid => levels.keys().next_back().copied(),
        }
    }

    /// Keys in a group in non-decreasing price order.
    pub fn iter_group(&self, group: &IndexGroup) -> impl Iterator<Item = (Amount, OrderKey)> + '_ {
        self.groups
            .get(group)
            .into_iter()
            .flat_map(|levels| levels.iter())
            .flat_map(|(price, keys)| keys.iter().map(|key| (*price, *key)))
    }

    #[must_use]
    pub fn contains(&self, key: OrderKey) -> bool {
        self.index.contains_key(&key)
    }

    /// Total indexed keys across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of keys within one group.
    #[must_use]
    pub fn group_len(&self, group: &IndexGroup) -> usize {
        self.groups
            .get(group)
            .map_or(0, |levels| levels.values().map(BTreeSet::len).sum())
    }
}
