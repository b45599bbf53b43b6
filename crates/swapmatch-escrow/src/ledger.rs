//! The escrow ledger: per-order-key custody of funds and assets.
//!
//! Independent of matching logic. The lifecycle and matching layers are
//! the only writers, and all mutation goes through this narrow API so the
//! fund-safety invariants stay centrally enforced: balances never wrap,
//! and a drained key holds nothing.

use std::collections::HashMap;

use swapmatch_types::{Amount, AssetRef, OrderKey, Result, SwapmatchError};

/// What one order key currently holds in escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EscrowEntry {
    /// Funds earmarked for this order (bids funding future fills).
    pub held_funds: Amount,
    /// The asset units deposited by an ask, if any.
    pub held_asset: Option<AssetRef>,
}

/// Keyed custody of funds and assets backing open orders.
#[derive(Debug, Default)]
pub struct EscrowLedger {
    funds: HashMap<OrderKey, Amount>,
    assets: HashMap<OrderKey, AssetRef>,
}

impl EscrowLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =================================================================
    // Funds
    // =================================================================

    /// Credit `amount` to `key`.
    pub fn deposit_funds(&mut self, key: OrderKey, amount: Amount) -> Result<()> {
        let entry = self.funds.entry(key).or_insert(0);
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| SwapmatchError::Internal(format!("escrow overflow for {key}")))?;
        Ok(())
    }

    /// Debit exactly `amount` from `key`. The caller must have verified
    /// coverage; shortfall here is an engine bug, not user input.
    pub fn consume_funds(&mut self, key: OrderKey, amount: Amount) -> Result<()> {
        let entry = self
            .funds
            .get_mut(&key)
            .ok_or(SwapmatchError::EscrowUnderflow(key))?;
        if *entry < amount {
            return Err(SwapmatchError::EscrowUnderflow(key));
        }
        *entry -= amount;
        Ok(())
    }

    /// Remove and return everything `key` holds in funds.
    pub fn drain_funds(&mut self, key: OrderKey) -> Amount {
        self.funds.remove(&key).unwrap_or(0)
    }

    /// Move `amount` of escrowed funds from one key to another without
    /// touching any external account. Used by edit to carry the old
    /// order's escrow over as a down payment.
    pub fn move_funds(&mut self, from: OrderKey, to: OrderKey, amount: Amount) -> Result<()> {
        self.consume_funds(from, amount)?;
        self.deposit_funds(to, amount)
    }

    #[must_use]
    pub fn funds_of(&self, key: OrderKey) -> Amount {
        self.funds.get(&key).copied().unwrap_or(0)
    }

    // =================================================================
    // Assets
    // =================================================================

    /// Record the asset units held for `key`.
    pub fn deposit_asset(&mut self, key: OrderKey, asset: AssetRef) -> Result<()> {
        if self.assets.contains_key(&key) {
            return Err(SwapmatchError::Internal(format!(
                "asset already held for {key}"
            )));
        }
        self.assets.insert(key, asset);
        Ok(())
    }

    /// Remove and return the asset units held for `key`, if any.
    pub fn take_asset(&mut self, key: OrderKey) -> Option<AssetRef> {
        self.assets.remove(&key)
    }

    #[must_use]
    pub fn asset_of(&self, key: OrderKey) -> Option<AssetRef> {
        self.assets.get(&key).copied()
    }

    // =================================================================
    // Queries
    // =================================================================

    /// Everything a key currently holds.
    #[must_use]
    pub fn entry(&self, key: OrderKey) -> EscrowEntry {
        EscrowEntry {
            held_funds: self.funds_of(key),
            held_asset: self.asset_of(key),
        }
    }

    /// Sum of all held funds across every key. Conservation checks in
    /// tests compare this against the vault's escrow account balance.
    #[must_use]
    pub fn total_funds(&self) -> Amount {
        self.funds.values().sum()
    }

    /// Number of keys holding any funds or assets.
    #[must_use]
    pub fn len(&self) -> usize {
        let funded = self.funds.iter().filter(|(_, amt)| **amt > 0).count();
        let asset_only = self
            .assets
            .keys()
            .filter(|k| self.funds_of(**k) == 0)
            .count();
        funded + asset_only
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_funds() == 0 && self.assets.is_empty()
    }
}
