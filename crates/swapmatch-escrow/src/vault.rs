//! In-memory reference implementation of the transfer ports.
//!
//! Backs tests and single-process embeddings: per-account fund balances
//! plus per-(collection, token, account) asset unit ownership. Production
//! embedders supply their own port implementations per asset standard.

use std::collections::HashMap;

use swapmatch_types::{AccountId, Amount, AssetRef, CollectionId, Quantity, TokenId};

use crate::ports::{AssetError, AssetTransfer, FundError, FundTransfer};

/// Fund balances and asset custody for a closed set of accounts.
#[derive(Debug, Default)]
pub struct InMemoryVault {
    funds: HashMap<AccountId, Amount>,
    /// Units of (collection, token) held by each account.
    assets: HashMap<(CollectionId, TokenId, AccountId), Quantity>,
}

impl InMemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit funds to an account (test/bootstrap fixture). Saturates at
    /// `Amount::MAX` rather than wrapping.
    pub fn deposit_funds(&mut self, account: AccountId, amount: Amount) {
        let entry = self.funds.entry(account).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Put asset units into an account's custody (test/bootstrap
    /// fixture). Saturates at `Quantity::MAX` rather than wrapping.
    pub fn mint_asset(&mut self, account: AccountId, asset: AssetRef) {
        let entry = self
            .assets
            .entry((asset.collection, asset.token_id, account))
            .or_insert(0);
        *entry = entry.saturating_add(asset.quantity);
    }

    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.funds.get(&account).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn asset_units(
        &self,
        collection: CollectionId,
        token_id: TokenId,
        account: AccountId,
    ) -> Quantity {
        self.assets
            .get(&(collection, token_id, account))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `account` holds all of `asset`'s units.
    #[must_use]
    pub fn owns(&self, account: AccountId, asset: &AssetRef) -> bool {
        self.asset_units(asset.collection, asset.token_id, account) >= asset.quantity
    }

    /// Total funds across all accounts. Used by conservation tests.
    #[must_use]
    pub fn total_funds(&self) -> Amount {
        self.funds.values().sum()
    }
}

impl FundTransfer for InMemoryVault {
    fn transfer_funds(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), FundError> {
        if amount == 0 {
            return Ok(());
        }
        let available = self.balance_of(from);
        if available < amount {
            return Err(FundError::Insufficient {
                needed: amount,
                available,
            });
        }
        *self.funds.entry(from).or_insert(0) -= amount;
        *self.funds.entry(to).or_insert(0) += amount;
        Ok(())
    }
}

impl AssetTransfer for InMemoryVault {
    fn transfer_asset(
        &mut self,
        asset: &AssetRef,
        from: AccountId,
        to: AccountId,
    ) -> Result<(), AssetError> {
        // Unique items and fungible positions both reduce to a unit-count
        // move here; the kind tag matters to implementations bridging
        // real asset standards.
        let held = self.asset_units(asset.collection, asset.token_id, from);
        if held < asset.quantity {
            return Err(AssetError::InsufficientUnits {
                holder: from,
                held,
                needed: asset.quantity,
            });
        }
        *self
            .assets
            .entry((asset.collection, asset.token_id, from))
            .or_insert(0) -= asset.quantity;
        *self
            .assets
            .entry((asset.collection, asset.token_id, to))
            .or_insert(0) += asset.quantity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_transfer_moves_balance() {
        let mut vault = InMemoryVault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        vault.deposit_funds(a, 100);

        vault.transfer_funds(a, b, 40).unwrap();
        assert_eq!(vault.balance_of(a), 60);
        assert_eq!(vault.balance_of(b), 40);
        assert_eq!(vault.total_funds(), 100);
    }

    #[test]
    fn fund_transfer_insufficient() {
        let mut vault = InMemoryVault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        vault.deposit_funds(a, 10);

        let err = vault.transfer_funds(a, b, 11).unwrap_err();
        assert!(matches!(err, FundError::Insufficient { .. }));
        assert_eq!(vault.balance_of(a), 10);
    }

    #[test]
    fn fixture_credits_saturate() {
        let mut vault = InMemoryVault::new();
        let a = AccountId::new();
        vault.deposit_funds(a, Amount::MAX);
        vault.deposit_funds(a, 1);
        assert_eq!(vault.balance_of(a), Amount::MAX);

        let position = AssetRef::fungible(CollectionId::new(), TokenId(1), Quantity::MAX);
        vault.mint_asset(a, position);
        vault.mint_asset(a, position);
        assert_eq!(
            vault.asset_units(position.collection, position.token_id, a),
            Quantity::MAX
        );
    }

    #[test]
    fn zero_amount_transfer_is_noop() {
        let mut vault = InMemoryVault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        vault.transfer_funds(a, b, 0).unwrap();
        assert_eq!(vault.balance_of(b), 0);
    }

    #[test]
    fn asset_transfer_moves_units() {
        let mut vault = InMemoryVault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        let asset = AssetRef::unique(CollectionId::new(), TokenId(1));
        vault.mint_asset(a, asset);
        assert!(vault.owns(a, &asset));

        vault.transfer_asset(&asset, a, b).unwrap();
        assert!(!vault.owns(a, &asset));
        assert!(vault.owns(b, &asset));
    }

    #[test]
    fn asset_transfer_requires_custody() {
        let mut vault = InMemoryVault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        let asset = AssetRef::unique(CollectionId::new(), TokenId(1));

        let err = vault.transfer_asset(&asset, a, b).unwrap_err();
        assert!(matches!(err, AssetError::InsufficientUnits { .. }));
    }

    #[test]
    fn fungible_position_partial_custody() {
        let mut vault = InMemoryVault::new();
        let a = AccountId::new();
        let b = AccountId::new();
        let collection = CollectionId::new();
        let position = AssetRef::fungible(collection, TokenId(5), 10);
        vault.mint_asset(a, position);

        let half = AssetRef::fungible(collection, TokenId(5), 4);
        vault.transfer_asset(&half, a, b).unwrap();
        assert_eq!(vault.asset_units(collection, TokenId(5), a), 6);
        assert_eq!(vault.asset_units(collection, TokenId(5), b), 4);
    }
}
