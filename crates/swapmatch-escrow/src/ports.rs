//! Capability ports the engine consumes from collaborators.
//!
//! The core treats all three as opaque: authorization may be a signature
//! check or a direct-sender identity check; transfers may hit any asset
//! standard. [`crate::InMemoryVault`] provides the reference
//! implementation used by tests and single-process embeddings.

use thiserror::Error;

use swapmatch_types::{AccountId, Amount, AssetRef, Order, Quantity, SwapmatchError};

/// Failure reported by a [`FundTransfer`] implementation.
#[derive(Debug, Error)]
pub enum FundError {
    #[error("insufficient funds: need {needed}, have {available}")]
    Insufficient { needed: Amount, available: Amount },

    #[error("transfer refused: {0}")]
    Refused(String),
}

/// Failure reported by an [`AssetTransfer`] implementation.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("account {holder} holds {held} of {needed} required units")]
    InsufficientUnits {
        holder: AccountId,
        held: Quantity,
        needed: Quantity,
    },

    #[error("transfer refused: {0}")]
    Refused(String),
}

impl From<FundError> for SwapmatchError {
    fn from(err: FundError) -> Self {
        Self::FundTransferFailed {
            reason: err.to_string(),
        }
    }
}

impl From<AssetError> for SwapmatchError {
    fn from(err: AssetError) -> Self {
        Self::AssetTransferFailed {
            reason: err.to_string(),
        }
    }
}

/// Confirms the caller may act on behalf of an order's maker.
pub trait AuthorizationPolicy {
    fn verify(&self, order: &Order, caller: AccountId) -> bool;
}

/// Moves value between accounts.
pub trait FundTransfer {
    fn transfer_funds(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), FundError>;
}

/// Moves custody of asset units between accounts. Implementations
/// dispatch on [`AssetRef::kind`] to the matching asset standard.
pub trait AssetTransfer {
    fn transfer_asset(
        &mut self,
        asset: &AssetRef,
        from: AccountId,
        to: AccountId,
    ) -> Result<(), AssetError>;
}

/// Direct-sender authorization: the caller must be the maker.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakerPolicy;

impl AuthorizationPolicy for MakerPolicy {
    fn verify(&self, order: &Order, caller: AccountId) -> bool {
        !caller.is_zero() && order.maker == caller
    }
}
