//! Transfer plans: the atomicity mechanism for external movements.
//!
//! Each public operation first validates and builds a [`TransferPlan`] —
//! the ordered list of fund and asset movements it needs — then executes
//! the plan, and only after the plan fully succeeds mutates ledger state.
//! If any movement fails mid-plan, every already-applied movement is
//! reversed before the error propagates, so a failing capability can
//! never leave partial external state behind.

use swapmatch_types::{AccountId, Amount, AssetRef, Result, SwapmatchError};

use crate::ports::{AssetTransfer, FundTransfer};

/// One planned external movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannedMove {
    Funds {
        from: AccountId,
        to: AccountId,
        amount: Amount,
    },
    Asset {
        asset: AssetRef,
        from: AccountId,
        to: AccountId,
    },
}

impl PlannedMove {
    /// The movement that undoes this one.
    #[must_use]
    fn inverse(self) -> Self {
        match self {
            Self::Funds { from, to, amount } => Self::Funds {
                from: to,
                to: from,
                amount,
            },
            Self::Asset { asset, from, to } => Self::Asset {
                asset,
                from: to,
                to: from,
            },
        }
    }

    fn apply<V: FundTransfer + AssetTransfer>(self, vault: &mut V) -> Result<()> {
        match self {
            Self::Funds { from, to, amount } => {
                vault.transfer_funds(from, to, amount)?;
            }
            Self::Asset { asset, from, to } => {
                vault.transfer_asset(&asset, from, to)?;
            }
        }
        Ok(())
    }
}

/// Ordered external movements for one operation.
#[derive(Debug, Default)]
pub struct TransferPlan {
    moves: Vec<PlannedMove>,
}

impl TransferPlan {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a fund movement. Zero amounts are dropped.
    pub fn push_funds(&mut self, from: AccountId, to: AccountId, amount: Amount) {
        if amount > 0 {
            self.moves.push(PlannedMove::Funds { from, to, amount });
        }
    }

    /// Queue an asset movement.
    pub fn push_asset(&mut self, asset: AssetRef, from: AccountId, to: AccountId) {
        self.moves.push(PlannedMove::Asset { asset, from, to });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Apply every movement in order. On the first failure, reverse the
    /// movements already applied (in reverse order) and return the error.
    ///
    /// A reversal that itself fails means the vault broke its own
    /// round-trip contract; that surfaces as `SM_ERR_900` since the
    /// ledger can no longer trust the external state.
    pub fn execute<V: FundTransfer + AssetTransfer>(&self, vault: &mut V) -> Result<()> {
        let mut applied = 0usize;
        for planned in &self.moves {
            match planned.apply(vault) {
                Ok(()) => applied += 1,
                Err(err) => {
                    tracing::warn!(
                        applied,
                        total = self.moves.len(),
                        %err,
                        "transfer plan failed, reversing applied movements"
                    );
                    for done in self.moves[..applied].iter().rev() {
                        if let Err(undo_err) = done.inverse().apply(vault) {
                            tracing::error!(%undo_err, "reversal failed while unwinding plan");
                            return Err(SwapmatchError::Internal(format!(
                                "transfer reversal failed: {undo_err}"
                            )));
                        }
                    }
                    return Err(err);
                }
            }
        }
        Ok(())
    }
}
