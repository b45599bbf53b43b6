//! # swapmatch-escrow
//!
//! **Custody plane**: the escrow ledger, the capability ports the engine
//! consumes from collaborators, and the transfer-plan executor that gives
//! each public operation its all-or-nothing external-transfer semantics.
//!
//! ## Architecture
//!
//! 1. **EscrowLedger**: per-order-key held funds and asset holdings
//! 2. **Ports**: [`AuthorizationPolicy`], [`FundTransfer`], [`AssetTransfer`]
//!    — opaque collaborator capabilities
//! 3. **InMemoryVault**: reference port implementation for tests and
//!    single-process embeddings
//! 4. **TransferPlan**: validate-then-execute movement batches with
//!    reversal on mid-plan failure
//!
//! Ledger state is only mutated after a plan has fully executed, so a
//! failing capability can never observe or leave partial ledger state.

pub mod ledger;
pub mod plan;
pub mod ports;
pub mod vault;

pub use ledger::{EscrowEntry, EscrowLedger};
pub use plan::{PlannedMove, TransferPlan};
pub use ports::{
    AssetError, AssetTransfer, AuthorizationPolicy, FundError, FundTransfer, MakerPolicy,
};
pub use vault::InMemoryVault;
