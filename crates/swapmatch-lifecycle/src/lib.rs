//! # swapmatch-lifecycle
//!
//! **Orchestration plane for SwapMatch.**
//!
//! Ties the escrow ledger, price index, and match planner together behind
//! the [`Exchange`] facade. Each public operation is atomic:
//!
//! - **Validate first**: every element of a batch is checked before
//!   anything moves
//! - **Transfers before state**: external movements run as one reversible
//!   [`swapmatch_escrow::TransferPlan`]; ledger state mutates only after
//!   the plan succeeds
//! - **Closed is forever**: the fill registry remembers every closed key,
//!   so a key can never be replayed

pub mod exchange;
pub mod store;

pub use exchange::Exchange;
pub use store::{FillRegistry, OrderStore};
