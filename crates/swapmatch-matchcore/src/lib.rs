//! # swapmatch-matchcore
//!
//! **Pure compute plane for SwapMatch.**
//!
//! Matching is pairwise-explicit: a caller proposes a specific ask/bid
//! pairing and this crate validates it and computes the settlement. It
//! has:
//!
//! - **Zero side effects**: no transfers, no ledger writes
//! - **Deterministic output**: same orders and balances, same plan
//! - **Price index**: best-first discovery structure kept consistent
//!   with fill state by the lifecycle layer

pub mod matcher;
pub mod price_index;

pub use matcher::{plan_match, MatchPlan};
pub use price_index::{IndexGroup, PriceIndex};
