//! # swapmatch-types
//!
//! Shared types, errors, and configuration for the **SwapMatch** exchange
//! engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`CollectionId`], [`TokenId`], [`OrderKey`]
//! - **Order model**: [`Order`], [`Side`], [`SaleKind`], [`AssetKind`], [`AssetRef`], [`EditRequest`]
//! - **Fill model**: [`FillState`]
//! - **Settlement model**: [`SettlementReceipt`], [`ExchangeEvent`]
//! - **Configuration**: [`ExchangeConfig`]
//! - **Errors**: [`SwapmatchError`] with `SM_ERR_` prefix codes
//! - **Constants**: fee denominator and system-wide limits

pub mod config;
pub mod constants;
pub mod error;
pub mod fill;
pub mod ids;
pub mod order;
pub mod receipt;

// Re-export all primary types at crate root for ergonomic imports:
//   use swapmatch_types::{Order, Side, OrderKey, FillState, ...};

pub use config::*;
pub use error::*;
pub use fill::*;
pub use ids::*;
pub use order::*;
pub use receipt::*;

// Constants are accessed via `swapmatch_types::constants::FOO`
// (not re-exported to avoid name collisions).
