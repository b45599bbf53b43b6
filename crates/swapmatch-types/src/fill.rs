//! Fill state: per-order-key settlement progress.
//!
//! `Closed` is a tagged variant, not a magic quantity, so a closed order
//! can never be mistaken for one with a large fill count.

use serde::{Deserialize, Serialize};

use crate::Quantity;

/// Settlement progress of one order key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillState {
    /// Live order: `filled` units settled so far,
    /// `0 <= filled <= asset.quantity`.
    Open { filled: Quantity },
    /// Terminal: cancelled or fully settled. A closed key never reopens.
    Closed,
}

impl FillState {
    /// Fresh state for a newly created order.
    #[must_use]
    pub fn new() -> Self {
        Self::Open { filled: 0 }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Settled units, or `None` once closed.
    #[must_use]
    pub fn filled(&self) -> Option<Quantity> {
        match self {
            Self::Open { filled } => Some(*filled),
            Self::Closed => None,
        }
    }

    /// Units still open against a total of `quantity`. Zero once closed.
    #[must_use]
    pub fn remaining(&self, quantity: Quantity) -> Quantity {
        match self {
            Self::Open { filled } => quantity.saturating_sub(*filled),
            Self::Closed => 0,
        }
    }
}

impl Default for FillState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FillState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { filled } => write!(f, "OPEN({filled})"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}
