//! Error types for the SwapMatch exchange engine.
//!
//! All errors use the `SM_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Order errors
//! - 2xx: Authorization errors
//! - 3xx: Matching errors
//! - 4xx: Escrow / value errors
//! - 5xx: Transfer capability errors
//! - 9xx: General / internal errors

use thiserror::Error;

use crate::{Amount, OrderKey};

/// Central error enum for all SwapMatch operations.
#[derive(Debug, Error)]
pub enum SwapmatchError {
    // =================================================================
    // Order Errors (1xx)
    // =================================================================
    /// The order failed structural validation (bad salt, maker, price,
    /// asset descriptor).
    #[error("SM_ERR_100: Invalid order: {reason}")]
    InvalidOrder { reason: String },

    /// The order is cancelled, fully settled, or expired — permanently
    /// unmatchable.
    #[error("SM_ERR_101: Order closed: {0}")]
    OrderClosed(OrderKey),

    /// A live order already exists at this key.
    #[error("SM_ERR_102: Order already exists: {0}")]
    DuplicateOrder(OrderKey),

    /// No order is stored under this key.
    #[error("SM_ERR_103: Order not found: {0}")]
    OrderNotFound(OrderKey),

    // =================================================================
    // Authorization Errors (2xx)
    // =================================================================
    /// The caller may not act on behalf of the order's maker.
    #[error("SM_ERR_200: Caller is not authorized for this order")]
    Unauthorized,

    // =================================================================
    // Matching Errors (3xx)
    // =================================================================
    /// The two sides of a proposed pairing are the same order.
    #[error("SM_ERR_300: Cannot match an order against itself")]
    SelfMatch,

    /// The proposed ask is not an ask, or the proposed bid is not a bid.
    #[error("SM_ERR_301: Order sides do not form an ask/bid pairing")]
    SideMismatch,

    /// Sale kinds are incompatible (non-single-item ask, or a bid
    /// targeting a different collection).
    #[error("SM_ERR_302: Sale kinds are incompatible")]
    KindMismatch,

    /// Asset identity mismatch under a single-item pairing, or the bid
    /// cannot cover the ask's units.
    #[error("SM_ERR_303: Asset mismatch: {reason}")]
    AssetMismatch { reason: String },

    /// The bid's price is below the ask's price.
    #[error("SM_ERR_304: Bid price {bid} below ask price {ask}")]
    BidTooLow { bid: Amount, ask: Amount },

    // =================================================================
    // Escrow / Value Errors (4xx)
    // =================================================================
    /// Escrow plus attached value cannot cover the required amount.
    #[error("SM_ERR_400: Insufficient value: need {needed}, have {available}")]
    InsufficientValue { needed: Amount, available: Amount },

    /// Attached value is not permitted for this funding path.
    #[error("SM_ERR_401: Attached value not allowed when the ask maker settles")]
    ValueNotAllowed,

    /// An escrow balance adjustment would go negative. Indicates a bug in
    /// the enclosing operation, never user input.
    #[error("SM_ERR_402: Escrow underflow for order {0}")]
    EscrowUnderflow(OrderKey),

    // =================================================================
    // Transfer Capability Errors (5xx)
    // =================================================================
    /// The fund-transfer capability refused or failed a movement.
    #[error("SM_ERR_500: Fund transfer failed: {reason}")]
    FundTransferFailed { reason: String },

    /// The asset-transfer capability refused or failed a movement.
    #[error("SM_ERR_501: Asset transfer failed: {reason}")]
    AssetTransferFailed { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("SM_ERR_900: Internal error: {0}")]
    Internal(String),
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SwapmatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = SwapmatchError::OrderClosed(OrderKey::ZERO);
        let msg = format!("{err}");
        assert!(msg.starts_with("SM_ERR_101"), "Got: {msg}");
    }

    #[test]
    fn insufficient_value_display() {
        let err = SwapmatchError::InsufficientValue {
            needed: 100,
            available: 40,
        };
        let msg = format!("{err}");
        assert!(msg.contains("SM_ERR_400"));
        assert!(msg.contains("100"));
        assert!(msg.contains("40"));
    }

    #[test]
    fn all_errors_have_sm_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(SwapmatchError::Unauthorized),
            Box::new(SwapmatchError::SelfMatch),
            Box::new(SwapmatchError::SideMismatch),
            Box::new(SwapmatchError::KindMismatch),
            Box::new(SwapmatchError::ValueNotAllowed),
            Box::new(SwapmatchError::BidTooLow { bid: 9, ask: 10 }),
            Box::new(SwapmatchError::Internal("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("SM_ERR_"),
                "Error missing SM_ERR_ prefix: {msg}"
            );
        }
    }
}
