//! System-wide constants for the SwapMatch exchange engine.

use crate::Amount;

/// Fee rates are expressed in basis points against this denominator.
pub const FEE_DENOMINATOR_BPS: Amount = 10_000;

/// Upper bound on the configurable protocol fee rate (10%).
pub const MAX_FEE_RATE_BPS: u64 = 1_000;

/// Default protocol fee rate (2%).
pub const DEFAULT_FEE_RATE_BPS: u64 = 200;

/// Maximum elements accepted in a single create / cancel / edit / match
/// batch.
pub const MAX_BATCH_LEN: usize = 10_000;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "SwapMatch";
