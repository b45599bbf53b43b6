//! Exchange configuration: fee rate and the well-known accounts the
//! engine settles against.

use serde::{Deserialize, Serialize};

use crate::{constants, AccountId, Amount, Result, SwapmatchError};

/// Static configuration for one exchange instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Protocol fee in basis points, capped at
    /// [`constants::MAX_FEE_RATE_BPS`].
    pub fee_rate_bps: u64,
    /// Account receiving the protocol fee cut of every settlement.
    pub fee_sink: AccountId,
    /// Account the escrow ledger custodies funds and assets under.
    pub escrow_account: AccountId,
}

impl ExchangeConfig {
    /// Build a config, rejecting fee rates above the cap.
    pub fn new(fee_rate_bps: u64, fee_sink: AccountId, escrow_account: AccountId) -> Result<Self> {
        if fee_rate_bps > constants::MAX_FEE_RATE_BPS {
            return Err(SwapmatchError::Internal(format!(
                "fee rate {fee_rate_bps} bps exceeds cap {}",
                constants::MAX_FEE_RATE_BPS
            )));
        }
        Ok(Self {
            fee_rate_bps,
            fee_sink,
            escrow_account,
        })
    }

    /// Protocol fee for a settlement of `cost` funds:
    /// `cost * fee_rate_bps / 10_000`, integer truncation.
    #[must_use]
    pub fn fee_for(&self, cost: Amount) -> Amount {
        let bps = Amount::from(self.fee_rate_bps);
        match cost.checked_mul(bps) {
            Some(scaled) => scaled / constants::FEE_DENOMINATOR_BPS,
            // Out of u128 range: divide first. Loses at most one
            // denominator's worth of truncation precision.
            None => (cost / constants::FEE_DENOMINATOR_BPS) * bps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(bps: u64) -> ExchangeConfig {
        ExchangeConfig::new(bps, AccountId::new(), AccountId::new()).unwrap()
    }

    #[test]
    fn fee_truncates_toward_zero() {
        let cfg = config(200); // 2%
        assert_eq!(cfg.fee_for(1000), 20);
        assert_eq!(cfg.fee_for(10), 0); // 0.2 truncates
        assert_eq!(cfg.fee_for(49), 0);
        assert_eq!(cfg.fee_for(50), 1);
    }

    #[test]
    fn zero_fee_rate() {
        let cfg = config(0);
        assert_eq!(cfg.fee_for(1_000_000), 0);
    }

    #[test]
    fn fee_rate_cap_enforced() {
        let err = ExchangeConfig::new(
            constants::MAX_FEE_RATE_BPS + 1,
            AccountId::new(),
            AccountId::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SwapmatchError::Internal(_)));
    }

    #[test]
    fn config_serde_roundtrip() {
        let cfg = config(250);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ExchangeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.fee_rate_bps, back.fee_rate_bps);
        assert_eq!(cfg.fee_sink, back.fee_sink);
    }
}
