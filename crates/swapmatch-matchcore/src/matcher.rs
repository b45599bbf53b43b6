//! Pairwise match validation and settlement arithmetic.
//!
//! [`plan_match`] is pure: it reads the two orders, their fill states,
//! the bid's escrow balance, and the caller's attached pool, and either
//! rejects the pairing with a distinct error or produces a [`MatchPlan`]
//! describing exactly which funds move where. Execution belongs to the
//! lifecycle layer; same input, same output here.

use chrono::{DateTime, Utc};

use swapmatch_types::{
    Amount, ExchangeConfig, FillState, Order, OrderKey, Quantity, Result, SaleKind, Side,
    SwapmatchError,
};

/// The computed settlement for one valid pairing.
///
/// Conservation: `cost == fee + proceeds` and
/// `cost == escrow_used + pool_used`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPlan {
    pub ask_key: OrderKey,
    pub bid_key: OrderKey,
    /// Units traded: the ask's remaining quantity, always in full.
    pub quantity: Quantity,
    /// Fill price per unit — always the ask's price.
    pub unit_price: Amount,
    /// `unit_price * quantity`.
    pub cost: Amount,
    pub fee: Amount,
    pub proceeds: Amount,
    /// Portion of `cost` drawn from the bid's existing escrow.
    pub escrow_used: Amount,
    /// Portion of `cost` drawn from the caller's attached pool.
    pub pool_used: Amount,
    pub ask_closes: bool,
    pub bid_closes: bool,
}

/// Validate a proposed pairing and compute its settlement.
///
/// Validation order, each a distinct failure: self-match, sides, sale
/// kinds and asset identity, expiry and closed state, quantity coverage,
/// funding, then price crossing.
#[allow(clippy::too_many_arguments)]
pub fn plan_match(
    ask: &Order,
    bid: &Order,
    ask_fill: FillState,
    bid_fill: FillState,
    bid_escrow_funds: Amount,
    attached_pool: Amount,
    caller: swapmatch_types::AccountId,
    config: &ExchangeConfig,
    now: DateTime<Utc>,
) -> Result<MatchPlan> {
    let ask_key = ask.key();
    let bid_key = bid.key();

    // 1. A key can never settle against itself.
    if ask_key == bid_key {
        return Err(SwapmatchError::SelfMatch);
    }

    // 2. Sides must form an ask/bid pairing.
    if ask.side != Side::Ask || bid.side != Side::Bid {
        return Err(SwapmatchError::SideMismatch);
    }

    // 3. Sale-kind compatibility.
    if ask.sale_kind != SaleKind::SingleItem {
        return Err(SwapmatchError::KindMismatch);
    }
    match bid.sale_kind {
        SaleKind::SingleItem => {
            // Exact identity: collection, token, quantity, standard.
            if bid.asset != ask.asset {
                return Err(SwapmatchError::AssetMismatch {
                    reason: "single-item bid does not describe the ask's asset".into(),
                });
            }
        }
        SaleKind::AnyItemInCollection => {
            if bid.asset.collection != ask.asset.collection {
                return Err(SwapmatchError::KindMismatch);
            }
            // The ask's token and quantity are accepted as-is.
        }
    }

    // 4. Liveness: neither expired, neither closed.
    if ask.is_expired(now) || ask_fill.is_closed() {
        return Err(SwapmatchError::OrderClosed(ask_key));
    }
    if bid.is_expired(now) || bid_fill.is_closed() {
        return Err(SwapmatchError::OrderClosed(bid_key));
    }

    // Asks settle their remaining units in full; partial consumption of a
    // single ask is not supported.
    let quantity = ask_fill.remaining(ask.asset.quantity);
    if quantity == 0 {
        return Err(SwapmatchError::OrderClosed(ask_key));
    }
    let bid_remaining = bid_fill.remaining(bid.asset.quantity);
    if bid_remaining < quantity {
        return Err(SwapmatchError::AssetMismatch {
            reason: format!(
                "bid has {bid_remaining} units open, ask settles {quantity}"
            ),
        });
    }

    // 5. Funding source, determined by caller identity.
    let cost = ask
        .price
        .checked_mul(Amount::from(quantity))
        .ok_or_else(|| SwapmatchError::InvalidOrder {
            reason: "fill cost overflows".into(),
        })?;
    let (escrow_used, pool_used) = if caller == ask.maker {
        // The ask maker settles against the bid's escrow alone.
        if attached_pool > 0 {
            return Err(SwapmatchError::ValueNotAllowed);
        }
        if bid_escrow_funds < cost {
            return Err(SwapmatchError::InsufficientValue {
                needed: cost,
                available: bid_escrow_funds,
            });
        }
        (cost, 0)
    } else {
        // Bid maker or third party: escrow first, attached pool covers
        // the shortfall.
        let escrow_used = bid_escrow_funds.min(cost);
        let pool_used = cost - escrow_used;
        if pool_used > attached_pool {
            return Err(SwapmatchError::InsufficientValue {
                needed: cost,
                available: bid_escrow_funds + attached_pool,
            });
        }
        (escrow_used, pool_used)
    };

    // 6. Prices must cross. Fill price is the ask's price; improvement
    // stays in the bid's escrow, never a cash rebate.
    if bid.price < ask.price {
        return Err(SwapmatchError::BidTooLow {
            bid: bid.price,
            ask: ask.price,
        });
    }

    let fee = config.fee_for(cost);
    let proceeds = cost - fee;

    let ask_filled = ask_fill.filled().unwrap_or(0);
    let bid_filled = bid_fill.filled().unwrap_or(0);

    Ok(MatchPlan {
        ask_key,
        bid_key,
        quantity,
        unit_price: ask.price,
        cost,
        fee,
        proceeds,
        escrow_used,
        pool_used,
        ask_closes: ask_filled + quantity >= ask.asset.quantity,
        bid_closes: bid_filled + quantity >= bid.asset.quantity,
    })
}
