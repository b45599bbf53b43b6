//! The exchange facade: create / cancel / edit / match over the escrow
//! ledger, price index, and match planner.
//!
//! Every public operation is a single indivisible unit of work. The
//! exclusive `&mut self` borrow serializes calls; inside a call, all
//! external movements are validated into a [`TransferPlan`] and executed
//! (with reversal on mid-plan failure) before any ledger state mutates,
//! so a failing or re-entrant capability can never observe partial state.

use std::collections::HashSet;

use chrono::Utc;

use swapmatch_escrow::{
    AssetTransfer, AuthorizationPolicy, EscrowLedger, FundTransfer, TransferPlan,
};
use swapmatch_matchcore::{plan_match, IndexGroup, PriceIndex};
use swapmatch_types::{
    constants, AccountId, Amount, AssetRef, EditRequest, ExchangeConfig, ExchangeEvent, FillState,
    Order, OrderKey, Result, SettlementReceipt, Side, SwapmatchError,
};

use crate::store::{FillRegistry, OrderStore};

/// One escrow-backed exchange instance.
pub struct Exchange<V, P> {
    config: ExchangeConfig,
    vault: V,
    auth: P,
    orders: OrderStore,
    fills: FillRegistry,
    escrow: EscrowLedger,
    index: PriceIndex,
    events: Vec<ExchangeEvent>,
}

/// Deferred state mutation for one cancelled key.
struct CancelApply {
    key: OrderKey,
    maker: AccountId,
}

/// Deferred state mutation for one edit element.
struct EditApply {
    old_key: OrderKey,
    new_key: OrderKey,
    new_order: Order,
    /// Escrowed funds moved key-to-key as the down payment.
    carry_funds: Amount,
    /// Fresh funds credited to the new key (drawn from the batch pool).
    deposit_funds: Amount,
    /// Whether the old asset holding carries over unchanged.
    carry_asset: bool,
}

impl<V, P> Exchange<V, P>
where
    V: FundTransfer + AssetTransfer,
    P: AuthorizationPolicy,
{
    #[must_use]
    pub fn new(config: ExchangeConfig, vault: V, auth: P) -> Self {
        Self {
            config,
            vault,
            auth,
            orders: OrderStore::new(),
            fills: FillRegistry::new(),
            escrow: EscrowLedger::new(),
            index: PriceIndex::new(),
            events: Vec::new(),
        }
    }

    // =================================================================
    // create_orders
    // =================================================================

    /// Create a batch of orders, funding each one's escrow.
    ///
    /// All-or-nothing: any invalid element, or an aggregate fund budget
    /// short of the batch's bid requirements, fails the whole call with
    /// no state change. An element whose key is already live is an
    /// idempotent no-op (its key is returned, nothing is deposited).
    pub fn create_orders(
        &mut self,
        caller: AccountId,
        orders: Vec<Order>,
        attached_funds: Amount,
    ) -> Result<Vec<OrderKey>> {
        check_batch_len(orders.len())?;

        let mut keys = Vec::with_capacity(orders.len());
        let mut fresh: Vec<Order> = Vec::new();
        let mut seen: HashSet<OrderKey> = HashSet::new();
        let mut needed_funds: Amount = 0;
        let mut plan = TransferPlan::new();

        for order in orders {
            order.validate()?;
            if !self.auth.verify(&order, caller) {
                return Err(SwapmatchError::Unauthorized);
            }
            let key = order.key();
            keys.push(key);

            // A key is live if it is stored, or if the registry holds an
            // open fill entry for it (a fresh order partially filled
            // through a match is live without ever being stored).
            if self.orders.contains(key) || self.fills.is_open(key) || seen.contains(&key) {
                tracing::debug!(%key, "create is idempotent for live key");
                continue;
            }
            if self.fills.is_closed(key) {
                // A closed key never reopens; the maker bumps the salt
                // instead.
                return Err(SwapmatchError::OrderClosed(key));
            }

            match order.side {
                Side::Bid => {
                    needed_funds = needed_funds
                        .checked_add(order.required_funds()?)
                        .ok_or_else(|| {
                            SwapmatchError::Internal("batch fund requirement overflows".into())
                        })?;
                }
                Side::Ask => {
                    plan.push_asset(order.asset, order.maker, self.config.escrow_account);
                }
            }
            seen.insert(key);
            fresh.push(order);
        }

        if needed_funds > attached_funds {
            return Err(SwapmatchError::InsufficientValue {
                needed: needed_funds,
                available: attached_funds,
            });
        }
        // Only the needed total is drawn; the caller's surplus budget is
        // never taken, which is the refund of the push-value model.
        plan.push_funds(caller, self.config.escrow_account, needed_funds);
        plan.execute(&mut self.vault)?;

        for order in fresh {
            let key = order.key();
            self.index.insert_order(&order)?;
            self.fills.open(key);
            match order.side {
                Side::Bid => self.escrow.deposit_funds(key, order.required_funds()?)?,
                Side::Ask => self.escrow.deposit_asset(key, order.asset)?,
            }
            tracing::info!(
                %key,
                maker = %order.maker,
                side = %order.side,
                price = order.price,
                "order created"
            );
            self.events.push(ExchangeEvent::OrderCreated {
                key,
                maker: order.maker,
                side: order.side,
                price: order.price,
                asset: order.asset,
            });
            self.orders.insert(order);
        }
        Ok(keys)
    }

    // =================================================================
    // cancel_orders
    // =================================================================

    /// Cancel a batch of orders, refunding each one's remaining escrow
    /// to its maker.
    ///
    /// Per-element tolerant: an unknown or closed key, or a caller the
    /// policy rejects, yields `false` for that element and processing
    /// continues. Transfer failures are fatal to the whole call.
    pub fn cancel_orders(&mut self, caller: AccountId, keys: &[OrderKey]) -> Result<Vec<bool>> {
        check_batch_len(keys.len())?;

        let mut results = Vec::with_capacity(keys.len());
        let mut plan = TransferPlan::new();
        let mut applies: Vec<CancelApply> = Vec::new();
        let mut closing: HashSet<OrderKey> = HashSet::new();

        for &key in keys {
            if closing.contains(&key) {
                results.push(false);
                continue;
            }
            let Some(order) = self.orders.get(key) else {
                tracing::debug!(%key, "cancel skipped: no live order");
                results.push(false);
                continue;
            };
            if !self.auth.verify(order, caller) {
                tracing::warn!(%key, %caller, "cancel skipped: caller not authorized");
                results.push(false);
                continue;
            }

            plan.push_funds(
                self.config.escrow_account,
                order.maker,
                self.escrow.funds_of(key),
            );
            if let Some(asset) = self.escrow.asset_of(key) {
                plan.push_asset(asset, self.config.escrow_account, order.maker);
            }
            applies.push(CancelApply {
                key,
                maker: order.maker,
            });
            closing.insert(key);
            results.push(true);
        }

        plan.execute(&mut self.vault)?;

        for apply in applies {
            self.escrow.drain_funds(apply.key);
            self.escrow.take_asset(apply.key);
            self.fills.close(apply.key);
            self.index.remove(apply.key);
            self.orders.remove(apply.key);
            tracing::info!(key = %apply.key, maker = %apply.maker, "order cancelled");
            self.events.push(ExchangeEvent::OrderCancelled {
                key: apply.key,
                maker: apply.maker,
            });
        }
        Ok(results)
    }

    // =================================================================
    // edit_orders
    // =================================================================

    /// Supersede a batch of orders in place, carrying each old order's
    /// escrow over as a down payment on its replacement.
    ///
    /// All-or-nothing, with one exception: an element whose new key was
    /// already produced earlier in the same batch is skipped entirely and
    /// reported as [`OrderKey::ZERO`], so the same resulting order can
    /// never be processed (or its escrow withdrawn) twice.
    pub fn edit_orders(
        &mut self,
        caller: AccountId,
        edits: Vec<EditRequest>,
        attached_funds: Amount,
    ) -> Result<Vec<OrderKey>> {
        check_batch_len(edits.len())?;

        let mut keys_out = Vec::with_capacity(edits.len());
        let mut seen_new: HashSet<OrderKey> = HashSet::new();
        let mut consumed_old: HashSet<OrderKey> = HashSet::new();
        let mut pool_needed: Amount = 0;
        let mut plan = TransferPlan::new();
        let mut applies: Vec<EditApply> = Vec::new();

        for EditRequest { old_key, new_order } in edits {
            let new_key = new_order.key();
            if seen_new.contains(&new_key) {
                tracing::debug!(%new_key, "edit deduplicated within batch");
                keys_out.push(OrderKey::ZERO);
                continue;
            }
            if consumed_old.contains(&old_key) {
                return Err(SwapmatchError::OrderClosed(old_key));
            }
            let old = self
                .orders
                .get(old_key)
                .ok_or(SwapmatchError::OrderNotFound(old_key))?;
            if !self.auth.verify(old, caller) || !self.auth.verify(&new_order, caller) {
                return Err(SwapmatchError::Unauthorized);
            }
            new_order.validate()?;
            // Stored orders and partially filled fresh keys are both live.
            if self.orders.contains(new_key) || self.fills.is_open(new_key) {
                return Err(SwapmatchError::DuplicateOrder(new_key));
            }
            if self.fills.is_closed(new_key) {
                return Err(SwapmatchError::OrderClosed(new_key));
            }

            let maker = old.maker;
            let old_funds = self.escrow.funds_of(old_key);
            let old_asset = self.escrow.asset_of(old_key);
            let mut apply = EditApply {
                old_key,
                new_key,
                new_order: new_order.clone(),
                carry_funds: 0,
                deposit_funds: 0,
                carry_asset: false,
            };

            match (old.side, new_order.side) {
                (Side::Bid, Side::Bid) => {
                    // Funds are fungible: carry what covers the new
                    // requirement, refund the rest, pull the shortfall
                    // from the batch pool.
                    let required = new_order.required_funds()?;
                    let carry = old_funds.min(required);
                    apply.carry_funds = carry;
                    apply.deposit_funds = required - carry;
                    pool_needed = pool_needed
                        .checked_add(apply.deposit_funds)
                        .ok_or_else(|| {
                            SwapmatchError::Internal("batch fund requirement overflows".into())
                        })?;
                    plan.push_funds(self.config.escrow_account, maker, old_funds - carry);
                }
                (Side::Ask, Side::Ask) if old_asset == Some(new_order.asset) => {
                    // Same asset units back the new terms; nothing moves
                    // externally.
                    apply.carry_asset = true;
                }
                _ => {
                    // Shape changed: refund the old escrow wholesale and
                    // fund the new order fresh.
                    plan.push_funds(self.config.escrow_account, maker, old_funds);
                    if let Some(asset) = old_asset {
                        plan.push_asset(asset, self.config.escrow_account, maker);
                    }
                    match new_order.side {
                        Side::Bid => {
                            let required = new_order.required_funds()?;
                            apply.deposit_funds = required;
                            pool_needed =
                                pool_needed.checked_add(required).ok_or_else(|| {
                                    SwapmatchError::Internal(
                                        "batch fund requirement overflows".into(),
                                    )
                                })?;
                        }
                        Side::Ask => {
                            plan.push_asset(
                                new_order.asset,
                                new_order.maker,
                                self.config.escrow_account,
                            );
                        }
                    }
                }
            }

            seen_new.insert(new_key);
            consumed_old.insert(old_key);
            applies.push(apply);
            keys_out.push(new_key);
        }

        if pool_needed > attached_funds {
            return Err(SwapmatchError::InsufficientValue {
                needed: pool_needed,
                available: attached_funds,
            });
        }
        plan.push_funds(caller, self.config.escrow_account, pool_needed);
        plan.execute(&mut self.vault)?;

        for apply in applies {
            self.index.remove(apply.old_key);
            self.orders.remove(apply.old_key);

            if apply.carry_funds > 0 {
                self.escrow
                    .move_funds(apply.old_key, apply.new_key, apply.carry_funds)?;
            }
            self.escrow.drain_funds(apply.old_key);
            if apply.carry_asset {
                let asset = self.escrow.take_asset(apply.old_key).ok_or_else(|| {
                    SwapmatchError::Internal(format!(
                        "missing carried asset for {}",
                        apply.old_key
                    ))
                })?;
                self.escrow.deposit_asset(apply.new_key, asset)?;
            } else {
                self.escrow.take_asset(apply.old_key);
                if apply.new_order.side == Side::Ask {
                    self.escrow
                        .deposit_asset(apply.new_key, apply.new_order.asset)?;
                }
            }
            if apply.deposit_funds > 0 {
                self.escrow
                    .deposit_funds(apply.new_key, apply.deposit_funds)?;
            }
            self.fills.close(apply.old_key);
            self.fills.open(apply.new_key);
            self.index.insert_order(&apply.new_order)?;
            tracing::info!(
                old_key = %apply.old_key,
                new_key = %apply.new_key,
                "order edited"
            );
            self.events.push(ExchangeEvent::OrderEdited {
                old_key: apply.old_key,
                new_key: apply.new_key,
                maker: apply.new_order.maker,
            });
            self.orders.insert(apply.new_order);
        }
        Ok(keys_out)
    }

    // =================================================================
    // match_one / match_many
    // =================================================================

    /// Settle one explicit ask/bid pairing.
    ///
    /// Either order may be escrow-backed (previously created) or fresh;
    /// fresh orders must pass the authorization policy for the caller.
    /// Funding follows the caller: the ask's maker settles against the
    /// bid's escrow alone (no attached value); anyone else covers any
    /// escrow shortfall from `attached_value`.
    pub fn match_one(
        &mut self,
        caller: AccountId,
        ask: &Order,
        bid: &Order,
        attached_value: Amount,
    ) -> Result<SettlementReceipt> {
        self.settle_pair(caller, ask, bid, attached_value)
            .map(|(receipt, _)| receipt)
    }

    /// Settle a batch of explicit pairings sharing one attached pool,
    /// consumed left-to-right.
    ///
    /// Per-element tolerant: a pair that fails validation (including an
    /// exhausted pool) yields `false` and processing continues. Transfer
    /// failures are fatal to the whole call.
    pub fn match_many(
        &mut self,
        caller: AccountId,
        pairs: &[(Order, Order)],
        attached_value: Amount,
    ) -> Result<Vec<bool>> {
        check_batch_len(pairs.len())?;

        let mut remaining_pool = attached_value;
        let mut results = Vec::with_capacity(pairs.len());
        for (ask, bid) in pairs {
            match self.settle_pair(caller, ask, bid, remaining_pool) {
                Ok((_, pool_used)) => {
                    remaining_pool -= pool_used;
                    results.push(true);
                }
                Err(
                    err @ (SwapmatchError::FundTransferFailed { .. }
                    | SwapmatchError::AssetTransferFailed { .. }
                    | SwapmatchError::EscrowUnderflow(_)
                    | SwapmatchError::Internal(_)),
                ) => return Err(err),
                Err(err) => {
                    tracing::debug!(%err, "pair skipped");
                    results.push(false);
                }
            }
        }
        Ok(results)
    }

    /// Validate, execute transfers, then mutate ledger state. Returns the
    /// receipt and how much of the attached pool was consumed.
    fn settle_pair(
        &mut self,
        caller: AccountId,
        ask: &Order,
        bid: &Order,
        pool: Amount,
    ) -> Result<(SettlementReceipt, Amount)> {
        ask.validate()?;
        bid.validate()?;
        let ask_key = ask.key();
        let bid_key = bid.key();

        // Stored orders were authorized at creation; fresh ones must
        // pass the policy now.
        if !self.orders.contains(ask_key) && !self.auth.verify(ask, caller) {
            return Err(SwapmatchError::Unauthorized);
        }
        if !self.orders.contains(bid_key) && !self.auth.verify(bid, caller) {
            return Err(SwapmatchError::Unauthorized);
        }

        let plan = plan_match(
            ask,
            bid,
            self.fills.state_or_open(ask_key),
            self.fills.state_or_open(bid_key),
            self.escrow.funds_of(bid_key),
            pool,
            caller,
            &self.config,
            Utc::now(),
        )?;

        let held_asset = self.escrow.asset_of(ask_key);
        // A fully consumed bid takes its price-improvement residue home.
        let residual = if plan.bid_closes {
            self.escrow.funds_of(bid_key) - plan.escrow_used
        } else {
            0
        };

        let escrow_account = self.config.escrow_account;
        let mut transfers = TransferPlan::new();
        transfers.push_funds(caller, escrow_account, plan.pool_used);
        transfers.push_funds(escrow_account, ask.maker, plan.proceeds);
        transfers.push_funds(escrow_account, self.config.fee_sink, plan.fee);
        match held_asset {
            // Deposited asks settle out of escrow custody; never-deposited
            // asks settle straight from the maker.
            Some(held) => transfers.push_asset(held, escrow_account, bid.maker),
            None => transfers.push_asset(ask.asset, ask.maker, bid.maker),
        }
        transfers.push_funds(escrow_account, bid.maker, residual);
        transfers.execute(&mut self.vault)?;

        if plan.escrow_used > 0 {
            self.escrow.consume_funds(bid_key, plan.escrow_used)?;
        }
        self.escrow.take_asset(ask_key);
        self.escrow.drain_funds(ask_key);
        self.fills.close(ask_key);
        self.index.remove(ask_key);
        self.orders.remove(ask_key);

        if plan.bid_closes {
            self.escrow.drain_funds(bid_key);
            self.fills.close(bid_key);
            self.index.remove(bid_key);
            self.orders.remove(bid_key);
        } else {
            self.fills.record_fill(bid_key, plan.quantity)?;
        }

        let receipt = SettlementReceipt {
            ask_key,
            bid_key,
            asset: ask.asset,
            unit_price: plan.unit_price,
            quantity: plan.quantity,
            cost: plan.cost,
            fee: plan.fee,
            proceeds: plan.proceeds,
            seller: ask.maker,
            buyer: bid.maker,
            settled_at: Utc::now(),
        };
        tracing::info!(
            %ask_key,
            %bid_key,
            quantity = plan.quantity,
            cost = plan.cost,
            fee = plan.fee,
            "trade settled"
        );
        self.events.push(ExchangeEvent::TradeSettled {
            ask_key,
            bid_key,
            quantity: plan.quantity,
            cost: plan.cost,
            fee: plan.fee,
        });
        Ok((receipt, plan.pool_used))
    }

    // =================================================================
    // Read accessors
    // =================================================================

    /// Fill state of a key, if the exchange has ever seen it.
    #[must_use]
    pub fn fill_state(&self, key: OrderKey) -> Option<FillState> {
        self.fills.get(key)
    }

    /// Funds currently escrowed for a key.
    #[must_use]
    pub fn escrow_funds(&self, key: OrderKey) -> Amount {
        self.escrow.funds_of(key)
    }

    /// Asset units currently escrowed for a key.
    #[must_use]
    pub fn escrow_asset(&self, key: OrderKey) -> Option<AssetRef> {
        self.escrow.asset_of(key)
    }

    /// The live order stored at a key.
    #[must_use]
    pub fn order(&self, key: OrderKey) -> Option<&Order> {
        self.orders.get(key)
    }

    /// Best discoverable price within a group.
    #[must_use]
    pub fn best_price(&self, group: &IndexGroup) -> Option<Amount> {
        self.index.best_price(group)
    }

    /// Number of live orders.
    #[must_use]
    pub fn open_order_count(&self) -> usize {
        self.orders.len()
    }

    /// Sum of funds held across all escrow entries. Conservation checks
    /// compare this against the escrow account's vault balance.
    #[must_use]
    pub fn escrowed_funds_total(&self) -> Amount {
        self.escrow.total_funds()
    }

    /// Drain the accumulated event log.
    pub fn drain_events(&mut self) -> Vec<ExchangeEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    #[must_use]
    pub fn vault(&self) -> &V {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut V {
        &mut self.vault
    }
}

fn check_batch_len(len: usize) -> Result<()> {
    if len > constants::MAX_BATCH_LEN {
        return Err(SwapmatchError::InvalidOrder {
            reason: format!("batch of {len} exceeds limit {}", constants::MAX_BATCH_LEN),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use swapmatch_escrow::{InMemoryVault, MakerPolicy};
    use swapmatch_types::{AssetRef, CollectionId, TokenId};

    fn exchange() -> Exchange<InMemoryVault, MakerPolicy> {
        let config = ExchangeConfig::new(200, AccountId::new(), AccountId::new()).unwrap();
        Exchange::new(config, InMemoryVault::new(), MakerPolicy)
    }

    #[test]
    fn create_is_idempotent_per_key() {
        let mut ex = exchange();
        let maker = AccountId::new();
        let bid = Order::dummy_bid(
            maker,
            AssetRef::unique(CollectionId::new(), TokenId(1)),
            10,
        );
        ex.vault_mut().deposit_funds(maker, 100);

        let first = ex.create_orders(maker, vec![bid.clone()], 10).unwrap();
        // Same order again: same key back, nothing drawn a second time.
        let second = ex.create_orders(maker, vec![bid.clone()], 10).unwrap();
        assert_eq!(first, second);
        assert_eq!(ex.escrow_funds(bid.key()), 10);
        assert_eq!(ex.vault().balance_of(maker), 90);
    }

    #[test]
    fn create_after_partial_fresh_fill_keeps_history() {
        let mut ex = exchange();
        let collection = CollectionId::new();
        let buyer = AccountId::new();
        let seller = AccountId::new();
        ex.vault_mut().deposit_funds(buyer, 100);
        let asset = AssetRef::unique(collection, TokenId(1));
        ex.vault_mut().mint_asset(seller, asset);

        // A fresh collection bid settles one of its two units without
        // ever being created.
        let bid = Order::dummy_collection_bid(buyer, collection, 2, 10);
        let ask = Order::dummy_ask(seller, asset, 10);
        ex.match_one(buyer, &ask, &bid, 10).unwrap();
        let key = bid.key();
        assert_eq!(ex.fill_state(key), Some(FillState::Open { filled: 1 }));

        // Creating it now is an idempotent no-op: the open fill entry is
        // the live record, so nothing is deposited and the count stands.
        let keys = ex.create_orders(buyer, vec![bid.clone()], 20).unwrap();
        assert_eq!(keys, vec![key]);
        assert_eq!(ex.fill_state(key), Some(FillState::Open { filled: 1 }));
        assert_eq!(ex.escrow_funds(key), 0);
        assert_eq!(ex.vault().balance_of(buyer), 90);

        // Editing another order into that key is refused the same way.
        let other = Order::dummy_bid(buyer, asset, 10);
        let other_key = ex.create_orders(buyer, vec![other], 10).unwrap()[0];
        let err = ex
            .edit_orders(
                buyer,
                vec![EditRequest {
                    old_key: other_key,
                    new_order: bid,
                }],
                20,
            )
            .unwrap_err();
        assert!(matches!(err, SwapmatchError::DuplicateOrder(k) if k == key));
    }

    #[test]
    fn create_rejects_stranger_caller() {
        let mut ex = exchange();
        let bid = Order::dummy_bid(
            AccountId::new(),
            AssetRef::unique(CollectionId::new(), TokenId(1)),
            10,
        );
        let err = ex
            .create_orders(AccountId::new(), vec![bid], 10)
            .unwrap_err();
        assert!(matches!(err, SwapmatchError::Unauthorized));
    }

    #[test]
    fn create_batch_fails_whole_on_underfunded_bids() {
        let mut ex = exchange();
        let maker = AccountId::new();
        ex.vault_mut().deposit_funds(maker, 100);
        let collection = CollectionId::new();
        let bid_a = Order::dummy_bid(maker, AssetRef::unique(collection, TokenId(1)), 10);
        let bid_b = Order::dummy_bid(maker, AssetRef::unique(collection, TokenId(2)), 15);

        let err = ex
            .create_orders(maker, vec![bid_a.clone(), bid_b.clone()], 24)
            .unwrap_err();
        assert!(matches!(
            err,
            SwapmatchError::InsufficientValue {
                needed: 25,
                available: 24
            }
        ));
        // Nothing was drawn or recorded.
        assert_eq!(ex.vault().balance_of(maker), 100);
        assert_eq!(ex.fill_state(bid_a.key()), None);
        assert_eq!(ex.fill_state(bid_b.key()), None);
        assert_eq!(ex.open_order_count(), 0);
    }

    #[test]
    fn closed_key_never_reopens_via_create() {
        let mut ex = exchange();
        let maker = AccountId::new();
        ex.vault_mut().deposit_funds(maker, 100);
        let bid = Order::dummy_bid(
            maker,
            AssetRef::unique(CollectionId::new(), TokenId(1)),
            10,
        );
        let key = ex.create_orders(maker, vec![bid.clone()], 10).unwrap()[0];
        assert_eq!(ex.cancel_orders(maker, &[key]).unwrap(), vec![true]);

        let err = ex.create_orders(maker, vec![bid], 10).unwrap_err();
        assert!(matches!(err, SwapmatchError::OrderClosed(k) if k == key));
    }

    #[test]
    fn cancel_refunds_ask_asset() {
        let mut ex = exchange();
        let maker = AccountId::new();
        let asset = AssetRef::unique(CollectionId::new(), TokenId(7));
        ex.vault_mut().mint_asset(maker, asset);
        let ask = Order::dummy_ask(maker, asset, 100);

        let key = ex.create_orders(maker, vec![ask], 0).unwrap()[0];
        assert!(!ex.vault().owns(maker, &asset));
        assert_eq!(ex.escrow_asset(key), Some(asset));

        assert_eq!(ex.cancel_orders(maker, &[key]).unwrap(), vec![true]);
        assert!(ex.vault().owns(maker, &asset));
        assert_eq!(ex.escrow_asset(key), None);
        assert_eq!(ex.fill_state(key), Some(FillState::Closed));
    }

    #[test]
    fn cancel_by_stranger_reports_false() {
        let mut ex = exchange();
        let maker = AccountId::new();
        ex.vault_mut().deposit_funds(maker, 10);
        let bid = Order::dummy_bid(
            maker,
            AssetRef::unique(CollectionId::new(), TokenId(1)),
            10,
        );
        let key = ex.create_orders(maker, vec![bid], 10).unwrap()[0];

        let results = ex.cancel_orders(AccountId::new(), &[key]).unwrap();
        assert_eq!(results, vec![false]);
        // Still live, escrow untouched.
        assert_eq!(ex.escrow_funds(key), 10);
        assert!(ex.order(key).is_some());
    }

    #[test]
    fn events_are_drained_in_order() {
        let mut ex = exchange();
        let maker = AccountId::new();
        ex.vault_mut().deposit_funds(maker, 10);
        let bid = Order::dummy_bid(
            maker,
            AssetRef::unique(CollectionId::new(), TokenId(1)),
            10,
        );
        let key = ex.create_orders(maker, vec![bid], 10).unwrap()[0];
        ex.cancel_orders(maker, &[key]).unwrap();

        let events = ex.drain_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind(), "ORDER_CREATED");
        assert_eq!(events[1].kind(), "ORDER_CANCELLED");
        assert!(ex.drain_events().is_empty());
    }
}
