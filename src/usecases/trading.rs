//! Trading Service - The Exposed Trade Surface
//!
//! One entry point for every trading operation, dispatched over a closed
//! request enum so unknown actions are unrepresentable. A market-style
//! order runs the full chain: translate intent → fetch a fresh depth
//! snapshot → simulate the fill → apply the slippage guard → build, sign
//! and submit. Every diagnostic failure happens before the first network
//! mutation, so a vetoed order never costs a fee.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::domain::error::TradeError;
use crate::domain::fill::{simulate, Fill, FillPlan};
use crate::domain::guard::SlippageGuard;
use crate::domain::intent::{translate, Order, OrderIntent};
use crate::domain::tx::{ManageOfferOp, TransactionEnvelope};
use crate::ports::keystore::KeyStore;
use crate::ports::ledger::{LedgerGateway, SubmissionReceipt};
use crate::ports::market_data::MarketData;

use super::order_manager::OrderManager;
use super::pipeline::TransactionPipeline;

/// Per-call trading policy, resolved from configuration at wiring time.
#[derive(Debug, Clone)]
pub struct TradePolicy {
    /// Slippage tolerance used when the intent does not set its own.
    pub default_max_slippage: Decimal,
    /// Buffer applied to the worst fill price to derive the submitted
    /// limit price.
    pub price_buffer: Decimal,
    /// Depth levels requested per book side.
    pub depth_limit: u32,
}

impl TradePolicy {
    /// Extract the policy from the application configuration.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_max_slippage: config.trading.max_slippage,
            price_buffer: config.trading.price_buffer,
            depth_limit: config.horizon.depth_limit,
        }
    }
}

/// A trading operation request.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeRequest {
    /// Market-style order: simulate against the live book, guard, then
    /// submit a limit order at the buffered execution price.
    Market {
        account_id: String,
        intent: OrderIntent,
        /// When false, stop after building: return the unsigned envelope
        /// and diagnostics so the caller can sign out-of-band.
        auto_sign: bool,
    },
    /// Plain limit order at the caller's price; no simulation, no guard.
    Limit {
        account_id: String,
        intent: OrderIntent,
        auto_sign: bool,
    },
    /// Cancel a resting offer by id.
    Cancel { account_id: String, offer_id: u64 },
    /// List the account's open offers.
    ListOpen { account_id: String },
}

/// Execution prediction attached to a market order's outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionDiagnostics {
    pub fills: Vec<Fill>,
    pub average_price: Decimal,
    pub best_price: Decimal,
    pub worst_price: Decimal,
    pub execution_price: Decimal,
    pub slippage: Decimal,
    pub total_cost: Decimal,
}

impl From<&FillPlan> for ExecutionDiagnostics {
    fn from(plan: &FillPlan) -> Self {
        Self {
            fills: plan.fills.clone(),
            average_price: plan.average_price,
            best_price: plan.best_price,
            worst_price: plan.worst_price,
            execution_price: plan.execution_price,
            slippage: plan.slippage,
            total_cost: plan.total_cost,
        }
    }
}

/// Successful outcome of a trading request.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeOutcome {
    /// The order reached the network and was confirmed.
    Submitted {
        receipt: SubmissionReceipt,
        /// Present for market orders; limit orders skip simulation.
        diagnostics: Option<ExecutionDiagnostics>,
    },
    /// `auto_sign` was off: the built, unsigned envelope for the caller
    /// to sign and submit later.
    Unsigned {
        envelope: TransactionEnvelope,
        diagnostics: Option<ExecutionDiagnostics>,
    },
    /// The cancel transaction was confirmed.
    Cancelled { receipt: SubmissionReceipt },
    /// The account's open offers.
    OpenOrders(Vec<Order>),
}

/// Orchestrates all trading operations against the wired ports.
pub struct TradingService<M, L, K> {
    /// Depth snapshot port.
    market: Arc<M>,
    /// Build/sign/submit pipeline.
    pipeline: Arc<TransactionPipeline<L, K>>,
    /// Cancel/list operations.
    orders: OrderManager<L, K>,
    /// Policy knobs from configuration.
    policy: TradePolicy,
}

impl<M, L, K> TradingService<M, L, K>
where
    M: MarketData,
    L: LedgerGateway,
    K: KeyStore,
{
    /// Wire a trading service from its ports and configuration.
    pub fn new(market: Arc<M>, ledger: Arc<L>, keys: Arc<K>, config: &AppConfig) -> Self {
        let pipeline = Arc::new(TransactionPipeline::new(
            Arc::clone(&ledger),
            keys,
            &config.network.passphrase,
            config.network.base_fee,
        ));
        let orders = OrderManager::new(Arc::clone(&ledger), Arc::clone(&pipeline));

        Self {
            market,
            pipeline,
            orders,
            policy: TradePolicy::from_config(config),
        }
    }

    /// Execute one trading request.
    #[instrument(skip(self, request))]
    pub async fn execute(&self, request: TradeRequest) -> Result<TradeOutcome, TradeError> {
        match request {
            TradeRequest::Market {
                account_id,
                intent,
                auto_sign,
            } => self.market_order(&account_id, &intent, auto_sign).await,
            TradeRequest::Limit {
                account_id,
                intent,
                auto_sign,
            } => self.limit_order(&account_id, &intent, auto_sign).await,
            TradeRequest::Cancel {
                account_id,
                offer_id,
            } => {
                let receipt = self.orders.cancel(&account_id, offer_id).await?;
                Ok(TradeOutcome::Cancelled { receipt })
            }
            TradeRequest::ListOpen { account_id } => {
                let orders = self.orders.open_orders(&account_id).await?;
                Ok(TradeOutcome::OpenOrders(orders))
            }
        }
    }

    /// Market-style order: simulate, guard, then submit a limit order at
    /// the buffered execution price.
    async fn market_order(
        &self,
        account_id: &str,
        intent: &OrderIntent,
        auto_sign: bool,
    ) -> Result<TradeOutcome, TradeError> {
        require_positive(intent.amount, "order amount")?;

        let canonical = translate(intent)?;
        let book = self
            .market
            .order_book(&canonical.book_pair(), self.policy.depth_limit)
            .await?;
        let levels = book.side(canonical.book_side);

        let plan = simulate(levels, canonical.amount, canonical.side, self.policy.price_buffer)?;

        let max_slippage = intent
            .max_slippage
            .unwrap_or(self.policy.default_max_slippage);
        SlippageGuard::new(max_slippage).evaluate(&plan)?;

        info!(
            side = %canonical.side,
            amount = %plan.total_filled,
            average_price = %plan.average_price,
            slippage = %plan.slippage,
            execution_price = %plan.execution_price,
            "fill plan approved"
        );

        let operation = ManageOfferOp {
            side: canonical.side,
            selling: canonical.selling,
            buying: canonical.buying,
            amount: plan.total_filled,
            price: plan.execution_price,
            offer_id: 0,
        };

        let diagnostics = ExecutionDiagnostics::from(&plan);
        self.dispatch(account_id, operation, auto_sign, Some(diagnostics))
            .await
    }

    /// Plain limit order at the caller's price, bypassing simulation and
    /// the guard: a resting limit order cannot slip.
    async fn limit_order(
        &self,
        account_id: &str,
        intent: &OrderIntent,
        auto_sign: bool,
    ) -> Result<TradeOutcome, TradeError> {
        require_positive(intent.amount, "order amount")?;

        let price = intent.limit_price.ok_or_else(|| {
            TradeError::MalformedAmountOrPrice("limit order requires a limit price".to_string())
        })?;
        require_positive(price, "limit price")?;

        let canonical = translate(intent)?;
        debug!(side = %canonical.side, amount = %canonical.amount, %price, "limit order built");

        let operation = ManageOfferOp {
            side: canonical.side,
            selling: canonical.selling,
            buying: canonical.buying,
            amount: canonical.amount,
            price,
            offer_id: 0,
        };

        self.dispatch(account_id, operation, auto_sign, None).await
    }

    /// Carry an operation through the pipeline, honoring `auto_sign`.
    async fn dispatch(
        &self,
        account_id: &str,
        operation: ManageOfferOp,
        auto_sign: bool,
        diagnostics: Option<ExecutionDiagnostics>,
    ) -> Result<TradeOutcome, TradeError> {
        let envelope = self.pipeline.build(account_id, operation).await?;

        if !auto_sign {
            debug!(tx_id = %envelope.id, "auto-sign off, returning unsigned envelope");
            return Ok(TradeOutcome::Unsigned {
                envelope,
                diagnostics,
            });
        }

        let signed = self.pipeline.sign(envelope).await?;
        let receipt = self.pipeline.submit(&signed).await?;
        Ok(TradeOutcome::Submitted {
            receipt,
            diagnostics,
        })
    }
}

fn require_positive(value: Decimal, what: &str) -> Result<(), TradeError> {
    if value <= Decimal::ZERO {
        return Err(TradeError::MalformedAmountOrPrice(format!(
            "{what} must be positive, got {value}"
        )));
    }
    Ok(())
}
