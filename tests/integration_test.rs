//! Integration Tests - End-to-end Trading Flow
//!
//! Tests the interaction between the trading service, the pipeline, and
//! mock ports. Uses mockall for trait mocking and tokio::test for async
//! tests. The central safety property - diagnostic failures never reach
//! the network - is asserted by expecting zero submission calls on every
//! rejection path.

use std::sync::Arc;

use mockall::mock;
use rust_decimal_macros::dec;

use sdex_trader::config::{AppConfig, HorizonConfig, KeyStoreConfig, NetworkConfig, TradingConfig};
use sdex_trader::domain::asset::{Asset, AssetPair};
use sdex_trader::domain::book::{DepthLevel, OrderBook};
use sdex_trader::domain::error::{SubmissionError, TradeError};
use sdex_trader::domain::intent::{OrderIntent, OrderStatus, TradeSide};
use sdex_trader::domain::tx::{KeypairSeed, SignedEnvelope, TradeSigner};
use sdex_trader::ports::keystore::KeyStore;
use sdex_trader::ports::ledger::{
    FeeStats, LedgerGateway, OfferRecord, ServerStatus, SubmissionReceipt,
};
use sdex_trader::ports::market_data::MarketData;
use sdex_trader::usecases::trading::{TradeOutcome, TradeRequest, TradingService};

// ---- Mock Definitions ----

mock! {
    pub Market {}

    #[async_trait::async_trait]
    impl MarketData for Market {
        async fn order_book(
            &self,
            pair: &AssetPair,
            limit: u32,
        ) -> Result<OrderBook, TradeError>;
    }
}

mock! {
    pub Ledger {}

    #[async_trait::async_trait]
    impl LedgerGateway for Ledger {
        async fn next_sequence(&self, account_id: &str) -> Result<i64, TradeError>;
        async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionReceipt, TradeError>;
        async fn open_offers(&self, account_id: &str) -> Result<Vec<OfferRecord>, TradeError>;
        async fn offer(&self, offer_id: u64) -> Result<OfferRecord, TradeError>;
        async fn fee_stats(&self) -> Result<FeeStats, TradeError>;
        async fn server_status(&self) -> Result<ServerStatus, TradeError>;
    }
}

mock! {
    pub Keys {}

    #[async_trait::async_trait]
    impl KeyStore for Keys {
        async fn resolve(&self, account_id: &str) -> Result<TradeSigner, TradeError>;
        async fn persist(&self, account_id: &str, seed: KeypairSeed) -> Result<(), TradeError>;
        async fn import_seed(&self, seed: KeypairSeed) -> Result<String, TradeError>;
        async fn export(&self, account_id: &str) -> Result<KeypairSeed, TradeError>;
        async fn accounts(&self) -> Result<Vec<String>, TradeError>;
    }
}

// ---- Fixtures ----

fn test_config() -> AppConfig {
    AppConfig {
        horizon: HorizonConfig {
            base_url: "https://horizon-testnet.stellar.org".to_string(),
            timeout_seconds: 30,
            depth_limit: 20,
            max_concurrent: 10,
        },
        network: NetworkConfig {
            passphrase: "Test SDF Network ; September 2015".to_string(),
            base_fee: 100,
        },
        trading: TradingConfig {
            max_slippage: dec!(0.05),
            price_buffer: dec!(1.001),
        },
        keystore: KeyStoreConfig {
            path: "data/keystore.json".to_string(),
        },
    }
}

fn usdc() -> Asset {
    Asset::issued("USDC", "GISSUER").unwrap()
}

/// Three ask levels; filling 100 gives average 0.11 and 10% slippage.
fn scenario_book() -> OrderBook {
    OrderBook::new(
        vec![],
        vec![
            DepthLevel { price: dec!(0.10), amount: dec!(50) },
            DepthLevel { price: dec!(0.12), amount: dec!(50) },
            DepthLevel { price: dec!(0.15), amount: dec!(100) },
        ],
    )
}

fn buy_intent(amount: rust_decimal::Decimal, max_slippage: rust_decimal::Decimal) -> OrderIntent {
    OrderIntent {
        side: TradeSide::Buy,
        target: usdc(),
        counter: Asset::native(),
        amount,
        limit_price: None,
        max_slippage: Some(max_slippage),
    }
}

fn signer() -> TradeSigner {
    TradeSigner::from_seed(&KeypairSeed::from_bytes([1u8; 32]))
}

fn service(
    market: MockMarket,
    ledger: MockLedger,
    keys: MockKeys,
) -> TradingService<MockMarket, MockLedger, MockKeys> {
    TradingService::new(
        Arc::new(market),
        Arc::new(ledger),
        Arc::new(keys),
        &test_config(),
    )
}

// ---- Market order flow ----

#[tokio::test]
async fn test_market_buy_simulates_guards_and_submits() {
    let mut market = MockMarket::new();
    market
        .expect_order_book()
        .times(1)
        .returning(|_, _| Ok(scenario_book()));

    let mut ledger = MockLedger::new();
    ledger
        .expect_next_sequence()
        .times(1)
        .returning(|_| Ok(7));
    ledger
        .expect_submit()
        .times(1)
        .withf(|signed| {
            let op = &signed.envelope.operation;
            op.side == TradeSide::Buy
                && op.offer_id == 0
                && op.amount == dec!(100)
                && op.price == dec!(0.12012) // worst level 0.12 buffered by 1.001
        })
        .returning(|_| {
            Ok(SubmissionReceipt {
                hash: "abc123".to_string(),
                ledger: 555,
            })
        });

    let mut keys = MockKeys::new();
    keys.expect_resolve()
        .times(1)
        .returning(|_| Ok(signer()));

    let svc = service(market, ledger, keys);
    let outcome = svc
        .execute(TradeRequest::Market {
            account_id: "alice".to_string(),
            intent: buy_intent(dec!(100), dec!(0.2)),
            auto_sign: true,
        })
        .await
        .unwrap();

    match outcome {
        TradeOutcome::Submitted { receipt, diagnostics } => {
            assert_eq!(receipt.hash, "abc123");
            assert_eq!(receipt.ledger, 555);
            let diag = diagnostics.expect("market orders carry diagnostics");
            assert_eq!(diag.average_price, dec!(0.11));
            assert_eq!(diag.best_price, dec!(0.10));
            assert_eq!(diag.slippage, dec!(0.1));
            assert_eq!(diag.fills.len(), 2);
        }
        other => panic!("expected Submitted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slippage_rejection_never_touches_the_network() {
    let mut market = MockMarket::new();
    market
        .expect_order_book()
        .times(1)
        .returning(|_, _| Ok(scenario_book()));

    // The safety property: a vetoed order must not consume a sequence
    // number, a signature, or a submission fee.
    let mut ledger = MockLedger::new();
    ledger.expect_next_sequence().times(0);
    ledger.expect_submit().times(0);
    let mut keys = MockKeys::new();
    keys.expect_resolve().times(0);

    let svc = service(market, ledger, keys);
    let err = svc
        .execute(TradeRequest::Market {
            account_id: "alice".to_string(),
            intent: buy_intent(dec!(100), dec!(0.05)),
            auto_sign: true,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TradeError::SlippageExceeded {
            observed: dec!(0.1),
            threshold: dec!(0.05),
        }
    );
}

#[tokio::test]
async fn test_insufficient_liquidity_reports_partial_fill() {
    let mut market = MockMarket::new();
    market.expect_order_book().times(1).returning(|_, _| {
        Ok(OrderBook::new(
            vec![],
            vec![DepthLevel { price: dec!(0.10), amount: dec!(50) }],
        ))
    });

    let mut ledger = MockLedger::new();
    ledger.expect_next_sequence().times(0);
    ledger.expect_submit().times(0);
    let keys = MockKeys::new();

    let svc = service(market, ledger, keys);
    let err = svc
        .execute(TradeRequest::Market {
            account_id: "alice".to_string(),
            intent: buy_intent(dec!(100), dec!(0.5)),
            auto_sign: true,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        TradeError::InsufficientLiquidity {
            requested: dec!(100),
            available: dec!(50),
        }
    );
}

#[tokio::test]
async fn test_auto_sign_off_halts_after_build() {
    let mut market = MockMarket::new();
    market
        .expect_order_book()
        .times(1)
        .returning(|_, _| Ok(scenario_book()));

    let mut ledger = MockLedger::new();
    ledger.expect_next_sequence().times(1).returning(|_| Ok(7));
    ledger.expect_submit().times(0);

    // Halting after build means the key store is never consulted.
    let mut keys = MockKeys::new();
    keys.expect_resolve().times(0);

    let svc = service(market, ledger, keys);
    let outcome = svc
        .execute(TradeRequest::Market {
            account_id: "alice".to_string(),
            intent: buy_intent(dec!(100), dec!(0.2)),
            auto_sign: false,
        })
        .await
        .unwrap();

    match outcome {
        TradeOutcome::Unsigned { envelope, diagnostics } => {
            assert_eq!(envelope.source_account, "alice");
            assert_eq!(envelope.sequence, 7);
            assert_eq!(envelope.operation.amount, dec!(100));
            assert!(diagnostics.is_some());
        }
        other => panic!("expected Unsigned, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_account_fails_at_signing() {
    let mut market = MockMarket::new();
    market
        .expect_order_book()
        .times(1)
        .returning(|_, _| Ok(scenario_book()));

    let mut ledger = MockLedger::new();
    ledger.expect_next_sequence().times(1).returning(|_| Ok(7));
    ledger.expect_submit().times(0);

    let mut keys = MockKeys::new();
    keys.expect_resolve()
        .times(1)
        .returning(|account| Err(TradeError::AccountNotFound(account.to_string())));

    let svc = service(market, ledger, keys);
    let err = svc
        .execute(TradeRequest::Market {
            account_id: "mallory".to_string(),
            intent: buy_intent(dec!(100), dec!(0.2)),
            auto_sign: true,
        })
        .await
        .unwrap_err();

    assert_eq!(err, TradeError::AccountNotFound("mallory".to_string()));
}

#[tokio::test]
async fn test_network_rejection_surfaces_verbatim() {
    let mut market = MockMarket::new();
    market
        .expect_order_book()
        .times(1)
        .returning(|_, _| Ok(scenario_book()));

    let mut ledger = MockLedger::new();
    ledger.expect_next_sequence().times(1).returning(|_| Ok(7));
    ledger.expect_submit().times(1).returning(|_| {
        Err(SubmissionError::Underfunded {
            diagnostic: r#"{"result_codes":{"operations":["op_underfunded"]}}"#.to_string(),
        }
        .into())
    });

    let mut keys = MockKeys::new();
    keys.expect_resolve().times(1).returning(|_| Ok(signer()));

    let svc = service(market, ledger, keys);
    let err = svc
        .execute(TradeRequest::Market {
            account_id: "alice".to_string(),
            intent: buy_intent(dec!(100), dec!(0.2)),
            auto_sign: true,
        })
        .await
        .unwrap_err();

    match err {
        TradeError::Submission(SubmissionError::Underfunded { diagnostic }) => {
            assert!(diagnostic.contains("op_underfunded"));
        }
        other => panic!("expected Underfunded, got {other:?}"),
    }
}

// ---- Limit order flow ----

#[tokio::test]
async fn test_limit_order_bypasses_simulation() {
    // No depth fetch, no guard: the book is never consulted.
    let mut market = MockMarket::new();
    market.expect_order_book().times(0);

    let mut ledger = MockLedger::new();
    ledger.expect_next_sequence().times(1).returning(|_| Ok(9));
    ledger
        .expect_submit()
        .times(1)
        .withf(|signed| {
            let op = &signed.envelope.operation;
            op.price == dec!(0.50) && op.amount == dec!(10) && op.side == TradeSide::Buy
        })
        .returning(|_| {
            Ok(SubmissionReceipt {
                hash: "limit-hash".to_string(),
                ledger: 556,
            })
        });

    let mut keys = MockKeys::new();
    keys.expect_resolve().times(1).returning(|_| Ok(signer()));

    let svc = service(market, ledger, keys);
    let mut intent = buy_intent(dec!(10), dec!(0.05));
    intent.limit_price = Some(dec!(0.50));

    let outcome = svc
        .execute(TradeRequest::Limit {
            account_id: "alice".to_string(),
            intent,
            auto_sign: true,
        })
        .await
        .unwrap();

    match outcome {
        TradeOutcome::Submitted { diagnostics, .. } => assert!(diagnostics.is_none()),
        other => panic!("expected Submitted, got {other:?}"),
    }
}

#[tokio::test]
async fn test_limit_order_requires_a_price() {
    let market = MockMarket::new();
    let ledger = MockLedger::new();
    let keys = MockKeys::new();

    let svc = service(market, ledger, keys);
    let err = svc
        .execute(TradeRequest::Limit {
            account_id: "alice".to_string(),
            intent: buy_intent(dec!(10), dec!(0.05)),
            auto_sign: true,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, TradeError::MalformedAmountOrPrice(_)));
}

// ---- Cancel and list ----

fn resting_offer(seller: &str) -> OfferRecord {
    OfferRecord {
        id: 12345,
        seller: seller.to_string(),
        selling: Asset::native(),
        buying: usdc(),
        amount: dec!(200),
        price: dec!(0.03),
        last_modified_ledger: 900,
    }
}

#[tokio::test]
async fn test_cancel_resubmits_offer_with_zero_amount() {
    let market = MockMarket::new();

    let mut ledger = MockLedger::new();
    ledger
        .expect_offer()
        .times(1)
        .returning(|_| Ok(resting_offer("alice")));
    ledger.expect_next_sequence().times(1).returning(|_| Ok(11));
    ledger
        .expect_submit()
        .times(1)
        .withf(|signed| {
            let op = &signed.envelope.operation;
            op.offer_id == 12345
                && op.amount == dec!(0)
                && op.price == dec!(0.03) // original price, as the exchange requires
        })
        .returning(|_| {
            Ok(SubmissionReceipt {
                hash: "cancel-hash".to_string(),
                ledger: 557,
            })
        });

    let mut keys = MockKeys::new();
    keys.expect_resolve().times(1).returning(|_| Ok(signer()));

    let svc = service(market, ledger, keys);
    let outcome = svc
        .execute(TradeRequest::Cancel {
            account_id: "alice".to_string(),
            offer_id: 12345,
        })
        .await
        .unwrap();

    assert!(matches!(outcome, TradeOutcome::Cancelled { receipt } if receipt.hash == "cancel-hash"));
}

#[tokio::test]
async fn test_cancel_foreign_offer_reports_not_found() {
    let market = MockMarket::new();

    let mut ledger = MockLedger::new();
    ledger
        .expect_offer()
        .times(1)
        .returning(|_| Ok(resting_offer("bob")));
    ledger.expect_next_sequence().times(0);
    ledger.expect_submit().times(0);

    let keys = MockKeys::new();

    let svc = service(market, ledger, keys);
    let err = svc
        .execute(TradeRequest::Cancel {
            account_id: "alice".to_string(),
            offer_id: 12345,
        })
        .await
        .unwrap_err();

    assert_eq!(err, TradeError::OrderNotFound(12345));
}

#[tokio::test]
async fn test_list_open_normalizes_offers() {
    let market = MockMarket::new();

    let mut ledger = MockLedger::new();
    ledger
        .expect_open_offers()
        .times(1)
        .returning(|_| Ok(vec![resting_offer("alice")]));

    let keys = MockKeys::new();

    let svc = service(market, ledger, keys);
    let outcome = svc
        .execute(TradeRequest::ListOpen {
            account_id: "alice".to_string(),
        })
        .await
        .unwrap();

    match outcome {
        TradeOutcome::OpenOrders(orders) => {
            assert_eq!(orders.len(), 1);
            assert_eq!(orders[0].offer_id, 12345);
            assert_eq!(orders[0].amount, dec!(200));
            assert_eq!(orders[0].status, OrderStatus::Open);
            assert!(orders[0].pair.selling.is_native());
        }
        other => panic!("expected OpenOrders, got {other:?}"),
    }
}

// ---- Sell-side symmetry ----

#[tokio::test]
async fn test_market_sell_walks_bids_and_buffers_downward() {
    let mut market = MockMarket::new();
    market.expect_order_book().times(1).returning(|_, _| {
        Ok(OrderBook::new(
            vec![
                DepthLevel { price: dec!(2.0), amount: dec!(10) },
                DepthLevel { price: dec!(1.5), amount: dec!(40) },
            ],
            vec![],
        ))
    });

    let mut ledger = MockLedger::new();
    ledger.expect_next_sequence().times(1).returning(|_| Ok(3));
    ledger
        .expect_submit()
        .times(1)
        .withf(|signed| {
            let op = &signed.envelope.operation;
            // Sell limit sits below the worst bid so the whole fill crosses.
            op.side == TradeSide::Sell && op.price < dec!(1.5)
        })
        .returning(|_| {
            Ok(SubmissionReceipt {
                hash: "sell-hash".to_string(),
                ledger: 558,
            })
        });

    let mut keys = MockKeys::new();
    keys.expect_resolve().times(1).returning(|_| Ok(signer()));

    let svc = service(market, ledger, keys);
    let outcome = svc
        .execute(TradeRequest::Market {
            account_id: "alice".to_string(),
            intent: OrderIntent {
                side: TradeSide::Sell,
                target: usdc(),
                counter: Asset::native(),
                amount: dec!(50),
                limit_price: None,
                max_slippage: Some(dec!(0.25)),
            },
            auto_sign: true,
        })
        .await
        .unwrap();

    match outcome {
        TradeOutcome::Submitted { diagnostics, .. } => {
            let diag = diagnostics.unwrap();
            assert_eq!(diag.average_price, dec!(1.6));
            assert_eq!(diag.slippage, dec!(0.2));
        }
        other => panic!("expected Submitted, got {other:?}"),
    }
}
