//! Horizon Adapter - Ledger REST API Integration
//!
//! Talks to a Horizon-style ledger API: order-book depth, account
//! sequences, signed transaction submission, open offers, fee stats.
//! One shared HTTP client; every endpoint method is a single request
//! with no retry behavior, so failures surface to the caller intact.

pub mod client;
pub mod ledger;
pub mod orderbook;
pub mod types;

pub use client::{HorizonClient, HorizonClientConfig};
pub use ledger::HorizonLedger;
pub use orderbook::HorizonMarketData;
