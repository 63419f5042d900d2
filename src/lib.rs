//! SDEX Trader — Library Root
//!
//! Order-execution engine for a Stellar-style decentralized exchange:
//! intent translation, order-book fill simulation, slippage guarding,
//! and a build → sign → submit transaction pipeline.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
