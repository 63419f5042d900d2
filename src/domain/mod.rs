//! Domain layer - Core trading logic and models.
//!
//! Pure business logic for the order-execution engine: asset identities,
//! intent translation, depth snapshots, fill simulation, the slippage
//! guard, and transaction envelopes. No I/O here (hexagonal architecture
//! inner ring); everything is deterministic and testable in isolation.
//! All price and amount arithmetic is `rust_decimal::Decimal`.

pub mod asset;
pub mod book;
pub mod error;
pub mod fill;
pub mod guard;
pub mod intent;
pub mod tx;

// Re-export core types for convenience
pub use asset::{Asset, AssetPair};
pub use book::{DepthLevel, OrderBook};
pub use error::{SubmissionError, TradeError};
pub use fill::{Fill, FillPlan};
pub use guard::SlippageGuard;
pub use intent::{BookSide, CanonicalOrder, Order, OrderIntent, OrderStatus, TradeSide};
pub use tx::{KeypairSeed, ManageOfferOp, SignedEnvelope, TradeSigner, TransactionEnvelope};
