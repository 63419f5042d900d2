//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies (HTTP client, file I/O). Each sub-module groups
//! adapters by infrastructure concern.
//!
//! Adapter categories:
//! - `horizon`: Ledger REST API client, depth snapshots, submission
//! - `keystore`: File-backed keypair storage with single-writer discipline

pub mod horizon;
pub mod keystore;
