//! Key Store Adapter - File-Backed Keypair Storage
//!
//! Stores account seeds in a single JSON file with owner-only
//! permissions, atomic writes, and one async mutex serializing every
//! read-modify-write so concurrent imports cannot corrupt the file.

pub mod file;

pub use file::FileKeyStore;
