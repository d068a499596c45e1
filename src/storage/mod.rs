//! Storage module for ledger persistence

pub mod persistence;

pub use persistence::{load_snapshot, LedgerSnapshot, Storage, StorageConfig, StorageError};
