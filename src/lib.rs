//! Token Ledger: a fungible-token ledger implementation in Rust
//!
//! This crate provides a single-token ledger featuring:
//! - Per-account balances with exact total-supply accounting
//! - ERC-20 style allowances (approve, transferFrom, burnFrom)
//! - Owner and minter roles gating privileged operations
//! - Checked 256-bit arithmetic: overflow and underflow reject the operation
//! - Notifications returned from every committed operation
//! - A lock-guarded shared service and JSON snapshot persistence
//!
//! # Example
//!
//! ```rust
//! use token_ledger::token::{Account, Amount, Notification, TokenConfig, TokenEngine};
//!
//! let owner = Account::from_label("owner");
//! let minter = Account::from_label("minter");
//!
//! let (mut token, _) = TokenEngine::new(TokenConfig::mintable(owner)).unwrap();
//!
//! // The owner is the first minter and may add more
//! token.add_minter(owner, minter).unwrap();
//!
//! let events = token.mint(minter, minter, Amount::from(1000u64)).unwrap();
//! assert_eq!(
//!     events,
//!     vec![Notification::Transfer {
//!         from: Account::ZERO,
//!         to: minter,
//!         amount: Amount::from(1000u64),
//!     }]
//! );
//! assert!(token.is_conserved());
//! ```

pub mod cli;
pub mod storage;
pub mod token;

// Re-export commonly used types
pub use storage::{Storage, StorageConfig, StorageError};
pub use token::{
    Account, Amount, LedgerError, LedgerResult, LedgerService, Notification, TokenConfig,
    TokenEngine,
};
