//! ERC-20 style fungible token ledger
//!
//! One ledger holds one token and provides:
//! - Balances per address and an exactly tracked total supply
//! - Allowances for delegated transfers and burns
//! - Owner and minter roles gating privileged operations
//!
//! Every operation takes the caller explicitly and returns the notifications
//! it produced instead of writing to a global log.
//!
//! # Example
//!
//! ```rust
//! use token_ledger::token::{Account, Amount, TokenConfig, TokenEngine};
//!
//! let owner = Account::from_label("owner");
//! let recipient = Account::from_label("recipient");
//!
//! // Create a mintable token; the owner holds the initial supply
//! let (mut token, _) = TokenEngine::new(TokenConfig::mintable(owner)).unwrap();
//!
//! // Transfer tokens
//! let events = token.transfer(owner, recipient, Amount::from(1000u64)).unwrap();
//! assert_eq!(events.len(), 1);
//! assert_eq!(token.balance_of(&recipient), Amount::from(1000u64));
//! ```

pub mod access;
pub mod allowances;
pub mod balances;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod service;
pub mod types;

pub use access::AccessControl;
pub use allowances::AllowanceTable;
pub use balances::BalanceLedger;
pub use config::{TokenConfig, TokenFeatures, TokenMetadata, ZeroDestinationPolicy};
pub use engine::TokenEngine;
pub use error::{LedgerError, LedgerResult, Role};
pub use events::Notification;
pub use service::LedgerService;
pub use types::{
    parse_amount, reference_initial_supply, whole_tokens, Account, Amount, DEFAULT_DECIMALS,
};
