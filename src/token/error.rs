//! Ledger errors
//!
//! Every error rejects the whole operation: no state is changed.

use thiserror::Error;

use super::types::{Account, Amount};

/// Errors returned by ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Arithmetic overflow")]
    Overflow,
    #[error("Insufficient balance for {account}: have {available}, need {requested}")]
    InsufficientBalance {
        account: Account,
        available: Amount,
        requested: Amount,
    },
    #[error(
        "Insufficient allowance for {spender} over {owner}: have {available}, need {requested}"
    )]
    InsufficientAllowance {
        owner: Account,
        spender: Account,
        available: Amount,
        requested: Amount,
    },
    #[error("Unauthorized: {account} is not {role}")]
    Unauthorized { account: Account, role: Role },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Unsupported operation: {operation} is disabled for this token")]
    UnsupportedOperation { operation: &'static str },
}

/// Privileged roles checked by access control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Owner,
    Minter,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "the owner"),
            Role::Minter => write!(f, "a minter"),
        }
    }
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
