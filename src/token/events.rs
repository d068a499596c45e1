//! Notifications emitted by committed operations

use serde::{Deserialize, Serialize};
use std::fmt;

use super::types::{Account, Amount};

/// Record of a completed state change, consumed by external observers.
///
/// Minting is reported as a transfer from [`Account::ZERO`], burning as a
/// transfer to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    Transfer {
        from: Account,
        to: Account,
        amount: Amount,
    },
    Approval {
        owner: Account,
        spender: Account,
        amount: Amount,
    },
    MinterAdded {
        account: Account,
    },
    OwnershipTransferred {
        previous_owner: Account,
        new_owner: Account,
    },
}

impl Notification {
    pub fn kind(&self) -> &'static str {
        match self {
            Notification::Transfer { .. } => "Transfer",
            Notification::Approval { .. } => "Approval",
            Notification::MinterAdded { .. } => "MinterAdded",
            Notification::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Transfer { from, to, amount } => {
                write!(f, "Transfer {} -> {} ({})", from, to, amount)
            }
            Notification::Approval {
                owner,
                spender,
                amount,
            } => write!(f, "Approval {} -> {} ({})", owner, spender, amount),
            Notification::MinterAdded { account } => write!(f, "MinterAdded {}", account),
            Notification::OwnershipTransferred {
                previous_owner,
                new_owner,
            } => write!(f, "OwnershipTransferred {} -> {}", previous_owner, new_owner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let event = Notification::MinterAdded {
            account: Account::ZERO,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "minter_added");
        assert_eq!(json["account"], Account::ZERO.to_string());
        assert_eq!(event.kind(), "MinterAdded");
    }
}
