//! Owner and minter roles

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::error::{LedgerError, LedgerResult, Role};
use super::types::Account;

/// Exclusive owner plus an open-ended minter set
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Account,
    minters: HashSet<Account>,
}

impl AccessControl {
    /// The initial owner is also the first minter
    pub fn new(initial_owner: Account) -> Self {
        let mut minters = HashSet::new();
        minters.insert(initial_owner);
        Self {
            owner: initial_owner,
            minters,
        }
    }

    /// Owner only, with an empty minter set (tokens without minting)
    pub fn without_minters(initial_owner: Account) -> Self {
        Self {
            owner: initial_owner,
            minters: HashSet::new(),
        }
    }

    pub fn owner(&self) -> Account {
        self.owner
    }

    pub fn is_owner(&self, account: &Account) -> bool {
        self.owner == *account
    }

    pub fn is_minter(&self, account: &Account) -> bool {
        self.minters.contains(account)
    }

    /// All minters, sorted
    pub fn minters(&self) -> Vec<Account> {
        let mut minters: Vec<_> = self.minters.iter().copied().collect();
        minters.sort();
        minters
    }

    pub fn ensure_owner(&self, caller: &Account) -> LedgerResult<()> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                account: *caller,
                role: Role::Owner,
            })
        }
    }

    pub fn ensure_minter(&self, caller: &Account) -> LedgerResult<()> {
        if self.is_minter(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                account: *caller,
                role: Role::Minter,
            })
        }
    }

    /// Any current minter may add another; returns false if already present
    pub fn add_minter(&mut self, caller: &Account, account: Account) -> LedgerResult<bool> {
        self.ensure_minter(caller)?;
        Ok(self.minters.insert(account))
    }

    /// Hand ownership to another account; returns the previous owner
    pub fn transfer_ownership(
        &mut self,
        caller: &Account,
        new_owner: Account,
    ) -> LedgerResult<Account> {
        self.ensure_owner(caller)?;
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Account {
        Account::from_label("owner")
    }

    fn minter() -> Account {
        Account::from_label("minter")
    }

    fn stranger() -> Account {
        Account::from_label("stranger")
    }

    #[test]
    fn test_owner_is_first_minter() {
        let access = AccessControl::new(owner());

        assert!(access.is_owner(&owner()));
        assert!(access.is_minter(&owner()));
        assert!(!access.is_minter(&stranger()));
        assert_eq!(access.minters(), vec![owner()]);
    }

    #[test]
    fn test_owner_without_minters() {
        let access = AccessControl::without_minters(owner());

        assert!(access.is_owner(&owner()));
        assert!(!access.is_minter(&owner()));
        assert!(access.minters().is_empty());
        assert!(access.ensure_owner(&owner()).is_ok());
        assert_eq!(
            access.ensure_minter(&owner()),
            Err(LedgerError::Unauthorized {
                account: owner(),
                role: Role::Minter,
            })
        );
    }

    #[test]
    fn test_minter_can_add_minter() {
        let mut access = AccessControl::new(owner());

        assert!(access.add_minter(&owner(), minter()).unwrap());
        assert!(access.is_minter(&minter()));

        // A non-owner minter may add further minters
        assert!(access.add_minter(&minter(), stranger()).unwrap());
        assert!(access.is_minter(&stranger()));

        // Idempotent
        assert!(!access.add_minter(&owner(), minter()).unwrap());
        assert_eq!(access.minters().len(), 3);
    }

    #[test]
    fn test_non_minter_cannot_add_minter() {
        let mut access = AccessControl::new(owner());

        let result = access.add_minter(&stranger(), stranger());
        assert_eq!(
            result,
            Err(LedgerError::Unauthorized {
                account: stranger(),
                role: Role::Minter,
            })
        );
        assert!(!access.is_minter(&stranger()));
    }

    #[test]
    fn test_transfer_ownership() {
        let mut access = AccessControl::new(owner());

        assert!(access.transfer_ownership(&stranger(), stranger()).is_err());
        assert!(access.is_owner(&owner()));

        let previous = access.transfer_ownership(&owner(), minter()).unwrap();
        assert_eq!(previous, owner());
        assert!(access.is_owner(&minter()));
        assert!(!access.is_owner(&owner()));
        // Minter set is unaffected by ownership changes
        assert!(access.is_minter(&owner()));
        assert!(!access.is_minter(&minter()));
    }
}
