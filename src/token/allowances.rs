//! Delegated-spending allowances

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{LedgerError, LedgerResult};
use super::types::{Account, Amount};

/// Allowances: owner -> (spender -> amount)
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AllowanceTable {
    allowances: HashMap<Account, HashMap<Account, Amount>>,
}

impl AllowanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining amount `spender` may move on behalf of `owner`
    pub fn allowance_of(&self, owner: &Account, spender: &Account) -> Amount {
        self.allowances
            .get(owner)
            .and_then(|spenders| spenders.get(spender))
            .copied()
            .unwrap_or_default()
    }

    /// Overwrite the allowance for the pair (approve semantics, not additive)
    pub fn set_allowance(&mut self, owner: Account, spender: Account, amount: Amount) {
        if amount.is_zero() {
            if let Some(spenders) = self.allowances.get_mut(&owner) {
                spenders.remove(&spender);
                if spenders.is_empty() {
                    self.allowances.remove(&owner);
                }
            }
            return;
        }

        self.allowances
            .entry(owner)
            .or_default()
            .insert(spender, amount);
    }

    /// Spend part of an allowance, returning what was there before
    pub fn consume(
        &mut self,
        owner: Account,
        spender: Account,
        amount: Amount,
    ) -> LedgerResult<Amount> {
        let available = self.allowance_of(&owner, &spender);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                owner,
                spender,
                available,
                requested: amount,
            })?;

        self.set_allowance(owner, spender, remaining);
        Ok(available)
    }

    /// Raise an allowance, returning the new total
    pub fn increase(
        &mut self,
        owner: Account,
        spender: Account,
        added: Amount,
    ) -> LedgerResult<Amount> {
        let total = self
            .allowance_of(&owner, &spender)
            .checked_add(added)
            .ok_or(LedgerError::Overflow)?;

        self.set_allowance(owner, spender, total);
        Ok(total)
    }

    /// Lower an allowance, returning the new total
    pub fn decrease(
        &mut self,
        owner: Account,
        spender: Account,
        subtracted: Amount,
    ) -> LedgerResult<Amount> {
        self.consume(owner, spender, subtracted)?;
        Ok(self.allowance_of(&owner, &spender))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amt(n: u64) -> Amount {
        Amount::from(n)
    }

    fn owner() -> Account {
        Account::from_label("owner")
    }

    fn spender() -> Account {
        Account::from_label("spender")
    }

    #[test]
    fn test_absent_allowance_is_zero() {
        let table = AllowanceTable::new();
        assert_eq!(table.allowance_of(&owner(), &spender()), Amount::zero());
    }

    #[test]
    fn test_set_overwrites() {
        let mut table = AllowanceTable::new();

        table.set_allowance(owner(), spender(), amt(5000));
        table.set_allowance(owner(), spender(), amt(3000));
        assert_eq!(table.allowance_of(&owner(), &spender()), amt(3000));

        // Revoke
        table.set_allowance(owner(), spender(), Amount::zero());
        assert_eq!(table.allowance_of(&owner(), &spender()), Amount::zero());
        assert_eq!(table, AllowanceTable::new());
    }

    #[test]
    fn test_allowance_is_directional() {
        let mut table = AllowanceTable::new();

        table.set_allowance(owner(), spender(), amt(10));
        assert_eq!(table.allowance_of(&spender(), &owner()), Amount::zero());
    }

    #[test]
    fn test_consume() {
        let mut table = AllowanceTable::new();
        table.set_allowance(owner(), spender(), amt(500));

        let before = table.consume(owner(), spender(), amt(200)).unwrap();
        assert_eq!(before, amt(500));
        assert_eq!(table.allowance_of(&owner(), &spender()), amt(300));

        let result = table.consume(owner(), spender(), amt(301));
        assert_eq!(
            result,
            Err(LedgerError::InsufficientAllowance {
                owner: owner(),
                spender: spender(),
                available: amt(300),
                requested: amt(301),
            })
        );
        assert_eq!(table.allowance_of(&owner(), &spender()), amt(300));
    }

    #[test]
    fn test_increase_and_decrease() {
        let mut table = AllowanceTable::new();

        assert_eq!(table.increase(owner(), spender(), amt(100)).unwrap(), amt(100));
        assert_eq!(table.increase(owner(), spender(), amt(50)).unwrap(), amt(150));
        assert_eq!(table.decrease(owner(), spender(), amt(150)).unwrap(), Amount::zero());
        assert!(table.decrease(owner(), spender(), amt(1)).is_err());

        table.set_allowance(owner(), spender(), Amount::MAX);
        assert_eq!(
            table.increase(owner(), spender(), amt(1)),
            Err(LedgerError::Overflow)
        );
        assert_eq!(table.allowance_of(&owner(), &spender()), Amount::MAX);
    }
}
