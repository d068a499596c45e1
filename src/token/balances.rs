//! Per-account balances and total supply
//!
//! Every mutation computes its new values with checked arithmetic before
//! writing anything, so a failing call leaves the ledger untouched.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::{LedgerError, LedgerResult};
use super::types::{Account, Amount};

/// Balances: address -> amount, plus the total supply
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BalanceLedger {
    balances: HashMap<Account, Amount>,
    total_supply: Amount,
}

impl BalanceLedger {
    /// Create the ledger with the whole initial supply held by one account
    pub fn new(initial_holder: Account, initial_amount: Amount) -> Self {
        let mut ledger = Self::default();
        ledger.write(initial_holder, initial_amount);
        ledger.total_supply = initial_amount;
        ledger
    }

    /// Balance of an account (zero if never touched)
    pub fn balance_of(&self, account: &Account) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Increase an account's balance and the total supply
    pub fn credit(&mut self, account: Account, amount: Amount) -> LedgerResult<()> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self
            .balance_of(&account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply = supply;
        self.write(account, balance);
        Ok(())
    }

    /// Decrease an account's balance and the total supply
    pub fn debit(&mut self, account: Account, amount: Amount) -> LedgerResult<()> {
        let balance = self.checked_withdraw(&account, amount)?;
        // supply >= any single balance, so this only fails on a corrupted ledger
        let supply = self
            .total_supply
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;

        self.total_supply = supply;
        self.write(account, balance);
        Ok(())
    }

    /// Move an amount between two accounts; supply is unchanged
    pub fn move_balance(
        &mut self,
        from: Account,
        to: Account,
        amount: Amount,
    ) -> LedgerResult<()> {
        let from_balance = self.checked_withdraw(&from, amount)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.write(from, from_balance);
        self.write(to, to_balance);
        Ok(())
    }

    /// Accounts holding a non-zero balance
    pub fn holders(&self) -> Vec<(Account, Amount)> {
        let mut holders: Vec<_> = self
            .balances
            .iter()
            .filter(|(_, b)| !b.is_zero())
            .map(|(a, b)| (*a, *b))
            .collect();
        holders.sort();
        holders
    }

    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|b| !b.is_zero()).count()
    }

    /// Sum of all balances, or `None` if it does not fit in an amount
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::zero(), |acc, b| acc.checked_add(*b))
    }

    fn checked_withdraw(&self, account: &Account, amount: Amount) -> LedgerResult<Amount> {
        let available = self.balance_of(account);
        available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account: *account,
                available,
                requested: amount,
            })
    }

    // Zero balances are dropped so the map only holds live accounts.
    fn write(&mut self, account: Account, balance: Amount) {
        if balance.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, balance);
        }
    }
}
