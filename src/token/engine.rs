//! ERC-20 style token engine
//!
//! Coordinates [`BalanceLedger`], [`AllowanceTable`] and [`AccessControl`].
//! Every operation takes the authenticated caller explicitly and either
//! commits fully, returning the notifications it produced, or fails without
//! touching state.

use serde::{Deserialize, Serialize};

use super::access::AccessControl;
use super::allowances::AllowanceTable;
use super::balances::BalanceLedger;
use super::config::{TokenConfig, TokenMetadata, ZeroDestinationPolicy};
use super::error::{LedgerError, LedgerResult};
use super::events::Notification;
use super::types::{Account, Amount};

/// A single fungible token ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenEngine {
    /// Token metadata
    pub metadata: TokenMetadata,
    balances: BalanceLedger,
    allowances: AllowanceTable,
    access: AccessControl,
}

impl TokenEngine {
    /// Create a ledger with the initial supply allocated to the initial holder.
    ///
    /// Returns the construction notifications: ownership assignment, the
    /// owner's minter role (mintable tokens only) and the initial mint.
    pub fn new(config: TokenConfig) -> LedgerResult<(Self, Vec<Notification>)> {
        config.validate()?;

        let holder = config.holder();
        // Only minting-capable tokens seed the owner as a minter
        let access = if config.features.mintable {
            AccessControl::new(config.owner)
        } else {
            AccessControl::without_minters(config.owner)
        };
        let engine = Self {
            metadata: TokenMetadata::from(&config),
            balances: BalanceLedger::new(holder, config.initial_supply),
            allowances: AllowanceTable::new(),
            access,
        };

        let mut notifications = vec![Notification::OwnershipTransferred {
            previous_owner: Account::ZERO,
            new_owner: config.owner,
        }];
        if config.features.mintable {
            notifications.push(Notification::MinterAdded {
                account: config.owner,
            });
        }
        notifications.push(Notification::Transfer {
            from: Account::ZERO,
            to: holder,
            amount: config.initial_supply,
        });

        log::info!(
            "Token ledger created: {} ({}), supply {} held by {}",
            engine.metadata.name,
            engine.metadata.symbol,
            config.initial_supply,
            holder
        );

        Ok((engine, notifications))
    }

    // =========================================================================
    // View Functions
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    pub fn total_supply(&self) -> Amount {
        self.balances.total_supply()
    }

    pub fn balance_of(&self, account: &Account) -> Amount {
        self.balances.balance_of(account)
    }

    pub fn allowance(&self, owner: &Account, spender: &Account) -> Amount {
        self.allowances.allowance_of(owner, spender)
    }

    pub fn owner(&self) -> Account {
        self.access.owner()
    }

    pub fn is_owner(&self, account: &Account) -> bool {
        self.access.is_owner(account)
    }

    pub fn is_minter(&self, account: &Account) -> bool {
        self.access.is_minter(account)
    }

    pub fn minters(&self) -> Vec<Account> {
        self.access.minters()
    }

    /// Holders with non-zero balances, sorted by account
    pub fn holders(&self) -> Vec<(Account, Amount)> {
        self.balances.holders()
    }

    pub fn holder_count(&self) -> usize {
        self.balances.holder_count()
    }

    /// Whether the total supply equals the sum of all balances
    pub fn is_conserved(&self) -> bool {
        self.balances.sum_of_balances() == Some(self.balances.total_supply())
    }

    // =========================================================================
    // Mutating Functions
    // =========================================================================

    /// Transfer tokens from the caller to `to`
    pub fn transfer(
        &mut self,
        caller: Account,
        to: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        ensure_caller(&caller)?;
        self.ensure_destination(&to)?;

        self.balances.move_balance(caller, to, amount)?;
        log::debug!("transfer {} -> {}: {}", caller, to, amount);

        Ok(vec![Notification::Transfer {
            from: caller,
            to,
            amount,
        }])
    }

    /// Set the amount `spender` may move on the caller's behalf (overwrites)
    pub fn approve(
        &mut self,
        caller: Account,
        spender: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        ensure_caller(&caller)?;
        ensure_spender(&spender)?;

        self.allowances.set_allowance(caller, spender, amount);
        log::debug!("approve {} -> {}: {}", caller, spender, amount);

        Ok(vec![Notification::Approval {
            owner: caller,
            spender,
            amount,
        }])
    }

    /// Add to an existing allowance
    pub fn increase_allowance(
        &mut self,
        caller: Account,
        spender: Account,
        added: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        ensure_caller(&caller)?;
        ensure_spender(&spender)?;

        let amount = self.allowances.increase(caller, spender, added)?;
        log::debug!("increase allowance {} -> {}: now {}", caller, spender, amount);

        Ok(vec![Notification::Approval {
            owner: caller,
            spender,
            amount,
        }])
    }

    /// Subtract from an existing allowance
    pub fn decrease_allowance(
        &mut self,
        caller: Account,
        spender: Account,
        subtracted: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        ensure_caller(&caller)?;
        ensure_spender(&spender)?;

        let amount = self.allowances.decrease(caller, spender, subtracted)?;
        log::debug!("decrease allowance {} -> {}: now {}", caller, spender, amount);

        Ok(vec![Notification::Approval {
            owner: caller,
            spender,
            amount,
        }])
    }

    /// Transfer tokens on behalf of `owner` (requires prior approval)
    pub fn transfer_from(
        &mut self,
        caller: Account,
        owner: Account,
        to: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        ensure_caller(&caller)?;
        self.ensure_destination(&to)?;

        let previous = self.allowances.consume(owner, caller, amount)?;
        if let Err(e) = self.balances.move_balance(owner, to, amount) {
            self.allowances.set_allowance(owner, caller, previous);
            return Err(e);
        }
        log::debug!(
            "transfer_from {} -> {} by {}: {}",
            owner,
            to,
            caller,
            amount
        );

        Ok(vec![Notification::Transfer {
            from: owner,
            to,
            amount,
        }])
    }

    /// Destroy tokens from the caller's balance
    pub fn burn(&mut self, caller: Account, amount: Amount) -> LedgerResult<Vec<Notification>> {
        self.ensure_burnable("burn")?;
        ensure_caller(&caller)?;

        self.balances.debit(caller, amount)?;
        log::debug!("burn {}: {}", caller, amount);

        Ok(vec![Notification::Transfer {
            from: caller,
            to: Account::ZERO,
            amount,
        }])
    }

    /// Destroy tokens from `owner`'s balance using the caller's allowance
    pub fn burn_from(
        &mut self,
        caller: Account,
        owner: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.ensure_burnable("burn_from")?;
        ensure_caller(&caller)?;

        let previous = self.allowances.consume(owner, caller, amount)?;
        if let Err(e) = self.balances.debit(owner, amount) {
            self.allowances.set_allowance(owner, caller, previous);
            return Err(e);
        }
        log::debug!("burn_from {} by {}: {}", owner, caller, amount);

        Ok(vec![Notification::Transfer {
            from: owner,
            to: Account::ZERO,
            amount,
        }])
    }

    /// Create new tokens for `to`; the caller must be a minter
    pub fn mint(
        &mut self,
        caller: Account,
        to: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.ensure_mintable("mint")?;
        ensure_caller(&caller)?;
        if let Err(e) = self.access.ensure_minter(&caller) {
            log::warn!("Rejected mint by non-minter {}", caller);
            return Err(e);
        }
        self.ensure_destination(&to)?;

        self.balances.credit(to, amount)?;
        log::debug!("mint {} by {}: {}", to, caller, amount);

        Ok(vec![Notification::Transfer {
            from: Account::ZERO,
            to,
            amount,
        }])
    }

    /// Grant the minter role; any current minter may do this.
    ///
    /// Adding an existing minter succeeds without a notification.
    pub fn add_minter(
        &mut self,
        caller: Account,
        account: Account,
    ) -> LedgerResult<Vec<Notification>> {
        self.ensure_mintable("add_minter")?;
        ensure_caller(&caller)?;
        if account.is_zero() {
            return Err(LedgerError::InvalidArgument(
                "cannot grant the minter role to the zero account".to_string(),
            ));
        }

        let added = match self.access.add_minter(&caller, account) {
            Ok(added) => added,
            Err(e) => {
                log::warn!("Rejected add_minter by non-minter {}", caller);
                return Err(e);
            }
        };
        if !added {
            return Ok(Vec::new());
        }

        log::info!("Minter added: {} (by {})", account, caller);
        Ok(vec![Notification::MinterAdded { account }])
    }

    /// Hand ownership to `new_owner`; owner only
    pub fn transfer_ownership(
        &mut self,
        caller: Account,
        new_owner: Account,
    ) -> LedgerResult<Vec<Notification>> {
        if new_owner.is_zero() {
            return Err(LedgerError::InvalidArgument(
                "new owner cannot be the zero account".to_string(),
            ));
        }

        let previous_owner = match self.access.transfer_ownership(&caller, new_owner) {
            Ok(previous) => previous,
            Err(e) => {
                log::warn!("Rejected transfer_ownership by non-owner {}", caller);
                return Err(e);
            }
        };

        log::info!("Ownership transferred: {} -> {}", previous_owner, new_owner);
        Ok(vec![Notification::OwnershipTransferred {
            previous_owner,
            new_owner,
        }])
    }

    fn ensure_destination(&self, to: &Account) -> LedgerResult<()> {
        if to.is_zero() && self.metadata.zero_destination == ZeroDestinationPolicy::Reject {
            return Err(LedgerError::InvalidArgument(
                "destination cannot be the zero account".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_burnable(&self, operation: &'static str) -> LedgerResult<()> {
        if self.metadata.features.burnable {
            Ok(())
        } else {
            Err(LedgerError::UnsupportedOperation { operation })
        }
    }

    fn ensure_mintable(&self, operation: &'static str) -> LedgerResult<()> {
        if self.metadata.features.mintable {
            Ok(())
        } else {
            Err(LedgerError::UnsupportedOperation { operation })
        }
    }
}

fn ensure_caller(caller: &Account) -> LedgerResult<()> {
    if caller.is_zero() {
        return Err(LedgerError::InvalidArgument(
            "caller cannot be the zero account".to_string(),
        ));
    }
    Ok(())
}

fn ensure_spender(spender: &Account) -> LedgerResult<()> {
    if spender.is_zero() {
        return Err(LedgerError::InvalidArgument(
            "spender cannot be the zero account".to_string(),
        ));
    }
    Ok(())
}
