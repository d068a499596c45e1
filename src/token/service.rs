//! Shared ledger handle for concurrent callers
//!
//! All mutations go through one write lock held for the whole operation, so
//! operations are serialized end-to-end and readers never observe a
//! half-applied transfer.

use std::sync::Arc;
use tokio::sync::RwLock;

use super::engine::TokenEngine;
use super::error::LedgerResult;
use super::events::Notification;
use super::types::{Account, Amount};

/// Cloneable handle to a single ledger
#[derive(Clone, Debug)]
pub struct LedgerService {
    engine: Arc<RwLock<TokenEngine>>,
}

impl LedgerService {
    pub fn new(engine: TokenEngine) -> Self {
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Copy of the current ledger state
    pub async fn snapshot(&self) -> TokenEngine {
        self.engine.read().await.clone()
    }

    pub async fn balance_of(&self, account: &Account) -> Amount {
        self.engine.read().await.balance_of(account)
    }

    pub async fn total_supply(&self) -> Amount {
        self.engine.read().await.total_supply()
    }

    pub async fn allowance(&self, owner: &Account, spender: &Account) -> Amount {
        self.engine.read().await.allowance(owner, spender)
    }

    pub async fn is_minter(&self, account: &Account) -> bool {
        self.engine.read().await.is_minter(account)
    }

    pub async fn transfer(
        &self,
        caller: Account,
        to: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine.write().await.transfer(caller, to, amount)
    }

    pub async fn approve(
        &self,
        caller: Account,
        spender: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine.write().await.approve(caller, spender, amount)
    }

    pub async fn increase_allowance(
        &self,
        caller: Account,
        spender: Account,
        added: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine
            .write()
            .await
            .increase_allowance(caller, spender, added)
    }

    pub async fn decrease_allowance(
        &self,
        caller: Account,
        spender: Account,
        subtracted: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine
            .write()
            .await
            .decrease_allowance(caller, spender, subtracted)
    }

    pub async fn transfer_from(
        &self,
        caller: Account,
        owner: Account,
        to: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine
            .write()
            .await
            .transfer_from(caller, owner, to, amount)
    }

    pub async fn burn(&self, caller: Account, amount: Amount) -> LedgerResult<Vec<Notification>> {
        self.engine.write().await.burn(caller, amount)
    }

    pub async fn burn_from(
        &self,
        caller: Account,
        owner: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine.write().await.burn_from(caller, owner, amount)
    }

    pub async fn mint(
        &self,
        caller: Account,
        to: Account,
        amount: Amount,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine.write().await.mint(caller, to, amount)
    }

    pub async fn add_minter(
        &self,
        caller: Account,
        account: Account,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine.write().await.add_minter(caller, account)
    }

    pub async fn transfer_ownership(
        &self,
        caller: Account,
        new_owner: Account,
    ) -> LedgerResult<Vec<Notification>> {
        self.engine
            .write()
            .await
            .transfer_ownership(caller, new_owner)
    }
}
