//! CLI commands for the token ledger
//!
//! Implements all command handlers for the CLI interface.

use crate::storage::{Storage, StorageConfig};
use crate::token::{
    Account, Amount, LedgerResult, Notification, TokenConfig, TokenEngine, TokenFeatures,
    ZeroDestinationPolicy,
};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub engine: TokenEngine,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load the ledger from the data directory
    pub fn new(data_dir: PathBuf) -> CliResult<Self> {
        let storage = open_storage(&data_dir)?;

        if !storage.exists() {
            return Err(format!(
                "no ledger found in {:?}; create one with: ledger init --owner <ACCOUNT>",
                data_dir
            )
            .into());
        }

        let engine = storage.load()?;
        Ok(Self {
            engine,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.engine)?;
        Ok(())
    }
}

/// Parameters for `ledger init`
#[derive(Debug, Clone)]
pub struct InitOptions {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub owner: Account,
    pub holder: Option<Account>,
    pub supply: Amount,
    pub features: TokenFeatures,
    pub allow_zero_destination: bool,
    pub force: bool,
}

fn open_storage(data_dir: &Path) -> CliResult<Storage> {
    let config = StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    };
    Ok(Storage::new(config)?)
}

fn print_notifications(notifications: &[Notification]) {
    if notifications.is_empty() {
        println!("   (no state change announced)");
        return;
    }
    for notification in notifications {
        println!("   📣 {}", notification);
    }
}

/// Print the outcome of an operation and persist it if it succeeded
fn commit(
    state: &AppState,
    action: &str,
    result: LedgerResult<Vec<Notification>>,
) -> CliResult<()> {
    let notifications = result?;
    state.save()?;

    println!("✅ {}", action);
    print_notifications(&notifications);
    Ok(())
}

/// Create a new ledger
pub fn cmd_init(data_dir: &Path, options: InitOptions) -> CliResult<()> {
    let storage = open_storage(data_dir)?;

    if storage.exists() && !options.force {
        println!("⚠️  Ledger already exists at {:?}", data_dir);
        println!("   Use --force to reinitialize (this will delete existing data)");
        return Ok(());
    }

    let policy = if options.allow_zero_destination {
        ZeroDestinationPolicy::Allow
    } else {
        ZeroDestinationPolicy::Reject
    };
    let mut config = TokenConfig::new(options.owner)
        .with_metadata(&options.name, &options.symbol, options.decimals)
        .with_initial_supply(options.supply)
        .with_zero_destination(policy);
    config.features = options.features;
    if let Some(holder) = options.holder {
        config = config.with_initial_holder(holder);
    }

    let (engine, notifications) = TokenEngine::new(config)?;
    storage.save(&engine)?;

    println!("✅ Ledger initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🪙 Token: {} ({})", engine.name(), engine.symbol());
    println!("   👑 Owner: {}", engine.owner());
    println!("   💰 Total supply: {}", engine.total_supply());
    print_notifications(&notifications);

    Ok(())
}

/// Display ledger info
pub fn cmd_info(state: &AppState) -> CliResult<()> {
    let engine = &state.engine;
    let features = engine.metadata.features;

    println!("🪙 Token Info");
    println!("   ├─ Name: {}", engine.name());
    println!("   ├─ Symbol: {}", engine.symbol());
    println!("   ├─ Decimals: {}", engine.decimals());
    println!("   ├─ Total supply: {}", engine.total_supply());
    println!("   ├─ Mintable: {}", features.mintable);
    println!("   ├─ Burnable: {}", features.burnable);
    println!("   ├─ Owner: {}", engine.owner());
    println!("   ├─ Minters: {}", engine.minters().len());
    for minter in engine.minters() {
        println!("   │  └─ {}", minter);
    }
    println!("   └─ Holders: {}", engine.holder_count());
    for (account, balance) in engine.holders().iter().take(10) {
        println!("      └─ {} = {}", account, balance);
    }

    Ok(())
}

pub fn cmd_balance(state: &AppState, account: &Account) -> CliResult<()> {
    println!("💰 Balance for {}", account);
    println!("   {} {}", state.engine.balance_of(account), state.engine.symbol());
    Ok(())
}

pub fn cmd_allowance(state: &AppState, owner: &Account, spender: &Account) -> CliResult<()> {
    println!("🔓 Allowance of {} over {}", spender, owner);
    println!("   {} {}", state.engine.allowance(owner, spender), state.engine.symbol());
    Ok(())
}

pub fn cmd_transfer(
    state: &mut AppState,
    caller: Account,
    to: Account,
    amount: Amount,
) -> CliResult<()> {
    let result = state.engine.transfer(caller, to, amount);
    commit(state, "Transfer applied", result)
}

pub fn cmd_approve(
    state: &mut AppState,
    caller: Account,
    spender: Account,
    amount: Amount,
) -> CliResult<()> {
    let result = state.engine.approve(caller, spender, amount);
    commit(state, "Allowance set", result)
}

pub fn cmd_increase_allowance(
    state: &mut AppState,
    caller: Account,
    spender: Account,
    added: Amount,
) -> CliResult<()> {
    let result = state.engine.increase_allowance(caller, spender, added);
    commit(state, "Allowance increased", result)
}

pub fn cmd_decrease_allowance(
    state: &mut AppState,
    caller: Account,
    spender: Account,
    subtracted: Amount,
) -> CliResult<()> {
    let result = state.engine.decrease_allowance(caller, spender, subtracted);
    commit(state, "Allowance decreased", result)
}

pub fn cmd_transfer_from(
    state: &mut AppState,
    caller: Account,
    owner: Account,
    to: Account,
    amount: Amount,
) -> CliResult<()> {
    let result = state.engine.transfer_from(caller, owner, to, amount);
    commit(state, "Delegated transfer applied", result)
}

pub fn cmd_burn(state: &mut AppState, caller: Account, amount: Amount) -> CliResult<()> {
    let result = state.engine.burn(caller, amount);
    commit(state, "Tokens burned", result)
}

pub fn cmd_burn_from(
    state: &mut AppState,
    caller: Account,
    owner: Account,
    amount: Amount,
) -> CliResult<()> {
    let result = state.engine.burn_from(caller, owner, amount);
    commit(state, "Delegated burn applied", result)
}

pub fn cmd_mint(
    state: &mut AppState,
    caller: Account,
    to: Account,
    amount: Amount,
) -> CliResult<()> {
    let result = state.engine.mint(caller, to, amount);
    commit(state, "Tokens minted", result)
}

pub fn cmd_add_minter(state: &mut AppState, caller: Account, account: Account) -> CliResult<()> {
    let result = state.engine.add_minter(caller, account);
    commit(state, "Minter role granted", result)
}

pub fn cmd_transfer_ownership(
    state: &mut AppState,
    caller: Account,
    new_owner: Account,
) -> CliResult<()> {
    let result = state.engine.transfer_ownership(caller, new_owner);
    commit(state, "Ownership transferred", result)
}

/// Print the account derived from a label
pub fn cmd_account_derive(label: &str) -> CliResult<()> {
    println!("🏷️  {} -> {}", label, Account::from_label(label));
    Ok(())
}

/// Print a fresh random account
pub fn cmd_account_new() -> CliResult<()> {
    println!("🔐 New account: {}", Account::random());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn init_options(owner: Account) -> InitOptions {
        InitOptions {
            name: "Test Token".to_string(),
            symbol: "TST".to_string(),
            decimals: 18,
            owner,
            holder: None,
            supply: Amount::from(1_000_000u64),
            features: TokenFeatures::default(),
            allow_zero_destination: false,
            force: false,
        }
    }

    #[test]
    fn test_init_then_operate() {
        let dir = tempdir().unwrap();
        let owner = Account::from_label("owner");
        let user = Account::from_label("user");

        cmd_init(dir.path(), init_options(owner)).unwrap();

        let mut state = AppState::new(dir.path().to_path_buf()).unwrap();
        cmd_transfer(&mut state, owner, user, Amount::from(400u64)).unwrap();
        cmd_mint(&mut state, owner, user, Amount::from(100u64)).unwrap();

        let reloaded = AppState::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(reloaded.engine.balance_of(&user), Amount::from(500u64));
        assert_eq!(reloaded.engine.total_supply(), Amount::from(1_000_100u64));
    }

    #[test]
    fn test_failed_operation_is_not_saved() {
        let dir = tempdir().unwrap();
        let owner = Account::from_label("owner");
        let user = Account::from_label("user");

        cmd_init(dir.path(), init_options(owner)).unwrap();

        let mut state = AppState::new(dir.path().to_path_buf()).unwrap();
        assert!(cmd_mint(&mut state, user, user, Amount::from(1u64)).is_err());

        let reloaded = AppState::new(dir.path().to_path_buf()).unwrap();
        assert_eq!(reloaded.engine.balance_of(&user), Amount::zero());
    }

    #[test]
    fn test_init_does_not_overwrite_without_force() {
        let dir = tempdir().unwrap();
        let owner = Account::from_label("owner");
        let other = Account::from_label("other");

        cmd_init(dir.path(), init_options(owner)).unwrap();
        cmd_init(dir.path(), init_options(other)).unwrap();
        assert_eq!(
            AppState::new(dir.path().to_path_buf()).unwrap().engine.owner(),
            owner
        );

        let forced = InitOptions {
            force: true,
            ..init_options(other)
        };
        cmd_init(dir.path(), forced).unwrap();
        assert_eq!(
            AppState::new(dir.path().to_path_buf()).unwrap().engine.owner(),
            other
        );
    }

    #[test]
    fn test_missing_ledger() {
        let dir = tempdir().unwrap();
        assert!(AppState::new(dir.path().to_path_buf()).is_err());
    }
}
