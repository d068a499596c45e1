//! Token Ledger CLI Application
//!
//! A command-line interface for operating a fungible-token ledger.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use token_ledger::cli::{self, AppState, InitOptions};
use token_ledger::token::{
    parse_amount, reference_initial_supply, Account, Amount, TokenFeatures, DEFAULT_DECIMALS,
};

#[derive(Parser)]
#[command(name = "ledger")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "A fungible-token ledger with allowances and role-gated minting", long_about = None)]
struct Cli {
    /// Data directory for ledger storage
    #[arg(short, long, default_value = ".ledger_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Reference deployments
#[derive(Clone, Copy, Debug, ValueEnum)]
enum TokenKind {
    /// No minting or burning
    Fixed,
    /// Holders may burn their own or approved tokens
    Burnable,
    /// Minters may create new supply
    Mintable,
    /// Both burnable and mintable
    Full,
}

impl From<TokenKind> for TokenFeatures {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Fixed => TokenFeatures {
                mintable: false,
                burnable: false,
            },
            TokenKind::Burnable => TokenFeatures {
                mintable: false,
                burnable: true,
            },
            TokenKind::Mintable => TokenFeatures {
                mintable: true,
                burnable: false,
            },
            TokenKind::Full => TokenFeatures::default(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new ledger
    Init {
        /// Owner (deployer) account
        #[arg(short, long)]
        owner: Account,

        /// Account receiving the initial supply (defaults to the owner)
        #[arg(long)]
        holder: Option<Account>,

        /// Initial supply in base units (defaults to one million whole tokens)
        #[arg(short, long, value_parser = parse_amount)]
        supply: Option<Amount>,

        #[arg(long, default_value = "Ledger Token")]
        name: String,

        #[arg(long, default_value = "LDG")]
        symbol: String,

        #[arg(long, default_value_t = DEFAULT_DECIMALS)]
        decimals: u8,

        /// Which operation families the token supports
        #[arg(short, long, value_enum, default_value = "full")]
        kind: TokenKind,

        /// Accept the zero account as a transfer or mint destination
        #[arg(long)]
        allow_zero_destination: bool,

        /// Overwrite an existing ledger
        #[arg(long)]
        force: bool,
    },

    /// Display token information
    Info,

    /// Show an account's balance
    Balance {
        #[arg(short, long)]
        account: Account,
    },

    /// Show the allowance of a spender over an owner
    Allowance {
        #[arg(short, long)]
        owner: Account,

        #[arg(short, long)]
        spender: Account,
    },

    /// Transfer tokens from the caller
    Transfer {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        to: Account,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Amount,
    },

    /// Set the amount a spender may move on the caller's behalf
    Approve {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        spender: Account,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Amount,
    },

    /// Add to a spender's allowance
    IncreaseAllowance {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        spender: Account,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Amount,
    },

    /// Subtract from a spender's allowance
    DecreaseAllowance {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        spender: Account,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Amount,
    },

    /// Transfer tokens on behalf of an owner using the caller's allowance
    TransferFrom {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        owner: Account,

        #[arg(short, long)]
        to: Account,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Amount,
    },

    /// Destroy tokens held by the caller
    Burn {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Amount,
    },

    /// Destroy an owner's tokens using the caller's allowance
    BurnFrom {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        owner: Account,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Amount,
    },

    /// Create new tokens (caller must be a minter)
    Mint {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        to: Account,

        #[arg(short, long, value_parser = parse_amount)]
        amount: Amount,
    },

    /// Grant the minter role (caller must be a minter)
    AddMinter {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        account: Account,
    },

    /// Hand ownership to another account (caller must be the owner)
    TransferOwnership {
        #[arg(short, long)]
        caller: Account,

        #[arg(short, long)]
        new_owner: Account,
    },

    /// Account helpers
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Derive a deterministic account from a label
    Derive {
        #[arg(short, long)]
        label: String,
    },

    /// Generate a random account
    New,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Commands that don't need a loaded ledger
    let command = match cli.command {
        Commands::Init {
            owner,
            holder,
            supply,
            name,
            symbol,
            decimals,
            kind,
            allow_zero_destination,
            force,
        } => {
            let options = InitOptions {
                name,
                symbol,
                decimals,
                owner,
                holder,
                supply: supply.unwrap_or_else(reference_initial_supply),
                features: kind.into(),
                allow_zero_destination,
                force,
            };
            return cli::cmd_init(&cli.data_dir, options);
        }
        Commands::Account { action } => {
            return match action {
                AccountCommands::Derive { label } => cli::cmd_account_derive(&label),
                AccountCommands::New => cli::cmd_account_new(),
            };
        }
        other => other,
    };

    let mut state = AppState::new(cli.data_dir)?;

    match command {
        Commands::Init { .. } | Commands::Account { .. } => unreachable!(),

        Commands::Info => cli::cmd_info(&state)?,

        Commands::Balance { account } => cli::cmd_balance(&state, &account)?,

        Commands::Allowance { owner, spender } => cli::cmd_allowance(&state, &owner, &spender)?,

        Commands::Transfer { caller, to, amount } => {
            cli::cmd_transfer(&mut state, caller, to, amount)?
        }

        Commands::Approve {
            caller,
            spender,
            amount,
        } => cli::cmd_approve(&mut state, caller, spender, amount)?,

        Commands::IncreaseAllowance {
            caller,
            spender,
            amount,
        } => cli::cmd_increase_allowance(&mut state, caller, spender, amount)?,

        Commands::DecreaseAllowance {
            caller,
            spender,
            amount,
        } => cli::cmd_decrease_allowance(&mut state, caller, spender, amount)?,

        Commands::TransferFrom {
            caller,
            owner,
            to,
            amount,
        } => cli::cmd_transfer_from(&mut state, caller, owner, to, amount)?,

        Commands::Burn { caller, amount } => cli::cmd_burn(&mut state, caller, amount)?,

        Commands::BurnFrom {
            caller,
            owner,
            amount,
        } => cli::cmd_burn_from(&mut state, caller, owner, amount)?,

        Commands::Mint { caller, to, amount } => cli::cmd_mint(&mut state, caller, to, amount)?,

        Commands::AddMinter { caller, account } => {
            cli::cmd_add_minter(&mut state, caller, account)?
        }

        Commands::TransferOwnership { caller, new_owner } => {
            cli::cmd_transfer_ownership(&mut state, caller, new_owner)?
        }
    }

    Ok(())
}
