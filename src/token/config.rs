//! Token configuration supplied at ledger creation

use serde::{Deserialize, Serialize};

use super::error::{LedgerError, LedgerResult};
use super::types::{reference_initial_supply, Account, Amount, DEFAULT_DECIMALS};

/// Which operation families the deployed token supports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFeatures {
    /// `mint` and `add_minter`
    pub mintable: bool,
    /// `burn` and `burn_from`
    pub burnable: bool,
}

impl Default for TokenFeatures {
    fn default() -> Self {
        Self {
            mintable: true,
            burnable: true,
        }
    }
}

/// Whether the zero-identity may be named as an ordinary destination
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroDestinationPolicy {
    /// Transfers and mints to the zero-identity fail with `InvalidArgument`
    #[default]
    Reject,
    /// Tokens sent to the zero-identity stay there (and keep counting in supply)
    Allow,
}

/// Creation parameters for a token ledger
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Deployer; becomes owner and first minter
    pub owner: Account,
    /// Receives the initial supply; defaults to the owner
    pub initial_holder: Option<Account>,
    pub initial_supply: Amount,
    pub features: TokenFeatures,
    pub zero_destination: ZeroDestinationPolicy,
}

impl TokenConfig {
    /// Full-featured token with the reference supply held by `owner`
    pub fn new(owner: Account) -> Self {
        Self {
            name: "Ledger Token".to_string(),
            symbol: "LDG".to_string(),
            decimals: DEFAULT_DECIMALS,
            owner,
            initial_holder: None,
            initial_supply: reference_initial_supply(),
            features: TokenFeatures::default(),
            zero_destination: ZeroDestinationPolicy::default(),
        }
    }

    /// No minting, no burning
    pub fn fixed_supply(owner: Account) -> Self {
        Self {
            features: TokenFeatures {
                mintable: false,
                burnable: false,
            },
            ..Self::new(owner)
        }
    }

    pub fn burnable(owner: Account) -> Self {
        Self {
            features: TokenFeatures {
                mintable: false,
                burnable: true,
            },
            ..Self::new(owner)
        }
    }

    pub fn mintable(owner: Account) -> Self {
        Self {
            features: TokenFeatures {
                mintable: true,
                burnable: false,
            },
            ..Self::new(owner)
        }
    }

    pub fn with_metadata(mut self, name: &str, symbol: &str, decimals: u8) -> Self {
        self.name = name.to_string();
        self.symbol = symbol.to_string();
        self.decimals = decimals;
        self
    }

    pub fn with_initial_holder(mut self, holder: Account) -> Self {
        self.initial_holder = Some(holder);
        self
    }

    pub fn with_initial_supply(mut self, supply: Amount) -> Self {
        self.initial_supply = supply;
        self
    }

    pub fn with_zero_destination(mut self, policy: ZeroDestinationPolicy) -> Self {
        self.zero_destination = policy;
        self
    }

    pub fn holder(&self) -> Account {
        self.initial_holder.unwrap_or(self.owner)
    }

    /// Check every field before a ledger is built from this config
    pub fn validate(&self) -> LedgerResult<()> {
        if self.name.is_empty() || self.name.chars().count() > 50 {
            return Err(LedgerError::InvalidArgument(
                "name must be 1-50 characters".to_string(),
            ));
        }

        if self.symbol.is_empty() || self.symbol.chars().count() > 10 {
            return Err(LedgerError::InvalidArgument(
                "symbol must be 1-10 characters".to_string(),
            ));
        }

        if self.decimals > 18 {
            return Err(LedgerError::InvalidArgument(
                "decimals must be 0-18".to_string(),
            ));
        }

        if self.owner.is_zero() {
            return Err(LedgerError::InvalidArgument(
                "owner cannot be the zero account".to_string(),
            ));
        }

        if self.holder().is_zero() {
            return Err(LedgerError::InvalidArgument(
                "initial holder cannot be the zero account".to_string(),
            ));
        }

        Ok(())
    }
}

/// Token metadata (immutable after creation)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub features: TokenFeatures,
    pub zero_destination: ZeroDestinationPolicy,
}

impl From<&TokenConfig> for TokenMetadata {
    fn from(config: &TokenConfig) -> Self {
        Self {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            decimals: config.decimals,
            features: config.features,
            zero_destination: config.zero_destination,
        }
    }
}
