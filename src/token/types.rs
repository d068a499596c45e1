//! Account identities and token amounts

use primitive_types::U256;
use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use super::error::LedgerError;

/// Quantity of the token's smallest unit
pub type Amount = U256;

/// Address length in bytes
pub const ACCOUNT_LEN: usize = 20;

/// Decimal places used by the reference deployments
pub const DEFAULT_DECIMALS: u8 = 18;

/// Whole tokens minted at creation by the reference deployments
pub const REFERENCE_WHOLE_SUPPLY: u64 = 1_000_000;

/// A ledger participant, identified by a 20-byte address
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Account([u8; ACCOUNT_LEN]);

impl Account {
    /// The zero-identity: source of minted and destination of burned tokens
    pub const ZERO: Account = Account([0u8; ACCOUNT_LEN]);

    pub const fn new(bytes: [u8; ACCOUNT_LEN]) -> Self {
        Self(bytes)
    }

    /// Derive a deterministic account from a human-readable label
    pub fn from_label(label: &str) -> Self {
        let hash = Sha256::digest(label.as_bytes());
        let mut bytes = [0u8; ACCOUNT_LEN];
        bytes.copy_from_slice(&hash[..ACCOUNT_LEN]);
        Self(bytes)
    }

    /// Generate a random account
    pub fn random() -> Self {
        let mut bytes = [0u8; ACCOUNT_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Account {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| LedgerError::InvalidArgument(format!("invalid account {s:?}: {e}")))?;
        let bytes: [u8; ACCOUNT_LEN] = bytes.try_into().map_err(|_| {
            LedgerError::InvalidArgument(format!(
                "invalid account {s:?}: expected {ACCOUNT_LEN} bytes"
            ))
        })?;
        Ok(Self(bytes))
    }
}

// Serialized as the hex string so accounts can key JSON maps.
impl Serialize for Account {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Account {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse a decimal amount of base units
pub fn parse_amount(s: &str) -> Result<Amount, LedgerError> {
    let cleaned: String = s.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(LedgerError::InvalidArgument(format!("invalid amount {s:?}")));
    }
    Amount::from_dec_str(&cleaned)
        .map_err(|_| LedgerError::InvalidArgument(format!("invalid amount {s:?}")))
}

/// `count` whole tokens expressed in base units
pub fn whole_tokens(count: u64, decimals: u8) -> Result<Amount, LedgerError> {
    Amount::from(count)
        .checked_mul(Amount::exp10(decimals as usize))
        .ok_or(LedgerError::Overflow)
}

/// One million tokens at 18 decimals
pub fn reference_initial_supply() -> Amount {
    Amount::from(REFERENCE_WHOLE_SUPPLY) * Amount::exp10(DEFAULT_DECIMALS as usize)
}
