//! Ledger persistence layer
//!
//! Provides save/load functionality for the token ledger.

use crate::token::{LedgerError, TokenEngine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub ledger_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".ledger_data"),
            ledger_file: "ledger.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// On-disk form of a ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub saved_at: DateTime<Utc>,
    pub engine: TokenEngine,
}

/// Ledger storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    fn ledger_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.ledger_file)
    }

    fn temp_path(&self) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.tmp", self.config.ledger_file))
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.ledger_file, index))
    }

    /// Save the ledger to disk
    pub fn save(&self, engine: &TokenEngine) -> Result<(), StorageError> {
        let path = self.ledger_path();

        if self.config.backup_enabled && self.config.max_backups > 0 && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        let snapshot = LedgerSnapshot {
            saved_at: Utc::now(),
            engine: engine.clone(),
        };

        // Write to temporary file first and make it durable
        let temp_path = self.temp_path();
        let file = fs::File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        log::info!("Ledger saved to {:?}", path);
        Ok(())
    }

    /// Load the ledger from disk
    pub fn load(&self) -> Result<TokenEngine, StorageError> {
        let path = self.ledger_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Ledger file not found".to_string(),
            ));
        }

        load_snapshot(&path)
    }

    /// Check if a saved ledger exists
    pub fn exists(&self) -> bool {
        self.ledger_path().exists()
    }

    /// Delete the saved ledger
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.ledger_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn rotate_backups(&self) -> Result<(), StorageError> {
        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                fs::rename(&current, self.backup_path(i + 1))?;
            }
        }

        Ok(())
    }

    /// Restore from a backup
    pub fn restore_backup(&self, backup_index: usize) -> Result<TokenEngine, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        load_snapshot(&backup_path)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        (0..self.config.max_backups)
            .filter(|i| self.backup_path(*i).exists())
            .collect()
    }
}

/// Read a snapshot file, rejecting ledgers whose supply does not add up
pub fn load_snapshot(path: &Path) -> Result<TokenEngine, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let snapshot: LedgerSnapshot = serde_json::from_reader(reader)?;

    if !snapshot.engine.is_conserved() {
        return Err(StorageError::InvalidData(format!(
            "total supply does not match balances in {:?}",
            path
        )));
    }

    log::debug!("Loaded ledger saved at {}", snapshot.saved_at);
    Ok(snapshot.engine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Account, Amount, TokenConfig};
    use tempfile::tempdir;

    fn storage_in(dir: &Path, max_backups: usize) -> Storage {
        Storage::new(StorageConfig {
            data_dir: dir.to_path_buf(),
            max_backups,
            ..Default::default()
        })
        .unwrap()
    }

    fn engine() -> TokenEngine {
        TokenEngine::new(TokenConfig::new(Account::from_label("owner")))
            .unwrap()
            .0
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path(), 5);
        let owner = Account::from_label("owner");
        let spender = Account::from_label("spender");

        let mut engine = engine();
        engine.approve(owner, spender, Amount::from(77u64)).unwrap();
        engine.transfer(owner, spender, Amount::from(5u64)).unwrap();

        assert!(!storage.exists());
        storage.save(&engine).unwrap();
        assert!(storage.exists());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded, engine);
        assert_eq!(loaded.allowance(&owner, &spender), Amount::from(77u64));
    }

    #[test]
    fn test_load_missing() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path(), 5);

        assert!(matches!(storage.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_backups_rotate() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path(), 2);
        let owner = Account::from_label("owner");
        let mut engine = engine();

        storage.save(&engine).unwrap();
        assert!(storage.list_backups().is_empty());

        engine.burn(owner, Amount::from(1u64)).unwrap();
        storage.save(&engine).unwrap();
        engine.burn(owner, Amount::from(1u64)).unwrap();
        storage.save(&engine).unwrap();
        engine.burn(owner, Amount::from(1u64)).unwrap();
        storage.save(&engine).unwrap();

        assert_eq!(storage.list_backups(), vec![0, 1]);
        let previous = storage.restore_backup(0).unwrap();
        assert_eq!(
            engine.total_supply() + Amount::from(1u64),
            previous.total_supply()
        );
    }

    #[test]
    fn test_tampered_snapshot_rejected() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path(), 0);
        storage.save(&engine()).unwrap();

        let path = dir.path().join("ledger.json");
        let mut json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        json["engine"]["balances"]["total_supply"] = serde_json::json!("0x1");
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        assert!(matches!(storage.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path(), 0);
        storage.save(&engine()).unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["ledger.json".to_string()]);

        // The renamed file is complete JSON
        let raw = fs::read_to_string(dir.path().join("ledger.json")).unwrap();
        let snapshot: LedgerSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(snapshot.engine, engine());
    }

    #[test]
    fn test_stores_sharing_a_directory() {
        let dir = tempdir().unwrap();
        let owner = Account::from_label("owner");
        let store = |file: &str| {
            Storage::new(StorageConfig {
                data_dir: dir.path().to_path_buf(),
                ledger_file: file.to_string(),
                backup_enabled: false,
                max_backups: 0,
            })
            .unwrap()
        };
        let first = store("first.json");
        let second = store("second.json");

        let mut other = engine();
        other.burn(owner, Amount::from(10u64)).unwrap();

        first.save(&engine()).unwrap();
        second.save(&other).unwrap();
        first.save(&engine()).unwrap();

        assert_eq!(first.load().unwrap(), engine());
        assert_eq!(second.load().unwrap(), other);
        assert!(!dir.path().join("first.json.tmp").exists());
        assert!(!dir.path().join("second.json.tmp").exists());
    }

    #[test]
    fn test_delete() {
        let dir = tempdir().unwrap();
        let storage = storage_in(dir.path(), 0);

        storage.save(&engine()).unwrap();
        storage.delete().unwrap();
        assert!(!storage.exists());
    }
}
