//! Keystore boundary. The sink is a contract; the file implementation
//! drops one JSON blob per account, named by uppercased address. Keys are
//! stored in the clear, which is acceptable for devnet throwaway accounts
//! only.

use crate::account::Account;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub trait KeystoreSink: Send + Sync {
    fn persist(&self, account: &Account) -> Result<()>;
}

pub struct FileKeystore {
    dir: PathBuf,
}

impl FileKeystore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn blob_path(&self, account: &Account) -> PathBuf {
        self.dir.join(format!("{}.JSON", account.uppercase_address()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KeystoreSink for FileKeystore {
    fn persist(&self, account: &Account) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(Error::KeystorePersist)?;
        let blob = serde_json::to_string_pretty(account)?;
        std::fs::write(self.blob_path(account), blob).map_err(Error::KeystorePersist)?;
        Ok(())
    }
}
