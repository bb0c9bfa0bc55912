//! The format of the config.yaml file. Every field has a devnet default,
//! so a missing or empty file is a working configuration.

use crate::constants::DEFAULT_FUND_AMOUNT;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrarConfig {
    pub ledger_host: String,
    pub faucet_host: String,
    pub name_lookup_host: String,
    /// Fully qualified on-chain function the claim transaction calls.
    pub claim_function: String,
    /// Directory receiving one JSON blob per minted account.
    pub keystore_dir: PathBuf,
    /// Faucet drip requested for each fresh account.
    pub default_fund_amount: u64,
}

impl Default for RegistrarConfig {
    fn default() -> Self {
        Self {
            ledger_host: "https://fullnode.devnet.aptoslabs.com".to_string(),
            faucet_host: "https://faucet.devnet.aptoslabs.com".to_string(),
            name_lookup_host: "https://www.aptosnames.com".to_string(),
            claim_function:
                "0xf4eb1f3e838411ab992f81cabb25f29ea4eb2406cd167261273da587c3615792::service::claim_name"
                    .to_string(),
            keystore_dir: PathBuf::from("keystore"),
            default_fund_amount: DEFAULT_FUND_AMOUNT,
        }
    }
}

pub fn load_config(path: &Path) -> anyhow::Result<RegistrarConfig> {
    if !path.exists() {
        return Ok(RegistrarConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: RegistrarConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}
