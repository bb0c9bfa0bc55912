use crate::config::load_config;
use crate::faucet::FaucetClient;
use crate::http::{HttpEngine, ReqwestEngine};
use crate::keystore::FileKeystore;
use crate::names::NameLookupClient;
use crate::registrar::Registrar;
use crate::types::Clock;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
pub enum Cli {
    /// Register every unregistered name in the list under a fresh account.
    Register(RegisterCmd),
    /// Resolve a single name through the name service.
    Lookup(LookupCmd),
    /// Request test coins for an address from the devnet faucet.
    Fund(FundCmd),
}

#[derive(Parser)]
pub struct RegisterCmd {
    /// Candidate names, comma separated.
    #[arg(long, value_delimiter = ',')]
    pub names: Vec<String>,
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Parser)]
pub struct LookupCmd {
    pub name: String,
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Parser)]
pub struct FundCmd {
    /// Receiving address, hex without the 0x prefix.
    pub address: String,
    #[arg(long)]
    pub amount: Option<u64>,
    #[arg(long, default_value = "config.yaml")]
    pub config: PathBuf,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self {
            Cli::Register(cmd) => cmd.run().await,
            Cli::Lookup(cmd) => cmd.run().await,
            Cli::Fund(cmd) => cmd.run().await,
        }
    }
}

fn engine() -> anyhow::Result<Arc<dyn HttpEngine>> {
    Ok(Arc::new(ReqwestEngine::new()?))
}

impl RegisterCmd {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = load_config(&self.config)?;
        let keystore = Arc::new(FileKeystore::new(&config.keystore_dir));
        let registrar = Registrar::new(&config, engine()?, Clock::system(), keystore);
        let outcome = registrar.register_names(&self.names).await;
        for hash in &outcome.hashes {
            println!("{hash}");
        }
        match outcome.error {
            None => Ok(()),
            Some(error) => Err(error.into()),
        }
    }
}

impl LookupCmd {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = load_config(&self.config)?;
        let names = NameLookupClient::new(&config.name_lookup_host, engine()?);
        match names.lookup(&self.name).await? {
            Some(address) => println!("{address}"),
            None => println!("unregistered"),
        }
        Ok(())
    }
}

impl FundCmd {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = load_config(&self.config)?;
        let faucet = FaucetClient::new(&config.faucet_host, engine()?);
        let amount = self.amount.unwrap_or(config.default_fund_amount);
        for hash in faucet.mint(&self.address, amount).await? {
            println!("{hash}");
        }
        Ok(())
    }
}
