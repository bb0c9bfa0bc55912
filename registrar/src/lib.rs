//! Batch name registrar for the Aptos devnet.
//!
//! Given a list of desired names, skips those the name service already
//! resolves, then for each remaining name: mints a fresh Ed25519 account,
//! persists it to the keystore, funds it from the faucet, and drives the
//! ledger's prepare → sign → submit flow to claim the name on-chain.

pub mod account;
pub mod cli;
pub mod config;
pub mod constants;
pub mod crypto;
pub mod error;
pub mod faucet;
pub mod http;
pub mod keystore;
pub mod ledger;
pub mod names;
pub mod registrar;
pub mod tracing;
pub mod types;
