//! The orchestrator: filters out names the name service already resolves,
//! then provisions and registers each survivor in sequence.
//!
//! Mutating steps are never retried and never rolled back. A failure stops
//! the batch; keystore blobs, faucet drips, and hashes produced before the
//! failure all stand.

use crate::account::Account;
use crate::config::RegistrarConfig;
use crate::error::{Error, Result};
use crate::faucet::FaucetClient;
use crate::http::HttpEngine;
use crate::keystore::KeystoreSink;
use crate::ledger::LedgerClient;
use crate::names::NameLookupClient;
use crate::types::{Clock, TransactionPayload};
use std::collections::HashSet;
use std::sync::Arc;

pub struct Registrar {
    ledger: LedgerClient,
    names: NameLookupClient,
    faucet: FaucetClient,
    keystore: Arc<dyn KeystoreSink>,
    claim_function: String,
    fund_amount: u64,
}

/// What a batch run produced: the hash of every submitted registration,
/// plus the error that stopped the run early, if any. Skipped names leave
/// no trace here.
#[derive(Debug)]
pub struct BatchOutcome {
    pub hashes: Vec<String>,
    pub error: Option<Error>,
}

impl Registrar {
    pub fn new(
        config: &RegistrarConfig,
        engine: Arc<dyn HttpEngine>,
        clock: Clock,
        keystore: Arc<dyn KeystoreSink>,
    ) -> Self {
        Self {
            ledger: LedgerClient::new(&config.ledger_host, engine.clone(), clock),
            names: NameLookupClient::new(&config.name_lookup_host, engine.clone()),
            faucet: FaucetClient::new(&config.faucet_host, engine),
            keystore,
            claim_function: config.claim_function.clone(),
            fund_amount: config.default_fund_amount,
        }
    }

    /// Registers every unregistered candidate under a fresh account.
    /// Duplicates are processed at most once; output order follows the
    /// first occurrence of each surviving name.
    pub async fn register_names(&self, candidates: &[String]) -> BatchOutcome {
        let mut hashes = Vec::new();
        let unregistered = match self.filter_unregistered(candidates).await {
            Ok(names) => names,
            Err(error) => {
                return BatchOutcome {
                    hashes,
                    error: Some(error),
                }
            }
        };
        for name in unregistered {
            match self.register_one(&name).await {
                Ok(hash) => {
                    tracing::info!(%name, %hash, "registration submitted");
                    hashes.push(hash);
                }
                Err(error) => {
                    return BatchOutcome {
                        hashes,
                        error: Some(error),
                    }
                }
            }
        }
        BatchOutcome {
            hashes,
            error: None,
        }
    }

    /// Drops duplicates and every name the lookup service resolves.
    async fn filter_unregistered(&self, candidates: &[String]) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        let mut unregistered = Vec::new();
        for name in candidates {
            if !seen.insert(name.clone()) {
                continue;
            }
            match self.names.lookup(name).await? {
                Some(address) => {
                    tracing::info!(
                        %name,
                        address = %address.to_uppercase(),
                        "name already registered, skipping"
                    );
                }
                None => unregistered.push(name.clone()),
            }
        }
        Ok(unregistered)
    }

    /// Mint, persist, fund, claim. Exactly this order: a keystore failure
    /// must not orphan faucet funds.
    async fn register_one(&self, name: &str) -> Result<String> {
        let account = Account::generate(name)?;
        self.keystore.persist(&account)?;
        tracing::info!(
            name,
            address = %account.uppercase_address(),
            "keystore blob written"
        );
        self.faucet.mint(&account.address, self.fund_amount).await?;
        let payload = TransactionPayload::script_function(
            &self.claim_function,
            vec![serde_json::Value::String(hex::encode(name.as_bytes()))],
        );
        self.ledger.execute(&account, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::StubEngine;
    use crate::keystore::FileKeystore;
    use assert_matches::assert_matches;
    use serde_json::json;

    const HASH: &str = "0x73717e8d8ba1e9f3a3f7c0b9d44302b7741db1a5b2c3d4e5f60718293a4b5c6d";

    struct Fixture {
        engine: Arc<StubEngine>,
        registrar: Registrar,
        keystore_dir: tempfile::TempDir,
    }

    fn fixture() -> Fixture {
        let engine = Arc::new(StubEngine::new());
        let keystore_dir = tempfile::tempdir().unwrap();
        let config = RegistrarConfig {
            ledger_host: "http://ledger.test".to_string(),
            faucet_host: "http://faucet.test".to_string(),
            name_lookup_host: "http://names.test".to_string(),
            claim_function: "0x1::service::claim_name".to_string(),
            keystore_dir: keystore_dir.path().to_path_buf(),
            default_fund_amount: 10_000,
        };
        let keystore = Arc::new(FileKeystore::new(&config.keystore_dir));
        let registrar = Registrar::new(
            &config,
            engine.clone(),
            Clock::fixed(1_700_000_000),
            keystore,
        );
        Fixture {
            engine,
            registrar,
            keystore_dir,
        }
    }

    fn route_registration_backends(engine: &StubEngine) {
        engine.route("/mint", "[]");
        engine.route(
            "/accounts/",
            r#"{"sequence_number":"0","authentication_key":"0x00"}"#,
        );
        engine.route("/transactions/signing_message", r#"{"message":"0x0102"}"#);
        engine.route("/transactions", &format!(r#"{{"hash":"{HASH}"}}"#));
    }

    fn keystore_blob_count(fixture: &Fixture) -> usize {
        std::fs::read_dir(fixture.keystore_dir.path()).unwrap().count()
    }

    #[tokio::test]
    async fn registered_names_are_filtered_out() {
        let fixture = fixture();
        fixture
            .engine
            .route("/api/v1/address/alice", r#"{"address":"0xABC"}"#);
        fixture
            .engine
            .route("/api/v1/address/bob", r#"{"address":null}"#);
        route_registration_backends(&fixture.engine);

        let outcome = fixture
            .registrar
            .register_names(&["alice".to_string(), "bob".to_string()])
            .await;
        assert!(outcome.error.is_none());
        assert_eq!(outcome.hashes, vec![HASH.to_string()]);
        assert_eq!(keystore_blob_count(&fixture), 1);
    }

    #[tokio::test]
    async fn empty_input_has_no_side_effects() {
        let fixture = fixture();
        let outcome = fixture.registrar.register_names(&[]).await;
        assert!(outcome.error.is_none());
        assert!(outcome.hashes.is_empty());
        assert!(fixture.engine.calls().is_empty());
        assert_eq!(keystore_blob_count(&fixture), 0);
    }

    #[tokio::test]
    async fn all_registered_input_touches_nothing_but_lookup() {
        let fixture = fixture();
        fixture
            .engine
            .route("/api/v1/address/", r#"{"address":"0xabc"}"#);
        let outcome = fixture
            .registrar
            .register_names(&["alice".to_string(), "bob".to_string()])
            .await;
        assert!(outcome.error.is_none());
        assert!(outcome.hashes.is_empty());
        assert_eq!(keystore_blob_count(&fixture), 0);
        assert!(fixture
            .engine
            .calls()
            .iter()
            .all(|call| call.url.contains("/api/v1/address/")));
    }

    #[tokio::test]
    async fn duplicates_are_processed_at_most_once() {
        let fixture = fixture();
        fixture
            .engine
            .route("/api/v1/address/bob", r#"{"address":null}"#);
        route_registration_backends(&fixture.engine);

        let outcome = fixture
            .registrar
            .register_names(&["bob".to_string(), "bob".to_string()])
            .await;
        assert!(outcome.error.is_none());
        assert_eq!(outcome.hashes.len(), 1);
        let calls = fixture.engine.calls();
        let lookups = calls
            .iter()
            .filter(|call| call.url.contains("/api/v1/address/bob"))
            .count();
        let mints = calls.iter().filter(|call| call.url.contains("/mint")).count();
        assert_eq!(lookups, 1);
        assert_eq!(mints, 1);
    }

    #[tokio::test]
    async fn literal_null_string_proceeds_to_registration() {
        let fixture = fixture();
        fixture
            .engine
            .route("/api/v1/address/bob", r#"{"address":"null"}"#);
        route_registration_backends(&fixture.engine);
        let outcome = fixture.registrar.register_names(&["bob".to_string()]).await;
        assert!(outcome.error.is_none());
        assert_eq!(outcome.hashes.len(), 1);
    }

    #[tokio::test]
    async fn faucet_runs_before_the_signing_message_request() {
        let fixture = fixture();
        fixture
            .engine
            .route("/api/v1/address/bob", r#"{"address":null}"#);
        route_registration_backends(&fixture.engine);
        fixture.registrar.register_names(&["bob".to_string()]).await;

        let mint_index = fixture.engine.first_call_index("/mint").unwrap();
        let signing_index = fixture
            .engine
            .first_call_index("/transactions/signing_message")
            .unwrap();
        assert!(mint_index < signing_index);
    }

    #[tokio::test]
    async fn failure_preserves_earlier_hashes() {
        let fixture = fixture();
        fixture.engine.route("/api/v1/address/", r#"{"address":null}"#);
        // First drip succeeds, every later one fails.
        fixture.engine.route_once("/mint", 200, "[]");
        fixture.engine.route_status("/mint", 500, "");
        fixture.engine.route(
            "/accounts/",
            r#"{"sequence_number":"0","authentication_key":"0x00"}"#,
        );
        fixture
            .engine
            .route("/transactions/signing_message", r#"{"message":"0x0102"}"#);
        fixture
            .engine
            .route("/transactions", &format!(r#"{{"hash":"{HASH}"}}"#));

        let outcome = fixture
            .registrar
            .register_names(&["alice".to_string(), "bob".to_string()])
            .await;
        assert_eq!(outcome.hashes, vec![HASH.to_string()]);
        assert_matches!(outcome.error, Some(Error::Transport(_)));
        // Both keystore blobs were written before the faucet failure hit.
        assert_eq!(keystore_blob_count(&fixture), 2);
    }

    #[tokio::test]
    async fn claim_argument_is_hex_of_utf8_name() {
        let fixture = fixture();
        fixture
            .engine
            .route("/api/v1/address/xxasdasx", r#"{"address":null}"#);
        route_registration_backends(&fixture.engine);
        fixture
            .registrar
            .register_names(&["xxasdasx".to_string()])
            .await;

        let calls = fixture.engine.calls();
        let signing = calls
            .iter()
            .find(|call| call.url.contains("/transactions/signing_message"))
            .unwrap();
        let body: serde_json::Value = serde_json::from_str(&signing.body).unwrap();
        assert_eq!(body["payload"]["function"], json!("0x1::service::claim_name"));
        assert_eq!(body["payload"]["arguments"], json!(["7878617364617378"]));
    }
}
