//! Devnet faucet client. The faucet mints test coins on demand and returns
//! its own pending transaction hashes; nobody waits for inclusion.

use crate::error::{Error, Result};
use crate::http::HttpEngine;
use std::sync::Arc;

pub struct FaucetClient {
    host: String,
    engine: Arc<dyn HttpEngine>,
}

impl FaucetClient {
    pub fn new(host: &str, engine: Arc<dyn HttpEngine>) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            engine,
        }
    }

    /// Requests `amount` units for `address`. Returns the faucet's pending
    /// transaction hashes. The subsequent registration may race the funding
    /// transaction; the ledger orders the two, and the devnet accepts the
    /// narrow window where it has not yet.
    pub async fn mint(&self, address: &str, amount: u64) -> Result<Vec<String>> {
        let url = format!("{}/mint?address={}&amount={}", self.host, address, amount);
        let response = self.engine.post_empty(&url).await?;
        if !response.is_success() {
            return Err(Error::Transport(format!(
                "faucet returned HTTP {}",
                response.status
            )));
        }
        Ok(serde_json::from_str(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::StubEngine;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn mint_hits_query_parameterized_endpoint() {
        let engine = Arc::new(StubEngine::new());
        engine.route("/mint", r#"["0xf1","0xf2"]"#);
        let client = FaucetClient::new("http://faucet.test/", engine.clone());
        let hashes = client.mint("ab12", 10000).await.unwrap();
        assert_eq!(hashes, vec!["0xf1".to_string(), "0xf2".to_string()]);
        let call = &engine.calls()[0];
        assert_eq!(call.method, "POST");
        assert_eq!(call.url, "http://faucet.test/mint?address=ab12&amount=10000");
        assert_eq!(call.body, "");
    }

    #[tokio::test]
    async fn non_success_status_is_transport() {
        let engine = Arc::new(StubEngine::new());
        engine.route_status("/mint", 500, "");
        let client = FaucetClient::new("http://faucet.test", engine);
        assert_matches!(client.mint("ab", 1).await, Err(Error::Transport(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_decode() {
        let engine = Arc::new(StubEngine::new());
        engine.route("/mint", "not json");
        let client = FaucetClient::new("http://faucet.test", engine);
        assert_matches!(client.mint("ab", 1).await, Err(Error::Decode(_)));
    }
}
