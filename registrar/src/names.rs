//! Name-service lookup: maps a human-readable name to the address that
//! already owns it, if any.

use crate::error::Result;
use crate::http::HttpEngine;
use std::sync::Arc;

pub struct NameLookupClient {
    host: String,
    engine: Arc<dyn HttpEngine>,
}

impl NameLookupClient {
    pub fn new(host: &str, engine: Arc<dyn HttpEngine>) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            engine,
        }
    }

    /// Returns the registered address for `name`, or `None` if the name is
    /// unclaimed. The service reports "unclaimed" in three ways that all
    /// normalize to `None`: a JSON null, the literal string "null" in any
    /// case, and a body without the `address` field.
    pub async fn lookup(&self, name: &str) -> Result<Option<String>> {
        let url = format!("{}/api/v1/address/{}", self.host, name);
        let response = self.engine.get(&url).await?;
        let value: serde_json::Value = serde_json::from_str(&response.body)?;
        let address = match value.get("address") {
            None | Some(serde_json::Value::Null) => return Ok(None),
            Some(serde_json::Value::String(address)) => address.clone(),
            Some(other) => other.to_string(),
        };
        if address.eq_ignore_ascii_case("null") {
            return Ok(None);
        }
        Ok(Some(address))
    }
}
