//! Ledger REST client: account state, the server-authoritative signing
//! message, and transaction submission.
//!
//! The prepare → sign → submit flow lives in [`LedgerClient::execute`].
//! The signing message is never computed locally; the ledger canonicalizes
//! the request and hands back the exact bytes to sign.

use crate::account::Account;
use crate::constants::{EXPIRATION_WINDOW_SECS, GAS_UNIT_PRICE, MAX_GAS_AMOUNT};
use crate::crypto;
use crate::error::{Error, Result};
use crate::http::HttpEngine;
use crate::types::{
    AccountState, Clock, SigningMessage, SigningRequest, SubmitRequest, TransactionPayload,
    TransactionSignature, ED25519_SIGNATURE,
};
use std::sync::Arc;

pub struct LedgerClient {
    host: String,
    engine: Arc<dyn HttpEngine>,
    clock: Clock,
}

impl LedgerClient {
    pub fn new(host: &str, engine: Arc<dyn HttpEngine>, clock: Clock) -> Self {
        Self {
            host: host.trim_end_matches('/').to_string(),
            engine,
            clock,
        }
    }

    /// Fetches the current sequence number and authentication key.
    ///
    /// The status line is ignored on purpose: the ledger reports a missing
    /// account as an error body without a `sequence_number` field.
    pub async fn get_account(&self, address: &str) -> Result<AccountState> {
        let url = format!("{}/accounts/{}", self.host, address);
        let response = self.engine.get(&url).await?;
        let value: serde_json::Value = serde_json::from_str(&response.body)?;
        if value.get("sequence_number").is_none() {
            return Err(Error::AccountNotFound(address.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Asks the ledger to canonicalize `request` and return the bytes the
    /// sender must sign, as 0x-prefixed hex.
    pub async fn create_signing_message(&self, request: &SigningRequest) -> Result<SigningMessage> {
        let url = format!("{}/transactions/signing_message", self.host);
        let body = serde_json::to_string(request)?;
        let response = self.engine.post_json(&url, body).await?;
        if !response.is_success() {
            return Err(Error::Transport(format!(
                "signing_message returned HTTP {}: {}",
                response.status, response.body
            )));
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Submits the signed transaction. A returned hash means the ledger
    /// accepted the submission; it does not imply on-chain finality.
    pub async fn submit_transaction(
        &self,
        request: &SigningRequest,
        signature: &TransactionSignature,
    ) -> Result<String> {
        let url = format!("{}/transactions", self.host);
        let submit = SubmitRequest {
            request: request.clone(),
            signature: signature.clone(),
        };
        let response = self.engine.post_json(&url, serde_json::to_string(&submit)?).await?;
        if !response.is_success() {
            return Err(Error::Transport(format!(
                "submit returned HTTP {}: {}",
                response.status, response.body
            )));
        }
        let value: serde_json::Value = serde_json::from_str(&response.body)?;
        match value.get("hash").and_then(|hash| hash.as_str()) {
            Some(hash) => Ok(hash.to_string()),
            None => Err(Error::Protocol("submit response carries no hash".to_string())),
        }
    }

    /// Full registration flow for one transaction: fetch the sequence
    /// number, frame the request with fixed gas bounds and a now + 600 s
    /// expiration, obtain the signing message, sign, submit.
    pub async fn execute(&self, account: &Account, payload: TransactionPayload) -> Result<String> {
        let state = self.get_account(&account.wire_address()).await?;
        let request = SigningRequest {
            sender: account.wire_address(),
            sequence_number: state.sequence_number,
            max_gas_amount: MAX_GAS_AMOUNT,
            gas_unit_price: GAS_UNIT_PRICE,
            expiration_timestamp_secs: self.clock.now_secs() + EXPIRATION_WINDOW_SECS,
            payload,
            secondary_signers: Vec::new(),
        };
        let signing_message = self.create_signing_message(&request).await?;
        let message_bytes = signing_message_bytes(&signing_message)?;
        let private_key = account.private_key_bytes()?;
        let signature = crypto::sign(&private_key, &message_bytes);
        let signature = TransactionSignature {
            kind: ED25519_SIGNATURE.to_string(),
            public_key: format!("0x{}", account.public_key),
            signature: format!("0x{}", hex::encode(signature)),
        };
        self.submit_transaction(&request, &signature).await
    }
}

/// Decodes the server's signing message. Anything other than 0x-prefixed
/// even-length hex breaks the contract.
fn signing_message_bytes(signing_message: &SigningMessage) -> Result<Vec<u8>> {
    let Some(digits) = signing_message.message.strip_prefix("0x") else {
        return Err(Error::Protocol(format!(
            "signing message is not 0x-prefixed: {:?}",
            signing_message.message
        )));
    };
    if digits.len() % 2 != 0 {
        return Err(Error::Protocol(format!(
            "signing message hex has odd length: {:?}",
            signing_message.message
        )));
    }
    hex::decode(digits)
        .map_err(|err| Error::Protocol(format!("signing message is not hex: {err}")))
}
