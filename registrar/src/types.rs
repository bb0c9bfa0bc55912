//! Wire types for the ledger REST interface.
//!
//! Every 64-bit number crosses the wire as a decimal string; JSON numbers
//! cannot be trusted to carry the full u64 range through intermediate
//! parsers. `dec_format` keeps the in-memory representation a plain `u64`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub mod dec_format {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

pub const SCRIPT_FUNCTION_PAYLOAD: &str = "script_function_payload";
pub const ED25519_SIGNATURE: &str = "ed25519_signature";

/// Executable portion of a transaction: a fully qualified on-chain function
/// plus opaque arguments.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<serde_json::Value>,
}

impl TransactionPayload {
    pub fn script_function(function: &str, arguments: Vec<serde_json::Value>) -> Self {
        Self {
            kind: SCRIPT_FUNCTION_PAYLOAD.to_string(),
            function: function.to_string(),
            type_arguments: Vec::new(),
            arguments,
        }
    }
}

/// The unsigned transaction sent to the signing-message endpoint, and
/// (augmented with a signature) to the submit endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SigningRequest {
    pub sender: String,
    #[serde(with = "dec_format")]
    pub sequence_number: u64,
    #[serde(with = "dec_format")]
    pub max_gas_amount: u64,
    #[serde(with = "dec_format")]
    pub gas_unit_price: u64,
    #[serde(with = "dec_format")]
    pub expiration_timestamp_secs: u64,
    pub payload: TransactionPayload,
    pub secondary_signers: Vec<String>,
}

/// Server-canonicalized bytes to sign, as 0x-prefixed hex.
#[derive(Clone, Debug, Deserialize)]
pub struct SigningMessage {
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionSignature {
    #[serde(rename = "type")]
    pub kind: String,
    pub public_key: String,
    pub signature: String,
}

/// The submit body: the signing request plus the sender's signature.
#[derive(Clone, Debug, Serialize)]
pub struct SubmitRequest {
    #[serde(flatten)]
    pub request: SigningRequest,
    pub signature: TransactionSignature,
}

/// Account state as reported by `GET /accounts/{address}`. For a fresh
/// single-key account the authentication key equals the address.
#[derive(Clone, Debug, Deserialize)]
pub struct AccountState {
    #[serde(with = "dec_format")]
    pub sequence_number: u64,
    pub authentication_key: String,
}

/// Wall-clock seconds source, swappable so tests can freeze time.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> u64 + Send + Sync>);

impl Clock {
    pub fn system() -> Self {
        Self(Arc::new(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_secs())
                .unwrap_or(0)
        }))
    }

    pub fn fixed(now_secs: u64) -> Self {
        Self(Arc::new(move || now_secs))
    }

    pub fn now_secs(&self) -> u64 {
        (self.0)()
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "Clock({})", self.now_secs())
    }
}
