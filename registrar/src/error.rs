use thiserror::Error;

/// Every way a registration can fail. `AlreadyRegistered` is deliberately
/// absent: the pre-check filters such names instead of raising.
#[derive(Debug, Error)]
pub enum Error {
    /// Network failure, timeout, or a non-2xx status where the body is not
    /// inspected further.
    #[error("transport: {0}")]
    Transport(String),

    /// The response body is not the JSON we expect.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// Well-formed response that violates the wire contract (unprefixed or
    /// odd-length signing message, submit response without a hash, ...).
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// The ledger answered with an error body carrying no sequence number.
    #[error("account not found on ledger: {0}")]
    AccountNotFound(String),

    /// Key derivation, signing, or RNG failure.
    #[error("crypto failure: {0}")]
    Crypto(String),

    /// The keystore blob could not be written.
    #[error("keystore persist failed: {0}")]
    KeystorePersist(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
