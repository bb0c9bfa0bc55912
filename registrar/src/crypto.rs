//! Ed25519 key material and the ledger's address derivation rule.

use crate::error::{Error, Result};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::RngCore;
use sha3::{Digest, Sha3_256};

pub const KEY_LEN: usize = 32;
pub const ADDRESS_LEN: usize = 32;
pub const SIGNATURE_LEN: usize = 64;

/// Authentication-key scheme byte appended to the public key before
/// hashing. 0x00 marks a single Ed25519 key; multi-key schemes use other
/// values, which this tool does not support.
const SINGLE_KEY_SCHEME: u8 = 0x00;

/// 32 random bytes from the system RNG.
pub fn random_private_key() -> Result<[u8; KEY_LEN]> {
    let mut bytes = [0u8; KEY_LEN];
    rand::rngs::OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|err| Error::Crypto(format!("system rng unavailable: {err}")))?;
    Ok(bytes)
}

/// RFC 8032 public key derivation.
pub fn derive_public_key(private_key: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
    SigningKey::from_bytes(private_key).verifying_key().to_bytes()
}

/// SHA3-256 over `public_key || scheme_byte`.
pub fn derive_address(public_key: &[u8; KEY_LEN]) -> [u8; ADDRESS_LEN] {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key);
    hasher.update([SINGLE_KEY_SCHEME]);
    let digest = hasher.finalize();
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&digest);
    address
}

/// Detached Ed25519 signature over raw bytes.
pub fn sign(private_key: &[u8; KEY_LEN], message: &[u8]) -> [u8; SIGNATURE_LEN] {
    SigningKey::from_bytes(private_key).sign(message).to_bytes()
}

pub fn verify(
    public_key: &[u8; KEY_LEN],
    signature: &[u8; SIGNATURE_LEN],
    message: &[u8],
) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    key.verify(message, &Signature::from_bytes(signature)).is_ok()
}

/// Decodes hex into a fixed-size array, tolerating a `0x` prefix and
/// rejecting anything that is not exactly `N` bytes. Leading zero bytes
/// survive the round trip since the input length is fixed.
pub fn decode_fixed<const N: usize>(hex_str: &str) -> Result<[u8; N]> {
    let digits = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    let bytes =
        hex::decode(digits).map_err(|err| Error::Protocol(format!("bad hex {hex_str:?}: {err}")))?;
    bytes
        .try_into()
        .map_err(|_| Error::Protocol(format!("expected {N} bytes of hex, got {hex_str:?}")))
}
