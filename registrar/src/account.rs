//! Locally stored account information: the key triple plus the name the
//! account was minted for. Hex-encoded at construction, immutable after.

use crate::crypto::{self, KEY_LEN};
use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub private_key: String,
    pub public_key: String,
    pub address: String,
    pub name: String,
}

impl Account {
    pub fn from_bytes(
        private_key: [u8; KEY_LEN],
        public_key: [u8; KEY_LEN],
        address: [u8; KEY_LEN],
        name: &str,
    ) -> Self {
        Self {
            private_key: hex::encode(private_key),
            public_key: hex::encode(public_key),
            address: hex::encode(address),
            name: name.to_string(),
        }
    }

    /// Mints a fresh single-key account for `name` from the system RNG.
    pub fn generate(name: &str) -> Result<Self> {
        let private_key = crypto::random_private_key()?;
        let public_key = crypto::derive_public_key(&private_key);
        let address = crypto::derive_address(&public_key);
        Ok(Self::from_bytes(private_key, public_key, address, name))
    }

    pub fn private_key_bytes(&self) -> Result<[u8; KEY_LEN]> {
        crypto::decode_fixed(&self.private_key)
    }

    pub fn public_key_bytes(&self) -> Result<[u8; KEY_LEN]> {
        crypto::decode_fixed(&self.public_key)
    }

    /// Address as transmitted on the wire.
    pub fn wire_address(&self) -> String {
        format!("0x{}", self.address)
    }

    /// Address as used in keystore blob names.
    pub fn uppercase_address(&self) -> String {
        self.address.to_uppercase()
    }
}
