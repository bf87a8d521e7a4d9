//! Strong type definitions for the Star Ledger.
//!
//! Identifiers are newtypes to prevent misuse at compile time.

use ed25519_dalek::VerifyingKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A wallet address: the 32-byte Ed25519 public key that owns ledger entries.
///
/// The textual form is 64 lowercase hex characters. Parsing accepts either
/// case but rejects anything that is not a valid curve point, and any
/// small-order (weak) point, which has no usable private key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(pub(crate) [u8; 32]);

impl WalletAddress {
    /// Parse and validate a textual address.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidAddress(e.to_string()))?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidAddress("expected 32 bytes".into()))?;
        Self::from_bytes(arr)
    }

    /// Create from raw public key bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CoreError> {
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|_| CoreError::InvalidAddress("not an ed25519 public key".into()))?;
        if key.is_weak() {
            return Err(CoreError::InvalidAddress("small-order public key".into()));
        }
        Ok(Self(bytes))
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletAddress({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for WalletAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<WalletAddress> for String {
    fn from(address: WalletAddress) -> Self {
        address.to_hex()
    }
}

impl AsRef<[u8]> for WalletAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
