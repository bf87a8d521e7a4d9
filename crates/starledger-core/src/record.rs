//! The structured records carried in block payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::WalletAddress;

/// The fixed marker record stored in the genesis block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisRecord {
    pub data: String,
}

impl GenesisRecord {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            data: marker.into(),
        }
    }
}

/// A claim appended by a wallet: the claiming address plus the caller's data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub owner: WalletAddress,
    pub star: Value,
}

impl ClaimRecord {
    pub fn new(owner: WalletAddress, star: Value) -> Self {
        Self { owner, star }
    }
}
