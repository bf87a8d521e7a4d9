//! Block: one immutable, hash-linked ledger entry.
//!
//! Blocks are built in a fixed order: a [`BlockBuilder`] collects height,
//! link, timestamp, payload and owner; [`BlockBuilder::seal`] computes the
//! hash over that content and yields a finished [`Block`]. Nothing changes
//! after sealing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::canonical::canonical_content_bytes;
use crate::codec::{self, EncodedPayload};
use crate::crypto::BlockHash;
use crate::error::CoreError;
use crate::types::WalletAddress;

/// Height of the genesis block.
pub const GENESIS_HEIGHT: u64 = 0;

/// Every hashed field of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockContent {
    /// Position in the chain (0 for genesis).
    pub height: u64,

    /// Append time (Unix seconds).
    pub timestamp: u64,

    /// Encoded payload.
    pub payload: EncodedPayload,

    /// Hash of the preceding block (None only for genesis).
    pub previous_hash: Option<BlockHash>,

    /// Submitting wallet (None only for genesis).
    pub owner: Option<WalletAddress>,
}

impl BlockContent {
    /// Compute the Blake3 hash of the canonical content bytes.
    pub fn compute_hash(&self) -> BlockHash {
        BlockHash::hash(&canonical_content_bytes(self))
    }
}

/// A sealed block: content plus the hash computed over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub content: BlockContent,
    pub hash: BlockHash,
}

impl Block {
    pub fn height(&self) -> u64 {
        self.content.height
    }

    pub fn timestamp(&self) -> u64 {
        self.content.timestamp
    }

    pub fn payload(&self) -> &EncodedPayload {
        &self.content.payload
    }

    pub fn previous_hash(&self) -> Option<&BlockHash> {
        self.content.previous_hash.as_ref()
    }

    pub fn owner(&self) -> Option<&WalletAddress> {
        self.content.owner.as_ref()
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.content.height == GENESIS_HEIGHT && self.content.previous_hash.is_none()
    }

    /// Recompute the hash from the stored content.
    pub fn compute_hash(&self) -> BlockHash {
        self.content.compute_hash()
    }

    /// Decode the payload into a caller-facing view.
    pub fn view(&self) -> Result<BlockView, CoreError> {
        Ok(BlockView {
            height: self.content.height,
            time: self.content.timestamp,
            hash: self.hash.to_hex(),
            previous_block_hash: self.content.previous_hash.map(|h| h.to_hex()),
            body: codec::decode_value(&self.content.payload)?,
            owner: self.content.owner.map(|a| a.to_hex()),
        })
    }
}

/// Builder for blocks.
#[derive(Debug, Clone)]
pub struct BlockBuilder {
    height: u64,
    timestamp: u64,
    payload: EncodedPayload,
    previous_hash: Option<BlockHash>,
    owner: Option<WalletAddress>,
}

impl BlockBuilder {
    /// Start the genesis block: height 0, no previous hash, no owner.
    pub fn genesis(payload: EncodedPayload) -> Self {
        Self {
            height: GENESIS_HEIGHT,
            timestamp: 0,
            payload,
            previous_hash: None,
            owner: None,
        }
    }

    /// Start a block linked to `tail`.
    ///
    /// The timestamp starts at the tail's, so a later [`timestamp`](Self::timestamp)
    /// call can only move it forward.
    pub fn on_top_of(tail: &Block) -> Self {
        Self {
            height: tail.height() + 1,
            timestamp: tail.timestamp(),
            payload: EncodedPayload::from_raw(String::new()),
            previous_hash: Some(tail.hash),
            owner: None,
        }
    }

    /// Set the timestamp. Never moves it before the tail's.
    pub fn timestamp(mut self, ts: u64) -> Self {
        self.timestamp = self.timestamp.max(ts);
        self
    }

    /// Set the payload.
    pub fn payload(mut self, payload: EncodedPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Set the owner.
    pub fn owner(mut self, owner: WalletAddress) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Compute the hash and produce the finished block.
    pub fn seal(self) -> Block {
        let content = BlockContent {
            height: self.height,
            timestamp: self.timestamp,
            payload: self.payload,
            previous_hash: self.previous_hash,
            owner: self.owner,
        };
        let hash = content.compute_hash();
        Block { content, hash }
    }
}

/// The wire representation of a block, with its payload decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockView {
    pub height: u64,
    pub time: u64,
    pub hash: String,
    pub previous_block_hash: Option<String>,
    pub body: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::WalletKeypair;
    use crate::record::{ClaimRecord, GenesisRecord};
    use serde_json::json;

    fn genesis() -> Block {
        let payload = codec::encode(&GenesisRecord::new("Genesis Block")).unwrap();
        BlockBuilder::genesis(payload).timestamp(1_700_000_000).seal()
    }

    #[test]
    fn test_genesis_builder() {
        let block = genesis();
        assert_eq!(block.height(), 0);
        assert!(block.is_genesis());
        assert!(block.previous_hash().is_none());
        assert!(block.owner().is_none());
        assert_eq!(block.hash, block.compute_hash());
    }

    #[test]
    fn test_on_top_of_links_to_tail() {
        let tail = genesis();
        let owner = WalletKeypair::from_seed(&[0x42; 32]).address();
        let payload = codec::encode(&ClaimRecord::new(owner, json!({"ra": "1h"}))).unwrap();

        let block = BlockBuilder::on_top_of(&tail)
            .timestamp(1_700_000_010)
            .payload(payload)
            .owner(owner)
            .seal();

        assert_eq!(block.height(), 1);
        assert_eq!(block.previous_hash(), Some(&tail.hash));
        assert_eq!(block.owner(), Some(&owner));
        assert!(!block.is_genesis());
        assert_eq!(block.hash, block.compute_hash());
    }

    #[test]
    fn test_timestamp_never_predates_tail() {
        let tail = genesis();
        let block = BlockBuilder::on_top_of(&tail).timestamp(5).seal();
        assert_eq!(block.timestamp(), tail.timestamp());
    }

    #[test]
    fn test_hash_excludes_hash_field() {
        let mut block = genesis();
        let recomputed = block.compute_hash();
        block.hash = BlockHash::ZERO;
        assert_eq!(block.compute_hash(), recomputed);
    }

    #[test]
    fn test_view_decodes_payload() {
        let view = genesis().view().unwrap();
        assert_eq!(view.height, 0);
        assert_eq!(view.body, json!({"data": "Genesis Block"}));
        assert!(view.previous_block_hash.is_none());
        assert!(view.owner.is_none());
    }

    #[test]
    fn test_view_wire_shape() {
        let view = genesis().view().unwrap();
        let wire = serde_json::to_value(&view).unwrap();

        assert_eq!(wire["previousBlockHash"], Value::Null);
        assert_eq!(wire["time"], json!(1_700_000_000u64));
        assert!(wire.get("owner").is_none());
        assert_eq!(wire["hash"].as_str().unwrap().len(), 64);
    }

    #[test]
    fn test_view_reports_decode_error() {
        let mut block = genesis();
        block.content.payload = EncodedPayload::from_raw("not hex");
        assert!(matches!(block.view(), Err(CoreError::Decode(_))));
    }
}
