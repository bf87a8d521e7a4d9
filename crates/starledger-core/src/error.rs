//! Error types for the Star Ledger Core.

use thiserror::Error;

use crate::crypto::BlockHash;

/// Core errors that can occur while handling blocks, payloads and signatures.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("malformed challenge message: {0}")]
    MalformedChallenge(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("decoding error: {0}")]
    Decode(String),
}

/// Why a single block fails its self-check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("stored hash {stored} does not match recomputed hash {computed}")]
    HashMismatch {
        stored: BlockHash,
        computed: BlockHash,
    },

    #[error("previous hash {found:?} does not link to expected {expected:?}")]
    LinkMismatch {
        expected: Option<BlockHash>,
        found: Option<BlockHash>,
    },
}

/// A broken chain invariant at a specific height.
///
/// Returned as data by chain validation; never raised on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("block {height}: {error}")]
pub struct IntegrityViolation {
    pub height: u64,
    pub error: ValidationError,
}

impl IntegrityViolation {
    /// True if the block's own hash no longer matches its fields.
    pub fn is_hash_mismatch(&self) -> bool {
        matches!(self.error, ValidationError::HashMismatch { .. })
    }

    /// True if the block does not link to its predecessor.
    pub fn is_link_mismatch(&self) -> bool {
        matches!(self.error, ValidationError::LinkMismatch { .. })
    }
}
