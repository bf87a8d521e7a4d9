//! Error types for the Ledger.

use starledger_core::{CoreError, IntegrityViolation};
use thiserror::Error;

/// Errors that can occur during Ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The challenge is older than the ownership window.
    #[error("challenge issued at {issued_at} expired (now {now}, window {window_secs}s)")]
    ExpiredChallenge {
        issued_at: u64,
        now: u64,
        window_secs: u64,
    },

    /// The signature does not verify for the message and address.
    #[error("invalid signature")]
    InvalidSignature,

    /// The message is not the challenge outstanding for this address.
    #[error("no outstanding challenge matches this message")]
    UnknownChallenge,

    /// The message is not a well-formed challenge for this ledger.
    #[error("malformed challenge: {0}")]
    MalformedChallenge(String),

    /// The wallet address could not be parsed.
    #[error("invalid wallet address: {0}")]
    InvalidAddress(String),

    /// A stored payload could not be decoded.
    #[error("payload decode error: {0}")]
    Decode(#[source] CoreError),

    /// A submitted payload could not be encoded.
    #[error("payload encode error: {0}")]
    Encode(#[source] CoreError),

    /// No block matches the query.
    #[error("not found: {0}")]
    NotFound(String),

    /// The claim record exceeds the configured size.
    #[error("payload of {size} bytes exceeds limit of {max} bytes")]
    PayloadTooLarge { size: usize, max: usize },

    /// The tail block failed its self-check; nothing can be appended.
    #[error("integrity violation: {0}")]
    Integrity(IntegrityViolation),

    /// The ledger holds no genesis block.
    #[error("ledger has no genesis block")]
    MissingGenesis,
}

impl From<CoreError> for LedgerError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidSignature | CoreError::InvalidSignatureEncoding(_) => {
                LedgerError::InvalidSignature
            }
            CoreError::InvalidAddress(msg) => LedgerError::InvalidAddress(msg),
            CoreError::MalformedChallenge(msg) => LedgerError::MalformedChallenge(msg),
            e @ CoreError::Encoding(_) => LedgerError::Encode(e),
            e @ CoreError::Decode(_) => LedgerError::Decode(e),
        }
    }
}

/// Result type for Ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
