//! # Star Ledger Core
//!
//! Pure primitives for the Star Ledger: blocks, hashing, payload encoding,
//! and wallet signatures.
//!
//! This crate contains no locks, no storage, no networking. It is pure
//! computation over hash-linked data structures.
//!
//! ## Key Types
//!
//! - [`Block`] - One immutable ledger entry, hash-linked to its predecessor
//! - [`BlockHash`] - Blake3 digest of a block's canonical fields
//! - [`WalletAddress`] - Hex-encoded Ed25519 public key that owns entries
//! - [`EncodedPayload`] - Opaque transport form of a block's structured data
//! - [`ChallengeMessage`] - The `{address}:{timestamp}:{tag}` ownership proof
//!
//! ## Canonicalization
//!
//! Block hashes are computed over deterministic CBOR. See [`canonical`].

pub mod block;
pub mod canonical;
pub mod challenge;
pub mod clock;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod record;
pub mod types;
pub mod validation;

pub use block::{Block, BlockBuilder, BlockContent, BlockView, GENESIS_HEIGHT};
pub use canonical::canonical_content_bytes;
pub use challenge::ChallengeMessage;
pub use clock::{Clock, SystemClock};
pub use codec::EncodedPayload;
pub use crypto::{verify_message, BlockHash, WalletKeypair, WalletSignature, SIGN_DOMAIN};
pub use error::{CoreError, IntegrityViolation, ValidationError};
pub use record::{ClaimRecord, GenesisRecord};
pub use types::WalletAddress;
pub use validation::{validate_block, validate_chain};
