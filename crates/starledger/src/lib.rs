//! # Star Ledger
//!
//! An in-memory, append-only ledger of hash-linked blocks. Every entry after
//! genesis is claimed by a wallet that proved ownership of its address by
//! signing a short-lived challenge.
//!
//! ## Overview
//!
//! - **Blocks**: Immutable, hash-linked entries; the chain starts at a genesis block
//! - **Challenges**: `{address}:{timestamp}:{tag}` messages a wallet signs to append
//! - **Queries**: Lookup by hash, by height, and by owning address
//! - **Validation**: Recompute every hash and link and report what broke
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use starledger::core::WalletKeypair;
//! use starledger::{Ledger, LedgerConfig};
//!
//! let ledger = Ledger::new(LedgerConfig::default()).unwrap();
//! let wallet = WalletKeypair::generate();
//! let address = wallet.address().to_hex();
//!
//! let challenge = ledger.request_ownership_challenge(&address).unwrap();
//! let signature = wallet.sign_message(&challenge).to_hex();
//!
//! let block = ledger
//!     .submit_entry(&address, &challenge, &signature, json!({"ra": "16h 29m 1.0s"}))
//!     .unwrap();
//! assert_eq!(block.height, 1);
//! assert!(ledger.validate_ledger().is_empty());
//! ```
//!
//! ## Re-exports
//!
//! - `starledger::core` - Core primitives (Block, BlockHash, WalletAddress, etc.)

pub mod challenge;
pub mod config;
pub mod error;
pub mod ledger;

pub use starledger_core as core;

pub use challenge::{ChallengeStore, IssuedChallenge};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use ledger::Ledger;

pub use starledger_core::{
    Block, BlockHash, BlockView, ChallengeMessage, Clock, IntegrityViolation, SystemClock,
    ValidationError, WalletAddress,
};
