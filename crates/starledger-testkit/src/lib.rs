//! # Star Ledger Testkit
//!
//! Testing utilities for the Star Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: Deterministic wallets that request and sign challenges
//! - **Clock**: A manually driven clock for exercising the ownership window
//! - **Generators**: Proptest strategies for star payloads and chains
//!
//! ## Test Fixtures
//!
//! ```rust
//! use starledger_testkit::Wallet;
//!
//! let wallet = Wallet::with_seed([0x01; 32]);
//! let signature = wallet.sign("some challenge");
//! assert_eq!(signature.len(), 128);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use starledger_testkit::generators::chain;
//!
//! proptest! {
//!     #[test]
//!     fn chains_validate(blocks in chain(8)) {
//!         prop_assert!(starledger_core::validate_chain(&blocks).is_empty());
//!     }
//! }
//! ```

pub mod clock;
pub mod fixtures;
pub mod generators;

pub use clock::ManualClock;
pub use fixtures::{multi_wallets, Wallet};
