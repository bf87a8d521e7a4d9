//! Test fixtures and helpers.
//!
//! Wallets that speak the ledger's string-typed API.

use starledger_core::{WalletAddress, WalletKeypair};

/// A test wallet holding an Ed25519 keypair.
#[derive(Debug)]
pub struct Wallet {
    pub keypair: WalletKeypair,
}

impl Wallet {
    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: WalletKeypair::from_seed(&seed),
        }
    }

    /// The hex address the ledger expects.
    pub fn address(&self) -> String {
        self.keypair.address().to_hex()
    }

    pub fn wallet_address(&self) -> WalletAddress {
        self.keypair.address()
    }

    /// Sign a challenge, returning the hex signature.
    pub fn sign(&self, message: &str) -> String {
        self.keypair.sign_message(message).to_hex()
    }
}

/// Create `count` distinct deterministic wallets.
pub fn multi_wallets(count: usize) -> Vec<Wallet> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[..8].copy_from_slice(&(i as u64).to_le_bytes());
            seed[31] = 0x5A;
            Wallet::with_seed(seed)
        })
        .collect()
}
