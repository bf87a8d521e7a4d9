//! Outstanding ownership challenges, one per wallet address.
//!
//! A challenge is single-use: it is removed the moment a submission presents
//! it for signature verification, whether or not the signature checks out.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use starledger_core::WalletAddress;

/// A challenge handed out to a wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedChallenge {
    /// The exact text the wallet must sign.
    pub message: String,
    /// Issuance time (Unix seconds).
    pub issued_at: u64,
}

/// Address → most recently issued challenge.
#[derive(Debug, Default)]
pub struct ChallengeStore {
    inner: Mutex<HashMap<WalletAddress, IssuedChallenge>>,
}

impl ChallengeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a challenge, replacing any earlier one for the same address.
    pub fn issue(&self, address: WalletAddress, challenge: IssuedChallenge) {
        self.lock().insert(address, challenge);
    }

    /// Remove and return the outstanding challenge if its text is `message`.
    ///
    /// A non-matching message leaves the outstanding challenge in place.
    pub fn take_matching(&self, address: &WalletAddress, message: &str) -> Option<IssuedChallenge> {
        let mut challenges = self.lock();
        match challenges.get(address) {
            Some(issued) if issued.message == message => challenges.remove(address),
            _ => None,
        }
    }

    /// The outstanding challenge for an address, if any.
    pub fn get(&self, address: &WalletAddress) -> Option<IssuedChallenge> {
        self.lock().get(address).cloned()
    }

    /// Number of outstanding challenges.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<WalletAddress, IssuedChallenge>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starledger_core::WalletKeypair;

    fn issued(message: &str, issued_at: u64) -> IssuedChallenge {
        IssuedChallenge {
            message: message.to_string(),
            issued_at,
        }
    }

    #[test]
    fn test_issue_replaces_previous() {
        let store = ChallengeStore::new();
        let address = WalletKeypair::from_seed(&[0x01; 32]).address();

        store.issue(address, issued("first", 10));
        store.issue(address, issued("second", 20));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&address), Some(issued("second", 20)));
    }

    #[test]
    fn test_take_matching_is_single_use() {
        let store = ChallengeStore::new();
        let address = WalletKeypair::from_seed(&[0x01; 32]).address();
        store.issue(address, issued("msg", 10));

        assert_eq!(store.take_matching(&address, "msg"), Some(issued("msg", 10)));
        assert_eq!(store.take_matching(&address, "msg"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_take_mismatch_keeps_challenge() {
        let store = ChallengeStore::new();
        let address = WalletKeypair::from_seed(&[0x01; 32]).address();
        let other = WalletKeypair::from_seed(&[0x02; 32]).address();
        store.issue(address, issued("msg", 10));

        assert_eq!(store.take_matching(&address, "other"), None);
        assert_eq!(store.take_matching(&other, "msg"), None);
        assert_eq!(store.get(&address), Some(issued("msg", 10)));
    }
}
