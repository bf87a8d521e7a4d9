//! Ownership challenge messages.
//!
//! A challenge is the text `{address}:{issued_at}:{tag}`. The wallet signs it
//! off-ledger; the ledger parses it back to find when it was issued.

use std::fmt;

use crate::error::CoreError;
use crate::types::WalletAddress;

/// A parsed ownership challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeMessage {
    /// The address the challenge was issued to.
    pub address: WalletAddress,
    /// Issuance time (Unix seconds).
    pub issued_at: u64,
    /// The fixed registry tag.
    pub tag: String,
}

impl ChallengeMessage {
    pub fn new(address: WalletAddress, issued_at: u64, tag: impl Into<String>) -> Self {
        Self {
            address,
            issued_at,
            tag: tag.into(),
        }
    }

    /// Parse a challenge from its textual form.
    ///
    /// The tag is everything after the second `:`, so tags may contain colons.
    pub fn parse(message: &str) -> Result<Self, CoreError> {
        let mut parts = message.splitn(3, ':');
        let (Some(address), Some(issued_at), Some(tag)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(CoreError::MalformedChallenge(
                "expected {address}:{timestamp}:{tag}".into(),
            ));
        };

        let address = WalletAddress::parse(address)
            .map_err(|e| CoreError::MalformedChallenge(e.to_string()))?;
        let issued_at = issued_at
            .parse::<u64>()
            .map_err(|e| CoreError::MalformedChallenge(format!("bad timestamp: {e}")))?;
        if tag.is_empty() {
            return Err(CoreError::MalformedChallenge("empty tag".into()));
        }

        Ok(Self::new(address, issued_at, tag))
    }

    /// Seconds elapsed since issuance. Zero if `now` predates issuance.
    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.issued_at)
    }

    /// True once more than `window_secs` have passed since issuance.
    pub fn is_expired(&self, now: u64, window_secs: u64) -> bool {
        self.elapsed(now) > window_secs
    }
}

impl fmt::Display for ChallengeMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.address, self.issued_at, self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::WalletKeypair;

    fn address() -> WalletAddress {
        WalletKeypair::from_seed(&[0x42; 32]).address()
    }

    #[test]
    fn test_format_and_parse() {
        let challenge = ChallengeMessage::new(address(), 1_532_296_090, "starRegistry");
        let text = challenge.to_string();
        assert_eq!(text, format!("{}:1532296090:starRegistry", address()));
        assert_eq!(ChallengeMessage::parse(&text).unwrap(), challenge);
    }

    #[test]
    fn test_tag_may_contain_colons() {
        let text = format!("{}:10:registry:v2", address());
        let parsed = ChallengeMessage::parse(&text).unwrap();
        assert_eq!(parsed.tag, "registry:v2");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let addr = address();
        for bad in [
            String::new(),
            "just-text".to_string(),
            format!("{addr}:123"),
            format!("{addr}:abc:starRegistry"),
            format!("{addr}:-5:starRegistry"),
            format!("{addr}:123:"),
            "deadbeef:123:starRegistry".to_string(),
        ] {
            assert!(
                matches!(ChallengeMessage::parse(&bad), Err(CoreError::MalformedChallenge(_))),
                "should reject {bad:?}"
            );
        }
    }

    #[test]
    fn test_window_boundaries() {
        let challenge = ChallengeMessage::new(address(), 1_000, "starRegistry");
        assert!(!challenge.is_expired(1_000, 300));
        assert!(!challenge.is_expired(1_300, 300));
        assert!(challenge.is_expired(1_301, 300));
        // Clock skew towards the past never counts as expiry.
        assert_eq!(challenge.elapsed(900), 0);
    }
}
