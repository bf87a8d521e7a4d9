//! Ledger configuration.

use std::time::Duration;

/// Default ownership window: a challenge is honored for 5 minutes.
pub const DEFAULT_CHALLENGE_WINDOW: Duration = Duration::from_secs(300);

/// Default tag appended to every ownership challenge.
pub const DEFAULT_CHALLENGE_TAG: &str = "starRegistry";

/// Default marker stored in the genesis payload.
pub const DEFAULT_GENESIS_MARKER: &str = "Genesis Block";

/// Default ceiling on the JSON size of a submitted payload (64 KiB).
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 64 * 1024;

/// Configuration for the Ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// How long an issued challenge may be used.
    pub challenge_window: Duration,
    /// Fixed tag in the `{address}:{timestamp}:{tag}` challenge text.
    pub challenge_tag: String,
    /// Largest accepted claim record, measured as encoded JSON bytes.
    pub max_payload_bytes: usize,
    /// Marker text of the genesis record.
    pub genesis_marker: String,
}

impl LedgerConfig {
    pub fn with_challenge_window(mut self, window: Duration) -> Self {
        self.challenge_window = window;
        self
    }

    pub fn with_challenge_tag(mut self, tag: impl Into<String>) -> Self {
        self.challenge_tag = tag.into();
        self
    }

    pub fn with_max_payload_bytes(mut self, max: usize) -> Self {
        self.max_payload_bytes = max;
        self
    }

    pub fn with_genesis_marker(mut self, marker: impl Into<String>) -> Self {
        self.genesis_marker = marker.into();
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            challenge_window: DEFAULT_CHALLENGE_WINDOW,
            challenge_tag: DEFAULT_CHALLENGE_TAG.to_string(),
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
            genesis_marker: DEFAULT_GENESIS_MARKER.to_string(),
        }
    }
}
