//! The Ledger: the owned block sequence and everything done to it.
//!
//! The Ledger brings together the block chain, ownership challenges and the
//! append protocol behind one shareable handle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use starledger_core::codec::{self, EncodedPayload};
use starledger_core::validation::check_self_hash;
use starledger_core::{
    validate_chain, verify_message, Block, BlockBuilder, BlockHash, BlockView, ChallengeMessage,
    ClaimRecord, Clock, GenesisRecord, IntegrityViolation, SystemClock, WalletAddress,
};
use tracing::{debug, info, warn};

use crate::challenge::{ChallengeStore, IssuedChallenge};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

/// The main Ledger struct.
///
/// Provides a unified API for:
/// - Issuing ownership challenges
/// - Appending wallet-signed entries
/// - Querying blocks by hash, height and owner
/// - Validating the whole chain
///
/// All methods take `&self`; share the ledger between threads with `Arc`.
#[derive(Debug)]
pub struct Ledger {
    /// The chain. Only [`Ledger::append`] and [`Ledger::initialize`] write to it.
    blocks: RwLock<Vec<Block>>,
    /// Outstanding ownership challenges.
    challenges: ChallengeStore,
    /// Configuration.
    config: LedgerConfig,
    /// Time source.
    clock: Arc<dyn Clock>,
}

impl Ledger {
    /// Create a ledger on the wall clock, seeded with its genesis block.
    pub fn new(config: LedgerConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a ledger on the given clock, seeded with its genesis block.
    pub fn with_clock(config: LedgerConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let ledger = Self {
            blocks: RwLock::new(Vec::new()),
            challenges: ChallengeStore::new(),
            config,
            clock,
        };
        ledger.initialize()?;
        Ok(ledger)
    }

    /// Seed the genesis block if the chain is empty. Idempotent.
    pub fn initialize(&self) -> Result<()> {
        let mut blocks = self.write_blocks();
        if blocks.is_empty() {
            let payload = codec::encode(&GenesisRecord::new(self.config.genesis_marker.as_str()))?;
            let genesis = BlockBuilder::genesis(payload)
                .timestamp(self.clock.now_secs())
                .seal();
            info!(hash = %genesis.hash, "seeded genesis block");
            blocks.push(genesis);
        }
        Ok(())
    }

    /// Get the configuration.
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Height of the newest block (0 when only genesis exists).
    pub fn height(&self) -> u64 {
        self.read_blocks().len().saturating_sub(1) as u64
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership Challenges
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a challenge for `address` to sign.
    ///
    /// Replaces any challenge previously issued to the same address. Does not
    /// touch the chain.
    pub fn request_ownership_challenge(&self, address: &str) -> Result<String> {
        let address = WalletAddress::parse(address)?;
        let issued_at = self.clock.now_secs();
        let message =
            ChallengeMessage::new(address, issued_at, self.config.challenge_tag.as_str()).to_string();

        self.challenges.issue(
            address,
            IssuedChallenge {
                message: message.clone(),
                issued_at,
            },
        );
        debug!(%address, issued_at, "issued ownership challenge");
        Ok(message)
    }

    /// The challenge currently outstanding for `address`, if any.
    pub fn outstanding_challenge(&self, address: &str) -> Result<Option<IssuedChallenge>> {
        let address = WalletAddress::parse(address)?;
        Ok(self.challenges.get(&address))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Append
    // ─────────────────────────────────────────────────────────────────────────

    /// Append a wallet-signed entry.
    ///
    /// The guards run in order and each one can reject the submission:
    /// 1. the message must be a challenge for this address and ledger tag,
    ///    issued no longer than the ownership window ago;
    /// 2. it must be the challenge outstanding for the address (this consumes it);
    /// 3. the signature must verify;
    /// 4. the encoded claim must fit the payload limit;
    /// 5. the tail block must still match its own hash.
    ///
    /// Only then is the block linked, hashed and appended.
    pub fn submit_entry(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: Value,
    ) -> Result<BlockView> {
        let address = WalletAddress::parse(address)?;
        let challenge = ChallengeMessage::parse(message)?;

        if challenge.address != address {
            warn!(%address, "rejected submission: challenge issued to another address");
            return Err(LedgerError::MalformedChallenge(
                "challenge was issued to a different address".into(),
            ));
        }
        if challenge.tag != self.config.challenge_tag {
            warn!(%address, tag = %challenge.tag, "rejected submission: foreign challenge tag");
            return Err(LedgerError::MalformedChallenge(format!(
                "unexpected tag {:?}",
                challenge.tag
            )));
        }

        let now = self.clock.now_secs();
        let window_secs = self.config.challenge_window.as_secs();
        if challenge.is_expired(now, window_secs) {
            warn!(%address, issued_at = challenge.issued_at, now, "rejected submission: challenge expired");
            return Err(LedgerError::ExpiredChallenge {
                issued_at: challenge.issued_at,
                now,
                window_secs,
            });
        }

        if self.challenges.take_matching(&address, message).is_none() {
            warn!(%address, "rejected submission: no matching outstanding challenge");
            return Err(LedgerError::UnknownChallenge);
        }

        if !verify_message(message, &address.to_hex(), signature) {
            warn!(%address, "rejected submission: invalid signature");
            return Err(LedgerError::InvalidSignature);
        }

        let payload = codec::encode(&ClaimRecord::new(address, star))?;
        if payload.decoded_len() > self.config.max_payload_bytes {
            return Err(LedgerError::PayloadTooLarge {
                size: payload.decoded_len(),
                max: self.config.max_payload_bytes,
            });
        }

        let block = self.append(address, payload)?;
        info!(height = block.height(), hash = %block.hash, owner = %address, "appended block");

        Ok(block.view()?)
    }

    /// Link, hash and push a block under one write guard.
    ///
    /// Holding the guard across the tail read and the push serializes
    /// concurrent appends: each one sees the block the previous one pushed.
    fn append(&self, owner: WalletAddress, payload: EncodedPayload) -> Result<Block> {
        let mut blocks = self.write_blocks();
        let tail = blocks.last().ok_or(LedgerError::MissingGenesis)?;

        if let Err(error) = check_self_hash(tail) {
            let violation = IntegrityViolation {
                height: tail.height(),
                error,
            };
            warn!(%violation, "refusing to append on a corrupted tail");
            return Err(LedgerError::Integrity(violation));
        }

        let block = BlockBuilder::on_top_of(tail)
            .timestamp(self.clock.now_secs())
            .payload(payload)
            .owner(owner)
            .seal();

        blocks.push(block.clone());
        Ok(block)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a block by its hex hash.
    pub fn get_block_by_hash(&self, hash: &str) -> Result<BlockView> {
        let not_found = || LedgerError::NotFound(format!("block with hash {hash}"));
        let wanted = BlockHash::from_hex(hash).map_err(|_| not_found())?;

        let block = self
            .read_blocks()
            .iter()
            .find(|b| b.hash == wanted)
            .cloned()
            .ok_or_else(not_found)?;

        debug!(height = block.height(), "found block by hash");
        Ok(block.view()?)
    }

    /// Get a block by its height.
    pub fn get_block_by_height(&self, height: u64) -> Result<BlockView> {
        let block = usize::try_from(height)
            .ok()
            .and_then(|index| self.read_blocks().get(index).cloned())
            .ok_or_else(|| LedgerError::NotFound(format!("block at height {height}")))?;

        Ok(block.view()?)
    }

    /// Decoded payloads of every block owned by `address`, in chain order.
    ///
    /// Returns an empty list when the address owns nothing. An address that
    /// does not parse is an error (`InvalidAddress`), not an empty list.
    pub fn get_entries_by_address(&self, address: &str) -> Result<Vec<Value>> {
        let address = WalletAddress::parse(address)?;

        let owned: Vec<Block> = self
            .read_blocks()
            .iter()
            .filter(|b| b.owner() == Some(&address))
            .cloned()
            .collect();

        debug!(%address, count = owned.len(), "collected entries by address");
        owned
            .iter()
            .map(|b| codec::decode_value(b.payload()).map_err(LedgerError::from))
            .collect()
    }

    /// The newest block.
    pub fn tail(&self) -> Result<Block> {
        self.read_blocks()
            .last()
            .cloned()
            .ok_or(LedgerError::MissingGenesis)
    }

    /// A snapshot of the whole chain.
    pub fn blocks(&self) -> Vec<Block> {
        self.read_blocks().clone()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    /// Check every block's hash and link. Empty iff the chain is consistent.
    ///
    /// Read-only: violations are reported, never repaired.
    pub fn validate_ledger(&self) -> Vec<IntegrityViolation> {
        let violations = validate_chain(&self.read_blocks());
        for violation in &violations {
            warn!(%violation, "ledger integrity violation");
        }
        violations
    }

    fn read_blocks(&self) -> RwLockReadGuard<'_, Vec<Block>> {
        self.blocks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_blocks(&self) -> RwLockWriteGuard<'_, Vec<Block>> {
        self.blocks.write().unwrap_or_else(PoisonError::into_inner)
    }
}
