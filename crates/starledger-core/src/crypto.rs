//! Cryptographic primitives for the Star Ledger.
//!
//! Wraps Blake3 hashing and Ed25519 wallet message signing with strong types.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::types::WalletAddress;

/// Domain prefix for wallet-signed messages.
///
/// Signatures cover `SIGN_DOMAIN || message`, so a wallet signature over a
/// challenge can never be replayed as a signature over anything else.
pub const SIGN_DOMAIN: &[u8] = b"starledger/signed-message/v1";

/// A 32-byte Blake3 block hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A 64-byte Ed25519 signature produced by a wallet.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WalletSignature(pub [u8; 64]);

impl WalletSignature {
    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let bytes = hex::decode(s).map_err(|e| CoreError::InvalidSignatureEncoding(e.to_string()))?;
        let arr: [u8; 64] = bytes
            .try_into()
            .map_err(|_| CoreError::InvalidSignatureEncoding("expected 64 bytes".into()))?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for WalletSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletSig({}...)", &self.to_hex()[..16])
    }
}

impl WalletAddress {
    /// Verify a wallet signature over a message.
    pub fn verify(&self, message: &str, signature: &WalletSignature) -> Result<(), CoreError> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidSignature)?;
        let sig = Signature::from_bytes(&signature.0);

        verifying_key
            .verify_strict(&signed_message(message), &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

/// Construct the signed bytes for a message (`SIGN_DOMAIN || message`).
pub fn signed_message(message: &str) -> Vec<u8> {
    let mut buf = Vec::with_capacity(SIGN_DOMAIN.len() + message.len());
    buf.extend_from_slice(SIGN_DOMAIN);
    buf.extend_from_slice(message.as_bytes());
    buf
}

/// Check that `signature` is `address`'s signature over `message`.
///
/// Malformed addresses or signatures verify as `false`.
pub fn verify_message(message: &str, address: &str, signature: &str) -> bool {
    let Ok(address) = WalletAddress::parse(address) else {
        return false;
    };
    let Ok(signature) = WalletSignature::from_hex(signature) else {
        return false;
    };
    address.verify(message, &signature).is_ok()
}

/// A wallet keypair for signing ownership challenges.
///
/// This wraps ed25519-dalek's SigningKey.
#[derive(Clone)]
pub struct WalletKeypair {
    signing_key: SigningKey,
}

impl WalletKeypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The wallet address for this keypair.
    pub fn address(&self) -> WalletAddress {
        WalletAddress(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message under [`SIGN_DOMAIN`].
    pub fn sign_message(&self, message: &str) -> WalletSignature {
        let sig = self.signing_key.sign(&signed_message(message));
        WalletSignature(sig.to_bytes())
    }
}

impl fmt::Debug for WalletKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletKeypair({:?})", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify_message() {
        let keypair = WalletKeypair::generate();
        let address = keypair.address().to_hex();
        let signature = keypair.sign_message("hello world").to_hex();

        assert!(verify_message("hello world", &address, &signature));

        // Tampered message should fail
        assert!(!verify_message("hello worlD", &address, &signature));
    }

    #[test]
    fn test_verify_wrong_address() {
        let alice = WalletKeypair::from_seed(&[0x01; 32]);
        let bob = WalletKeypair::from_seed(&[0x02; 32]);
        let signature = alice.sign_message("claim").to_hex();

        assert!(!verify_message("claim", &bob.address().to_hex(), &signature));
    }

    #[test]
    fn test_verify_malformed_inputs_return_false() {
        let keypair = WalletKeypair::from_seed(&[0x42; 32]);
        let address = keypair.address().to_hex();
        let signature = keypair.sign_message("msg").to_hex();

        assert!(!verify_message("msg", "zz", &signature));
        assert!(!verify_message("msg", &address, "zz"));
        assert!(!verify_message("msg", &address, &signature[..64]));
        assert!(!verify_message("msg", &address, &"ff".repeat(64)));
    }

    #[test]
    fn test_domain_separation() {
        let keypair = WalletKeypair::from_seed(&[0x42; 32]);
        let raw = keypair.signing_key.sign(b"msg");
        let signature = WalletSignature(raw.to_bytes()).to_hex();

        // A signature over the bare message is not a wallet message signature.
        assert!(!verify_message("msg", &keypair.address().to_hex(), &signature));
    }

    #[test]
    fn test_identity_key_signature_rejected() {
        let mut identity = [0u8; 32];
        identity[0] = 0x01;
        // R = identity, s = 0 satisfies the cofactored equation for any message.
        let mut forged = [0u8; 64];
        forged[0] = 0x01;
        let forged = WalletSignature(forged);

        assert!(!verify_message("claim", &hex::encode(identity), &forged.to_hex()));
        assert!(WalletAddress(identity).verify("claim", &forged).is_err());
        assert!(WalletAddress(identity).verify("other", &forged).is_err());
    }

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = WalletKeypair::from_seed(&seed);
        let kp2 = WalletKeypair::from_seed(&seed);
        assert_eq!(kp1.address(), kp2.address());
    }

    #[test]
    fn test_block_hash() {
        let h1 = BlockHash::hash(b"test data");
        let h2 = BlockHash::hash(b"test data");
        assert_eq!(h1, h2);

        let h3 = BlockHash::hash(b"different data");
        assert_ne!(h1, h3);
    }

    #[test]
    fn test_block_hash_hex_roundtrip() {
        let hash = BlockHash::hash(b"roundtrip");
        let recovered = BlockHash::from_hex(&hash.to_hex()).unwrap();
        assert_eq!(hash, recovered);
        assert_eq!(hash.to_hex().len(), 64);
        assert!(BlockHash::from_hex("nonexistent").is_err());
    }
}
