//! Canonical CBOR encoding for deterministic block hashing.
//!
//! This module implements RFC 8949 Core Deterministic Encoding for the
//! subset of CBOR that block fields need:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are u64 seconds)
//!
//! The canonical encoding is what makes a block hash reproducible: the same
//! field values produce identical bytes on every platform.

use ciborium::value::Value;

use crate::block::BlockContent;

/// Content field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR. The block's own hash has no key:
/// it is never part of the hashed content.
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIMESTAMP: u64 = 1;
    pub const PAYLOAD: u64 = 2;
    pub const PREVIOUS_HASH: u64 = 3;
    pub const OWNER: u64 = 4;
}

/// Encode block content to canonical CBOR bytes.
pub fn canonical_content_bytes(content: &BlockContent) -> Vec<u8> {
    let value = content_to_cbor_value(content);
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value);
    buf
}

/// Convert block content to a CBOR Value (map with integer keys).
fn content_to_cbor_value(content: &BlockContent) -> Value {
    let previous_hash = match &content.previous_hash {
        Some(hash) => Value::Bytes(hash.0.to_vec()),
        None => Value::Null,
    };
    let owner = match &content.owner {
        Some(address) => Value::Bytes(address.as_bytes().to_vec()),
        None => Value::Null,
    };

    Value::Map(vec![
        (Value::Integer(keys::HEIGHT.into()), Value::Integer(content.height.into())),
        (Value::Integer(keys::TIMESTAMP.into()), Value::Integer(content.timestamp.into())),
        (
            Value::Integer(keys::PAYLOAD.into()),
            Value::Text(content.payload.as_str().to_owned()),
        ),
        (Value::Integer(keys::PREVIOUS_HASH.into()), previous_hash),
        (Value::Integer(keys::OWNER.into()), owner),
    ])
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Map(entries) => encode_map_canonical(buf, entries),
        Value::Null => buf.push(0xf6),
        other => unreachable!("block content never contains {other:?}"),
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    let mut pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::crypto::{BlockHash, WalletKeypair};
    use crate::record::GenesisRecord;

    fn genesis_content() -> BlockContent {
        BlockContent {
            height: 0,
            timestamp: 1_700_000_000,
            payload: codec::encode(&GenesisRecord::new("Genesis Block")).unwrap(),
            previous_hash: None,
            owner: None,
        }
    }

    #[test]
    fn test_uint_encoding() {
        let mut buf = Vec::new();
        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 0x18]);

        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 1_700_000_000);
        assert_eq!(buf, vec![0x1a, 0x65, 0x53, 0xf1, 0x00]);
    }

    #[test]
    fn test_genesis_encodes_nulls() {
        let bytes = canonical_content_bytes(&genesis_content());

        // Map header with 5 entries, first key 0, height 0.
        assert_eq!(&bytes[..3], &[0xa5, 0x00, 0x00]);
        // Owner (key 4) is the last entry and is null.
        assert_eq!(&bytes[bytes.len() - 2..], &[0x04, 0xf6]);
    }

    #[test]
    fn test_canonical_bytes_parse_as_cbor_map() {
        let owner = WalletKeypair::from_seed(&[0x42; 32]).address();
        let content = BlockContent {
            height: 7,
            timestamp: 1_700_000_123,
            payload: codec::encode(&serde_json::json!({"ra": "16h 29m 1.0s"})).unwrap(),
            previous_hash: Some(BlockHash::from_bytes([0xab; 32])),
            owner: Some(owner),
        };

        let bytes = canonical_content_bytes(&content);
        let value: Value = ciborium::from_reader(bytes.as_slice()).unwrap();

        match value {
            Value::Map(entries) => {
                assert_eq!(entries.len(), 5);
                assert_eq!(entries[3].1, Value::Bytes(vec![0xab; 32]));
                assert_eq!(entries[4].1, Value::Bytes(owner.as_bytes().to_vec()));
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_canonical_bytes_deterministic() {
        let a = canonical_content_bytes(&genesis_content());
        let b = canonical_content_bytes(&genesis_content());
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_field_affects_encoding() {
        let base = genesis_content();
        let base_bytes = canonical_content_bytes(&base);

        let mut changed = base.clone();
        changed.height = 1;
        assert_ne!(canonical_content_bytes(&changed), base_bytes);

        let mut changed = base.clone();
        changed.timestamp += 1;
        assert_ne!(canonical_content_bytes(&changed), base_bytes);

        let mut changed = base.clone();
        changed.previous_hash = Some(BlockHash::ZERO);
        assert_ne!(canonical_content_bytes(&changed), base_bytes);

        let mut changed = base;
        changed.owner = Some(WalletKeypair::from_seed(&[0x01; 32]).address());
        assert_ne!(canonical_content_bytes(&changed), base_bytes);
    }
}
