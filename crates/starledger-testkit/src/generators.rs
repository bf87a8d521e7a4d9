//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Value};

use starledger_core::codec;
use starledger_core::{Block, BlockBuilder, ClaimRecord, GenesisRecord, WalletKeypair};

/// Generate a random wallet keypair.
pub fn keypair() -> impl Strategy<Value = WalletKeypair> {
    any::<[u8; 32]>().prop_map(|seed| WalletKeypair::from_seed(&seed))
}

/// Generate a reasonable Unix timestamp in seconds.
pub fn timestamp() -> impl Strategy<Value = u64> {
    0u64..=4_102_444_800
}

/// Generate a scalar JSON value.
pub fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(|f| json!(f)),
        ".{0,32}".prop_map(Value::String),
    ]
}

/// Generate an arbitrary JSON document up to a few levels deep.
pub fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(4, 48, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map("[a-zA-Z_]{1,12}", inner, 0..8)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generate a star description shaped like a registry submission.
pub fn star() -> impl Strategy<Value = Value> {
    (
        (0u8..24, 0u8..60, 0u16..600),
        (-89i8..=89, 0u8..60, 0u16..600),
        "[A-Za-z ,.']{0,120}",
    )
        .prop_map(|((h, m, s), (deg, arcmin, arcsec), story)| {
            json!({
                "ra": format!("{h}h {m}m {}.{}s", s / 10, s % 10),
                "dec": format!("{deg}° {arcmin}' {}.{}", arcsec / 10, arcsec % 10),
                "story": story,
            })
        })
}

/// Parameters for one claimed block.
#[derive(Debug, Clone)]
pub struct ClaimParams {
    pub keypair: WalletKeypair,
    pub timestamp: u64,
    pub star: Value,
}

impl Arbitrary for ClaimParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), timestamp(), star())
            .prop_map(|(keypair, timestamp, star)| ClaimParams {
                keypair,
                timestamp,
                star,
            })
            .boxed()
    }
}

/// Build a sealed block for `params` on top of `tail`.
pub fn block_from_params(tail: &Block, params: &ClaimParams) -> Block {
    let owner = params.keypair.address();
    let payload = codec::encode(&ClaimRecord::new(owner, params.star.clone()))
        .unwrap_or_else(|e| panic!("claim record must encode: {e}"));

    BlockBuilder::on_top_of(tail)
        .timestamp(params.timestamp)
        .payload(payload)
        .owner(owner)
        .seal()
}

/// Build a well-formed chain: a genesis block followed by one block per claim.
pub fn chain_from_params(genesis_time: u64, claims: &[ClaimParams]) -> Vec<Block> {
    let payload = codec::encode(&GenesisRecord::new("Genesis Block"))
        .unwrap_or_else(|e| panic!("genesis record must encode: {e}"));
    let mut blocks = vec![BlockBuilder::genesis(payload).timestamp(genesis_time).seal()];

    for params in claims {
        let block = block_from_params(&blocks[blocks.len() - 1], params);
        blocks.push(block);
    }
    blocks
}

/// Generate a well-formed chain with up to `max_claims` blocks after genesis.
pub fn chain(max_claims: usize) -> impl Strategy<Value = Vec<Block>> {
    (
        timestamp(),
        prop::collection::vec(any::<ClaimParams>(), 0..=max_claims),
    )
        .prop_map(|(genesis_time, claims)| chain_from_params(genesis_time, &claims))
}
