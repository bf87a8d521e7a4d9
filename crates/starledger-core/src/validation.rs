//! Block and chain validation: hash recomputation and link checks.

use crate::block::Block;
use crate::crypto::BlockHash;
use crate::error::{IntegrityViolation, ValidationError};

/// Validate a single block against its own hash and its expected predecessor.
///
/// `expected_previous` is `None` for genesis, which must carry the sentinel.
/// The self-hash check runs first; the first failure is returned.
pub fn validate_block(
    block: &Block,
    expected_previous: Option<&BlockHash>,
) -> Result<(), ValidationError> {
    check_self_hash(block)?;
    check_link(block, expected_previous)
}

/// Recompute the block hash and compare it with the stored one.
pub fn check_self_hash(block: &Block) -> Result<(), ValidationError> {
    let computed = block.compute_hash();
    if computed != block.hash {
        return Err(ValidationError::HashMismatch {
            stored: block.hash,
            computed,
        });
    }
    Ok(())
}

/// Compare the stored previous hash with the expected one.
pub fn check_link(block: &Block, expected_previous: Option<&BlockHash>) -> Result<(), ValidationError> {
    if block.previous_hash() != expected_previous {
        return Err(ValidationError::LinkMismatch {
            expected: expected_previous.copied(),
            found: block.previous_hash().copied(),
        });
    }
    Ok(())
}

/// Validate an ordered chain, collecting every violation.
///
/// Genesis is checked for its self-hash only. Every later block is checked
/// for its self-hash and for linking to the *stored* hash of the block before
/// it, so tampering with one block is reported once, at that block's height.
pub fn validate_chain(blocks: &[Block]) -> Vec<IntegrityViolation> {
    blocks
        .iter()
        .enumerate()
        .fold(Vec::new(), |mut violations, (index, block)| {
            let height = block.height();

            if let Err(error) = check_self_hash(block) {
                violations.push(IntegrityViolation { height, error });
            }
            if let Some(previous) = index.checked_sub(1).map(|i| &blocks[i]) {
                if let Err(error) = check_link(block, Some(&previous.hash)) {
                    violations.push(IntegrityViolation { height, error });
                }
            }

            violations
        })
}
