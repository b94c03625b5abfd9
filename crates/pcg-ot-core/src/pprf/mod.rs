//! Batched single-point punctured PRF over the [`Half-Tree`](https://eprint.iacr.org/2022/1431.pdf)
//! GGM expansion.
//!
//! The sender holds a COT correlation `Δ` and expands one tree per instance. The receiver holds
//! one punctured index `α` per instance and reconstructs every leaf except `α`. All instances of a
//! batch share `N`, the number of leaves, and progress one level at a time: each level costs a
//! single [`LevelCorrection`](msgs::LevelCorrection) carrying one block per instance.
//!
//! A batch of `B` instances consumes `B·h` bootstrap COTs, `h = ⌈log₂ N⌉`. When `N = 1` there is
//! no tree and each instance consumes exactly one COT, which is passed through as the single leaf.
//!
//! The XOR of all the leaves of a sender tree is `Δ`. The receiver therefore recovers
//! `senderLeaf[α] ⊕ Δ` as the XOR of the leaves it knows, without learning `senderLeaf[α]`.

mod config;
pub mod msgs;
pub mod receiver;
pub mod sender;

pub use config::{PprfConfig, PprfConfigBuilder, PprfConfigBuilderError};
use itybity::ToBits;
use pcg_core::Block;

use crate::{ProtocolError, TransferId};

/// Returns the depth of the tree with `each_num` leaves.
#[inline]
pub fn tree_depth(each_num: usize) -> usize {
    each_num.next_power_of_two().trailing_zeros() as usize
}

/// Returns the number of bootstrap COTs consumed by one instance with `each_num` leaves.
#[inline]
pub fn keys_per_instance(each_num: usize) -> usize {
    tree_depth(each_num).max(1)
}

/// Returns the number of bootstrap COTs consumed by a batch.
#[inline]
pub fn bootstrap_count(batch_num: usize, each_num: usize) -> usize {
    batch_num * keys_per_instance(each_num)
}

/// Returns the number of level corrections sent for a batch.
#[inline]
pub fn level_count(each_num: usize) -> usize {
    tree_depth(each_num).saturating_sub(1)
}

/// Returns the bootstrap COT choices of the receiver.
///
/// For every instance these are the complements of the bits of `α`, most significant first. When
/// there is no tree the choice is `1`, so that the receiver's key is `q ⊕ Δ`.
pub fn choice_bits(alphas: &[usize], each_num: usize) -> Result<Vec<bool>, ProtocolError> {
    check_alphas(alphas, each_num)?;

    let depth = tree_depth(each_num);
    if depth == 0 {
        return Ok(vec![true; alphas.len()]);
    }

    Ok(alphas
        .iter()
        .flat_map(|&alpha| {
            (alpha as u64)
                .iter_msb0()
                .skip(64 - depth)
                .map(|bit| !bit)
                .collect::<Vec<_>>()
        })
        .collect())
}

/// Checks that every punctured index is less than `each_num`.
pub(crate) fn check_alphas(alphas: &[usize], each_num: usize) -> Result<(), ProtocolError> {
    if let Some(&alpha) = alphas.iter().find(|&&alpha| alpha >= each_num) {
        return Err(ProtocolError::InvalidAlpha { alpha, each_num });
    }

    Ok(())
}

/// Checks that a correction belongs to the expected transfer and level.
pub(crate) fn check_framing(
    id: TransferId,
    level: usize,
    msg_id: TransferId,
    msg_level: u32,
) -> Result<(), ProtocolError> {
    if msg_id != id {
        return Err(ProtocolError::Abort(format!(
            "expected message for {id}, got {msg_id}"
        )));
    }

    if msg_level as usize != level {
        return Err(ProtocolError::Abort(format!(
            "expected correction for level {level}, got level {msg_level}"
        )));
    }

    Ok(())
}

/// The output of the punctured PRF sender.
#[derive(Debug)]
pub struct PprfSenderOutput {
    /// The transfer id.
    pub id: TransferId,
    /// The COT correlation.
    pub delta: Block,
    /// The `N` leaves of each instance.
    pub leaves: Vec<Vec<Block>>,
}

/// The output of the punctured PRF receiver.
#[derive(Debug)]
pub struct PprfReceiverOutput {
    /// The transfer id.
    pub id: TransferId,
    /// The punctured leaves of each instance.
    pub punctured: Vec<PuncturedLeaves>,
}

/// The leaves of one instance, as seen by the receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuncturedLeaves {
    /// The punctured index.
    pub alpha: usize,
    /// The `N` leaves, with [`Block::ZERO`] at `alpha`.
    pub leaves: Vec<Block>,
    /// The XOR of every leaf the receiver knows, equal to `senderLeaf[α] ⊕ Δ`.
    ///
    /// This covers the leaves past `N` which are not part of the output.
    pub sum: Block,
}
