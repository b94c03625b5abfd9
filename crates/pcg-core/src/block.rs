//! A block of 128 bits and its operations.

use core::ops::{BitAnd, BitAndAssign, BitXor, BitXorAssign};

use bytemuck::{Pod, Zeroable};
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};
use serde::{Deserialize, Serialize};

/// A block of 128 bits.
///
/// This is the seed type of every tree node and the key type of every bootstrap correlation.
#[repr(transparent)]
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Pod,
    Zeroable,
    Serialize,
    Deserialize,
)]
pub struct Block([u8; 16]);

impl Block {
    /// The length of a block in bytes.
    pub const LEN: usize = 16;
    /// A zero block.
    pub const ZERO: Self = Self([0; 16]);
    /// A block with all bits set to 1.
    pub const ONES: Self = Self([0xff; 16]);
    /// A block with only the least significant bit set.
    pub const ONE: Self = Self([1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    /// Masks indexed by a bit, `[ZERO, ONES]`.
    pub const SELECT_MASK: [Self; 2] = [Self::ZERO, Self::ONES];

    /// Creates a new block.
    #[inline]
    pub const fn new(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the byte representation of the block.
    #[inline]
    pub fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Returns the least significant bit of the block.
    #[inline]
    pub fn lsb(&self) -> bool {
        self.0[0] & 1 == 1
    }

    /// Sets the least significant bit of the block.
    #[inline]
    pub fn set_lsb(&mut self, bit: bool) {
        self.0[0] = (self.0[0] & 0xfe) | bit as u8;
    }

    /// Returns the block if `bit` is set, otherwise [`Block::ZERO`].
    #[inline]
    pub fn select(self, bit: bool) -> Self {
        self & Self::SELECT_MASK[bit as usize]
    }

    /// Applies the linear orthomorphism `σ(x_L || x_R) = (x_L ⊕ x_R || x_L)`.
    ///
    /// `x_L` is the high half of the little-endian integer view of the block.
    #[inline]
    pub fn sigma(self) -> Self {
        let x = u128::from_le_bytes(self.0);
        let hi = x >> 64;
        let lo = x & (u64::MAX as u128);

        Self::from(((hi ^ lo) << 64) | hi)
    }

    /// Returns the XOR of all the blocks in the iterator.
    #[inline]
    pub fn xor_all<'a, I: IntoIterator<Item = &'a Block>>(blocks: I) -> Self {
        blocks.into_iter().fold(Self::ZERO, |acc, &x| acc ^ x)
    }
}

impl From<[u8; 16]> for Block {
    #[inline]
    fn from(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl From<Block> for [u8; 16] {
    #[inline]
    fn from(block: Block) -> Self {
        block.0
    }
}

impl From<u128> for Block {
    #[inline]
    fn from(value: u128) -> Self {
        Self(value.to_le_bytes())
    }
}

impl From<Block> for u128 {
    #[inline]
    fn from(block: Block) -> Self {
        u128::from_le_bytes(block.0)
    }
}

impl TryFrom<&[u8]> for Block {
    type Error = core::array::TryFromSliceError;

    #[inline]
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        <[u8; 16]>::try_from(value).map(Self)
    }
}

impl AsRef<[u8]> for Block {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsMut<[u8]> for Block {
    #[inline]
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl BitXor for Block {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Self::from(u128::from(self) ^ u128::from(rhs))
    }
}

impl BitXorAssign for Block {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl BitAnd for Block {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from(u128::from(self) & u128::from(rhs))
    }
}

impl BitAndAssign for Block {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        *self = *self & rhs;
    }
}

impl Distribution<Block> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Block {
        Block(rng.gen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_lsb() {
        let mut b = Block::ZERO;
        assert!(!b.lsb());
        b.set_lsb(true);
        assert_eq!(b, Block::ONE);
        b.set_lsb(false);
        assert_eq!(b, Block::ZERO);
    }

    #[test]
    fn test_block_select() {
        let b: Block = rand::random();
        assert_eq!(b.select(true), b);
        assert_eq!(b.select(false), Block::ZERO);
    }

    #[test]
    fn test_sigma_is_linear_and_invertible() {
        let x: Block = rand::random();
        let y: Block = rand::random();

        assert_eq!((x ^ y).sigma(), x.sigma() ^ y.sigma());
        // σ(x) ⊕ x is also a permutation, so it can't vanish on a nonzero input.
        assert_ne!(x.sigma() ^ x, Block::ZERO);
        assert_ne!(x.sigma(), x);
    }

    #[test]
    fn test_xor_all() {
        let blocks: Vec<Block> = (0..10).map(|_| rand::random()).collect();
        let expected = blocks.iter().fold(Block::ZERO, |acc, &b| acc ^ b);
        assert_eq!(Block::xor_all(&blocks), expected);
    }
}
