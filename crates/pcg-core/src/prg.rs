//! AES-CTR pseudorandom generator.

use crate::{aes::AesEncryptor, Block};
use rand::Rng;
use rand_core::{
    block::{BlockRng, BlockRngCore},
    CryptoRng, RngCore, SeedableRng,
};

#[derive(Clone)]
struct PrgCore {
    aes: AesEncryptor,
    counter: u64,
    nonce: u64,
}

impl BlockRngCore for PrgCore {
    type Item = u32;
    type Results = [u32; 4 * AesEncryptor::AES_BLOCK_COUNT];

    #[inline(always)]
    fn generate(&mut self, results: &mut Self::Results) {
        let mut states = [Block::ZERO; AesEncryptor::AES_BLOCK_COUNT];
        for state in states.iter_mut() {
            let mut bytes = [0u8; 16];
            bytes[..8].copy_from_slice(&self.counter.to_le_bytes());
            bytes[8..].copy_from_slice(&self.nonce.to_le_bytes());
            self.counter += 1;
            *state = Block::new(bytes);
        }
        self.aes.encrypt_many_blocks(&mut states);
        *results = bytemuck::cast(states);
    }
}

impl SeedableRng for PrgCore {
    type Seed = Block;

    #[inline(always)]
    fn from_seed(seed: Self::Seed) -> Self {
        Self {
            aes: AesEncryptor::new(seed),
            counter: 0,
            nonce: 0,
        }
    }
}

impl CryptoRng for PrgCore {}

/// AES-based PRG.
///
/// AES-128 in counter mode keyed with the seed. A nonce selects one of `2^64` independent
/// streams under the same seed, see [`Prg::with_nonce`].
#[derive(Clone)]
pub struct Prg(BlockRng<PrgCore>);

opaque_debug::implement!(Prg);

impl RngCore for Prg {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    #[inline(always)]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.0.try_fill_bytes(dest)
    }
}

impl SeedableRng for Prg {
    type Seed = Block;

    #[inline(always)]
    fn from_seed(seed: Self::Seed) -> Self {
        Prg(BlockRng::<PrgCore>::from_seed(seed))
    }

    #[inline(always)]
    fn from_rng<R: RngCore>(rng: R) -> Result<Self, rand_core::Error> {
        BlockRng::<PrgCore>::from_rng(rng).map(Prg)
    }
}

impl CryptoRng for Prg {}

impl Prg {
    /// New Prg with random seed.
    #[inline(always)]
    pub fn new() -> Self {
        Prg::from_seed(rand::random::<Block>())
    }

    /// New Prg on the stream selected by `nonce`.
    #[inline]
    pub fn with_nonce(seed: Block, nonce: u64) -> Self {
        let mut core = PrgCore::from_seed(seed);
        core.nonce = nonce;
        Prg(BlockRng::new(core))
    }

    /// Returns the number of AES blocks generated so far.
    pub fn counter(&self) -> u64 {
        self.0.core.counter
    }

    /// Generate a random bool value.
    #[inline(always)]
    pub fn random_bool(&mut self) -> bool {
        self.gen()
    }

    /// Fill a bool slice with random bool values.
    #[inline(always)]
    pub fn random_bools(&mut self, buf: &mut [bool]) {
        self.fill(buf);
    }

    /// Generate a random byte value.
    #[inline(always)]
    pub fn random_byte(&mut self) -> u8 {
        self.gen()
    }

    /// Fill a byte slice with random values.
    #[inline(always)]
    pub fn random_bytes(&mut self, buf: &mut [u8]) {
        self.fill_bytes(buf);
    }

    /// Generate a random block.
    #[inline(always)]
    pub fn random_block(&mut self) -> Block {
        self.gen()
    }

    /// Fill a block slice with random block values.
    #[inline(always)]
    pub fn random_blocks(&mut self, buf: &mut [Block]) {
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(buf);
        self.fill_bytes(bytes);
    }
}

impl Default for Prg {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prg_ne() {
        let mut prg = Prg::new();
        let mut x = vec![Block::ZERO; 2];
        prg.random_blocks(&mut x);
        assert_ne!(x[0], x[1]);
    }

    #[test]
    fn test_prg_is_deterministic() {
        let seed: Block = rand::random();
        let mut a = Prg::from_seed(seed);
        let mut b = Prg::from_seed(seed);

        let mut x = vec![Block::ZERO; 9];
        let mut y = vec![Block::ZERO; 9];
        a.random_blocks(&mut x);
        b.random_blocks(&mut y);

        assert_eq!(x, y);
        assert_eq!(a.counter(), b.counter());
    }

    #[test]
    fn test_prg_nonces_are_distinct() {
        let mut a = Prg::with_nonce(Block::ZERO, 0);
        let mut b = Prg::with_nonce(Block::ZERO, 1);

        assert_ne!(a.random_block(), b.random_block());
    }

    #[test]
    fn test_prg_nonce_zero_is_default_stream() {
        let mut a = Prg::with_nonce(Block::ONE, 0);
        let mut b = Prg::from_seed(Block::ONE);

        assert_eq!(a.random_block(), b.random_block());
    }
}
