//! Fixed-key AES and the hash functions built from it.

use aes::{
    cipher::{BlockEncrypt, KeyInit},
    Aes128,
};
use once_cell::sync::Lazy;

use crate::Block;

/// A fixed AES key (arbitrarily chosen).
pub const FIXED_KEY: [u8; 16] = [
    69, 42, 69, 42, 69, 42, 69, 42, 69, 42, 69, 42, 69, 42, 69, 42,
];

/// Fixed-key AES cipher.
pub static FIXED_KEY_AES: Lazy<FixedKeyAes> = Lazy::new(|| FixedKeyAes {
    aes: AesEncryptor::new(Block::new(FIXED_KEY)),
});

/// AES-128 encryptor over [`Block`]s.
#[derive(Clone)]
pub struct AesEncryptor(Aes128);

opaque_debug::implement!(AesEncryptor);

impl AesEncryptor {
    /// The number of blocks encrypted in one batch.
    pub const AES_BLOCK_COUNT: usize = 8;

    /// Creates a new encryptor keyed with `key`.
    #[inline]
    pub fn new(key: Block) -> Self {
        let key = aes::cipher::generic_array::GenericArray::from(key.to_bytes());
        Self(Aes128::new(&key))
    }

    /// Encrypts a block.
    #[inline]
    pub fn encrypt_block(&self, block: Block) -> Block {
        let mut ga = aes::Block::from(block.to_bytes());
        self.0.encrypt_block(&mut ga);

        let mut out = [0u8; 16];
        out.copy_from_slice(ga.as_slice());
        Block::new(out)
    }

    /// Encrypts a batch of blocks in place.
    #[inline]
    pub fn encrypt_many_blocks<const N: usize>(&self, blocks: &mut [Block; N]) {
        self.encrypt_blocks(blocks.as_mut_slice())
    }

    /// Encrypts a slice of blocks in place.
    pub fn encrypt_blocks(&self, blocks: &mut [Block]) {
        let mut gas: Vec<aes::Block> = blocks
            .iter()
            .map(|b| aes::Block::from(b.to_bytes()))
            .collect();
        self.0.encrypt_blocks(&mut gas);

        for (block, ga) in blocks.iter_mut().zip(gas) {
            block.as_mut().copy_from_slice(ga.as_slice());
        }
    }
}

/// Fixed-key AES, modeled as a random permutation `π`.
pub struct FixedKeyAes {
    aes: AesEncryptor,
}

opaque_debug::implement!(FixedKeyAes);

impl FixedKeyAes {
    /// Correlation-robust hash function `H(x) = π(x) ⊕ x`.
    ///
    /// See <https://eprint.iacr.org/2019/074> (Section 7.2).
    #[inline]
    pub fn cr(&self, x: Block) -> Block {
        self.aes.encrypt_block(x) ^ x
    }

    /// Circular correlation-robust hash function `H(x) = π(σ(x)) ⊕ σ(x)`.
    ///
    /// See <https://eprint.iacr.org/2019/074> (Section 7.3).
    #[inline]
    pub fn ccr(&self, x: Block) -> Block {
        self.cr(x.sigma())
    }
}
