//! Finite fields used by the correlation materializers.
//!
//! The punctured PRF protocols never do field arithmetic themselves. They only see a field
//! through the [`Field`] and [`ExtensionField`] traits, which expose the element sizes, addition,
//! subtraction, sampling and the multiplication of a field element by a subfield element.

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

mod clmul;
pub mod gf2;
pub mod gf2_128;
pub mod gf2_64;
pub mod zp64;

use std::{
    fmt::Debug,
    ops::{Add, Mul, Neg, Sub},
};

use pcg_core::Block;
use rand::Rng;
use serde::{de::DeserializeOwned, Serialize};

pub use gf2::Gf2;
pub use gf2_128::Gf2_128;
pub use gf2_64::Gf2_64;
pub use zp64::Zp64;

/// A field error.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    /// The encoding has the wrong length.
    #[error("invalid field element length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },
    /// The encoding is not the canonical encoding of a field element.
    #[error("value is not a member of the field")]
    NotMember,
}

/// A finite field.
pub trait Field:
    Copy
    + Debug
    + PartialEq
    + Eq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Mul<Output = Self>
    + Serialize
    + DeserializeOwned
{
    /// The length of the canonical encoding in bytes.
    const BYTE_LEN: usize;

    /// Returns the additive identity.
    fn zero() -> Self;

    /// Returns the multiplicative identity.
    fn one() -> Self;

    /// Returns whether this is the additive identity.
    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Samples a uniformly random element.
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Samples a uniformly random nonzero element.
    #[inline]
    fn rand_nonzero<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let x = Self::rand(rng);
            if !x.is_zero() {
                return x;
            }
        }
    }

    /// Reinterprets a pseudorandom block as a field element.
    ///
    /// The result is uniform (or statistically close to uniform) when the block is.
    fn from_block(block: Block) -> Self;

    /// Returns the canonical little-endian encoding.
    fn to_le_bytes(&self) -> Vec<u8>;

    /// Decodes the canonical little-endian encoding, checking field membership.
    fn from_le_bytes(bytes: &[u8]) -> Result<Self, FieldError>;
}

/// A field which contains `S` as a subfield.
pub trait ExtensionField<S: Field>: Field {
    /// Multiplies a field element by a subfield element.
    fn mix_mul(s: S, x: Self) -> Self;
}

pub(crate) fn check_len<F: Field>(bytes: &[u8]) -> Result<(), FieldError> {
    if bytes.len() != F::BYTE_LEN {
        return Err(FieldError::InvalidLength {
            expected: F::BYTE_LEN,
            actual: bytes.len(),
        });
    }

    Ok(())
}
