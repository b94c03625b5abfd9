//! The binary extension field GF(2^64).

use std::ops::{Add, Mul, Neg, Sub};

use pcg_core::Block;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{check_len, clmul::clmul64, ExtensionField, Field, FieldError, Gf2};

/// The low terms of the reduction polynomial `x^64 + x^4 + x^3 + x + 1`.
const R: u64 = 0x1b;

/// An element of GF(2^64).
#[allow(non_camel_case_types)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gf2_64(pub u64);

#[inline]
fn reduce(x: u128) -> u64 {
    let (lo, hi) = (x as u64, (x >> 64) as u64);
    let t = clmul64(hi, R);
    let u = clmul64((t >> 64) as u64, R);

    lo ^ (t as u64) ^ (u as u64)
}

impl Add for Gf2_64 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Sub for Gf2_64 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl Neg for Gf2_64 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Mul for Gf2_64 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(reduce(clmul64(self.0, rhs.0)))
    }
}

impl Field for Gf2_64 {
    const BYTE_LEN: usize = 8;

    #[inline]
    fn zero() -> Self {
        Self(0)
    }

    #[inline]
    fn one() -> Self {
        Self(1)
    }

    #[inline]
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen())
    }

    #[inline]
    fn from_block(block: Block) -> Self {
        Self(u128::from(block) as u64)
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        self.0.to_le_bytes().to_vec()
    }

    fn from_le_bytes(bytes: &[u8]) -> Result<Self, FieldError> {
        check_len::<Self>(bytes)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Ok(Self(u64::from_le_bytes(buf)))
    }
}

impl ExtensionField<Gf2> for Gf2_64 {
    #[inline]
    fn mix_mul(s: Gf2, x: Self) -> Self {
        if s.0 {
            x
        } else {
            Self::zero()
        }
    }
}

impl ExtensionField<Gf2_64> for Gf2_64 {
    #[inline]
    fn mix_mul(s: Gf2_64, x: Self) -> Self {
        s * x
    }
}
