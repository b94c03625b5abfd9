//! The binary field GF(2).

use std::ops::{Add, Mul, Neg, Sub};

use pcg_core::Block;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{check_len, Field, FieldError};

/// An element of GF(2).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gf2(pub bool);

impl Add for Gf2 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Sub for Gf2 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl Neg for Gf2 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Mul for Gf2 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl From<bool> for Gf2 {
    #[inline]
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl Field for Gf2 {
    const BYTE_LEN: usize = 1;

    #[inline]
    fn zero() -> Self {
        Self(false)
    }

    #[inline]
    fn one() -> Self {
        Self(true)
    }

    #[inline]
    fn rand<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen())
    }

    #[inline]
    fn from_block(block: Block) -> Self {
        Self(block.lsb())
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        vec![self.0 as u8]
    }

    fn from_le_bytes(bytes: &[u8]) -> Result<Self, FieldError> {
        check_len::<Self>(bytes)?;
        match bytes[0] {
            0 => Ok(Self(false)),
            1 => Ok(Self(true)),
            _ => Err(FieldError::NotMember),
        }
    }
}
