//! The prime field `Z_p` with `p = 2^61 - 1`.

use std::ops::{Add, Mul, Neg, Sub};

use pcg_core::Block;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{check_len, ExtensionField, Field, FieldError};

/// An element of `Z_p` for the Mersenne prime `p = 2^61 - 1`.
///
/// Decoding (including deserialization) rejects values which are not reduced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Zp64(u64);

impl Zp64 {
    /// The modulus.
    pub const MODULUS: u64 = (1 << 61) - 1;

    /// Creates a new element, reducing `value` modulo `p`.
    #[inline]
    pub fn new(value: u64) -> Self {
        Self(value % Self::MODULUS)
    }

    /// Returns the canonical representative.
    #[inline]
    pub fn value(&self) -> u64 {
        self.0
    }

    #[inline]
    fn reduce(x: u128) -> u64 {
        let p = Self::MODULUS as u128;
        let x = (x & p) + (x >> 61);
        let x = (x & p) + (x >> 61);
        let x = x as u64;
        if x >= Self::MODULUS {
            x - Self::MODULUS
        } else {
            x
        }
    }
}

impl TryFrom<u64> for Zp64 {
    type Error = FieldError;

    #[inline]
    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value >= Self::MODULUS {
            return Err(FieldError::NotMember);
        }

        Ok(Self(value))
    }
}

impl From<Zp64> for u64 {
    #[inline]
    fn from(x: Zp64) -> Self {
        x.0
    }
}

impl Add for Zp64 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let x = self.0 + rhs.0;
        if x >= Self::MODULUS {
            Self(x - Self::MODULUS)
        } else {
            Self(x)
        }
    }
}

impl Sub for Zp64 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Zp64 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        if self.0 == 0 {
            self
        } else {
            Self(Self::MODULUS - self.0)
        }
    }
}

impl Mul for Zp64 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self(Self::reduce(self.0 as u128 * rhs.0 as u128))
    }
}

impl Field for Zp64 {
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
        Self(rng.gen_range(0..Self::MODULUS))
    }

    #[inline]
    fn from_block(block: Block) -> Self {
        Self((u128::from(block) % Self::MODULUS as u128) as u64)
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        self.0.to_le_bytes().to_vec()
    }

    fn from_le_bytes(bytes: &[u8]) -> Result<Self, FieldError> {
        check_len::<Self>(bytes)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(bytes);
        Self::try_from(u64::from_le_bytes(buf))
    }
}

impl ExtensionField<Zp64> for Zp64 {
    #[inline]
    fn mix_mul(s: Zp64, x: Self) -> Self {
        s * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zp64_wraps() {
        let max = Zp64::new(Zp64::MODULUS - 1);
        assert_eq!(max + Zp64::one(), Zp64::zero());
        assert_eq!(max * max, Zp64::one());
        assert_eq!(Zp64::zero() - Zp64::one(), max);
    }

    #[test]
    fn test_zp64_rejects_unreduced() {
        assert_eq!(
            Zp64::from_le_bytes(&Zp64::MODULUS.to_le_bytes()),
            Err(FieldError::NotMember)
        );
        assert_eq!(
            Zp64::from_le_bytes(&u64::MAX.to_le_bytes()),
            Err(FieldError::NotMember)
        );
    }
}
