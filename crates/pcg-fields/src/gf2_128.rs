//! The binary extension field GF(2^128).

use std::ops::{Add, Mul, Neg, Sub};

use pcg_core::Block;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{check_len, clmul::clmul128, ExtensionField, Field, FieldError, Gf2};

/// The low terms of the reduction polynomial `x^128 + x^7 + x^2 + x + 1`.
const R: u128 = 0x87;

/// An element of GF(2^128).
///
/// Blocks embed into this field directly, so binary COT correlations are VOLE correlations over
/// GF(2^128) with subfield GF(2).
#[allow(non_camel_case_types)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gf2_128(pub u128);

#[inline]
fn reduce(lo: u128, hi: u128) -> u128 {
    let (t_lo, t_hi) = clmul128(hi, R);
    let (u_lo, _) = clmul128(t_hi, R);

    lo ^ t_lo ^ u_lo
}

impl Add for Gf2_128 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl Sub for Gf2_128 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl Neg for Gf2_128 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        self
    }
}

impl Mul for Gf2_128 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (lo, hi) = clmul128(self.0, rhs.0);
        Self(reduce(lo, hi))
    }
}

impl From<Block> for Gf2_128 {
    #[inline]
    fn from(block: Block) -> Self {
        Self(block.into())
    }
}

impl From<Gf2_128> for Block {
    #[inline]
    fn from(x: Gf2_128) -> Self {
        Block::from(x.0)
    }
}

impl Field for Gf2_128 {
    const BYTE_LEN: usize = 16;

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
        block.into()
    }

    fn to_le_bytes(&self) -> Vec<u8> {
        self.0.to_le_bytes().to_vec()
    }

    fn from_le_bytes(bytes: &[u8]) -> Result<Self, FieldError> {
        check_len::<Self>(bytes)?;
        let mut buf = [0u8; 16];
        buf.copy_from_slice(bytes);
        Ok(Self(u128::from_le_bytes(buf)))
    }
}

impl ExtensionField<Gf2> for Gf2_128 {
    #[inline]
    fn mix_mul(s: Gf2, x: Self) -> Self {
        if s.0 {
            x
        } else {
            Self::zero()
        }
    }
}

impl ExtensionField<Gf2_128> for Gf2_128 {
    #[inline]
    fn mix_mul(s: Gf2_128, x: Self) -> Self {
        s * x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    /// Shift-and-add multiplication, reducing after every doubling.
    fn mul_bitwise(mut a: u128, b: u128) -> u128 {
        let mut acc = 0;
        for i in 0..128 {
            if (b >> i) & 1 == 1 {
                acc ^= a;
            }
            let carry = a >> 127 == 1;
            a <<= 1;
            if carry {
                a ^= R;
            }
        }
        acc
    }

    #[rstest]
    // x^127 * x = x^128 = x^7 + x^2 + x + 1.
    #[case::wrap(1 << 127, 2, R)]
    #[case::wrap_twice(1 << 127, 4, R << 1)]
    #[case::square_of_half(1 << 64, 1 << 64, R)]
    #[case::square_of_top(1 << 127, 1 << 127, 0xc000_0000_0000_0000_0000_0000_0000_1067)]
    // x * (x^127 + x^6 + x + 1) = 1.
    #[case::inverse_of_x(2, (1 << 127) | 0x43, 1)]
    #[case::dense(
        0x0123_4567_89ab_cdef_fedc_ba98_7654_3210,
        0xdead_beef_cafe_babe_0011_2233_4455_6677,
        0xfa99_0997_bd53_944d_1a15_76f8_0d93_b1dd
    )]
    fn test_gf2_128_mul_known_answer(#[case] a: u128, #[case] b: u128, #[case] expected: u128) {
        assert_eq!(Gf2_128(a) * Gf2_128(b), Gf2_128(expected));
        assert_eq!(mul_bitwise(a, b), expected);
    }

    #[test]
    fn test_gf2_128_mul_matches_bitwise() {
        let mut rng = ChaCha12Rng::seed_from_u64(0);

        for _ in 0..256 {
            let a: u128 = rng.gen();
            let b: u128 = rng.gen();
            assert_eq!(Gf2_128(a) * Gf2_128(b), Gf2_128(mul_bitwise(a, b)));
        }
    }

    #[test]
    fn test_gf2_128_block_roundtrip() {
        let b: Block = rand::random();
        assert_eq!(Block::from(Gf2_128::from_block(b)), b);
    }
}
