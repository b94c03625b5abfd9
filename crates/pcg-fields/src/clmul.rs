//! Portable carry-less multiplication.

/// Carry-less multiplication of two 64-bit polynomials.
#[inline]
pub(crate) fn clmul64(a: u64, b: u64) -> u128 {
    let a = a as u128;
    (0..64u32)
        .filter(|&i| (b >> i) & 1 == 1)
        .fold(0u128, |acc, i| acc ^ (a << i))
}

/// Carry-less multiplication of two 128-bit polynomials, returning `(low, high)`.
#[inline]
pub(crate) fn clmul128(a: u128, b: u128) -> (u128, u128) {
    let (a0, a1) = (a as u64, (a >> 64) as u64);
    let (b0, b1) = (b as u64, (b >> 64) as u64);

    let z0 = clmul64(a0, b0);
    let z2 = clmul64(a1, b1);
    let z1 = clmul64(a0, b1) ^ clmul64(a1, b0);

    (z0 ^ (z1 << 64), z2 ^ (z1 >> 64))
}
