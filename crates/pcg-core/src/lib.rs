//! Core cryptographic primitives for pseudorandom correlation generators.
//!
//! This crate provides the [`Block`] type, fixed-key AES hash functions, an AES-CTR PRG and the
//! half-tree GGM expansion used by the punctured PRF protocols in `pcg-ot-core`.

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

pub mod aes;
pub mod block;
pub mod ggm;
pub mod prg;

pub use block::Block;
