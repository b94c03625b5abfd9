//! Single-point subfield VOLE from the punctured PRF.
//!
//! The VOLE sender holds the sparse vector `x = β·e_α` with `β ∈ S \ {0}` and plays the punctured
//! PRF receiver. The VOLE receiver holds `Δ ∈ F` and plays the punctured PRF sender. Both parties
//! read their leaves as field elements, and the receiver's aggregate correction
//! `d = v - a'·Δ - Σ q[j]` lets the sender fix up its value at `α` so that `t = q + Δ·x`.
//!
//! Each instance consumes one base subfield VOLE correlation `w = v + u·Δ`, with which the sender
//! masks `β` as `a' = β - u`.

pub mod msgs;
mod receiver;
mod sender;

pub use receiver::Receiver;
pub use sender::{Sender, SenderBatch};
