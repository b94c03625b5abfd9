//! Low-level crate containing the core of the silent correlation generators.
//!
//! A batch of punctured PRFs ([`pprf`]) turns `O(log N)` bootstrap correlations ([`bootstrap`])
//! into `N` correlated pseudorandom values per instance, which are then materialized into
//! single-point COT ([`spcot`]) or single-point subfield VOLE ([`spvole`]) outputs.
//!
//! Everything in this crate is sans-I/O: the protocol parties produce and consume messages, and
//! it is up to the caller to move them between parties. See the `pcg-ot` crate for async drivers.
//!
//! # ⚠️ Warning ⚠️
//!
//! Bootstrap correlations must never be reused across calls. Failing to uphold this, or any of the
//! other invariants documented on these low-level APIs, breaks the security of the outputs.

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

use serde::{Deserialize, Serialize};

pub mod bootstrap;
mod error;
pub mod ideal;
pub mod pprf;
pub mod spcot;
pub mod spvole;
#[cfg(any(test, feature = "test-utils"))]
pub mod test;

pub use error::ProtocolError;

/// A transfer identifier.
///
/// Every protocol call is tagged with its own transfer ID, and so is every message of that call.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TransferId(u64);

impl std::fmt::Display for TransferId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TransferId({})", self.0)
    }
}

impl TransferId {
    /// The length of the byte encoding.
    pub const LEN: usize = 8;

    /// Returns the current transfer ID, incrementing `self` in-place.
    pub fn next_id(&mut self) -> Self {
        let id = *self;
        self.0 += 1;
        id
    }

    /// Checks the ID of a call opened by the peer.
    ///
    /// The opening party advances its ID even when the call later aborts on this side, so the
    /// peer may be ahead of `self` but never behind.
    pub(crate) fn check_peer(&self, peer: TransferId) -> Result<(), ProtocolError> {
        if peer < *self {
            return Err(ProtocolError::Abort(format!(
                "received message for {peer}, which is behind {self}"
            )));
        }

        Ok(())
    }

    /// Returns the little-endian byte encoding.
    pub fn to_bytes(self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Decodes a transfer ID from its little-endian byte encoding.
    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }
}

/// The output the sender receives from the COT functionality.
#[derive(Debug)]
pub struct COTSenderOutput<T> {
    /// The transfer id.
    pub id: TransferId,
    /// The `0-bit` messages.
    pub msgs: Vec<T>,
}

/// The output the receiver receives from the COT functionality.
#[derive(Debug)]
pub struct COTReceiverOutput<T> {
    /// The transfer id.
    pub id: TransferId,
    /// The chosen messages.
    pub msgs: Vec<T>,
}

/// The output the sender receives from the random COT functionality.
#[derive(Debug)]
pub struct RCOTSenderOutput<T> {
    /// The transfer id.
    pub id: TransferId,
    /// The `0-bit` messages.
    pub msgs: Vec<T>,
}

/// The output the receiver receives from the random COT functionality.
#[derive(Debug)]
pub struct RCOTReceiverOutput<T, U> {
    /// The transfer id.
    pub id: TransferId,
    /// The choice bits.
    pub choices: Vec<T>,
    /// The chosen messages.
    pub msgs: Vec<U>,
}

/// The output the sender receives from the random subfield VOLE functionality.
///
/// For every `i`, `w[i] = v[i] + u[i]·Δ`, where `v` is the receiver's output.
#[derive(Debug)]
pub struct VoleSenderOutput<S, F> {
    /// The transfer id.
    pub id: TransferId,
    /// The random subfield elements.
    pub u: Vec<S>,
    /// The field elements.
    pub w: Vec<F>,
}

/// The output the receiver receives from the random subfield VOLE functionality.
#[derive(Debug)]
pub struct VoleReceiverOutput<F> {
    /// The transfer id.
    pub id: TransferId,
    /// The field elements.
    pub v: Vec<F>,
}

/// The output the sender receives from the SPCOT functionality.
///
/// The sender knows every value of every instance.
#[derive(Debug)]
pub struct SPCOTSenderOutput<T> {
    /// The transfer id.
    pub id: TransferId,
    /// The values of each instance.
    pub v: Vec<Vec<T>>,
}

/// The output the receiver receives from the SPCOT functionality.
///
/// For each instance `w[α] = v[α] ⊕ Δ`, and `w[j] = v[j]` everywhere else.
#[derive(Debug)]
pub struct SPCOTReceiverOutput<T> {
    /// The transfer id.
    pub id: TransferId,
    /// The values of each instance.
    pub w: Vec<Vec<T>>,
    /// The punctured index of each instance.
    pub alphas: Vec<usize>,
}

/// The output the sender receives from the single-point VOLE functionality.
///
/// The sender holds the sparse vector `x`, nonzero only at `α`, and `t = q + Δ·x`.
#[derive(Debug)]
pub struct SpVoleSenderOutput<S, F> {
    /// The transfer id.
    pub id: TransferId,
    /// The punctured index of each instance.
    pub alphas: Vec<usize>,
    /// The nonzero entry `x[α]` of each instance.
    pub betas: Vec<S>,
    /// The values `t` of each instance.
    pub t: Vec<Vec<F>>,
}

/// The output the receiver receives from the single-point VOLE functionality.
#[derive(Debug)]
pub struct SpVoleReceiverOutput<F> {
    /// The transfer id.
    pub id: TransferId,
    /// The values `q` of each instance.
    pub q: Vec<Vec<F>>,
}
