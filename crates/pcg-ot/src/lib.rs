//! Async drivers for the silent correlation generators.
//!
//! Each protocol party owns its sans-I/O core from `pcg-ot-core` and drives it over a
//! [`Context`](pcg_common::Context), one network message per protocol step. Bootstrap
//! correlations come from any [`RandomCOTSender`]/[`RandomCOTReceiver`] (and, for VOLE, any
//! [`RandomVoleSender`]/[`RandomVoleReceiver`]), or from a precomputed pool.

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

mod error;
#[cfg(any(test, feature = "ideal"))]
pub mod ideal;
pub mod pprf;
pub mod spcot;
pub mod spvole;

use async_trait::async_trait;

pub use error::{ReceiverError, SenderError};
pub use pcg_ot_core::{
    bootstrap::{ReceiverPool, SenderPool},
    pprf::{PprfConfig, PprfConfigBuilder},
    COTReceiverOutput, COTSenderOutput, ProtocolError, RCOTReceiverOutput, RCOTSenderOutput,
    SPCOTReceiverOutput, SPCOTSenderOutput, SpVoleReceiverOutput, SpVoleSenderOutput, TransferId,
    VoleReceiverOutput, VoleSenderOutput,
};

/// An oblivious transfer error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum OTError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("sender error: {0}")]
    SenderError(Box<dyn std::error::Error + Send + Sync>),
    #[error("receiver error: {0}")]
    ReceiverError(Box<dyn std::error::Error + Send + Sync>),
}

/// A random correlated oblivious transfer sender.
#[async_trait]
pub trait RandomCOTSender<Ctx, T> {
    /// Obliviously transfers random correlated messages to the receiver.
    ///
    /// Returns the `0`-bit messages that were obliviously transferred.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `count` - The number of correlated messages to obliviously transfer.
    async fn send_random_correlated(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<RCOTSenderOutput<T>, OTError>;
}

/// A random correlated oblivious transfer receiver.
#[async_trait]
pub trait RandomCOTReceiver<Ctx, T, U> {
    /// Obliviously receives correlated messages with random choices.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `count` - The number of correlated messages to obliviously receive.
    async fn receive_random_correlated(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<RCOTReceiverOutput<T, U>, OTError>;
}

/// A random subfield VOLE sender, holding `(u, w)`.
#[async_trait]
pub trait RandomVoleSender<Ctx, S, F> {
    /// Outputs random subfield VOLE correlations.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `count` - The number of correlations.
    async fn send_random_vole(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<VoleSenderOutput<S, F>, OTError>;
}

/// A random subfield VOLE receiver, holding `Δ` and `v`.
#[async_trait]
pub trait RandomVoleReceiver<Ctx, F> {
    /// Outputs random subfield VOLE correlations.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `count` - The number of correlations.
    async fn receive_random_vole(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<VoleReceiverOutput<F>, OTError>;
}
