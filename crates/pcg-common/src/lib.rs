//! Common functionality for the `pcg` crates.
//!
//! Protocols are driven through a [`Context`], which owns the I/O channel to the peer. This crate
//! also provides the CPU backend used to move expansion work off the async executor, and helpers
//! for modeling ideal two-party functionalities in tests.
//!
//! This crate does not provide any cryptographic primitives, see `pcg-core` for that.

#![deny(
    unsafe_code,
    missing_docs,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all
)]

mod context;
pub mod cpu;
pub mod executor;
mod id;
#[cfg(any(test, feature = "ideal"))]
pub mod ideal;

pub use context::Context;
pub use id::ThreadId;
