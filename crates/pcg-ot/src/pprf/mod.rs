//! Async punctured PRF.
//!
//! A batch is one bootstrap request followed by the mask bits from the receiver and one level
//! correction per tree level from the sender. Both parties can instead take their bootstrap COTs
//! from a precomputed pool, which skips the bootstrap request but not the mask bits.

mod receiver;
mod sender;

pub use receiver::Receiver;
pub use sender::Sender;

pub(crate) use receiver::StateError as ReceiverStateError;
pub(crate) use sender::StateError as SenderStateError;
