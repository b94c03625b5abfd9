use pcg_ot_core::ProtocolError;

use crate::OTError;

/// A sender error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs, clippy::enum_variant_names)]
pub enum SenderError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    CoreError(#[from] ProtocolError),
    #[error("bootstrap error: {0}")]
    BootstrapError(#[from] OTError),
    #[error("{0}")]
    StateError(String),
}

impl SenderError {
    /// Returns `true` if the peer sent a malformed message.
    pub fn is_abort(&self) -> bool {
        matches!(self, SenderError::CoreError(err) if err.is_abort())
    }
}

impl From<SenderError> for OTError {
    fn from(err: SenderError) -> Self {
        match err {
            SenderError::IOError(e) => e.into(),
            e => OTError::SenderError(Box::new(e)),
        }
    }
}

impl From<crate::pprf::SenderStateError> for SenderError {
    fn from(err: crate::pprf::SenderStateError) -> Self {
        SenderError::StateError(err.to_string())
    }
}

/// A receiver error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs, clippy::enum_variant_names)]
pub enum ReceiverError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    CoreError(#[from] ProtocolError),
    #[error("bootstrap error: {0}")]
    BootstrapError(#[from] OTError),
    #[error("{0}")]
    StateError(String),
}

impl ReceiverError {
    /// Returns `true` if the peer sent a malformed message.
    pub fn is_abort(&self) -> bool {
        matches!(self, ReceiverError::CoreError(err) if err.is_abort())
    }
}

impl From<ReceiverError> for OTError {
    fn from(err: ReceiverError) -> Self {
        match err {
            ReceiverError::IOError(e) => e.into(),
            e => OTError::ReceiverError(Box::new(e)),
        }
    }
}

impl From<crate::pprf::ReceiverStateError> for ReceiverError {
    fn from(err: crate::pprf::ReceiverStateError) -> Self {
        ReceiverError::StateError(err.to_string())
    }
}
