use pcg_ot_core::ProtocolError;

use crate::OTError;

/// A single-point VOLE sender error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs, clippy::enum_variant_names)]
pub enum SenderError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    CoreError(#[from] ProtocolError),
    #[error("base VOLE error: {0}")]
    BaseVoleError(#[from] OTError),
    #[error("punctured PRF error: {0}")]
    PprfError(#[from] crate::ReceiverError),
}

impl SenderError {
    /// Returns `true` if the peer sent a malformed message.
    pub fn is_abort(&self) -> bool {
        match self {
            SenderError::CoreError(err) => err.is_abort(),
            SenderError::PprfError(err) => err.is_abort(),
            _ => false,
        }
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

/// A single-point VOLE receiver error.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs, clippy::enum_variant_names)]
pub enum ReceiverError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error(transparent)]
    CoreError(#[from] ProtocolError),
    #[error("base VOLE error: {0}")]
    BaseVoleError(#[from] OTError),
    #[error("punctured PRF error: {0}")]
    PprfError(#[from] crate::SenderError),
}

impl ReceiverError {
    /// Returns `true` if the peer sent a malformed message.
    pub fn is_abort(&self) -> bool {
        match self {
            ReceiverError::CoreError(err) => err.is_abort(),
            ReceiverError::PprfError(err) => err.is_abort(),
            _ => false,
        }
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
