use pcg_fields::FieldError;

/// An error produced by a protocol party.
///
/// Parameter errors are reported before any message is produced or consumed. An
/// [`Abort`](ProtocolError::Abort) means the peer sent a malformed message; the whole call must
/// then be abandoned and retried with fresh bootstrap correlations.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// A parameter is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    /// A punctured index is not less than the number of leaves.
    #[error("invalid alpha: {alpha} is not less than {each_num}")]
    InvalidAlpha {
        /// The punctured index.
        alpha: usize,
        /// The number of leaves.
        each_num: usize,
    },
    /// The number of supplied items does not match the batch.
    #[error("mismatched batch size: expected {expected}, got {actual}")]
    MismatchedBatchSize {
        /// The expected number of items.
        expected: usize,
        /// The actual number of items.
        actual: usize,
    },
    /// A precomputed pool holds fewer correlations than a call consumes.
    #[error("insufficient precomputation: need {expected} correlations, pool holds {actual}")]
    InsufficientPrecomputation {
        /// The number of correlations the call consumes.
        expected: usize,
        /// The number of correlations in the pool.
        actual: usize,
    },
    /// The peer sent a malformed message.
    #[error("protocol aborted: {0}")]
    Abort(String),
    /// The party was used out of order.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl ProtocolError {
    /// Returns `true` if the error is a protocol abort.
    pub fn is_abort(&self) -> bool {
        matches!(self, ProtocolError::Abort(_))
    }
}

impl From<FieldError> for ProtocolError {
    fn from(err: FieldError) -> Self {
        ProtocolError::Abort(err.to_string())
    }
}
