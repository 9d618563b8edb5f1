//! Errors produced while building a validation sequence.

use std::fmt;

use delegated_sign_runtime::{CodecError, RuntimeError};
use delegated_sign_types::{ChainId, DelegationMechanism};

/// Every failure is terminal for the build attempt; nothing is retried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationSequenceError {
    /// No decoding context is available for the chain.
    RuntimeUnavailable { chain_id: ChainId, reason: String },

    /// A call or wrapper argument did not decode against the runtime.
    Decoding(CodecError),

    /// The call nesting disagrees with the expected delegation path at `depth`.
    ///
    /// `mechanism` is the path component found at that depth.
    UnexpectedDelegationType {
        depth: usize,
        mechanism: DelegationMechanism,
    },

    /// The call is wrapped deeper than the delegation path reaches.
    UnexpectedEndOfChain { depth: usize },

    /// The delegation path exceeds the configured nesting limit.
    DelegationPathTooLong { length: usize, max: usize },
}

impl ValidationSequenceError {
    /// Whether the failure means the call does not match the expected signers.
    ///
    /// Such a call must never be signed.
    pub fn is_security_relevant(&self) -> bool {
        matches!(
            self,
            ValidationSequenceError::UnexpectedDelegationType { .. }
                | ValidationSequenceError::UnexpectedEndOfChain { .. }
        )
    }
}

impl fmt::Display for ValidationSequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationSequenceError::RuntimeUnavailable { chain_id, reason } => {
                write!(f, "runtime unavailable for chain {}: {}", chain_id, reason)
            }
            ValidationSequenceError::Decoding(err) => write!(f, "decoding error: {}", err),
            ValidationSequenceError::UnexpectedDelegationType { depth, mechanism } => write!(
                f,
                "unexpected delegation at depth {}: path expects {}",
                depth, mechanism
            ),
            ValidationSequenceError::UnexpectedEndOfChain { depth } => write!(
                f,
                "unexpected end of delegation chain at depth {}",
                depth
            ),
            ValidationSequenceError::DelegationPathTooLong { length, max } => write!(
                f,
                "delegation path has {} components, limit is {}",
                length, max
            ),
        }
    }
}

impl std::error::Error for ValidationSequenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ValidationSequenceError::Decoding(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CodecError> for ValidationSequenceError {
    fn from(err: CodecError) -> Self {
        ValidationSequenceError::Decoding(err)
    }
}

impl From<RuntimeError> for ValidationSequenceError {
    fn from(err: RuntimeError) -> Self {
        match err {
            RuntimeError::Unavailable { chain_id, reason } => {
                ValidationSequenceError::RuntimeUnavailable { chain_id, reason }
            }
            RuntimeError::InvalidMetadata { chain_id, message } => {
                ValidationSequenceError::RuntimeUnavailable {
                    chain_id,
                    reason: format!("invalid metadata: {}", message),
                }
            }
        }
    }
}
