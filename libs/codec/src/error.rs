//! Codec-level errors (§7). Returned to the caller; the codec itself never
//! logs — logging a dropped packet is the forwarder's job.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("truncated buffer: need {need} bytes, got {got} (context: {context})")]
    Truncated {
        need: usize,
        got: usize,
        context: String,
    },

    #[error("encoded message would be {size} bytes, exceeds limit {limit}")]
    EncodeTooLarge { size: usize, limit: usize },

    #[error("duplicate singleton TLV: type {tlv_type:#06x} appeared more than once")]
    DuplicateSingleton { tlv_type: u16 },

    #[error("top-level type mismatch: got {got:#06x}, expected one of {expected:?}")]
    TopTypeMismatch { got: u16, expected: Vec<u16> },

    #[error("Ccninfo stamp count would exceed the {limit}-hop ceiling")]
    StampOverflow { limit: usize },
}

impl CodecError {
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub fn truncated(need: usize, got: usize, context: impl Into<String>) -> Self {
        Self::Truncated {
            need,
            got,
            context: context.into(),
        }
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
