//! Ccninfo-engine-level errors (§7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CcninfoError {
    #[error(transparent)]
    Codec(#[from] codec::CodecError),

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("reply dropped: {reason}")]
    ReplyRejected { reason: String },
}

pub type CcninfoResult<T> = Result<T, CcninfoError>;
