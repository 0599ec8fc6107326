//! FIB-level errors (§7).

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FibError {
    #[error("no FIB entry registered for the given name")]
    NotRegistered,

    #[error("invalid route message: {reason}")]
    InvalidRouteMessage { reason: String },

    #[error(transparent)]
    Codec(#[from] codec::CodecError),
}

pub type FibResult<T> = Result<T, FibError>;
