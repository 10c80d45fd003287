//! Errors reported while parsing a cabinet index.

use std::io;

use thiserror::Error;

/// A Result type alias over [`CabError`].
pub type Result<V> = std::result::Result<V, CabError>;

/// The ways parsing a cabinet can fail.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CabError {
    /// The caller supplied an argument that can never describe a cabinet,
    /// such as a negative length.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The first four bytes were not "MSCF".
    #[error("not a cabinet file (signature was {0:#010x})")]
    InvalidSignature(u32),
    /// Reading or seeking the underlying source failed.  Running out of
    /// bytes before a field or string ends is reported here with
    /// [`io::ErrorKind::UnexpectedEof`].
    #[error("an upstream reader returned an error: {0}")]
    Io(#[from] io::Error),
    /// The cabinet's tables refer to each other inconsistently.
    #[error("malformed cabinet: {0}")]
    StructuralViolation(String),
}

impl CabError {
    /// Returns true if this error was caused by the input ending before the
    /// cabinet's declared layout did.
    pub fn is_truncated(&self) -> bool {
        match self {
            CabError::Io(error) => {
                error.kind() == io::ErrorKind::UnexpectedEof
            }
            _ => false,
        }
    }
}
