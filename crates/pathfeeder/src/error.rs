use std::fmt;
use std::io;

use crate::service::Mover;

/// Errors that abort a single request.
///
/// Expected misses (unreachable destination, unknown path handle, vertex
/// index past the end) are not errors; they surface as `None`.
#[derive(Debug)]
pub enum Error {
    /// A cost entry refers to a variable slot the host does not have.
    InvalidVariable { slot: i32 },
    /// The host could not place the requested mover on the current map.
    UnknownMover(Mover),
    /// Cost configuration could not be written or read back.
    Io(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVariable { slot } => write!(f, "variable slot {slot} does not exist"),
            Self::UnknownMover(mover) => write!(f, "mover {mover} is not on the current map"),
            Self::Io(e) => write!(f, "cost configuration: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
