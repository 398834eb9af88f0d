use std::error;
use std::fmt;
use std::result;

/// Errors returned by strict lookups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The requested key is not present.
    KeyNotFound,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::KeyNotFound => write!(f, "key does not exist"),
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;
