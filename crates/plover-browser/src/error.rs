use chromiumoxide::error::CdpError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CdpError> for Error {
    fn from(err: CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

impl From<Error> for plover_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => plover_core::Error::Io(e),
            other => plover_core::Error::Browser(other.to_string()),
        }
    }
}

/// Map a CDP failure from a DOM query, keeping "no match" distinguishable
pub(crate) fn query_error(err: CdpError, selector: &str) -> plover_core::Error {
    match err {
        CdpError::NotFound => plover_core::Error::NotFound(selector.to_string()),
        other => Error::from(other).into(),
    }
}

pub type Result<T> = std::result::Result<T, Error>;
