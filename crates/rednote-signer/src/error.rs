use std::{io, process::ExitStatus, time::Duration};
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Signing failure
///
/// Every variant means that no tokens were produced and the request must not be sent
#[derive(Debug, Error)]
pub enum Error {
    /// Error raised by a custom signer implementation
    #[error(transparent)]
    Custom(BoxError),

    /// The signing request couldn't be serialised
    #[error("Failed to encode the signing request")]
    Encode(#[source] sonic_rs::Error),

    /// The signer process exited unsuccessfully
    #[error("Signer exited with {status}: {stderr}")]
    Exit {
        /// Exit status of the process
        status: ExitStatus,
        /// Whatever the process wrote to stderr
        stderr: String,
    },

    /// The signer answered with something that isn't a signed header pair
    #[error("Signer returned malformed output")]
    InvalidOutput(#[source] sonic_rs::Error),

    /// Communicating with the signer process failed
    #[error(transparent)]
    Io(io::Error),

    /// The signer process couldn't be started
    #[error("Failed to spawn the signer process")]
    Spawn(#[source] io::Error),

    /// The signer didn't answer in time
    #[error("Signer timed out after {0:?}")]
    Timeout(Duration),
}

impl Error {
    /// Wrap an error of a custom signer implementation
    pub fn custom<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::Custom(err.into())
    }
}
