use http::StatusCode;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of an [`Error`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// No session cookie was supplied
    MissingCredentials,

    /// The signer failed to produce tokens
    SignerUnavailable,

    /// Transport-level failure (connection, TLS, timeout, reading the body)
    NetworkFailure,

    /// The server answered, but not with a successful JSON response
    UnexpectedResponse,

    /// The request couldn't be constructed from the given inputs
    InvalidRequest,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] http::Error),

    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

    #[error("Response body isn't valid JSON")]
    InvalidResponseBody(#[source] sonic_rs::Error),

    #[error("Missing credentials: the cookie is empty")]
    MissingCredentials,

    #[error(transparent)]
    Network(rednote_http_client::Error),

    #[error("Failed to serialise the payload")]
    Serialise(#[source] sonic_rs::Error),

    #[error(transparent)]
    Signer(#[from] rednote_signer::Error),

    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(..) | Self::InvalidHeaderValue(..) | Self::Serialise(..) => {
                ErrorKind::InvalidRequest
            }
            Self::InvalidResponseBody(..) | Self::UnexpectedStatus { .. } => {
                ErrorKind::UnexpectedResponse
            }
            Self::MissingCredentials => ErrorKind::MissingCredentials,
            Self::Network(..) => ErrorKind::NetworkFailure,
            Self::Signer(..) => ErrorKind::SignerUnavailable,
        }
    }
}

