//!
//! Boundary to the request signing algorithm
//!
//! The algorithm producing the `X-s` and `X-t` tokens is proprietary and lives outside of this workspace.
//! This crate only defines the contract ([`Signer`]) and ships an implementation delegating to an external program ([`CommandSigner`]).
//!

#[macro_use]
extern crate tracing;

use serde::{Deserialize, Serialize};
use sonic_rs::Value;
use std::{future::Future, sync::Arc};

pub use self::command::{CommandSigner, DEFAULT_SIGNER_TIMEOUT};
pub use self::error::{BoxError, Error, Result};

mod command;
mod error;

pub mod cookie;

/// Everything the signing algorithm gets to see of a request
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SignRequest<'a> {
    /// Request path (`/api/...`), without the host
    pub path: &'a str,

    /// JSON payload of the request
    ///
    /// This has to be the exact value that ends up being serialised as the body
    pub payload: Option<&'a Value>,

    /// Normalised cookie list (see [`cookie::normalise`])
    pub cookies: Vec<&'a str>,
}

impl<'a> SignRequest<'a> {
    /// Construct a signing request from a raw `Cookie` header value
    #[must_use]
    pub fn new(path: &'a str, payload: Option<&'a Value>, cookie_header: &'a str) -> Self {
        Self {
            path,
            payload,
            cookies: cookie::normalise(cookie_header),
        }
    }
}

/// Token pair produced by the signing algorithm
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub struct SignedHeaders {
    /// Value of the `X-s` header
    #[serde(rename = "X-s")]
    pub x_s: String,

    /// Value of the `X-t` header. Timestamp-like, transmitted as a decimal string
    #[serde(rename = "X-t")]
    pub x_t: u64,
}

/// Request signer
///
/// Has to be invoked for every request since the tokens are only valid for the request they were computed for
pub trait Signer: Send + Sync {
    /// Compute the token pair for the request
    fn sign(
        &self,
        request: &SignRequest<'_>,
    ) -> impl Future<Output = Result<SignedHeaders>> + Send;
}

impl<S> Signer for Arc<S>
where
    S: Signer,
{
    fn sign(
        &self,
        request: &SignRequest<'_>,
    ) -> impl Future<Output = Result<SignedHeaders>> + Send {
        (**self).sign(request)
    }
}
