//!
//! Client for the RedNote (Xiaohongshu) web API
//!
//! Requests to the web API have to carry the `X-s` and `X-t` signing headers.
//! The [`Dispatcher`] takes care of normalising the session cookie, invoking the [`Signer`](rednote_signer::Signer),
//! assembling the header set and decoding the response.
//!

#[macro_use]
extern crate tracing;

pub mod consts;
pub mod header;

mod comment;
mod dispatcher;
mod error;
mod response;

pub use self::comment::{AtUser, CommentParams};
pub use self::dispatcher::Dispatcher;
pub use self::error::{Error, ErrorKind, Result};
pub use self::header::HeaderTemplate;
pub use self::response::ApiResponse;
