use crate::{
    consts::DEFAULT_HOST,
    error::{Error, Result},
    header::HeaderTemplate,
};
use http::{Method, Request};
use rednote_http_client::{Body, Client};
use rednote_signer::{SignRequest, Signer};
use serde::{de::DeserializeOwned, Serialize};
use typed_builder::TypedBuilder;

/// Signs and sends requests to the web API
///
/// Holds no per-request state. Every call signs with fresh tokens and builds its own header set.
#[derive(Clone, TypedBuilder)]
pub struct Dispatcher<S> {
    #[builder(default)]
    header_template: HeaderTemplate,
    #[builder(default = DEFAULT_HOST.to_owned(), setter(into))]
    host: String,
    http_client: Client,
    signer: S,
}

impl<S> Dispatcher<S>
where
    S: Signer,
{
    /// Host requests are sent to by [`Self::post`]
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Sign and POST a JSON payload to a path of the configured host
    ///
    /// # Errors
    ///
    /// See [`Self::post_to`]
    pub async fn post<P, R>(&self, path: &str, payload: &P, cookie: &str) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        self.post_to(&self.host, path, payload, cookie).await
    }

    /// Sign and POST a JSON payload to `{host}{path}`, decoding the JSON response
    ///
    /// The payload is converted into a JSON value once. That exact value is handed to the signer and serialised as the body,
    /// so the transmitted bytes always match what was signed.
    ///
    /// # Errors
    ///
    /// - The cookie is empty (no signer or network call happens in that case)
    /// - The payload failed to serialise
    /// - The signer failed
    /// - The request failed on the transport level
    /// - The server responded with a non-2xx status (the body is kept, invalid UTF-8 replaced)
    /// - The response body isn't JSON (or doesn't match `R`)
    #[instrument(skip_all, fields(%host, %path))]
    pub async fn post_to<P, R>(
        &self,
        host: &str,
        path: &str,
        payload: &P,
        cookie: &str,
    ) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        if cookie.is_empty() {
            return Err(Error::MissingCredentials);
        }

        let payload = sonic_rs::to_value(payload).map_err(Error::Serialise)?;
        let body = sonic_rs::to_string(&payload).map_err(Error::Serialise)?;

        let sign_request = SignRequest::new(path, Some(&payload), cookie);
        let signed = self
            .signer
            .sign(&sign_request)
            .await
            .inspect_err(|error| warn!(?error, "failed to sign request"))?;

        let headers = self.header_template.overlay(cookie, &signed)?;
        let mut request = Request::builder()
            .method(Method::POST)
            .uri(format!("{host}{path}"))
            .body(Body::from(body))?;
        *request.headers_mut() = headers;

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(Error::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.map_err(Error::Network)?;
            error!(%status, %body, "unexpected response status");
            return Err(Error::UnexpectedStatus { status, body });
        }
        debug!(%status, "successfully executed http request");

        let body = response.bytes().await.map_err(Error::Network)?;
        sonic_rs::from_slice(&body).map_err(Error::InvalidResponseBody)
    }
}
