#![allow(dead_code)]

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{HeaderMap, Method, Request, Response, StatusCode, Uri};
use rednote_api::Dispatcher;
use rednote_http_client::{Body, Client};
use rednote_signer::{SignRequest, SignedHeaders, Signer};
use std::{
    convert::Infallible,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};
use tower::service_fn;

pub const COOKIE: &str = "a1=187d2defea8dz1fgwydnci40kw265ikh9fsxn66qs50000726043;webId=ba57f42593b9e55840a289fa0b755374;web_session=040069b5;";

/// What the signer got to see, in owned form
#[derive(Clone, Debug, PartialEq)]
pub struct SeenSignRequest {
    pub path: String,
    pub payload: Option<String>,
    pub cookies: Vec<String>,
}

#[derive(Default)]
pub struct StubSigner {
    pub fail: bool,
    pub x_s: Option<&'static str>,
    pub seen: Mutex<Vec<SeenSignRequest>>,
}

impl StubSigner {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_x_s(x_s: &'static str) -> Self {
        Self {
            x_s: Some(x_s),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl Signer for StubSigner {
    async fn sign(&self, request: &SignRequest<'_>) -> rednote_signer::Result<SignedHeaders> {
        self.seen.lock().unwrap().push(SeenSignRequest {
            path: request.path.to_owned(),
            payload: request
                .payload
                .map(|payload| sonic_rs::to_string(payload).unwrap()),
            cookies: request.cookies.iter().map(|&cookie| cookie.to_owned()).collect(),
        });

        if self.fail {
            return Err(rednote_signer::Error::custom("signing script unavailable"));
        }

        Ok(SignedHeaders {
            x_s: self.x_s.unwrap_or("sig").into(),
            x_t: 1_690_000_000,
        })
    }
}

#[derive(Clone, Debug)]
pub struct CapturedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<CapturedRequest>>>);

impl Captured {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn single(&self) -> CapturedRequest {
        let requests = self.0.lock().unwrap();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0].clone()
    }
}

/// Client whose transport records every request and answers with a fixed response
pub fn mock_client(status: StatusCode, response_body: &'static str) -> (Client, Captured) {
    mock_client_bytes(status, response_body.as_bytes())
}

/// Like [`mock_client`] but answers with arbitrary bytes
pub fn mock_client_bytes(status: StatusCode, response_body: &'static [u8]) -> (Client, Captured) {
    let captured = Captured::default();
    let client = service_fn({
        let captured = captured.clone();
        move |req: Request<Body>| {
            let captured = captured.clone();
            async move {
                let (parts, body) = req.into_parts();
                let body = body.collect().await.unwrap().to_bytes();
                captured.0.lock().unwrap().push(CapturedRequest {
                    method: parts.method,
                    uri: parts.uri,
                    headers: parts.headers,
                    body,
                });

                let mut response = Response::new(Full::new(Bytes::from_static(response_body)));
                *response.status_mut() = status;
                Ok::<_, Infallible>(response)
            }
        }
    });

    (Client::builder().service(client), captured)
}

/// Client whose transport fails every request
pub fn failing_client() -> (Client, Arc<AtomicUsize>) {
    let counter = Arc::new(AtomicUsize::new(0));
    let client = service_fn({
        let counter = Arc::clone(&counter);
        move |_req: Request<Body>| {
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                Err::<Response<Full<Bytes>>, _>(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "connection refused",
                ))
            }
        }
    });

    (Client::builder().service(client), counter)
}

pub fn dispatcher(client: Client, signer: Arc<StubSigner>) -> Dispatcher<Arc<StubSigner>> {
    Dispatcher::builder()
        .http_client(client)
        .signer(signer)
        .build()
}
