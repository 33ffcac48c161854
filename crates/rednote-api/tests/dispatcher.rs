use self::common::{
    dispatcher, failing_client, mock_client, mock_client_bytes, StubSigner, COOKIE,
};
use hyper::{header::ACCEPT_ENCODING, StatusCode};
use pretty_assertions::assert_eq;
use rednote_api::{Error, ErrorKind, HeaderTemplate};
use sonic_rs::{json, JsonValueTrait, Value};
use std::sync::{atomic::Ordering, Arc};

mod common;

const OK_BODY: &str = r#"{"code":0,"success":true,"msg":"成功","data":{}}"#;

#[tokio::test]
async fn empty_cookie_is_missing_credentials() {
    let (client, captured) = mock_client(StatusCode::OK, OK_BODY);
    let signer = Arc::new(StubSigner::default());
    let dispatcher = dispatcher(client, Arc::clone(&signer));

    let error = dispatcher
        .post::<_, Value>("/api/path", &json!({"a": 1}), "")
        .await
        .unwrap_err();

    assert!(matches!(error, Error::MissingCredentials), "{error:?}");
    assert_eq!(error.kind(), ErrorKind::MissingCredentials);
    assert_eq!(signer.calls(), 0);
    assert_eq!(captured.count(), 0);
}

#[tokio::test]
async fn signed_headers_are_laid_over_the_template() {
    let (client, captured) = mock_client(StatusCode::OK, OK_BODY);
    let dispatcher = dispatcher(client, Arc::new(StubSigner::default()));

    let _: Value = dispatcher
        .post("/api/path", &json!({"a": 1}), COOKIE)
        .await
        .unwrap();

    let mut headers = captured.single().headers;
    // Added by the decompression middleware of the HTTP client
    headers.remove(ACCEPT_ENCODING);

    assert_eq!(headers["x-s"], "sig");
    assert_eq!(headers["x-t"], "1690000000");
    assert_eq!(headers["cookie"], COOKIE);

    let template = HeaderTemplate::default();
    for (name, value) in template.headers() {
        assert_eq!(headers.get(name), Some(value), "template header {name} was altered");
    }
    assert_eq!(headers.len(), template.headers().len() + 3);
}

#[tokio::test]
async fn signer_sees_exactly_what_is_sent() {
    let (client, captured) = mock_client(StatusCode::OK, OK_BODY);
    let signer = Arc::new(StubSigner::default());
    let dispatcher = dispatcher(client, Arc::clone(&signer));

    let payload = json!({"note_id": "64e1", "content": "你好 world", "at_users": []});
    let _: Value = dispatcher
        .post("/api/path", &payload, "a=1;;b=2;")
        .await
        .unwrap();

    let body = captured.single().body;
    assert_eq!(
        body,
        r#"{"note_id":"64e1","content":"你好 world","at_users":[]}"#
    );

    let seen = signer.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/api/path");
    assert_eq!(seen[0].payload.as_deref().map(str::as_bytes), Some(&body[..]));
    assert_eq!(seen[0].cookies, ["a=1", "b=2"]);
}

#[tokio::test]
async fn every_request_is_signed_afresh() {
    let (client, captured) = mock_client(StatusCode::OK, OK_BODY);
    let signer = Arc::new(StubSigner::default());
    let dispatcher = dispatcher(client, Arc::clone(&signer));

    for _ in 0..3 {
        let _: Value = dispatcher
            .post("/api/path", &json!({}), COOKIE)
            .await
            .unwrap();
    }

    assert_eq!(signer.calls(), 3);
    assert_eq!(captured.count(), 3);
}

#[tokio::test]
async fn returns_decoded_response() {
    let (client, _captured) = mock_client(StatusCode::OK, OK_BODY);
    let dispatcher = dispatcher(client, Arc::new(StubSigner::default()));

    let response: Value = dispatcher
        .post("/api/path", &json!({}), COOKIE)
        .await
        .unwrap();

    assert_eq!(response.get("success").and_then(|ok| ok.as_bool()), Some(true));
    assert_eq!(response.get("msg").and_then(|msg| msg.as_str()), Some("成功"));
}

#[tokio::test]
async fn server_error_is_unexpected_response() {
    let (client, _captured) =
        mock_client(StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded");
    let dispatcher = dispatcher(client, Arc::new(StubSigner::default()));

    let error = dispatcher
        .post::<_, Value>("/api/path", &json!({}), COOKIE)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedResponse);
    let Error::UnexpectedStatus { status, body } = &error else {
        panic!("unexpected error: {error:?}");
    };
    assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "upstream exploded");
}

#[tokio::test]
async fn non_utf8_error_body_is_unexpected_response() {
    // "你好" in GBK followed by a stray byte
    let (client, _captured) =
        mock_client_bytes(StatusCode::BAD_GATEWAY, &[0xc4, 0xe3, 0xba, 0xc3, 0xff]);
    let dispatcher = dispatcher(client, Arc::new(StubSigner::default()));

    let error = dispatcher
        .post::<_, Value>("/api/path", &json!({}), COOKIE)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnexpectedResponse);
    let Error::UnexpectedStatus { status, body } = &error else {
        panic!("unexpected error: {error:?}");
    };
    assert_eq!(*status, StatusCode::BAD_GATEWAY);
    assert!(body.chars().all(|ch| ch == char::REPLACEMENT_CHARACTER), "{body:?}");
}

#[tokio::test]
async fn non_json_body_is_unexpected_response() {
    let (client, _captured) = mock_client(StatusCode::OK, "<html>captcha</html>");
    let dispatcher = dispatcher(client, Arc::new(StubSigner::default()));

    let error = dispatcher
        .post::<_, Value>("/api/path", &json!({}), COOKIE)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::InvalidResponseBody(..)), "{error:?}");
    assert_eq!(error.kind(), ErrorKind::UnexpectedResponse);
}

#[tokio::test]
async fn signer_failure_aborts_request() {
    let (client, captured) = mock_client(StatusCode::OK, OK_BODY);
    let signer = Arc::new(StubSigner::failing());
    let dispatcher = dispatcher(client, Arc::clone(&signer));

    let error = dispatcher
        .post::<_, Value>("/api/path", &json!({}), COOKIE)
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::SignerUnavailable);
    assert_eq!(signer.calls(), 1);
    assert_eq!(captured.count(), 0);
}

#[tokio::test]
async fn invalid_signature_token_aborts_request() {
    let (client, captured) = mock_client(StatusCode::OK, OK_BODY);
    let signer = Arc::new(StubSigner::with_x_s("bad\nvalue"));
    let dispatcher = dispatcher(client, Arc::clone(&signer));

    let error = dispatcher
        .post::<_, Value>("/api/path", &json!({}), COOKIE)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Signer(..)), "{error:?}");
    assert_eq!(error.kind(), ErrorKind::SignerUnavailable);
    assert_eq!(signer.calls(), 1);
    assert_eq!(captured.count(), 0);
}

#[tokio::test]
async fn transport_failure_is_network_failure() {
    let (client, counter) = failing_client();
    let dispatcher = dispatcher(client, Arc::new(StubSigner::default()));

    let error = dispatcher
        .post::<_, Value>("/api/path", &json!({}), COOKIE)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Network(..)), "{error:?}");
    assert_eq!(error.kind(), ErrorKind::NetworkFailure);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn explicit_host() {
    let (client, captured) = mock_client(StatusCode::OK, OK_BODY);
    let dispatcher = dispatcher(client, Arc::new(StubSigner::default()));

    let _: Value = dispatcher
        .post_to("http://localhost:8080", "/api/path", &json!({}), COOKIE)
        .await
        .unwrap();

    assert_eq!(captured.single().uri, "http://localhost:8080/api/path");
}
