#![allow(clippy::unwrap_used)]
// Integration tests for `HttpExecutor` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foodie_api::endpoints::{notifications, wishlist};
use foodie_api::{AuthHeader, Error, HttpExecutor, Session, SessionStore, Wishlist};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(session: Session) -> (MockServer, HttpExecutor) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let executor = HttpExecutor::with_client(
        reqwest::Client::new(),
        &base_url,
        SessionStore::new(session),
        AuthHeader::default(),
    );
    (server, executor)
}

// ── Headers ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_token_is_sent_as_bearer_header() {
    let (server, executor) = setup(Session::new("u1", "tok-123")).await;

    Mock::given(method("GET"))
        .and(path("/notifications/unread-count"))
        .and(header("authorization", "Bearer tok-123"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "count": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let value = executor.send(&notifications::unread_count()).await.unwrap();
    assert_eq!(value, json!({ "count": 3 }));
}

#[tokio::test]
async fn test_missing_token_omits_auth_header() {
    let (server, executor) = setup(Session::default()).await;

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    executor.send(&notifications::list()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_session_swap_applies_to_next_request() {
    let (server, executor) = setup(Session::default()).await;

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    executor.session().replace(Session::new("u1", "fresh"));
    executor.send(&notifications::list()).await.unwrap();
}

// ── Outcome classification ─────────────────────────────────────────

#[tokio::test]
async fn test_non_2xx_keeps_raw_body_text() {
    let (server, executor) = setup(Session::new("u1", "t")).await;

    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Wishlist not found"))
        .mount(&server)
        .await;

    let err = executor
        .send(&wishlist::get_wishlist("ghost"))
        .await
        .unwrap_err();

    match err {
        Error::Http { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Wishlist not found");
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let (server, executor) = setup(Session::new("u1", "t")).await;

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let result = executor.send(&notifications::list()).await;
    assert!(
        matches!(result, Err(Error::Decode { .. })),
        "expected Decode error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Reserve an ephemeral port, then release it so nothing listens there.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let executor = HttpExecutor::with_client(
        reqwest::Client::new(),
        &Url::parse(&format!("http://{addr}")).unwrap(),
        SessionStore::default(),
        AuthHeader::default(),
    );

    let result = executor.send(&notifications::list()).await;
    assert!(
        matches!(result, Err(Error::Network(_))),
        "expected Network error, got: {result:?}"
    );
}

// ── Typed decoding ──────────────────────────────────────────────────

#[tokio::test]
async fn test_post_sends_json_body_and_decodes_envelope() {
    let (server, executor) = setup(Session::new("u1", "t")).await;

    Mock::given(method("POST"))
        .and(path("/wishlists/add-item"))
        .and(body_json(json!({ "userId": "u1", "productId": "p7" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "wishlist": { "_id": "w1", "userId": "u1", "items": [{ "productId": "p7" }] }
        })))
        .mount(&server)
        .await;

    let envelope: wishlist::WishlistEnvelope = executor
        .send_json(&wishlist::add_item("u1", "p7"))
        .await
        .unwrap();
    let expected: Wishlist = serde_json::from_value(json!({
        "_id": "w1", "userId": "u1", "items": [{ "productId": "p7" }]
    }))
    .unwrap();
    assert_eq!(envelope.wishlist, expected);
}

#[tokio::test]
async fn test_custom_header_name_without_scheme() {
    let server = MockServer::start().await;
    let executor = HttpExecutor::with_client(
        reqwest::Client::new(),
        &Url::parse(&server.uri()).unwrap(),
        SessionStore::new(Session::new("u1", "raw-token")),
        AuthHeader {
            name: "x-auth-token".into(),
            scheme: String::new(),
        },
    );

    Mock::given(method("DELETE"))
        .and(path("/carts/clear-cart/u1"))
        .and(header("x-auth-token", "raw-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    executor
        .send(&foodie_api::endpoints::carts::clear_cart("u1"))
        .await
        .unwrap();
}
