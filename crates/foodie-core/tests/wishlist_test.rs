#![allow(clippy::unwrap_used)]
// Wishlist mirror behaviour against a mock backend.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{any, body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foodie_core::{
    AdminClient, ClientConfig, CoreError, Phase, Session, SessionStore, Wishlist,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(session: Session) -> (MockServer, AdminClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    let client = AdminClient::new(&config, SessionStore::new(session)).unwrap();
    (server, client)
}

fn wishlist_doc(products: &[&str]) -> Value {
    json!({
        "_id": "w1",
        "userId": "u1",
        "items": products
            .iter()
            .map(|p| json!({ "productId": p, "addedAt": "2024-06-01T09:00:00Z" }))
            .collect::<Vec<_>>(),
    })
}

fn decode(doc: Value) -> Wishlist {
    serde_json::from_value(doc).unwrap()
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_empty_mirror_reports_nothing() {
    let (_server, client) = setup(Session::new("u1", "tok")).await;
    let wishlist = client.wishlist();

    assert!(wishlist.current().is_none());
    assert_eq!(wishlist.count(), 0);
    assert!(!wishlist.contains("p1"));
    assert_eq!(wishlist.resource().phase(), Phase::Idle);
}

#[tokio::test]
async fn test_fetch_replaces_mirror() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wishlist_doc(&["p1", "p2"])))
        .expect(1)
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    wishlist.fetch().await.unwrap();

    assert_eq!(wishlist.count(), 2);
    assert!(wishlist.contains("p2"));
    assert_eq!(
        wishlist.current().as_deref(),
        Some(&decode(wishlist_doc(&["p1", "p2"])))
    );
}

#[tokio::test]
async fn test_not_found_leaves_mirror_empty_and_records_error() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/u1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Wishlist not found"))
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    let err = wishlist.fetch().await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(wishlist.current().is_none());
    assert_eq!(wishlist.count(), 0);
    assert_eq!(wishlist.resource().phase(), Phase::Failed);
    assert_eq!(wishlist.resource().last_error(), Some(err));
    assert!(!wishlist.resource().is_pending());
}

#[tokio::test]
async fn test_failed_refresh_keeps_last_known_good() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wishlist_doc(&["p1"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/u1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    wishlist.fetch().await.unwrap();
    assert!(wishlist.fetch().await.is_err());

    assert!(wishlist.contains("p1"));
    assert_eq!(wishlist.resource().phase(), Phase::Failed);
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_then_contains() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("POST"))
        .and(path("/wishlists/add-item"))
        .and(body_json(json!({ "userId": "u1", "productId": "p9" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "wishlist": wishlist_doc(&["p9"]) })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    let snapshot = wishlist.add("p9").await.unwrap();

    assert!(wishlist.contains("p9"));
    assert_eq!(*snapshot, decode(wishlist_doc(&["p9"])));
}

#[tokio::test]
async fn test_mirror_is_exactly_the_server_answer() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wishlist_doc(&["p1", "p2"])))
        .mount(&server)
        .await;
    // The server still lists p2 after the removal; the client believes it.
    Mock::given(method("DELETE"))
        .and(path("/wishlists/remove-item/u1/p2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "wishlist": wishlist_doc(&["p2", "p3"]) })),
        )
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    wishlist.fetch().await.unwrap();
    wishlist.remove("p2").await.unwrap();

    assert_eq!(
        wishlist.current().as_deref(),
        Some(&decode(wishlist_doc(&["p2", "p3"])))
    );
    assert!(!wishlist.contains("p1"));
}

#[tokio::test]
async fn test_clear_empties_mirror() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("DELETE"))
        .and(path("/wishlists/clear-wishlist/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "wishlist": wishlist_doc(&[]) })))
        .expect(1)
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    wishlist.clear().await.unwrap();
    assert_eq!(wishlist.count(), 0);
    assert!(wishlist.current().is_some());
}

#[tokio::test]
async fn test_anonymous_mutations_send_nothing() {
    let (server, client) = setup(Session::default()).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    assert_eq!(wishlist.add("p1").await.unwrap_err(), CoreError::NotAuthenticated);
    assert_eq!(wishlist.remove("p1").await.unwrap_err(), CoreError::NotAuthenticated);
    assert_eq!(wishlist.clear().await.unwrap_err(), CoreError::NotAuthenticated);
    assert_eq!(wishlist.fetch().await.unwrap_err(), CoreError::NotAuthenticated);

    assert!(wishlist.current().is_none());
    assert!(wishlist.resource().last_error().is_none());
}

#[tokio::test]
async fn test_product_id_cannot_reroute_the_request() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("DELETE"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "wishlist": wishlist_doc(&[]) })),
        )
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    wishlist.remove("../../clear-wishlist/u1").await.unwrap();
    wishlist.remove("p1?x=1#frag").await.unwrap();

    let paths: Vec<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|r| {
            assert_eq!(r.url.query(), None);
            r.url.path().to_owned()
        })
        .collect();
    assert_eq!(
        paths,
        vec![
            "/wishlists/remove-item/u1/..%2F..%2Fclear-wishlist%2Fu1".to_owned(),
            "/wishlists/remove-item/u1/p1%3Fx%3D1%23frag".to_owned(),
        ]
    );
}

#[tokio::test]
async fn test_dot_segment_ids_are_rejected_locally() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    for id in ["..", "."] {
        let err = wishlist.remove(id).await.unwrap_err();
        assert_eq!(err.kind(), "validation", "{id} should be rejected");
    }
    assert!(wishlist.current().is_none());
}

#[tokio::test]
async fn test_envelope_missing_is_a_decode_error() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("POST"))
        .and(path("/wishlists/add-item"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wishlist_doc(&["p1"])))
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    let err = wishlist.add("p1").await.unwrap_err();
    assert_eq!(err.kind(), "decode_error");
    assert!(wishlist.current().is_none());
}

#[tokio::test]
async fn test_subscribers_see_applied_snapshots() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wishlist_doc(&["p1"])))
        .mount(&server)
        .await;

    let wishlist = client.wishlist();
    let mut stream = wishlist.subscribe();
    assert!(stream.current().is_none());

    wishlist.fetch().await.unwrap();
    let snap = stream.changed().await.unwrap();
    assert!(snap.unwrap().contains_product("p1"));
}

// ── Session lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn test_logout_drops_mirrors_and_session() {
    let (server, mut client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wishlist_doc(&["p1"])))
        .mount(&server)
        .await;

    client.wishlist().fetch().await.unwrap();
    client.logout();

    assert!(client.wishlist().current().is_none());
    assert!(client.session().get_session().user_id.is_none());
    assert_eq!(
        client.wishlist().add("p1").await.unwrap_err(),
        CoreError::NotAuthenticated
    );
}

#[tokio::test]
async fn test_login_switches_user() {
    let (server, mut client) = setup(Session::default()).await;

    Mock::given(method("GET"))
        .and(path("/wishlists/get-wishlist/u2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(wishlist_doc(&["p7"])))
        .expect(1)
        .mount(&server)
        .await;

    client.login(Session::new("u2", "tok-2"));
    client.wishlist().fetch().await.unwrap();
    assert!(client.wishlist().contains("p7"));
}
