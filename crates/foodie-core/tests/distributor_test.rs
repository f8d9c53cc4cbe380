#![allow(clippy::unwrap_used)]
// Payment confirmation and cart clearing.

use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use foodie_core::{
    AdminClient, ClientConfig, CoreError, Outcome, PaymentVerification, Session, SessionStore,
};

async fn setup(session: Session) -> (MockServer, AdminClient) {
    let server = MockServer::start().await;
    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap());
    let client = AdminClient::new(&config, SessionStore::new(session)).unwrap();
    (server, client)
}

fn verification() -> PaymentVerification {
    PaymentVerification {
        order_id: "order_9".into(),
        payment_id: "pay_1".into(),
        signature: "sig".into(),
        user_id: None,
    }
}

#[tokio::test]
async fn test_verify_payment_fills_user_and_stores_confirmation() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("POST"))
        .and(path("/orders/confirm"))
        .and(body_json(json!({
            "orderId": "order_9",
            "paymentId": "pay_1",
            "signature": "sig",
            "userId": "u1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "order": { "_id": "o-77", "status": "paid", "totalAmount": 420.5, "items": [] },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let distributor = client.distributor();
    let confirmation = distributor.verify_payment(&verification()).await.unwrap();

    let order = confirmation.order.as_ref().unwrap();
    assert_eq!(order.id, "o-77");
    assert_eq!(order.status.as_deref(), Some("paid"));
    assert!(order.extra.contains_key("items"));
    assert!(distributor.confirmation().contains("o-77"));
}

#[tokio::test]
async fn test_unsuccessful_verification_is_rejected() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("POST"))
        .and(path("/orders/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Signature mismatch",
        })))
        .mount(&server)
        .await;

    let distributor = client.distributor();
    let err = distributor.verify_payment(&verification()).await.unwrap_err();

    assert_eq!(
        err,
        CoreError::Rejected {
            message: "Signature mismatch".into()
        }
    );
    assert!(distributor.last_confirmation().is_none());
    assert_eq!(distributor.confirmation().last_error(), Some(err.clone()));

    let outcome = Outcome::from(Err::<(), _>(err));
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["success"], json!(false));
    assert_eq!(value["error"]["kind"], json!("rejected"));
}

#[tokio::test]
async fn test_clear_cart() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("DELETE"))
        .and(path("/carts/clear-cart/u1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Cart cleared" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let status = client.distributor().clear_cart().await.unwrap();
    assert_eq!(status.message.as_deref(), Some("Cart cleared"));
}

#[tokio::test]
async fn test_clear_cart_server_error() {
    let (server, client) = setup(Session::new("u1", "tok")).await;

    Mock::given(method("DELETE"))
        .and(path("/carts/clear-cart/u1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = client.distributor().clear_cart().await.unwrap_err();
    assert_eq!(
        err,
        CoreError::Http {
            status: 500,
            body: "boom".into()
        }
    );
}
