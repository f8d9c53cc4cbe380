// Wishlist endpoints
//
// Reads return the bare wishlist document; every mutation answers with the
// full updated document wrapped as `{ "wishlist": ... }`.

use serde::Deserialize;
use serde_json::json;

use super::segment;
use crate::executor::ApiRequest;
use crate::models::Wishlist;

/// `{ wishlist }` envelope returned by add, remove and clear.
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistEnvelope {
    pub wishlist: Wishlist,
}

/// `GET /wishlists/get-wishlist/{userId}`
pub fn get_wishlist(user_id: &str) -> ApiRequest {
    ApiRequest::get(format!("/wishlists/get-wishlist/{}", segment(user_id)))
}

/// `POST /wishlists/add-item` with `{"userId": ..., "productId": ...}`
pub fn add_item(user_id: &str, product_id: &str) -> ApiRequest {
    ApiRequest::post(
        "/wishlists/add-item",
        json!({
            "userId": user_id,
            "productId": product_id,
        }),
    )
}

/// `DELETE /wishlists/remove-item/{userId}/{productId}`
pub fn remove_item(user_id: &str, product_id: &str) -> ApiRequest {
    ApiRequest::delete(format!(
        "/wishlists/remove-item/{}/{}",
        segment(user_id),
        segment(product_id)
    ))
}

/// `DELETE /wishlists/clear-wishlist/{userId}`
pub fn clear_wishlist(user_id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/wishlists/clear-wishlist/{}", segment(user_id)))
}
