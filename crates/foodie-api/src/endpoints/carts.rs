// Cart endpoints

use super::segment;
use crate::executor::ApiRequest;

/// `DELETE /carts/clear-cart/{userId}`
pub fn clear_cart(user_id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/carts/clear-cart/{}", segment(user_id)))
}
