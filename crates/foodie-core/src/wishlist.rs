// ── Wishlist client ──
//
// Mirror of the signed-in user's wishlist. Every mutation replaces the
// mirror with the `{ wishlist }` document the server sends back.

use std::sync::Arc;

use foodie_api::endpoints::wishlist::{self, WishlistEnvelope};
use foodie_api::{HttpExecutor, Wishlist};

use crate::error::CoreError;
use crate::resource::{ResourceClient, ResponseOrdering};
use crate::stream::{MirrorStream, Snapshot};

#[derive(Clone)]
pub struct WishlistClient {
    resource: ResourceClient<Wishlist>,
}

impl WishlistClient {
    pub fn new(executor: HttpExecutor, ordering: ResponseOrdering) -> Self {
        Self {
            resource: ResourceClient::new("wishlist", executor, ordering),
        }
    }

    /// `GET /wishlists/get-wishlist/{userId}`. Needs a user id to build the
    /// path; without one nothing is sent.
    pub async fn fetch(&self) -> Result<Arc<Wishlist>, CoreError> {
        let user_id = self.resource.user_id()?;
        self.resource
            .fetch(&wishlist::get_wishlist(&user_id))
            .await
    }

    pub async fn add(&self, product_id: &str) -> Result<Arc<Wishlist>, CoreError> {
        self.resource
            .mutate(
                |user_id| Ok(wishlist::add_item(user_id, product_id)),
                unwrap_envelope,
            )
            .await
    }

    pub async fn remove(&self, product_id: &str) -> Result<Arc<Wishlist>, CoreError> {
        self.resource
            .mutate(
                |user_id| Ok(wishlist::remove_item(user_id, product_id)),
                unwrap_envelope,
            )
            .await
    }

    pub async fn clear(&self) -> Result<Arc<Wishlist>, CoreError> {
        self.resource
            .mutate(
                |user_id| Ok(wishlist::clear_wishlist(user_id)),
                unwrap_envelope,
            )
            .await
    }

    /// Items in the mirror; `0` before the first fetch.
    pub fn count(&self) -> usize {
        self.resource.count()
    }

    /// Whether the mirrored wishlist holds `product_id`.
    pub fn contains(&self, product_id: &str) -> bool {
        self.resource.contains(product_id)
    }

    pub fn current(&self) -> Snapshot<Wishlist> {
        self.resource.current()
    }

    pub fn subscribe(&self) -> MirrorStream<Wishlist> {
        self.resource.subscribe()
    }

    /// The underlying generic client (pending flag, phase, last error).
    pub fn resource(&self) -> &ResourceClient<Wishlist> {
        &self.resource
    }

    pub(crate) fn reset(&self) {
        self.resource.reset();
    }
}

#[allow(clippy::unnecessary_wraps)]
fn unwrap_envelope(envelope: WishlistEnvelope) -> Result<Wishlist, CoreError> {
    Ok(envelope.wishlist)
}
