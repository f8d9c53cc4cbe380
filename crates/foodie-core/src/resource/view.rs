// Derived reads over a mirror.

use foodie_api::{Notification, PaymentConfirmation, StatusPayload, UnreadCount, Wishlist};

/// Pure, infallible reads a client can answer from its mirror alone.
pub trait MirrorView {
    fn item_count(&self) -> usize;
    fn contains_id(&self, id: &str) -> bool;
}

/// Items addressable by a string id inside a list-shaped mirror.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Notification {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for String {
    fn key(&self) -> &str {
        self
    }
}

impl<T: Keyed> MirrorView for Vec<T> {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn contains_id(&self, id: &str) -> bool {
        self.iter().any(|item| item.key() == id)
    }
}

impl MirrorView for Wishlist {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn contains_id(&self, id: &str) -> bool {
        self.contains_product(id)
    }
}

impl MirrorView for UnreadCount {
    fn item_count(&self) -> usize {
        usize::try_from(self.count).unwrap_or(usize::MAX)
    }

    fn contains_id(&self, _id: &str) -> bool {
        false
    }
}

impl MirrorView for Notification {
    fn item_count(&self) -> usize {
        1
    }

    fn contains_id(&self, id: &str) -> bool {
        self.id == id
    }
}

impl MirrorView for PaymentConfirmation {
    fn item_count(&self) -> usize {
        usize::from(self.order.is_some())
    }

    fn contains_id(&self, id: &str) -> bool {
        self.order.as_ref().is_some_and(|o| o.id == id)
    }
}

impl MirrorView for StatusPayload {
    fn item_count(&self) -> usize {
        0
    }

    fn contains_id(&self, _id: &str) -> bool {
        false
    }
}
