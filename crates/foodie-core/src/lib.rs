//! Server-authoritative data layer between `foodie-api` and UI consumers.
//!
//! Every resource the admin backend owns is mirrored locally by a
//! [`ResourceClient<T>`]. The mirror is only ever overwritten with what the
//! server answered; nothing is written optimistically.
//!
//! - **[`AdminClient`]**: facade bundling the per-resource clients behind one
//!   [`SessionStore`](foodie_api::SessionStore). `login` / `logout` swap the
//!   session and reset all mirrors.
//!
//! - **[`ResourceClient<T>`]**: generic fetch / mutate / command over an
//!   [`HttpExecutor`](foodie_api::HttpExecutor), with a pending counter, the
//!   last error, and request sequencing controlled by [`ResponseOrdering`].
//!
//! - **[`WishlistClient`]**, **[`NotificationCenter`]**,
//!   **[`DistributorClient`]**: the concrete resources. The notification
//!   center adds fixed-size paging and [`relative_time`] labels.
//!
//! - **[`MirrorStream<T>`]**: subscription handle exposing `current()` /
//!   `latest()` / `changed()` for reactive front ends.
//!
//! - **[`Outcome<T>`]**: the `{ success, data, error }` shape handed to UIs.

pub mod client;
pub mod config;
pub mod distributor;
pub mod error;
pub mod notifications;
pub mod outcome;
pub mod resource;
pub mod stream;
pub mod wishlist;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::AdminClient;
pub use config::ClientConfig;
pub use distributor::DistributorClient;
pub use error::CoreError;
pub use notifications::{
    NotificationCenter, PAGE_SIZE, Pager, Reconciled, ViewOutcome, relative_time,
};
pub use outcome::{ErrorInfo, Outcome};
pub use resource::{Keyed, MirrorView, Phase, ResourceClient, ResponseOrdering};
pub use stream::{MirrorStream, MirrorWatchStream, Snapshot};
pub use wishlist::WishlistClient;

// Domain types, re-exported so front ends need only this crate.
pub use foodie_api::{
    Notification, NotificationType, Order, PaymentConfirmation, PaymentVerification, ProductRef,
    ProductSummary, Session, SessionStore, StatusPayload, UnreadCount, Wishlist, WishlistItem,
};
