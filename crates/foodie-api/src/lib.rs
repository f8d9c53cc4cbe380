// foodie-api: async client for the organic-foodie admin REST backend

pub mod endpoints;
pub mod error;
pub mod executor;
pub mod models;
pub mod session;
pub mod transport;

pub use error::Error;
pub use executor::{ApiRequest, HttpExecutor, decode_value};
pub use models::{
    Notification, NotificationType, Order, PaymentConfirmation, PaymentVerification, ProductRef,
    ProductSummary, StatusPayload, UnreadCount, Wishlist, WishlistItem,
};
pub use reqwest::Method;
pub use session::{Session, SessionStore};
pub use transport::{AuthHeader, TlsMode, TransportConfig};
