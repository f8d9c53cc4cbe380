use std::sync::Arc;

use arc_swap::ArcSwap;
use secrecy::SecretString;

/// Identity and auth data for the signed-in admin.
///
/// Every field may be absent: an anonymous session is a valid state and
/// reading it never fails. The token is kept secret so it never shows up in
/// `Debug` output or logs.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub user_id: Option<String>,
    pub auth_token: Option<SecretString>,
    pub user_name: Option<String>,
}

impl Session {
    /// Shorthand for a signed-in session.
    pub fn new(user_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            auth_token: Some(SecretString::from(auth_token.into())),
            user_name: None,
        }
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Shared, swappable session state.
///
/// Handed to every client at construction. Reads are lock-free snapshots;
/// the owner calls [`replace`](Self::replace) on login and
/// [`clear`](Self::clear) on logout, and every client sees the change on its
/// next request.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<ArcSwap<Session>>,
}

impl SessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(session)),
        }
    }

    /// Current session snapshot.
    pub fn get_session(&self) -> Arc<Session> {
        self.inner.load_full()
    }

    pub fn replace(&self, session: Session) {
        self.inner.store(Arc::new(session));
    }

    /// Drop all identity data (logout).
    pub fn clear(&self) {
        self.inner.store(Arc::new(Session::default()));
    }
}
