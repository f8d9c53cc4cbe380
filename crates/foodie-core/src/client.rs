// ── Admin client facade ──
//
// Bundles the resource clients that make up the admin backend behind one
// session. Login and logout swap the session and drop every mirror so one
// user's data is never shown to the next.

use tracing::info;

use foodie_api::{HttpExecutor, Session, SessionStore};

use crate::config::ClientConfig;
use crate::distributor::DistributorClient;
use crate::error::CoreError;
use crate::notifications::NotificationCenter;
use crate::resource::ResponseOrdering;
use crate::wishlist::WishlistClient;

pub struct AdminClient {
    executor: HttpExecutor,
    wishlist: WishlistClient,
    notifications: NotificationCenter,
    distributor: DistributorClient,
}

impl AdminClient {
    /// Build the HTTP stack from `config` and attach `session`.
    pub fn new(config: &ClientConfig, session: SessionStore) -> Result<Self, CoreError> {
        let executor = HttpExecutor::new(&config.base_url, session, &config.transport())?;
        Ok(Self::with_executor(executor, config.ordering))
    }

    pub fn with_executor(executor: HttpExecutor, ordering: ResponseOrdering) -> Self {
        Self {
            wishlist: WishlistClient::new(executor.clone(), ordering),
            notifications: NotificationCenter::new(executor.clone(), ordering),
            distributor: DistributorClient::new(executor.clone(), ordering),
            executor,
        }
    }

    pub fn session(&self) -> &SessionStore {
        self.executor.session()
    }

    pub fn executor(&self) -> &HttpExecutor {
        &self.executor
    }

    pub fn wishlist(&self) -> &WishlistClient {
        &self.wishlist
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn distributor(&self) -> &DistributorClient {
        &self.distributor
    }

    /// Replace the session. Mirrors belonging to the previous session are
    /// dropped.
    pub fn login(&mut self, session: Session) {
        info!(user_id = session.user_id.as_deref().unwrap_or("-"), "session started");
        self.executor.session().replace(session);
        self.reset_mirrors();
    }

    /// Clear the session and every mirror. Responses still in flight are
    /// discarded when they land.
    pub fn logout(&mut self) {
        self.executor.session().clear();
        self.reset_mirrors();
        info!("session cleared");
    }

    fn reset_mirrors(&mut self) {
        self.wishlist.reset();
        self.notifications.reset();
        self.distributor.reset();
    }
}
