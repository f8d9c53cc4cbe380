// ── Notification center ──
//
// Admin notifications: a list mirror with fixed-size paging, the unread
// counter, and the notification most recently marked read. The list is
// never patched locally; after a server-side change it is refetched.

mod pager;
mod relative_time;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use foodie_api::endpoints::notifications;
use foodie_api::{HttpExecutor, Notification, StatusPayload, UnreadCount};

use crate::error::CoreError;
use crate::resource::{ResourceClient, ResponseOrdering};
use crate::stream::{MirrorStream, Snapshot};

pub use pager::{PAGE_SIZE, Pager};
pub use relative_time::relative_time;

/// Result of opening a notification.
#[derive(Debug, Clone)]
pub struct ViewOutcome {
    /// The notification as the server last described it.
    pub notification: Arc<Notification>,
    /// Whether this view marked it read.
    pub marked: bool,
    /// Set when the mark-read succeeded but the unread count could not be
    /// refreshed. The counter may be stale until the next refresh.
    pub count_error: Option<CoreError>,
}

/// Answer to a server-side change plus any failures while refetching the
/// affected mirrors afterwards.
#[derive(Debug, Clone)]
pub struct Reconciled<T> {
    pub value: T,
    pub refresh_errors: Vec<CoreError>,
}

impl<T> Reconciled<T> {
    pub fn is_consistent(&self) -> bool {
        self.refresh_errors.is_empty()
    }
}

/// Clones share the mirrors and the current page.
#[derive(Clone)]
pub struct NotificationCenter {
    list: ResourceClient<Vec<Notification>>,
    unread: ResourceClient<UnreadCount>,
    selected: ResourceClient<Notification>,
    pager: Arc<Mutex<Pager>>,
}

impl NotificationCenter {
    pub fn new(executor: HttpExecutor, ordering: ResponseOrdering) -> Self {
        Self {
            list: ResourceClient::new("notifications", executor.clone(), ordering),
            unread: ResourceClient::new("unread-count", executor.clone(), ordering),
            selected: ResourceClient::new("notification", executor, ordering),
            pager: Arc::new(Mutex::new(Pager::default())),
        }
    }

    // ── Fetches ──────────────────────────────────────────────────────

    /// `GET /notifications`. Keeps the current page in range.
    pub async fn refresh(&self) -> Result<Arc<Vec<Notification>>, CoreError> {
        let items = self.list.fetch(&notifications::list()).await?;
        self.pager().clamp(items.len());
        Ok(items)
    }

    /// `GET /notifications/unread-count`.
    pub async fn refresh_unread_count(&self) -> Result<u64, CoreError> {
        let unread = self.unread.fetch(&notifications::unread_count()).await?;
        Ok(unread.count)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// `PUT /notifications/mark-read/{id}`. The server's copy of the
    /// notification becomes the selected mirror.
    pub async fn mark_read(&self, id: &str) -> Result<Arc<Notification>, CoreError> {
        self.selected
            .mutate(|_| Ok(notifications::mark_read(id)), Ok)
            .await
    }

    /// Open a notification from the list mirror, marking it read first if
    /// needed. Already-read notifications are returned without any request.
    pub async fn view(&self, id: &str) -> Result<ViewOutcome, CoreError> {
        let found = self.find(id).ok_or_else(|| CoreError::NotFound {
            resource: "notification",
            id: id.to_owned(),
        })?;

        if found.is_read {
            return Ok(ViewOutcome {
                notification: Arc::new(found),
                marked: false,
                count_error: None,
            });
        }

        let notification = self.mark_read(id).await?;
        let count_error = self.refresh_unread_count().await.err().filter(is_failure);
        if let Some(err) = &count_error {
            debug!(id, error = %err, "marked read but unread count is stale");
        }

        Ok(ViewOutcome {
            notification,
            marked: true,
            count_error,
        })
    }

    /// `PUT /notifications/mark-all-read`, then refetch list and count.
    pub async fn mark_all_read(&self) -> Result<Reconciled<StatusPayload>, CoreError> {
        let value = self
            .list
            .command(|_| Ok(notifications::mark_all_read()))
            .await?;
        let refresh_errors = self.reconcile().await;
        Ok(Reconciled {
            value,
            refresh_errors,
        })
    }

    /// `DELETE /notifications/delete/{id}`, then refetch list and count.
    pub async fn delete(&self, id: &str) -> Result<Reconciled<StatusPayload>, CoreError> {
        let value = self
            .list
            .command(|_| Ok(notifications::delete(id)))
            .await?;
        let refresh_errors = self.reconcile().await;
        Ok(Reconciled {
            value,
            refresh_errors,
        })
    }

    async fn reconcile(&self) -> Vec<CoreError> {
        let list = self.refresh().await.err();
        let count = self.refresh_unread_count().await.err();
        [list, count].into_iter().flatten().filter(is_failure).collect()
    }

    // ── Local reads ──────────────────────────────────────────────────

    pub fn find(&self, id: &str) -> Option<Notification> {
        self.list
            .current()?
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.list.count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last fetched unread count; `0` before the first fetch.
    pub fn unread_count(&self) -> u64 {
        self.unread.current().map_or(0, |u| u.count)
    }

    pub fn page(&self) -> usize {
        self.pager().current()
    }

    pub fn total_pages(&self) -> usize {
        Pager::total_pages(self.len())
    }

    /// Jump to `page`. Out-of-range pages leave the current page alone and
    /// return `false`.
    pub fn set_page(&self, page: usize) -> bool {
        let len = self.len();
        self.pager().set_page(page, len)
    }

    pub fn next_page(&self) -> bool {
        let len = self.len();
        let mut pager = self.pager();
        let next = pager.current() + 1;
        pager.set_page(next, len)
    }

    pub fn prev_page(&self) -> bool {
        let len = self.len();
        let mut pager = self.pager();
        let current = pager.current();
        current > 1 && pager.set_page(current - 1, len)
    }

    /// Notifications on the current page, in server order.
    pub fn current_page_items(&self) -> Vec<Notification> {
        self.list
            .current()
            .map(|items| self.pager().slice(items.as_slice()).to_vec())
            .unwrap_or_default()
    }

    pub fn items(&self) -> Snapshot<Vec<Notification>> {
        self.list.current()
    }

    pub fn selected(&self) -> Snapshot<Notification> {
        self.selected.current()
    }

    pub fn subscribe(&self) -> MirrorStream<Vec<Notification>> {
        self.list.subscribe()
    }

    pub fn list_resource(&self) -> &ResourceClient<Vec<Notification>> {
        &self.list
    }

    pub fn unread_resource(&self) -> &ResourceClient<UnreadCount> {
        &self.unread
    }

    pub(crate) fn reset(&self) {
        self.list.reset();
        self.unread.reset();
        self.selected.reset();
        *self.pager() = Pager::default();
    }

    fn pager(&self) -> MutexGuard<'_, Pager> {
        self.pager.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A superseded refetch means a newer one already landed, not that the
/// mirror is stale.
fn is_failure(err: &CoreError) -> bool {
    !matches!(err, CoreError::Superseded { .. })
}
