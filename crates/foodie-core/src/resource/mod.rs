// ── Remote-backed resource client ──
//
// One mirror of one server-owned resource. Reads and mutations go through
// the executor; only the server's answer is ever written to the mirror.

mod view;

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

use foodie_api::{ApiRequest, HttpExecutor, Session, decode_value};

use crate::error::CoreError;
use crate::stream::{MirrorStream, Snapshot};

pub use view::{Keyed, MirrorView};

/// What happens when responses resolve in a different order than their
/// requests were issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// A response older than the newest applied one is discarded and its
    /// caller gets [`CoreError::Superseded`].
    #[default]
    LastIssuedWins,
    /// Every successful response is applied as it resolves, so a slow old
    /// response can overwrite a newer one.
    LastResolvedWins,
}

/// Observable lifecycle of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request in flight; the last settled request succeeded (or none ran).
    Idle,
    /// At least one request is in flight.
    Loading,
    /// No request in flight; the last settled request failed.
    Failed,
}

/// Generic client for a single server-owned resource.
///
/// Cheaply cloneable; clones share the mirror, pending state and sequence
/// counters. The mirror is `None` until the first applied success and
/// afterwards always equals the payload of the most recently applied
/// successful request. Nothing is written speculatively.
pub struct ResourceClient<T: Send + Sync + 'static> {
    inner: Arc<ResourceInner<T>>,
}

impl<T: Send + Sync + 'static> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ResourceInner<T: Send + Sync + 'static> {
    /// Resource name for logs and errors.
    name: &'static str,
    executor: HttpExecutor,
    ordering: ResponseOrdering,
    mirror: watch::Sender<Snapshot<T>>,
    in_flight: AtomicUsize,
    last_error: Mutex<Option<CoreError>>,
    /// Sequence number handed to the most recently issued request.
    issued: AtomicU64,
    /// Sequence number of the request whose payload is in the mirror.
    /// Only written while the mirror's watch lock is held.
    applied: AtomicU64,
}

impl<T: Send + Sync + 'static> ResourceClient<T> {
    pub fn new(name: &'static str, executor: HttpExecutor, ordering: ResponseOrdering) -> Self {
        let (mirror, _) = watch::channel(None);
        Self {
            inner: Arc::new(ResourceInner {
                name,
                executor,
                ordering,
                mirror,
                in_flight: AtomicUsize::new(0),
                last_error: Mutex::new(None),
                issued: AtomicU64::new(0),
                applied: AtomicU64::new(0),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn ordering(&self) -> ResponseOrdering {
        self.inner.ordering
    }

    // ── Session accessor ─────────────────────────────────────────────

    /// Current session snapshot. Never fails; absent fields mean anonymous.
    pub fn session(&self) -> Arc<Session> {
        self.inner.executor.session().get_session()
    }

    /// The signed-in user's id, or [`CoreError::NotAuthenticated`].
    pub fn user_id(&self) -> Result<String, CoreError> {
        self.session().user_id.clone().ok_or_else(|| {
            warn!(resource = self.inner.name, "refused: no user id in session");
            CoreError::NotAuthenticated
        })
    }

    // ── Reads of local state ─────────────────────────────────────────

    /// Current mirror.
    pub fn current(&self) -> Snapshot<T> {
        self.inner.mirror.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.in_flight.load(Ordering::Acquire) > 0
    }

    pub fn phase(&self) -> Phase {
        if self.is_pending() {
            Phase::Loading
        } else if self.last_error().is_some() {
            Phase::Failed
        } else {
            Phase::Idle
        }
    }

    /// Failure of the most recently settled request, cleared by the next
    /// success.
    pub fn last_error(&self) -> Option<CoreError> {
        self.lock_error().clone()
    }

    pub fn subscribe(&self) -> MirrorStream<T> {
        MirrorStream::new(self.inner.mirror.subscribe())
    }

    /// Forget the mirror (logout). Responses to requests issued before the
    /// reset are discarded under [`ResponseOrdering::LastIssuedWins`].
    pub fn reset(&self) {
        self.inner.mirror.send_modify(|mirror| {
            let issued = self.inner.issued.load(Ordering::Acquire);
            self.inner.applied.fetch_max(issued, Ordering::AcqRel);
            *mirror = None;
        });
        *self.lock_error() = None;
        debug!(resource = self.inner.name, "mirror reset");
    }

    // ── Network operations ───────────────────────────────────────────

    /// Read the resource and overwrite the mirror with the response.
    ///
    /// On failure the mirror is left as it was and the error is recorded
    /// and returned.
    pub async fn fetch(&self, request: &ApiRequest) -> Result<Arc<T>, CoreError>
    where
        T: DeserializeOwned,
    {
        let _pending = PendingGuard::enter(&self.inner.in_flight);
        let seq = self.next_seq();
        let result = self.round_trip::<T>(request).await;
        self.settle(seq, result)
    }

    /// Run a mutation and overwrite the mirror with the resource snapshot
    /// extracted from the server's answer.
    ///
    /// `build` receives the session's user id; without one the call fails
    /// with [`CoreError::NotAuthenticated`] before any request is made.
    /// `extract` picks the resource out of the response (for example
    /// unwrapping an envelope) and may reject it; it must not merge with
    /// local state.
    pub async fn mutate<R, B, F>(&self, build: B, extract: F) -> Result<Arc<T>, CoreError>
    where
        R: DeserializeOwned,
        B: FnOnce(&str) -> Result<ApiRequest, CoreError>,
        F: FnOnce(R) -> Result<T, CoreError>,
    {
        let user_id = self.user_id()?;
        let request = build(&user_id)?;

        let _pending = PendingGuard::enter(&self.inner.in_flight);
        let seq = self.next_seq();
        let result = self.round_trip::<R>(&request).await.and_then(extract);
        self.settle(seq, result)
    }

    /// Run an authenticated action whose answer is a status payload rather
    /// than a snapshot of this resource. The mirror is not touched.
    pub async fn command<R, B>(&self, build: B) -> Result<R, CoreError>
    where
        R: DeserializeOwned,
        B: FnOnce(&str) -> Result<ApiRequest, CoreError>,
    {
        let user_id = self.user_id()?;
        let request = build(&user_id)?;

        let _pending = PendingGuard::enter(&self.inner.in_flight);
        let result = self.round_trip::<R>(&request).await;
        match &result {
            Ok(_) => *self.lock_error() = None,
            Err(err) => self.record_error(err),
        }
        result
    }

    // ── Internals ────────────────────────────────────────────────────

    async fn round_trip<R: DeserializeOwned>(&self, request: &ApiRequest) -> Result<R, CoreError> {
        let value = self.inner.executor.send(request).await?;
        Ok(decode_value(value)?)
    }

    fn next_seq(&self) -> u64 {
        self.inner.issued.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn settle(&self, seq: u64, result: Result<T, CoreError>) -> Result<Arc<T>, CoreError> {
        match result {
            Ok(value) => self.apply(seq, value),
            Err(err) => {
                if self.is_stale(seq) {
                    trace!(resource = self.inner.name, seq, "stale failure ignored");
                } else {
                    self.record_error(&err);
                }
                Err(err)
            }
        }
    }

    fn apply(&self, seq: u64, value: T) -> Result<Arc<T>, CoreError> {
        let snapshot = Arc::new(value);
        let ordering = self.inner.ordering;
        let mut superseded_by = None;

        self.inner.mirror.send_if_modified(|mirror| {
            let applied = self.inner.applied.load(Ordering::Acquire);
            if ordering == ResponseOrdering::LastIssuedWins && seq <= applied {
                superseded_by = Some(applied);
                return false;
            }
            self.inner.applied.fetch_max(seq, Ordering::AcqRel);
            *mirror = Some(Arc::clone(&snapshot));
            true
        });

        if let Some(applied) = superseded_by {
            trace!(resource = self.inner.name, seq, applied, "discarding superseded response");
            return Err(CoreError::Superseded {
                issued: seq,
                applied,
            });
        }

        *self.lock_error() = None;
        debug!(resource = self.inner.name, seq, "mirror updated");
        Ok(snapshot)
    }

    fn is_stale(&self, seq: u64) -> bool {
        self.inner.ordering == ResponseOrdering::LastIssuedWins
            && seq <= self.inner.applied.load(Ordering::Acquire)
    }

    fn record_error(&self, err: &CoreError) {
        warn!(resource = self.inner.name, error = %err, "request failed");
        *self.lock_error() = Some(err.clone());
    }

    fn lock_error(&self) -> std::sync::MutexGuard<'_, Option<CoreError>> {
        self.inner
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: MirrorView + Send + Sync + 'static> ResourceClient<T> {
    /// Number of items in the mirror; `0` when nothing has been fetched.
    pub fn count(&self) -> usize {
        self.inner
            .mirror
            .borrow()
            .as_deref()
            .map_or(0, MirrorView::item_count)
    }

    /// Whether the mirror holds an item with this id; `false` when nothing
    /// has been fetched.
    pub fn contains(&self, id: &str) -> bool {
        self.inner
            .mirror
            .borrow()
            .as_deref()
            .is_some_and(|m| m.contains_id(id))
    }
}

/// Marks a request as in flight for as long as it lives. Dropping the guard
/// (completion, error, or the future being dropped) clears the mark.
struct PendingGuard<'a>(&'a AtomicUsize);

impl<'a> PendingGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use foodie_api::{SessionStore, TransportConfig};

    use super::*;

    fn client(ordering: ResponseOrdering) -> ResourceClient<Vec<String>> {
        let executor = HttpExecutor::new(
            &Url::parse("http://127.0.0.1:9").unwrap(),
            SessionStore::default(),
            &TransportConfig::default(),
        )
        .unwrap();
        ResourceClient::new("test", executor, ordering)
    }

    #[test]
    fn fresh_client_is_idle_and_empty() {
        let c = client(ResponseOrdering::default());
        assert!(c.current().is_none());
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.count(), 0);
        assert!(!c.contains("a"));
    }

    #[test]
    fn out_of_order_apply_is_discarded_when_last_issued_wins() {
        let c = client(ResponseOrdering::LastIssuedWins);
        let first = c.next_seq();
        let second = c.next_seq();

        assert!(c.apply(second, vec!["new".into()]).is_ok());
        let late = c.apply(first, vec!["old".into()]);

        assert_eq!(
            late.err(),
            Some(CoreError::Superseded {
                issued: first,
                applied: second
            })
        );
        assert_eq!(c.current().as_deref(), Some(&vec!["new".to_owned()]));
    }

    #[test]
    fn out_of_order_apply_overwrites_when_last_resolved_wins() {
        let c = client(ResponseOrdering::LastResolvedWins);
        let first = c.next_seq();
        let second = c.next_seq();

        assert!(c.apply(second, vec!["new".into()]).is_ok());
        assert!(c.apply(first, vec!["old".into()]).is_ok());
        assert_eq!(c.current().as_deref(), Some(&vec!["old".to_owned()]));
    }

    #[test]
    fn reset_discards_in_flight_responses() {
        let c = client(ResponseOrdering::LastIssuedWins);
        let before_logout = c.next_seq();
        c.reset();
        assert!(c.apply(before_logout, vec!["stale".into()]).is_err());
        assert!(c.current().is_none());
    }

    #[test]
    fn stale_failure_does_not_overwrite_newer_success() {
        let c = client(ResponseOrdering::LastIssuedWins);
        let first = c.next_seq();
        let second = c.next_seq();
        assert!(c.apply(second, vec!["ok".into()]).is_ok());

        let err = CoreError::Http {
            status: 500,
            body: String::new(),
        };
        assert!(c.settle(first, Err(err)).is_err());
        assert!(c.last_error().is_none());
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn failure_is_recorded_and_cleared_by_next_success() {
        let c = client(ResponseOrdering::LastIssuedWins);
        let seq = c.next_seq();
        let _ = c.settle(seq, Err(CoreError::NotAuthenticated));
        assert_eq!(c.phase(), Phase::Failed);

        let seq = c.next_seq();
        assert!(c.settle(seq, Ok(vec![])).is_ok());
        assert_eq!(c.phase(), Phase::Idle);
    }

    #[test]
    fn pending_guard_tracks_overlapping_requests() {
        let c = client(ResponseOrdering::default());
        let a = PendingGuard::enter(&c.inner.in_flight);
        let b = PendingGuard::enter(&c.inner.in_flight);
        assert_eq!(c.phase(), Phase::Loading);
        drop(a);
        assert!(c.is_pending());
        drop(b);
        assert!(!c.is_pending());
    }
}
