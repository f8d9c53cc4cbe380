// ── Reactive mirror streams ──
//
// Subscription types for consuming mirror changes from a resource client.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// Mirror value as seen by subscribers: `None` until the first applied
/// response, or after a reset.
pub type Snapshot<T> = Option<Arc<T>>;

/// A subscription to one client's mirror.
///
/// Provides both point-in-time access and change notification via
/// [`changed()`](Self::changed) or by converting into a `Stream`.
pub struct MirrorStream<T: Send + Sync + 'static> {
    current: Snapshot<T>,
    receiver: watch::Receiver<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> MirrorStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Snapshot<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation time, or at the last `changed()`.
    pub fn current(&self) -> &Snapshot<T> {
        &self.current
    }

    /// Latest snapshot (may have changed since creation).
    pub fn latest(&self) -> Snapshot<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next change, returning the new snapshot.
    /// Returns `None` if the owning client has been dropped.
    pub async fn changed(&mut self) -> Option<Snapshot<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current.clone_from(&snap);
        Some(snap)
    }

    /// Convert into a `Stream` for use with `StreamExt` combinators.
    /// The first item is the current snapshot.
    pub fn into_stream(self) -> MirrorWatchStream<T> {
        MirrorWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct MirrorWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<Snapshot<T>>,
}

impl<T: Send + Sync + 'static> Stream for MirrorWatchStream<T> {
    type Item = Snapshot<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
