//! Fetch lifecycle controller.
//!
//! Owns the race handling around async loads for a single view: each
//! `query` starts a new attempt, only the newest attempt may publish a
//! state, and fast settlements are held back so the loading indicator
//! stays visible long enough to read instead of flashing.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::Instant;

use crate::fetch::state::FetchState;

/// Minimum time a `Loading` state stays observable.
pub const MIN_VISIBLE_LOADING: Duration = Duration::from_millis(300);

/// Book-keeping for the attempt currently allowed to publish.
///
/// Every state write happens while this is locked, so the generation
/// check and the write are one step and stale attempts cannot interleave.
struct Current<K> {
    /// Key of the newest `query`, compared to suppress identical restarts.
    key: Option<K>,
    /// Monotonic attempt counter. Settling tasks compare against it.
    generation: u64,
    /// Set on teardown; no further writes are allowed once set.
    detached: bool,
}

struct Inner<K, T, E> {
    runtime: Handle,
    min_visible: Duration,
    state: watch::Sender<FetchState<T, E>>,
    current: Mutex<Current<K>>,
}

impl<K, T, E> Inner<K, T, E> {
    /// Publish a terminal state if `generation` still names the newest
    /// attempt. Superseded and detached attempts settle silently.
    fn publish(&self, generation: u64, outcome: Result<T, E>) {
        let current = self.current.lock();
        if current.detached || current.generation != generation {
            tracing::debug!(generation, "discarding stale fetch settlement");
            return;
        }
        let next = match outcome {
            Ok(data) => FetchState::Success(data),
            Err(error) => FetchState::Error(error),
        };
        self.state.send_replace(next);
    }
}

/// Race-free bridge between async fetches and a synchronous view.
///
/// The view calls [`query`](Self::query) with a key describing what it
/// wants; the controller runs the producer on the injected runtime and
/// publishes `Loading` / `Success` / `Error` through a watch channel.
/// Querying again with a different key supersedes the previous attempt:
/// its request keeps running (cancellation is advisory), but whatever it
/// settles to is discarded. Dropping the controller detaches it, so a
/// torn-down view can never be written to.
pub struct FetchController<K, T, E> {
    inner: Arc<Inner<K, T, E>>,
}

impl<K, T, E> FetchController<K, T, E> {
    /// Create a detached-from-nothing controller publishing `Loading`.
    ///
    /// `min_visible` is the smoothing floor; pass [`MIN_VISIBLE_LOADING`]
    /// unless configuration says otherwise. Zero disables smoothing.
    pub fn new(runtime: Handle, min_visible: Duration) -> Self {
        let (state, _) = watch::channel(FetchState::Loading);
        Self {
            inner: Arc::new(Inner {
                runtime,
                min_visible,
                state,
                current: Mutex::new(Current {
                    key: None,
                    generation: 0,
                    detached: false,
                }),
            }),
        }
    }

    /// Start a new attempt unless `key` matches the newest attempt's key.
    ///
    /// `producer` is called once to build the request future; the future
    /// runs on the controller's runtime. The transition to `Loading` is
    /// immediate, the terminal transition is deferred until at least
    /// `min_visible` has passed since this call.
    pub fn query<F, Fut>(&self, key: K, producer: F)
    where
        K: PartialEq + Send + 'static,
        T: Send + Sync + 'static,
        E: Send + Sync + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let generation = {
            let mut current = self.inner.current.lock();
            if current.detached {
                return;
            }
            if current.key.as_ref() == Some(&key) {
                return;
            }
            current.key = Some(key);
            current.generation += 1;
            // Written under the lock so a stalled older caller cannot
            // publish its Loading after a newer terminal state.
            self.inner.state.send_replace(FetchState::Loading);
            current.generation
        };

        let started = Instant::now();
        let fut = producer();
        let inner = Arc::clone(&self.inner);
        self.inner.runtime.spawn(async move {
            let outcome = fut.await;
            let remaining = inner.min_visible.saturating_sub(started.elapsed());
            if !remaining.is_zero() {
                tokio::time::sleep(remaining).await;
            }
            inner.publish(generation, outcome);
        });
    }

    /// Detach from the view; every pending attempt now settles silently.
    ///
    /// Idempotent, and also runs on drop. A detached controller ignores
    /// further `query` calls; views build a fresh controller instead.
    pub fn detach(&self) {
        let mut current = self.inner.current.lock();
        current.detached = true;
        current.key = None;
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<T, E>
    where
        T: Clone,
        E: Clone,
    {
        self.inner.state.borrow().clone()
    }

    /// Subscribe to state changes.
    ///
    /// The receiver sees the value current at subscription time as already
    /// seen; every later write is a change notification.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T, E>> {
        self.inner.state.subscribe()
    }
}

impl<K, T, E> Drop for FetchController<K, T, E> {
    fn drop(&mut self) {
        self.detach();
    }
}
