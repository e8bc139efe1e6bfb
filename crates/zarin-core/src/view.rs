// ── Fetch-then-render plumbing ──
//
// Every view issues its read request through a `Fetch<T>`: one spawned
// task per request, cancelled when a newer request starts or the view is
// dropped. Results are published through a `watch` channel as a
// three-state `Loadable<T>`.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Lifecycle of a fetched value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    /// The request failed. Rendered exactly like the empty state; the
    /// error itself only goes to the log.
    Errored,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Loadable<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Loading | Self::Errored => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl<T> Loadable<Vec<T>> {
    /// Items to render: empty while loading or after an error.
    pub fn items(&self) -> &[T] {
        self.loaded().map_or(&[], Vec::as_slice)
    }
}

/// A cancellable, restartable read request bound to one view.
pub struct Fetch<T> {
    label: &'static str,
    state: Arc<watch::Sender<Loadable<T>>>,
    /// Bumped on every start. A task may only publish while its own
    /// generation is still current.
    generation: Arc<AtomicU64>,
    cancel: Option<CancellationToken>,
}

impl<T: Send + Sync + 'static> Fetch<T> {
    pub fn new(label: &'static str) -> Self {
        let (state, _) = watch::channel(Loadable::Loading);
        Self {
            label,
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            cancel: None,
        }
    }

    /// Cancel any in-flight request and start `request`.
    ///
    /// State resets to `Loading` immediately.
    pub fn start<F, E>(&mut self, request: F)
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        self.cancel();

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(Loadable::Loading);

        let label = self.label;
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);

        tokio::spawn(async move {
            let result = tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(view = label, "fetch cancelled");
                    return;
                }
                result = request => result,
            };

            let next = match result {
                Ok(value) => Loadable::Loaded(value),
                Err(e) => {
                    warn!(view = label, error = %e, "fetch failed");
                    Loadable::Errored
                }
            };

            // Checked under the channel lock so a newer start() always wins.
            state.send_if_modified(|slot| {
                if token.is_cancelled() || current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *slot = next;
                true
            });
        });
    }

    /// Abort the in-flight request, if any. The current state is kept.
    pub fn cancel(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Loadable<T>> {
        self.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }
}

impl<T: Clone> Fetch<T> {
    pub fn snapshot(&self) -> Loadable<T> {
        self.state.borrow().clone()
    }
}

impl<T> Drop for Fetch<T> {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn publishes_loaded_value() {
        let mut fetch = Fetch::<u32>::new("test");
        let mut rx = fetch.subscribe();
        fetch.start(async { Ok::<_, String>(7) });

        rx.wait_for(|s| !s.is_loading()).await.unwrap();
        assert_eq!(fetch.snapshot(), Loadable::Loaded(7));
    }

    #[tokio::test]
    async fn failure_becomes_errored() {
        let mut fetch = Fetch::<Vec<u32>>::new("test");
        let mut rx = fetch.subscribe();
        fetch.start(async { Err::<Vec<u32>, _>("boom") });

        rx.wait_for(|s| !s.is_loading()).await.unwrap();
        let state = fetch.snapshot();
        assert_eq!(state, Loadable::Errored);
        assert!(state.items().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_discards_stale_result() {
        let mut fetch = Fetch::<&'static str>::new("test");
        let mut rx = fetch.subscribe();

        fetch.start(async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok::<_, String>("stale")
        });
        fetch.start(async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, String>("fresh")
        });

        rx.wait_for(|s| !s.is_loading()).await.unwrap();
        assert_eq!(fetch.snapshot(), Loadable::Loaded("fresh"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_fetch_cancels_its_task() {
        let mut fetch = Fetch::<u32>::new("test");
        let rx = fetch.subscribe();
        fetch.start(async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            Ok::<_, String>(1)
        });
        drop(fetch);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*rx.borrow(), Loadable::Loading);
    }
}
