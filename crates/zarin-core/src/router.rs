// ── View router ──
//
// Holds exactly one current route plus the back stack. The whole history
// is published through a `watch` channel so the front end re-mounts on
// every change.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::route::Route;

static FALLBACK: Route = Route::Home;

/// Navigation history. Never empty; the last entry is the current route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<Route>,
}

impl History {
    fn new(initial: Route) -> Self {
        Self {
            entries: vec![initial],
        }
    }

    pub fn current(&self) -> &Route {
        // `entries` always holds at least the initial route.
        self.entries.last().unwrap_or(&FALLBACK)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn can_go_back(&self) -> bool {
        self.entries.len() > 1
    }
}

/// Cloneable handle to the router.
#[derive(Clone)]
pub struct Router {
    history: Arc<watch::Sender<History>>,
}

impl Router {
    pub fn new(initial: Route) -> Self {
        let (history, _) = watch::channel(History::new(initial));
        Self {
            history: Arc::new(history),
        }
    }

    pub fn current(&self) -> Route {
        self.history.borrow().current().clone()
    }

    pub fn history(&self) -> History {
        self.history.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<History> {
        self.history.subscribe()
    }

    /// Follow a link: push `route` onto the history.
    ///
    /// Navigating to the current route is a no-op. Returns whether the
    /// route changed.
    pub fn navigate(&self, route: Route) -> bool {
        self.history.send_if_modified(|h| {
            if *h.current() == route {
                return false;
            }
            debug!(from = %h.current(), to = %route, "navigate");
            h.entries.push(route);
            true
        })
    }

    /// Replace the current entry (post-login redirect, search submission).
    pub fn redirect(&self, route: Route) -> bool {
        self.history.send_if_modified(|h| {
            if *h.current() == route {
                return false;
            }
            debug!(from = %h.current(), to = %route, "redirect");
            h.entries.pop();
            h.entries.push(route);
            true
        })
    }

    /// Parse `path` and [`navigate`](Self::navigate) to it.
    pub fn navigate_path(&self, path: &str) -> bool {
        self.navigate(Route::parse(path))
    }

    /// Pop the history. Returns `false` at the first entry.
    pub fn back(&self) -> bool {
        self.history.send_if_modified(|h| {
            if !h.can_go_back() {
                return false;
            }
            h.entries.pop();
            debug!(to = %h.current(), "back");
            true
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}
