//! Everything that changes UI state travels through the action channel as
//! one of these.

use zarin_core::{Category, Loadable, Route, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A toast in the bottom-right corner. Expires on its own.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }
}

/// The single-line input shown in place of the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// `g`: any storefront path.
    Address,
    /// `/`: a product search.
    Search,
}

#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Routing ──
    Navigate(Route),
    Back,
    /// The router's current entry changed.
    RouteChanged(Route),

    // ── Shared storefront state ──
    SessionChanged(SessionState),
    NavigationUpdated(Loadable<Vec<Category>>),
    CartBadgeUpdated(Option<u32>),

    // ── Overlays ──
    OpenPrompt(PromptKind),
    ClosePrompt,
    SubmitPrompt,
    ToggleHelp,
    ToggleSidebarFocus,
    /// Blocking message; all input waits until it is dismissed.
    ShowAlert(String),
    DismissAlert,
    Notify(Notification),

    // ── Commands ──
    Logout,
}
