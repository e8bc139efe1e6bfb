//! Application core: event loop, overlays, and action dispatch.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use zarin_core::{Route, SessionState, Storefront};

use crate::action::{Action, Notification, NotificationLevel, PromptKind};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screen::Tab;
use crate::screens::RouteScreen;
use crate::screens::sidebar::Sidebar;
use crate::theme;
use crate::tui::Tui;

const SIDEBAR_WIDTH: u16 = 28;
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Single-line input overlaid on the status bar.
struct Prompt {
    kind: PromptKind,
    input: String,
}

pub struct App {
    store: Storefront,
    screen: RouteScreen,
    sidebar: Sidebar,
    running: bool,
    session: SessionState,
    cart_badge: Option<u32>,
    prompt: Option<Prompt>,
    help_visible: bool,
    /// Blocking alert; swallows all input until dismissed.
    alert: Option<String>,
    notification: Option<(Notification, Instant)>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    bridge_cancel: CancellationToken,
}

impl App {
    /// Mount the router's current route. Must run inside the Tokio
    /// runtime, since mounting starts that view's requests.
    pub fn new(store: Storefront) -> Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let mut screen = RouteScreen::new(store.clone(), store.router().current());
        screen.init(action_tx.clone())?;
        let mut sidebar = Sidebar::new();
        sidebar.init(action_tx.clone())?;

        Ok(Self {
            session: store.session().snapshot(),
            store,
            screen,
            sidebar,
            running: true,
            cart_badge: None,
            prompt: None,
            help_visible: false,
            alert: None,
            notification: None,
            action_tx,
            action_rx,
            bridge_cancel: CancellationToken::new(),
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        self.store.start().await;
        tokio::spawn(crate::data_bridge::spawn_data_bridge(
            self.store.clone(),
            self.action_tx.clone(),
            self.bridge_cancel.clone(),
        ));

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );
        let (w, h) = tui.size().unwrap_or((80, 24));
        debug!(width = w, height = h, "terminal ready");
        info!("event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;
                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.bridge_cancel.cancel();
        events.stop();
        self.store.shutdown().await;
        info!("event loop ended");
        Ok(())
    }

    /// Map a key press to an action. Overlays take precedence over global
    /// keys, which take precedence over the focused panel.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.alert.is_some() {
            return Ok(match key.code {
                KeyCode::Enter | KeyCode::Esc => Some(Action::DismissAlert),
                _ => None,
            });
        }

        if let Some(prompt) = &mut self.prompt {
            return Ok(match key.code {
                KeyCode::Esc => Some(Action::ClosePrompt),
                KeyCode::Enter => Some(Action::SubmitPrompt),
                KeyCode::Backspace => {
                    prompt.input.pop();
                    None
                }
                KeyCode::Char(c) => {
                    prompt.input.push(c);
                    None
                }
                _ => None,
            });
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        // Text entry owns every key except Esc.
        if self.screen.captures_text() && !self.sidebar.focused() {
            if key.code == KeyCode::Esc {
                return Ok(Some(Action::Back));
            }
            return self.screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('/')) => {
                return Ok(Some(Action::OpenPrompt(PromptKind::Search)));
            }
            (KeyModifiers::NONE, KeyCode::Char('g')) => {
                return Ok(Some(Action::OpenPrompt(PromptKind::Address)));
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='5')) => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(tab) = n.and_then(Tab::from_number) {
                    return Ok(Some(tab.action(self.session.is_logged_in())));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => return Ok(Some(Action::ToggleSidebarFocus)),
            (KeyModifiers::NONE, KeyCode::Esc | KeyCode::Backspace) => {
                return Ok(Some(Action::Back));
            }
            _ => {}
        }

        if self.sidebar.focused() {
            self.sidebar.handle_key_event(key)
        } else {
            self.screen.handle_key_event(key)
        }
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(..) | Action::Render => {}

            Action::Tick => {
                if let Some((_, shown)) = &self.notification {
                    if shown.elapsed() > NOTIFICATION_TTL {
                        self.notification = None;
                    }
                }
                self.screen.update(action)?;
            }

            // ── Routing ──
            Action::Navigate(route) => {
                if self.sidebar.focused() {
                    self.set_sidebar_focus(false);
                }
                self.store.router().navigate(route.clone());
            }
            Action::Back => {
                self.store.router().back();
            }
            Action::RouteChanged(route) => self.screen.follow(route.clone()),

            // ── Shared state ──
            Action::SessionChanged(state) => {
                let identity_changed = state.user.as_ref().map(|u| &u.id)
                    != self.session.user.as_ref().map(|u| &u.id)
                    || state.is_admin() != self.session.is_admin();
                self.session = state.clone();
                if identity_changed && matches!(self.screen.route(), Route::Admin { .. }) {
                    self.screen.remount();
                }
            }
            Action::NavigationUpdated(_) => {
                if let Some(follow_up) = self.sidebar.update(action)? {
                    self.action_tx.send(follow_up)?;
                }
            }
            Action::CartBadgeUpdated(count) => self.cart_badge = *count,

            // ── Overlays ──
            Action::OpenPrompt(kind) => {
                self.prompt = Some(Prompt {
                    kind: *kind,
                    input: String::new(),
                });
            }
            Action::ClosePrompt => self.prompt = None,
            Action::SubmitPrompt => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit_prompt(&prompt);
                }
            }
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::ToggleSidebarFocus => {
                let focus = !self.sidebar.focused();
                self.set_sidebar_focus(focus);
            }
            Action::ShowAlert(message) => self.alert = Some(message.clone()),
            Action::DismissAlert => self.alert = None,
            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }

            // ── Commands ──
            Action::Logout => {
                let store = self.store.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    store.logout().await;
                    let _ = tx.send(Action::Notify(Notification::success("Signed out")));
                });
            }
        }
        Ok(())
    }

    fn set_sidebar_focus(&mut self, focused: bool) {
        self.sidebar.set_focused(focused);
        self.screen.set_focused(!focused);
    }

    /// Address bar: navigate to whatever the path resolves to. Search:
    /// show `/search?q=…`, replacing the current entry when already on a
    /// search so refinements do not pile up in history.
    fn submit_prompt(&self, prompt: &Prompt) {
        let router = self.store.router();
        match prompt.kind {
            PromptKind::Address => {
                let path = prompt.input.trim();
                if !path.is_empty() {
                    router.navigate_path(path);
                }
            }
            PromptKind::Search => {
                let route = Route::Search {
                    query: prompt.input.trim().to_owned(),
                };
                if matches!(router.current(), Route::Search { .. }) {
                    router.redirect(route);
                } else {
                    router.navigate(route);
                }
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // [body] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        let body = Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(layout[0]);
        self.sidebar.render(frame, body[0]);
        self.screen.render(frame, body[1]);

        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        if let Some((notification, _)) = &self.notification {
            render_notification(frame, area, notification);
        }
        if self.help_visible {
            render_help_overlay(frame, area);
        }
        if let Some(message) = &self.alert {
            render_alert(frame, area, message);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let logged_in = self.session.is_logged_in();
        let active = Tab::of(self.screen.route());
        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|&tab| {
                let style = if Some(tab) == active {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", tab.number(), tab.label(logged_in)),
                    style,
                ))
            })
            .collect();

        // Titles carry their own styling; the selection adds none.
        let mut tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .highlight_style(Style::default());
        if let Some(idx) = active.and_then(|a| Tab::ALL.iter().position(|&t| t == a)) {
            tabs = tabs.select(idx);
        }
        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        if let Some(prompt) = &self.prompt {
            let label = match prompt.kind {
                PromptKind::Address => " go ",
                PromptKind::Search => " / ",
            };
            let line = Line::from(vec![
                Span::styled(label, theme::key_hint_key()),
                Span::styled(prompt.input.as_str(), Style::default().fg(theme::PEARL)),
                Span::styled("█", Style::default().fg(theme::GOLD)),
                Span::styled("  Esc cancel  Enter go", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let identity = if self.session.loading {
            Span::styled("…", theme::key_hint())
        } else if let Some(user) = &self.session.user {
            Span::styled(
                user.display_name().to_owned(),
                Style::default().fg(theme::EMERALD),
            )
        } else {
            Span::styled("guest", theme::key_hint())
        };

        let mut spans = vec![Span::raw(" "), identity];
        if self.session.is_admin() {
            spans.push(Span::styled(" admin", Style::default().fg(theme::ROSE_GOLD)));
        }
        let badge = self
            .cart_badge
            .map_or_else(|| "—".to_owned(), |n| n.to_string());
        spans.push(Span::styled(
            format!(" │ cart {badge}"),
            Style::default().fg(theme::GOLD),
        ));
        spans.push(Span::styled(
            format!(" │ {} ", self.screen.route()),
            theme::key_hint(),
        ));
        spans.push(Span::styled(
            "│ ? help  / search  g go  q quit",
            theme::key_hint(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_alert(frame: &mut Frame, area: Rect, message: &str) {
    let dialog = centered(area, 50, 6);
    frame.render_widget(Clear, dialog);

    let block = Block::default()
        .title(" Alert ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::RUBY))
        .style(Style::default().bg(theme::BG_DARK));
    let text = vec![
        Line::from(Span::styled(format!(" {message}"), theme::table_row())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Enter ", theme::key_hint_key()),
            Span::styled("OK", theme::key_hint()),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: false }),
        dialog,
    );
}

fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let width = u16::try_from(notification.message.chars().count() + 6)
        .unwrap_or(u16::MAX)
        .clamp(20, 60);
    let height = 3u16;
    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 2);
    let toast = Rect::new(area.x + x, area.y + y, width.min(area.width), height.min(area.height));

    let (color, icon) = match notification.level {
        NotificationLevel::Success => (theme::EMERALD, "✓"),
        NotificationLevel::Error => (theme::RUBY, "✗"),
    };

    frame.render_widget(Clear, toast);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .style(Style::default().bg(theme::BG_DARK));
    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(color)),
        Span::styled(notification.message.as_str(), theme::table_row()),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), toast);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help = centered(area, 56, 18);
    frame.render_widget(Clear, help);

    let block = Block::default()
        .title(" Keys ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border_focused())
        .style(Style::default().bg(theme::BG_DARK));

    let row = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<11}"), theme::key_hint_key()),
            Span::styled(what, theme::key_hint()),
        ])
    };
    let text = vec![
        Line::from(""),
        row("1-5", "Home, cart, login/logout, register, admin"),
        row("g", "Go to a path, e.g. /category/11"),
        row("/", "Search products"),
        row("Tab", "Focus categories / page"),
        row("j/k ↑/↓", "Move"),
        row("Enter", "Open / submit"),
        row("Esc Bksp", "Back"),
        row("a", "Add to cart (product page)"),
        row("q", "Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  On forms every key types; Tab moves between fields.",
            theme::key_hint(),
        )),
        Line::from(""),
        Line::from(Span::styled("  Esc or ? to close", theme::key_hint())),
    ];
    frame.render_widget(Paragraph::new(text).block(block), help);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use url::Url;
    use zarin_core::{ItemId, StoreConfig, User};

    // Nothing listens here; mounted views settle into their errored state.
    fn store() -> Storefront {
        let url = Url::parse("http://127.0.0.1:9/api").expect("url");
        Storefront::new(StoreConfig::new(url)).expect("store")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Feed keys through the app, applying every resulting action.
    fn press(app: &mut App, codes: &[KeyCode]) {
        for &code in codes {
            if let Some(action) = app.handle_key_event(key(code)).expect("key") {
                app.process_action(&action).expect("action");
            }
        }
    }

    fn type_text(app: &mut App, text: &str) {
        let codes: Vec<KeyCode> = text.chars().map(KeyCode::Char).collect();
        press(app, &codes);
    }

    fn screen_text(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| app.render(frame)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn signed_in(is_admin: bool) -> SessionState {
        SessionState {
            user: Some(Arc::new(User {
                id: ItemId::from(7),
                name: "Sara".into(),
                email: "sara@example.com".into(),
                is_admin,
            })),
            loading: false,
        }
    }

    #[tokio::test]
    async fn status_bar_shows_identity_and_badge() {
        let mut app = App::new(store()).expect("app");
        assert!(screen_text(&app).contains(" … │ cart —"));

        app.process_action(&Action::SessionChanged(SessionState {
            user: None,
            loading: false,
        }))
        .expect("action");
        app.process_action(&Action::CartBadgeUpdated(Some(3)))
            .expect("action");
        assert!(screen_text(&app).contains("guest │ cart 3"));

        app.process_action(&Action::SessionChanged(signed_in(true)))
            .expect("action");
        let text = screen_text(&app);
        assert!(text.contains("Sara admin"));
        assert!(text.contains("3 Logout"));
    }

    #[tokio::test]
    async fn search_prompt_navigates_then_replaces() {
        let mut app = App::new(store()).expect("app");

        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "gold ring");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(
            app.store.router().current(),
            Route::Search {
                query: "gold ring".into()
            }
        );
        assert_eq!(app.store.router().history().depth(), 2);

        press(&mut app, &[KeyCode::Char('/')]);
        type_text(&mut app, "coin");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(app.store.router().current().path(), "/search?q=coin");
        assert_eq!(app.store.router().history().depth(), 2);
    }

    #[tokio::test]
    async fn address_bar_accepts_any_path() {
        let mut app = App::new(store()).expect("app");

        press(&mut app, &[KeyCode::Char('g')]);
        type_text(&mut app, "/category/11/");
        press(&mut app, &[KeyCode::Enter]);
        assert_eq!(
            app.store.router().current(),
            Route::Category {
                id: ItemId::from(11)
            }
        );

        press(&mut app, &[KeyCode::Char('g')]);
        type_text(&mut app, "/nowhere");
        press(&mut app, &[KeyCode::Enter]);
        let current = app.store.router().current();
        app.process_action(&Action::RouteChanged(current))
            .expect("action");
        assert!(screen_text(&app).contains("Nothing lives at /nowhere"));

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.store.router().current().path(), "/category/11");
    }

    #[tokio::test]
    async fn alert_blocks_input_until_dismissed() {
        let mut app = App::new(store()).expect("app");
        app.process_action(&Action::ShowAlert("Sign-in failed. Please try again.".into()))
            .expect("action");
        assert!(screen_text(&app).contains("Sign-in failed"));

        press(&mut app, &[KeyCode::Char('q'), KeyCode::Char('2')]);
        assert!(app.running);
        assert_eq!(app.store.router().current(), Route::Home);

        press(&mut app, &[KeyCode::Enter]);
        assert!(app.alert.is_none());
        press(&mut app, &[KeyCode::Char('q')]);
        assert!(!app.running);
    }

    #[tokio::test]
    async fn form_keys_type_instead_of_navigating() {
        let mut app = App::new(store()).expect("app");
        press(&mut app, &[KeyCode::Char('3')]);
        assert_eq!(app.store.router().current(), Route::Login);
        app.process_action(&Action::RouteChanged(Route::Login))
            .expect("action");

        type_text(&mut app, "q1@x.io");
        press(&mut app, &[KeyCode::Tab]);
        type_text(&mut app, "pw");
        assert!(app.running);

        let zarin_core::ActiveView::Login(form) = app.screen.view() else {
            panic!("expected the login form");
        };
        assert_eq!(form.value(zarin_core::views::FormField::Email), "q1@x.io");
        assert_eq!(form.value(zarin_core::views::FormField::Password), "pw");

        let text = screen_text(&app);
        assert!(text.contains("••"));
        assert!(!text.contains("pw█"));

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.store.router().current(), Route::Home);
    }

    #[tokio::test]
    async fn product_page_shows_spinner_while_loading() {
        let mut app = App::new(store()).expect("app");
        app.process_action(&Action::RouteChanged(Route::parse("/product/42")))
            .expect("action");

        let text = screen_text(&app);
        assert!(text.contains("Loading product"));
        assert!(text.contains("add to cart"));
    }

    #[tokio::test]
    async fn admin_is_denied_for_guests() {
        let mut app = App::new(store()).expect("app");
        app.process_action(&Action::SessionChanged(SessionState {
            user: None,
            loading: false,
        }))
        .expect("action");
        press(&mut app, &[KeyCode::Char('5')]);
        let current = app.store.router().current();
        app.process_action(&Action::RouteChanged(current))
            .expect("action");

        assert!(screen_text(&app).contains("Access denied"));
    }
}
