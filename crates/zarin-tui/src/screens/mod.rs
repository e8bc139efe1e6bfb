//! The route screen: whatever view the router currently points at, plus
//! the cursor state needed to drive it from the keyboard.
//!
//! Rendering and key handling per view live in the submodules; this file
//! owns mounting, following route changes, and dispatch.

mod admin;
mod auth;
mod cart;
mod catalog;
mod product;
pub mod sidebar;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, TableState},
};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use zarin_core::{ActiveView, CoreError, Route, Storefront};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct RouteScreen {
    store: Storefront,
    route: Route,
    view: ActiveView,
    table: TableState,
    throbber: ThrobberState,
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
}

impl RouteScreen {
    /// Mount the view for `route`. Issues that view's requests.
    pub fn new(store: Storefront, route: Route) -> Self {
        let view = store.mount(&route);
        Self {
            store,
            route,
            view,
            table: TableState::default().with_selected(0),
            throbber: ThrobberState::default(),
            focused: true,
            action_tx: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    #[cfg(test)]
    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    /// Bring the screen in line with `route`. A category screen moving to
    /// another category keeps its view; anything else is re-mounted.
    pub fn follow(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        debug!(from = %self.route, to = %route, "following route");
        self.store.update(&mut self.view, &route);
        self.route = route;
        self.table.select(Some(0));
        self.throbber = ThrobberState::default();
    }

    /// Re-mount the current route from scratch, e.g. after the signed-in
    /// identity changed under an admin screen.
    pub fn remount(&mut self) {
        self.view = self.store.mount(&self.route);
        self.table.select(Some(0));
    }
}

impl Component for RouteScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match &mut self.view {
            ActiveView::Home(view) => catalog::handle_key(&view.products(), &mut self.table, key),
            ActiveView::Category(view) => {
                catalog::handle_key(&view.products(), &mut self.table, key)
            }
            ActiveView::Search(view) => catalog::handle_key(&view.results(), &mut self.table, key),
            ActiveView::Cart(view) => cart::handle_key(&view.cart(), &mut self.table, key),
            ActiveView::Admin(view) => admin::handle_key(view, &mut self.table, key),
            ActiveView::Product(view) => {
                if let Some(task) = product::handle_key(view, key) {
                    let tx = self.action_tx.clone();
                    tokio::spawn(async move {
                        let result = task.await;
                        if let Some(tx) = tx {
                            let _ = tx.send(product::outcome(&result));
                        }
                    });
                }
                None
            }
            ActiveView::Login(form) | ActiveView::Register(form) => {
                let kind = form.kind();
                if let Some(task) = auth::handle_key(form, &self.store, key) {
                    let tx = self.action_tx.clone();
                    tokio::spawn(async move {
                        match task.await {
                            Ok(_) | Err(CoreError::Busy { .. }) => {}
                            Err(_) => {
                                if let Some(tx) = tx {
                                    let _ =
                                        tx.send(Action::ShowAlert(auth::failure_message(kind)));
                                }
                            }
                        }
                    });
                }
                None
            }
            ActiveView::NotFound(_) => match key.code {
                KeyCode::Enter => Some(Action::Navigate(Route::Home)),
                _ => None,
            },
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::Tick = action {
            if let ActiveView::Product(view) = &self.view {
                if view.product().is_loading() {
                    self.throbber.calc_next();
                }
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" {} ", title(&self.view)))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match &self.view {
            ActiveView::Home(view) => catalog::render(frame, inner, &view.products(), &self.table),
            ActiveView::Category(view) => {
                catalog::render(frame, inner, &view.products(), &self.table);
            }
            ActiveView::Search(view) => {
                catalog::render(frame, inner, &view.results(), &self.table);
            }
            ActiveView::Product(view) => product::render(frame, inner, view, &self.throbber),
            ActiveView::Cart(view) => cart::render(frame, inner, &view.cart(), &self.table),
            ActiveView::Login(form) | ActiveView::Register(form) => {
                auth::render(frame, inner, form);
            }
            ActiveView::Admin(view) => admin::render(frame, inner, view, &self.table),
            ActiveView::NotFound(path) => render_not_found(frame, inner, path),
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn captures_text(&self) -> bool {
        matches!(self.view, ActiveView::Login(_) | ActiveView::Register(_))
    }
}

fn title(view: &ActiveView) -> String {
    match view {
        ActiveView::Home(_) => "Featured".into(),
        ActiveView::Category(view) => match view.category() {
            Some(id) => format!("Category {id}"),
            None => "Category".into(),
        },
        ActiveView::Search(view) => format!("Search: {}", view.query()),
        ActiveView::Product(_) => "Product".into(),
        ActiveView::Cart(_) => "Cart".into(),
        ActiveView::Login(_) => "Sign in".into(),
        ActiveView::Register(_) => "Create account".into(),
        ActiveView::Admin(_) => "Admin".into(),
        ActiveView::NotFound(_) => "Not found".into(),
    }
}

fn render_not_found(frame: &mut Frame, area: Rect, path: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Nothing lives at {path}"),
            theme::table_row(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter ", theme::key_hint_key()),
            Span::styled("home  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("back", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), area);
}
