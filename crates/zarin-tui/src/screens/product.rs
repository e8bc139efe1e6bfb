//! Product detail with add-to-cart.

use std::future::Future;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use zarin_core::views::ProductView;
use zarin_core::{CoreError, Loadable, format_price, format_weight};

use crate::action::{Action, Notification};
use crate::theme;

/// `a` starts an add-to-cart unless one is already in flight.
pub(super) fn handle_key(
    view: &ProductView,
    key: KeyEvent,
) -> Option<impl Future<Output = Result<(), CoreError>> + Send + use<>> {
    match key.code {
        KeyCode::Char('a') if !view.is_adding() && view.product().loaded().is_some() => {
            Some(view.add_to_cart(1))
        }
        _ => None,
    }
}

pub(super) fn outcome(result: &Result<(), CoreError>) -> Action {
    match result {
        Ok(()) => Action::Notify(Notification::success("Added to cart")),
        Err(CoreError::Busy { .. }) => Action::Notify(Notification::error("Already adding")),
        Err(_) => Action::Notify(Notification::error("Could not add to cart")),
    }
}

pub(super) fn render(frame: &mut Frame, area: Rect, view: &ProductView, throbber: &ThrobberState) {
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);

    match view.product() {
        Loadable::Loading => {
            let spinner = Throbber::default()
                .label("  Loading product...")
                .style(Style::default().fg(theme::PEARL))
                .throbber_style(Style::default().fg(theme::GOLD));
            frame.render_stateful_widget(spinner, layout[0], &mut throbber.clone());
        }
        Loadable::Loaded(product) => {
            let label = |name: &'static str| Span::styled(format!("  {name:<8}"), theme::key_hint());
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(format!("  {}", product.title), theme::title_style())),
                Line::from(""),
                Line::from(vec![
                    label("Weight"),
                    Span::styled(format_weight(product.weight), theme::table_row()),
                ]),
                Line::from(vec![
                    label("Price"),
                    Span::styled(format_price(product.price), theme::price()),
                ]),
            ];
            if let Some(image) = &product.image {
                lines.push(Line::from(vec![
                    label("Image"),
                    Span::styled(image.as_str(), Style::default().fg(theme::SAPPHIRE)),
                ]));
            }
            frame.render_widget(Paragraph::new(lines), layout[0]);
        }
        // A failed fetch shows the empty page.
        Loadable::Errored => {}
    }

    let add_style = if view.is_adding() {
        theme::key_hint_disabled()
    } else {
        theme::key_hint_key()
    };
    let hints = Line::from(vec![
        Span::styled(" a ", add_style),
        Span::styled(
            if view.is_adding() {
                "adding...  "
            } else {
                "add to cart  "
            },
            theme::key_hint(),
        ),
        Span::styled("Esc ", theme::key_hint_key()),
        Span::styled("back", theme::key_hint()),
    ]);
    frame.render_widget(Paragraph::new(hints), layout[1]);
}
