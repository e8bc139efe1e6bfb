//! Product listings: home, category, and search results.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use zarin_core::{Loadable, Product, Route, format_price, format_weight};

use crate::action::Action;
use crate::theme;
use crate::widgets::selection;

pub(super) fn handle_key(
    products: &Loadable<Vec<Product>>,
    table: &mut TableState,
    key: KeyEvent,
) -> Option<Action> {
    let items = products.items();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            selection::move_selection(table, 1, items.len());
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            selection::move_selection(table, -1, items.len());
            None
        }
        KeyCode::Enter => items
            .get(selection::selected_index(table))
            .map(|p| Action::Navigate(Route::Product { id: p.id.clone() })),
        _ => None,
    }
}

/// Errored and still-loading lists both render as an empty table.
pub(super) fn render(
    frame: &mut Frame,
    area: Rect,
    products: &Loadable<Vec<Product>>,
    table: &TableState,
) {
    let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
    render_table(frame, layout[0], products.items(), table);

    let hints = Line::from(vec![
        Span::styled(" j/k ", theme::key_hint_key()),
        Span::styled("move  ", theme::key_hint()),
        Span::styled("Enter ", theme::key_hint_key()),
        Span::styled("open product", theme::key_hint()),
    ]);
    frame.render_widget(Paragraph::new(hints), layout[1]);
}

pub(super) fn render_table(frame: &mut Frame, area: Rect, products: &[Product], table: &TableState) {
    let header = Row::new(vec![
        Cell::from("Title").style(theme::table_header()),
        Cell::from("Weight").style(theme::table_header()),
        Cell::from("Price").style(theme::table_header()),
    ]);

    let mut state = selection::clamped(table, products.len());
    let selected = state.selected();
    let rows: Vec<Row> = products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let prefix = if selected == Some(i) { "▸" } else { " " };
            Row::new(vec![
                Cell::from(format!("{prefix}{}", product.title)),
                Cell::from(format_weight(product.weight)),
                Cell::from(format_price(product.price)).style(theme::price()),
            ])
            .style(theme::table_row())
        })
        .collect();

    let widths = [
        Constraint::Percentage(50),
        Constraint::Percentage(20),
        Constraint::Percentage(30),
    ];
    let widget = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(theme::table_selected());
    frame.render_stateful_widget(widget, area, &mut state);
}
