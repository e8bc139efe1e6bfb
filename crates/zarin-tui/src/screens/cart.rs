use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use zarin_core::views::cart_total;
use zarin_core::{CartContents, Loadable, Route, format_price};

use crate::action::Action;
use crate::theme;
use crate::widgets::selection;

pub(super) fn handle_key(
    cart: &Loadable<CartContents>,
    table: &mut TableState,
    key: KeyEvent,
) -> Option<Action> {
    let items = cart.loaded().map_or(&[][..], |c| c.items.as_slice());
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            selection::move_selection(table, 1, items.len());
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            selection::move_selection(table, -1, items.len());
            None
        }
        KeyCode::Enter => items.get(selection::selected_index(table)).map(|item| {
            Action::Navigate(Route::Product {
                id: item.product.id.clone(),
            })
        }),
        _ => None,
    }
}

pub(super) fn render(frame: &mut Frame, area: Rect, cart: &Loadable<CartContents>, table: &TableState) {
    let empty = CartContents::default();
    let contents = cart.loaded().unwrap_or(&empty);

    let layout = Layout::vertical([
        Constraint::Min(1),    // lines
        Constraint::Length(1), // total
        Constraint::Length(1), // hints
    ])
    .split(area);

    let header = Row::new(vec![
        Cell::from("Product").style(theme::table_header()),
        Cell::from("Qty").style(theme::table_header()),
        Cell::from("Line total").style(theme::table_header()),
    ]);
    let rows: Vec<Row> = contents
        .items
        .iter()
        .map(|item| {
            Row::new(vec![
                Cell::from(item.product.title.clone()),
                Cell::from(item.qty.to_string()),
                Cell::from(format_price(item.total())).style(theme::price()),
            ])
            .style(theme::table_row())
        })
        .collect();
    let widths = [
        Constraint::Percentage(55),
        Constraint::Percentage(10),
        Constraint::Percentage(35),
    ];
    let widget = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(theme::table_selected());
    let mut state = selection::clamped(table, contents.items.len());
    frame.render_stateful_widget(widget, layout[0], &mut state);

    let total = Line::from(vec![
        Span::styled(" Total  ", theme::title_style()),
        Span::styled(format_price(cart_total(contents)), theme::price()),
    ]);
    frame.render_widget(Paragraph::new(total), layout[1]);

    let hints = Line::from(vec![
        Span::styled(" j/k ", theme::key_hint_key()),
        Span::styled("move  ", theme::key_hint()),
        Span::styled("Enter ", theme::key_hint_key()),
        Span::styled("open product", theme::key_hint()),
    ]);
    frame.render_widget(Paragraph::new(hints), layout[2]);
}
