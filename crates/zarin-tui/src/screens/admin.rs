//! Admin landing page: categories and a product page, admins only.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use zarin_core::views::AdminView;
use zarin_core::{Category, Route};

use crate::action::Action;
use crate::screens::catalog;
use crate::theme;
use crate::widgets::{selection, sub_tabs};

const SECTIONS: [&str; 2] = ["Categories", "Products"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Categories,
    Products,
}

impl Section {
    fn of(view: &AdminView) -> Self {
        match view.section() {
            Some(s) if s.starts_with("products") => Self::Products,
            _ => Self::Categories,
        }
    }

    fn route(self) -> Route {
        let section = match self {
            Self::Categories => "categories",
            Self::Products => "products",
        };
        Route::Admin {
            section: Some(section.into()),
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Categories => 0,
            Self::Products => 1,
        }
    }
}

pub(super) fn handle_key(view: &AdminView, table: &mut TableState, key: KeyEvent) -> Option<Action> {
    if view.is_denied() {
        return None;
    }
    let section = Section::of(view);
    let categories = view.categories();
    let products = view.products();
    let len = match section {
        Section::Categories => categories.items().len(),
        Section::Products => products.items().len(),
    };

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            selection::move_selection(table, 1, len);
            None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            selection::move_selection(table, -1, len);
            None
        }
        KeyCode::Char('h') | KeyCode::Left if section == Section::Products => {
            Some(Action::Navigate(Section::Categories.route()))
        }
        KeyCode::Char('l') | KeyCode::Right if section == Section::Categories => {
            Some(Action::Navigate(Section::Products.route()))
        }
        KeyCode::Enter => {
            let idx = selection::selected_index(table);
            match section {
                Section::Categories => categories
                    .items()
                    .get(idx)
                    .map(|c| Action::Navigate(Route::Category { id: c.id.clone() })),
                Section::Products => products
                    .items()
                    .get(idx)
                    .map(|p| Action::Navigate(Route::Product { id: p.id.clone() })),
            }
        }
        _ => None,
    }
}

pub(super) fn render(frame: &mut Frame, area: Rect, view: &AdminView, table: &TableState) {
    if view.is_denied() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Access denied",
                Style::default().fg(theme::RUBY),
            )),
            Line::from(Span::styled(
                "  Sign in with an administrator account to continue.",
                theme::key_hint(),
            )),
        ];
        frame.render_widget(Paragraph::new(text), area);
        return;
    }

    let section = Section::of(view);
    let layout = Layout::vertical([
        Constraint::Length(1), // section tabs
        Constraint::Min(1),    // table
        Constraint::Length(1), // hints
    ])
    .split(area);

    let tabs = sub_tabs::render_sub_tabs(&SECTIONS, section.index());
    frame.render_widget(Paragraph::new(tabs), layout[0]);

    match section {
        Section::Categories => render_categories(frame, layout[1], view.categories().items(), table),
        Section::Products => catalog::render_table(frame, layout[1], view.products().items(), table),
    }

    let hints = Line::from(vec![
        Span::styled(" h/l ", theme::key_hint_key()),
        Span::styled("section  ", theme::key_hint()),
        Span::styled("j/k ", theme::key_hint_key()),
        Span::styled("move  ", theme::key_hint()),
        Span::styled("Enter ", theme::key_hint_key()),
        Span::styled("open", theme::key_hint()),
    ]);
    frame.render_widget(Paragraph::new(hints), layout[2]);
}

fn render_categories(frame: &mut Frame, area: Rect, categories: &[Category], table: &TableState) {
    let header = Row::new(vec![
        Cell::from("ID").style(theme::table_header()),
        Cell::from("Name").style(theme::table_header()),
        Cell::from("Subcategories").style(theme::table_header()),
    ]);
    let rows: Vec<Row> = categories
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::from(c.id.to_string()),
                Cell::from(c.name.clone()),
                Cell::from(c.children.len().to_string()),
            ])
            .style(theme::table_row())
        })
        .collect();
    let widths = [
        Constraint::Length(8),
        Constraint::Min(12),
        Constraint::Length(14),
    ];
    let widget = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(theme::table_selected());
    let mut state = selection::clamped(table, categories.len());
    frame.render_stateful_widget(widget, area, &mut state);
}
