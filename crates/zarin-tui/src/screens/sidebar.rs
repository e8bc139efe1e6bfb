//! Category navigation panel on the left edge.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    widgets::{Block, BorderType, Borders, Cell, Row, Table, TableState},
};

use zarin_core::{Category, Loadable, Route};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::selection;

#[derive(Default)]
pub struct Sidebar {
    tree: Loadable<Vec<Category>>,
    table: TableState,
    focused: bool,
}

impl Sidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth-first rows of the whole tree.
    fn rows(&self) -> Vec<(usize, &Category)> {
        self.tree.items().iter().flat_map(Category::flatten).collect()
    }
}

impl Component for Sidebar {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.rows().len();
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                selection::move_selection(&mut self.table, 1, len);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                selection::move_selection(&mut self.table, -1, len);
                None
            }
            KeyCode::Enter => self
                .rows()
                .get(selection::selected_index(&self.table))
                .map(|(_, c)| Action::Navigate(Route::Category { id: c.id.clone() })),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::NavigationUpdated(tree) = action {
            self.tree = tree.clone();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Categories ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });

        let entries = self.rows();
        let rows: Vec<Row> = entries
            .iter()
            .map(|(depth, c)| {
                let marker = if *depth == 0 { "◆ " } else { "· " };
                Row::new(vec![Cell::from(format!(
                    "{}{marker}{}",
                    "  ".repeat(*depth),
                    c.name
                ))])
                .style(theme::table_row())
            })
            .collect();

        let mut table = Table::new(rows, [Constraint::Min(1)]).block(block);
        let mut state = selection::clamped(&self.table, entries.len());
        if self.focused {
            table = table.row_highlight_style(theme::table_selected());
        } else {
            state.select(None);
        }
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use zarin_core::ItemId;

    fn tree() -> Loadable<Vec<Category>> {
        Loadable::Loaded(vec![Category {
            id: ItemId::from(1),
            name: "Rings".into(),
            children: vec![Category {
                id: ItemId::from(11),
                name: "Wedding".into(),
                children: Vec::new(),
            }],
        }])
    }

    #[test]
    fn enter_follows_the_selected_category() {
        let mut sidebar = Sidebar::new();
        sidebar
            .update(&Action::NavigationUpdated(tree()))
            .expect("update");

        let down = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        sidebar.handle_key_event(down).expect("key");
        let action = sidebar.handle_key_event(enter).expect("key");

        assert!(matches!(
            action,
            Some(Action::Navigate(Route::Category { id })) if id == ItemId::from(11)
        ));
    }

    #[test]
    fn errored_tree_is_empty() {
        let mut sidebar = Sidebar::new();
        sidebar
            .update(&Action::NavigationUpdated(Loadable::Errored))
            .expect("update");
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(sidebar.handle_key_event(enter).expect("key").is_none());
    }
}
