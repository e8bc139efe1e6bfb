//! Login and registration forms.

use std::future::Future;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use zarin_core::views::{AuthForm, AuthKind, FormField};
use zarin_core::{AuthResponse, CoreError, Storefront};

use crate::theme;

/// Edit the focused field, or submit on Enter. Returns the submit future
/// for the caller to spawn. Enter is ignored while a submit is running.
pub(super) fn handle_key(
    form: &mut AuthForm,
    store: &Storefront,
    key: KeyEvent,
) -> Option<impl Future<Output = Result<AuthResponse, CoreError>> + Send + use<>> {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => {
            form.input().pop();
        }
        KeyCode::Char(c) => form.input().push(c),
        KeyCode::Enter if !form.is_submitting() => {
            return Some(form.submit(store.session(), store.router()));
        }
        _ => {}
    }
    None
}

/// The alert text for a failed submit. The cause is only logged.
pub(super) fn failure_message(kind: AuthKind) -> String {
    match kind {
        AuthKind::Login => "Sign-in failed. Please try again.".into(),
        AuthKind::Register => "Registration failed. Please try again.".into(),
    }
}

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Name",
        FormField::Email => "Email",
        FormField::Password => "Password",
    }
}

pub(super) fn render(frame: &mut Frame, area: Rect, form: &AuthForm) {
    let fields = form.fields();
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Length(1)); // spacer
    constraints.push(Constraint::Length(1)); // submit / status
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1)); // hints
    let rows = Layout::vertical(constraints).split(area);

    for (i, &field) in fields.iter().enumerate() {
        let focused = form.focused() == field;
        let raw = form.value(field);
        let shown = if field == FormField::Password {
            "•".repeat(raw.chars().count())
        } else {
            raw.to_owned()
        };
        let cursor = if focused { "█" } else { "" };

        let block = Block::default()
            .title(format!(" {} ", field_label(field)))
            .title_style(if focused {
                theme::title_style()
            } else {
                theme::key_hint()
            })
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let input = Paragraph::new(Line::from(vec![
            Span::styled(shown, theme::table_row()),
            Span::styled(cursor, theme::title_style()),
        ]))
        .block(block);
        frame.render_widget(input, rows[i]);
    }

    let n = fields.len();
    let status = if form.is_submitting() {
        Line::from(Span::styled(" Submitting...", theme::key_hint_disabled()))
    } else {
        let verb = match form.kind() {
            AuthKind::Login => "sign in",
            AuthKind::Register => "create account",
        };
        Line::from(vec![
            Span::styled(" Enter ", theme::key_hint_key()),
            Span::styled(verb, theme::key_hint()),
        ])
    };
    frame.render_widget(Paragraph::new(status), rows[n + 1]);

    let hints = Line::from(vec![
        Span::styled(" Tab ", theme::key_hint_key()),
        Span::styled("next field  ", theme::key_hint()),
        Span::styled("Esc ", theme::key_hint_key()),
        Span::styled("back", theme::key_hint()),
    ]);
    frame.render_widget(Paragraph::new(hints), rows[n + 3]);
}
