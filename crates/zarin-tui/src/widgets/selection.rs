//! Row cursor helpers over a [`TableState`] whose length is only known at
//! the call site (lists live in view snapshots, not in the screen).

use ratatui::widgets::TableState;

pub fn selected_index(state: &TableState) -> usize {
    state.selected().unwrap_or(0)
}

/// Move by `delta` rows, clamped to `0..len`.
pub fn move_selection(state: &mut TableState, delta: isize, len: usize) {
    if len == 0 {
        return;
    }
    let current = selected_index(state).min(len - 1);
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.select(Some(next));
}

/// A copy of `state` with the cursor clamped to `len`, for rendering.
pub fn clamped(state: &TableState, len: usize) -> TableState {
    let mut state = state.clone();
    if len == 0 {
        state.select(None);
    } else {
        state.select(Some(selected_index(&state).min(len - 1)));
    }
    state
}
