use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::tui::app::App;

/// Left click on a popup row commits that suggestion.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let Some(hit) = app.popup_hit else {
        return;
    };
    if !hit.rows.contains(Position::new(mouse.column, mouse.row)) {
        return;
    }
    let index = hit.first_index + (mouse.row - hit.rows.y) as usize;
    if let Some(commit) = app
        .mention
        .click_row(index, &app.editor.buffer, app.editor.cursor)
    {
        app.apply_commit(commit);
    }
}
