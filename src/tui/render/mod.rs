pub mod autocomplete;
pub mod editor_view;
pub mod status_row;

#[cfg(test)]
pub(crate) mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Main render function: dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: editor | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    let text_area = editor_view::render_editor(frame, app, chunks[0]);

    // Popup hit area is rebuilt every frame
    app.popup_hit = None;
    if app.mention.is_visible() {
        autocomplete::render_autocomplete(frame, app, text_area);
    }

    status_row::render_status_row(frame, app, chunks[1]);
}
