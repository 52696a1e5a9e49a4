use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

const POPUP_HINT: &str = "\u{2191}\u{2193} select  Enter insert  Esc close";
const EDIT_HINT: &str = "Ctrl+S submit  Esc quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans = vec![Span::styled(
        status_text(app),
        Style::default().fg(app.theme.dim).bg(bg),
    )];

    let hint = if app.mention.is_visible() {
        Some(POPUP_HINT)
    } else if app.show_key_hints {
        Some(EDIT_HINT)
    } else {
        None
    };

    if let Some(hint) = hint {
        let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
        let hint_width = display_width(hint);
        if content_width + hint_width < width {
            let padding = width - content_width - hint_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
            spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Left side: what the popup is matching, or how many candidates are loaded
fn status_text(app: &App) -> String {
    if let (Some(trigger), Some(overlay)) = (app.mention.trigger(), app.mention.overlay()) {
        let filter = trigger.filter_text(&app.editor.buffer, app.editor.cursor);
        return format!(
            " {}{}  {} match{}",
            trigger.symbol,
            filter,
            overlay.suggestions.len(),
            if overlay.suggestions.len() == 1 { "" } else { "es" }
        );
    }
    if app.candidates.is_empty() {
        " loading\u{2026}".to_string()
    } else {
        format!(
            " {} people  {} tags",
            app.candidates.people.len(),
            app.candidates.tags.len()
        )
    }
}
