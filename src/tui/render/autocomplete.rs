use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, PopupHit};
use crate::tui::wrap::{caret_position, wrap_text};
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the suggestion popup one row below the trigger's caret cell.
///
/// `text_area` is the editor's inner area. Falls back to above the trigger
/// when there is no room below.
pub fn render_autocomplete(frame: &mut Frame, app: &mut App, text_area: Rect) {
    let overlay = match app.mention.overlay() {
        Some(o) if !o.suggestions.is_empty() => o,
        _ => return,
    };

    let bg = app.theme.background;
    let text_color = app.theme.text;
    let dim = app.theme.dim;

    let labels: Vec<String> = overlay.suggestions.iter().map(|s| s.label()).collect();
    let count = labels.len().min(app.max_visible);

    // Determine the widest entry (+ padding)
    let max_width = labels
        .iter()
        .map(|s| display_width(s))
        .max()
        .unwrap_or(10)
        + 5; // borders + selection marker

    let term_area = frame.area();
    let popup_w = (max_width as u16).min(term_area.width).max(12.min(term_area.width));
    let popup_h = (count as u16) + 2; // +2 for borders

    // Anchor: caret cell of the trigger offset, laid out like the editor
    let lines = wrap_text(&app.editor.buffer, text_area.width as usize);
    let (mut col, mut row) = caret_position(&app.editor.buffer, &lines, overlay.anchor);
    // Trigger row scrolled off the top (a token wrapped over several rows):
    // follow the caret, which is always on screen
    if row < app.scroll_offset {
        (col, row) = caret_position(&app.editor.buffer, &lines, app.editor.cursor);
    }
    let visible_row = (row.saturating_sub(app.scroll_offset) as u16)
        .min(text_area.height.saturating_sub(1));
    let anchor_y = text_area.y + visible_row;

    let below = anchor_y + 1;
    let y = if below + popup_h <= term_area.height {
        below
    } else {
        anchor_y.saturating_sub(popup_h)
    };
    let x = (text_area.x + col as u16).min(term_area.width.saturating_sub(popup_w));

    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(term_area);

    // Scroll window around selected item
    let scroll_start = app.popup_scroll_start();
    let label_w = (popup_w as usize).saturating_sub(5);

    let mut rendered: Vec<Line> = Vec::new();
    for (i, label) in labels.iter().skip(scroll_start).take(count).enumerate() {
        let is_selected = overlay.selected == Some(scroll_start + i);

        let style = if is_selected {
            Style::default()
                .fg(app.theme.selection_fg)
                .bg(app.theme.selection_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(text_color).bg(bg)
        };

        let prefix = if is_selected { " \u{25B8} " } else { "   " };
        let label = truncate_to_width(label, label_w);
        let pad = label_w.saturating_sub(display_width(&label));

        rendered.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(label, style),
            Span::styled(" ".repeat(pad), style),
        ]));
    }

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(dim).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(rendered).block(block).style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);

    app.popup_hit = Some(PopupHit {
        rows: Rect::new(
            popup_area.x + 1,
            popup_area.y + 1,
            popup_area.width.saturating_sub(2),
            popup_area.height.saturating_sub(2),
        ),
        first_index: scroll_start,
    });
}
