use std::ops::Range;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::mention::TriggerSymbol;
use crate::tui::app::App;
use crate::tui::wrap::{VisualLine, caret_position, wrap_text};

/// Render the text surface. Returns the inner area the text occupies, which
/// the popup is positioned against.
pub fn render_editor(frame: &mut Frame, app: &mut App, area: Rect) -> Rect {
    let bg = app.theme.background;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(" jot ", Style::default().fg(app.theme.highlight).bg(bg)))
        .style(Style::default().bg(bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return inner;
    }

    let text = &app.editor.buffer;
    app.wrap_width = inner.width as usize;
    let lines = wrap_text(text, app.wrap_width);
    let (caret_col, caret_row) = caret_position(text, &lines, app.editor.cursor);

    // Keep the caret row on screen
    let height = inner.height as usize;
    if caret_row < app.scroll_offset {
        app.scroll_offset = caret_row;
    } else if caret_row >= app.scroll_offset + height {
        app.scroll_offset = caret_row + 1 - height;
    }

    let tokens = token_ranges(text);
    let rendered: Vec<Line> = lines
        .iter()
        .skip(app.scroll_offset)
        .take(height)
        .map(|vl| styled_row(app, text, vl, &tokens))
        .collect();

    frame.render_widget(
        Paragraph::new(rendered).style(Style::default().fg(app.theme.text).bg(bg)),
        inner,
    );

    let x = inner.x + (caret_col as u16).min(inner.width.saturating_sub(1));
    let y = inner.y + (caret_row - app.scroll_offset) as u16;
    frame.set_cursor_position(Position::new(x, y));

    inner
}

/// Byte ranges of `@word` / `#word` tokens (symbol through the next whitespace)
pub(crate) fn token_ranges(text: &str) -> Vec<(Range<usize>, TriggerSymbol)> {
    let mut result = Vec::new();
    let mut iter = text.char_indices().peekable();
    while let Some((i, c)) = iter.next() {
        let Some(symbol) = TriggerSymbol::from_char(c) else {
            continue;
        };
        let mut end = i + c.len_utf8();
        while let Some(&(j, next)) = iter.peek() {
            if next.is_whitespace() || TriggerSymbol::from_char(next).is_some() {
                break;
            }
            end = j + next.len_utf8();
            iter.next();
        }
        result.push((i..end, symbol));
    }
    result
}

fn styled_row<'a>(
    app: &App,
    text: &'a str,
    vl: &VisualLine,
    tokens: &[(Range<usize>, TriggerSymbol)],
) -> Line<'a> {
    let bg = app.theme.background;
    let plain = Style::default().fg(app.theme.text).bg(bg);
    let mut spans = Vec::new();
    let mut pos = vl.byte_start;

    for (range, symbol) in tokens {
        if range.end <= vl.byte_start || range.start >= vl.byte_end {
            continue;
        }
        let start = range.start.max(vl.byte_start);
        let end = range.end.min(vl.byte_end);
        if start > pos {
            spans.push(Span::styled(&text[pos..start], plain));
        }
        spans.push(Span::styled(
            &text[start..end],
            Style::default().fg(app.theme.symbol_color(*symbol)).bg(bg),
        ));
        pos = end;
    }
    if pos < vl.byte_end {
        spans.push(Span::styled(&text[pos..vl.byte_end], plain));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn token_ranges_split_on_whitespace_and_symbols() {
        let text = "hi @alice and #food#fun";
        let tokens = token_ranges(text);
        let words: Vec<&str> = tokens.iter().map(|(r, _)| &text[r.clone()]).collect();
        assert_eq!(words, vec!["@alice", "#food", "#fun"]);
        assert_eq!(tokens[0].1, TriggerSymbol::At);
        assert_eq!(tokens[1].1, TriggerSymbol::Hash);
    }

    #[test]
    fn editor_renders_wrapped_text_in_a_frame() {
        let mut app = app_with_candidates("hello big world");
        let output = render_to_string(12, 6, |frame, area| {
            render_editor(frame, &mut app, area);
        });
        let rows: Vec<&str> = output.lines().collect();
        assert!(rows[0].starts_with("┌ jot "));
        assert_eq!(rows[1], "│hello big │");
        assert_eq!(rows[2], "│world     │");
        assert_eq!(app.wrap_width, 10);
    }

    #[test]
    fn editor_scrolls_to_keep_caret_visible() {
        let mut app = app_with_candidates("a\nb\nc\nd\ne");
        let output = render_to_string(10, 4, |frame, area| {
            render_editor(frame, &mut app, area);
        });
        assert_eq!(app.scroll_offset, 3);
        assert!(output.contains("│e"));
        assert!(!output.contains("│a"));
    }
}
