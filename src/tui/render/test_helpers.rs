use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{CandidateSource, Person, UiConfig};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A small, already-fetched candidate set.
pub fn sample_candidates() -> CandidateSource {
    CandidateSource::new(
        vec![
            Person::with_display_name("alice", "Alice L"),
            Person::new("albert"),
            Person::new("bob"),
        ],
        vec!["food".into(), "foo".into(), "bar".into()],
    )
}

/// App with `text` loaded (caret at the end) and candidates in place.
/// Call `text_changed` to evaluate the trigger.
pub fn app_with_candidates(text: &str) -> App {
    let mut app = App::new(text, &UiConfig::default());
    app.candidates = sample_candidates();
    app
}
