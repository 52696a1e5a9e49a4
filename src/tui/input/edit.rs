use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;
use crate::tui::editor::TAB_SPACES;

/// Normal text editing. Every key that changes the text or moves the caret
/// re-evaluates the mention trigger afterwards.
pub fn handle_edit(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL)
        || key.modifiers.contains(KeyModifiers::SUPER);

    match (key.modifiers, key.code) {
        // Submit: Ctrl+Enter (needs keyboard enhancement) or Ctrl+S anywhere
        (_, KeyCode::Enter) if ctrl => app.submit(),
        (_, KeyCode::Char('s')) if ctrl => app.submit(),
        // Quit without submitting
        (_, KeyCode::Char('c')) if ctrl => app.should_quit = true,
        // Esc hides the popup first, quits on a second press
        (_, KeyCode::Esc) => {
            if app.mention.is_visible() {
                app.mention.dismiss();
            } else {
                app.should_quit = true;
            }
            return;
        }
        (_, KeyCode::Enter) => app.editor.insert_char('\n'),
        (_, KeyCode::Tab) => app.editor.insert_str(TAB_SPACES),
        (_, KeyCode::Backspace) => {
            app.editor.backspace();
        }
        (_, KeyCode::Delete) => {
            app.editor.delete();
        }
        (_, KeyCode::Left) if ctrl => app.editor.jump_left(),
        (_, KeyCode::Right) if ctrl => app.editor.jump_right(),
        (_, KeyCode::Left) => app.editor.move_left(),
        (_, KeyCode::Right) => app.editor.move_right(),
        (_, KeyCode::Up) => app.editor.move_vertical(-1, app.wrap_width),
        (_, KeyCode::Down) => app.editor.move_vertical(1, app.wrap_width),
        (_, KeyCode::Home) => app.editor.home(),
        (_, KeyCode::End) => app.editor.end(),
        // Ctrl+A / Ctrl+E: line start / end (macOS Cmd+Left/Right send these)
        (_, KeyCode::Char('a')) if ctrl => app.editor.home(),
        (_, KeyCode::Char('e')) if ctrl => app.editor.end(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) => {
            app.editor.insert_char(c)
        }
        _ => return,
    }

    if !app.should_quit {
        app.text_changed();
    }
}
