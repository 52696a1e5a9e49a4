mod edit;
mod mouse;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::mention::{KeyOutcome, MentionKey};

use super::app::App;

pub use edit::handle_edit;
pub use mouse::handle_mouse;

/// Handle a key event.
///
/// The mention controller sees navigation and confirm keys first; anything it
/// does not intercept falls through to normal editing.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if let Some(mention_key) = mention_key(key) {
        let outcome =
            app.mention
                .on_key_down(mention_key, &app.editor.buffer, app.editor.cursor);
        match outcome {
            KeyOutcome::Committed(commit) => {
                app.apply_commit(commit);
                return;
            }
            KeyOutcome::Consumed => return,
            KeyOutcome::Ignored => {}
        }
    }

    handle_edit(app, key);
}

/// Plain Up/Down/Enter are offered to the controller; modified ones never are.
fn mention_key(key: KeyEvent) -> Option<MentionKey> {
    if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(MentionKey::Up),
        KeyCode::Down => Some(MentionKey::Down),
        KeyCode::Enter if key.modifiers.is_empty() => Some(MentionKey::Enter),
        _ => None,
    }
}

/// Handle a bracketed paste event (terminal sends pasted text as a single string).
pub fn handle_paste(app: &mut App, text: &str) {
    if text.is_empty() {
        return;
    }
    let clean = text.replace("\r\n", "\n").replace('\r', "\n");
    app.editor.insert_str(&clean);
    app.text_changed();
}
