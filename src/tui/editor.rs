use crate::util::unicode::{
    display_col_to_byte_offset, next_grapheme_boundary, prev_grapheme_boundary, space_jump_left,
    space_jump_right,
};

use super::wrap::{VisualLine, caret_position, wrap_text};

/// Spaces inserted by Tab
pub const TAB_SPACES: &str = "    ";

/// Multi-line text buffer with a byte-offset caret on grapheme boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Editor {
    pub buffer: String,
    pub cursor: usize,
    /// Display column remembered across vertical moves
    pub sticky_col: Option<usize>,
}

impl Editor {
    /// Editor seeded with `text`, caret at the end
    pub fn new(text: impl Into<String>) -> Self {
        let buffer = text.into();
        let cursor = buffer.len();
        Editor {
            buffer,
            cursor,
            sticky_col: None,
        }
    }

    pub fn insert_str(&mut self, s: &str) {
        self.buffer.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.sticky_col = None;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.sticky_col = None;
    }

    /// Delete the grapheme before the caret. Returns false at the start.
    pub fn backspace(&mut self) -> bool {
        let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) else {
            return false;
        };
        self.buffer.drain(prev..self.cursor);
        self.cursor = prev;
        self.sticky_col = None;
        true
    }

    /// Delete the grapheme under the caret. Returns false at the end.
    pub fn delete(&mut self) -> bool {
        let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) else {
            return false;
        };
        self.buffer.drain(self.cursor..next);
        self.sticky_col = None;
        true
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = prev;
        }
        self.sticky_col = None;
    }

    pub fn move_right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.buffer, self.cursor) {
            self.cursor = next;
        }
        self.sticky_col = None;
    }

    /// Ctrl+Left: jump to the previous space, if any
    pub fn jump_left(&mut self) {
        if let Some(pos) = space_jump_left(&self.buffer, self.cursor) {
            self.cursor = pos;
        }
        self.sticky_col = None;
    }

    /// Ctrl+Right: jump to the next space, if any
    pub fn jump_right(&mut self) {
        if let Some(pos) = space_jump_right(&self.buffer, self.cursor) {
            self.cursor = pos;
        }
        self.sticky_col = None;
    }

    /// Start of the current logical line
    pub fn home(&mut self) {
        self.cursor = self.buffer[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
        self.sticky_col = None;
    }

    /// End of the current logical line
    pub fn end(&mut self) {
        self.cursor = self.buffer[self.cursor..]
            .find('\n')
            .map_or(self.buffer.len(), |i| self.cursor + i);
        self.sticky_col = None;
    }

    /// Move up or down `delta` visual rows at wrap `width`, keeping the column.
    pub fn move_vertical(&mut self, delta: isize, width: usize) {
        let lines = wrap_text(&self.buffer, width);
        let (col, row) = caret_position(&self.buffer, &lines, self.cursor);
        let target_col = *self.sticky_col.get_or_insert(col);

        let target_row = row as isize + delta;
        if target_row < 0 {
            self.cursor = 0;
            return;
        }
        let Some(vl) = lines.get(target_row as usize) else {
            self.cursor = self.buffer.len();
            return;
        };
        self.cursor = offset_in_row(&self.buffer, vl, target_col);
    }

    /// Replace the whole buffer (after a committed suggestion)
    pub fn replace(&mut self, text: String, caret: usize) {
        self.cursor = caret.min(text.len());
        self.buffer = text;
        self.sticky_col = None;
    }
}

fn offset_in_row(text: &str, vl: &VisualLine, col: usize) -> usize {
    let row_text = &text[vl.byte_start..vl.byte_end];
    vl.byte_start + display_col_to_byte_offset(row_text, col)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_puts_caret_at_end() {
        let ed = Editor::new("hello");
        assert_eq!(ed.cursor, 5);
    }

    #[test]
    fn insert_and_backspace() {
        let mut ed = Editor::new("");
        ed.insert_str("hé");
        ed.insert_char('@');
        assert_eq!(ed.buffer, "hé@");
        assert_eq!(ed.cursor, 4);
        assert!(ed.backspace());
        assert!(ed.backspace());
        assert_eq!(ed.buffer, "h");
        assert_eq!(ed.cursor, 1);
        assert!(ed.backspace());
        assert!(!ed.backspace());
    }

    #[test]
    fn delete_under_caret() {
        let mut ed = Editor::new("abc");
        ed.cursor = 1;
        assert!(ed.delete());
        assert_eq!(ed.buffer, "ac");
        ed.cursor = 2;
        assert!(!ed.delete());
    }

    #[test]
    fn left_right_respect_graphemes() {
        let mut ed = Editor::new("aé");
        ed.move_left();
        assert_eq!(ed.cursor, 1);
        ed.move_left();
        ed.move_left();
        assert_eq!(ed.cursor, 0);
        ed.move_right();
        ed.move_right();
        ed.move_right();
        assert_eq!(ed.cursor, 3);
    }

    #[test]
    fn space_jumps() {
        let mut ed = Editor::new("one two three");
        ed.jump_left();
        assert_eq!(ed.cursor, 7);
        ed.jump_left();
        assert_eq!(ed.cursor, 3);
        ed.jump_left();
        assert_eq!(ed.cursor, 3);
        ed.jump_right();
        assert_eq!(ed.cursor, 7);
    }

    #[test]
    fn home_end_stay_on_logical_line() {
        let mut ed = Editor::new("first\nsecond");
        ed.cursor = 8;
        ed.home();
        assert_eq!(ed.cursor, 6);
        ed.end();
        assert_eq!(ed.cursor, 12);
        ed.cursor = 2;
        ed.end();
        assert_eq!(ed.cursor, 5);
    }

    #[test]
    fn vertical_moves_keep_column() {
        let mut ed = Editor::new("abcdef\nxy\nlmnopq");
        ed.cursor = 4;
        ed.move_vertical(1, 40);
        assert_eq!(ed.cursor, 9); // end of "xy"
        ed.move_vertical(1, 40);
        assert_eq!(ed.cursor, 14); // column 4 of "lmnopq"
        ed.move_vertical(1, 40);
        assert_eq!(ed.cursor, ed.buffer.len());
        ed.cursor = 2;
        ed.move_vertical(-1, 40);
        assert_eq!(ed.cursor, 0);
    }

    #[test]
    fn replace_clamps_caret() {
        let mut ed = Editor::new("x");
        ed.replace("hello".into(), 99);
        assert_eq!(ed.cursor, 5);
    }
}
