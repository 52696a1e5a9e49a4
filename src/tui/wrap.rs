use crate::util::unicode::{display_width, grapheme_display_width};
use unicode_segmentation::UnicodeSegmentation;

/// A single visual (screen) row of the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualLine {
    /// Byte offset into the whole buffer where this row starts
    pub byte_start: usize,
    /// Byte offset (exclusive) where this row ends; never includes the `\n`
    pub byte_end: usize,
}

/// Lay out the whole buffer: hard newlines always break, long lines wrap.
pub fn wrap_text(text: &str, width: usize) -> Vec<VisualLine> {
    let mut result = Vec::new();
    let mut base = 0;
    for line in text.split('\n') {
        wrap_line(line, base, width, &mut result);
        base += line.len() + 1;
    }
    result
}

/// Wrap one logical line starting at byte `base`.
///
/// Break rules (priority order):
/// 1. Before the word that would overflow, if the row has something before it
/// 2. Grapheme wrap, when the word alone is wider than the row
///
/// Every grapheme lands on a row that fits, so caret geometry never spills
/// past the right edge except for the caret slot after a full row.
fn wrap_line(line: &str, base: usize, width: usize, out: &mut Vec<VisualLine>) {
    if width == 0 || display_width(line) <= width {
        out.push(VisualLine {
            byte_start: base,
            byte_end: base + line.len(),
        });
        return;
    }

    let mut start = 0;
    let mut col = 0;
    let mut word_start: Option<usize> = None;

    for (i, g) in line.grapheme_indices(true) {
        let gw = grapheme_display_width(g);
        let is_ws = g.chars().all(char::is_whitespace);

        if col + gw > width && col > 0 {
            match word_start {
                Some(ws) if !is_ws && ws > start => {
                    out.push(VisualLine {
                        byte_start: base + start,
                        byte_end: base + ws,
                    });
                    start = ws;
                    col = display_width(&line[ws..i]);
                    if col + gw > width {
                        out.push(VisualLine {
                            byte_start: base + start,
                            byte_end: base + i,
                        });
                        start = i;
                        col = 0;
                    }
                }
                _ => {
                    out.push(VisualLine {
                        byte_start: base + start,
                        byte_end: base + i,
                    });
                    start = i;
                    col = 0;
                }
            }
        }

        if is_ws {
            word_start = None;
        } else if word_start.is_none() {
            word_start = Some(i);
        }
        col += gw;
    }

    out.push(VisualLine {
        byte_start: base + start,
        byte_end: base + line.len(),
    });
}

/// Screen cell `(col, row)` of byte `offset`, relative to the text origin.
///
/// At a soft-wrap boundary the offset belongs to the start of the next row.
pub fn caret_position(text: &str, lines: &[VisualLine], offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    for (row, vl) in lines.iter().enumerate() {
        let continues = lines
            .get(row + 1)
            .is_some_and(|next| next.byte_start == vl.byte_end);
        let inside = offset >= vl.byte_start
            && (offset < vl.byte_end || (offset == vl.byte_end && !continues));
        if inside {
            return (display_width(&text[vl.byte_start..offset]), row);
        }
    }
    let last = lines.len().saturating_sub(1);
    (0, last)
}
