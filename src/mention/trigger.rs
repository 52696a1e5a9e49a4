use std::fmt;

use serde::Serialize;

/// The character that opens a completion token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TriggerSymbol {
    /// `@` completes people
    #[serde(rename = "@")]
    At,
    /// `#` completes tags
    #[serde(rename = "#")]
    Hash,
}

impl TriggerSymbol {
    pub fn as_char(self) -> char {
        match self {
            TriggerSymbol::At => '@',
            TriggerSymbol::Hash => '#',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '@' => Some(TriggerSymbol::At),
            '#' => Some(TriggerSymbol::Hash),
            _ => None,
        }
    }
}

impl fmt::Display for TriggerSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// The most recent trigger before the caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trigger {
    pub symbol: TriggerSymbol,
    /// Byte offset just after the symbol; the symbol itself is at `offset - 1`.
    pub offset: usize,
}

impl Trigger {
    /// Byte offset of the symbol character
    pub fn symbol_pos(&self) -> usize {
        self.offset - 1
    }

    /// Lower-cased text typed between the symbol and the caret.
    pub fn filter_text(&self, text: &str, caret: usize) -> String {
        let caret = floor_char_boundary(text, caret);
        if caret <= self.offset {
            return String::new();
        }
        text[self.offset..caret].to_lowercase()
    }

    /// Whether `text` still has this trigger's symbol at the recorded position.
    pub fn still_present(&self, text: &str) -> bool {
        text.get(self.symbol_pos()..)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c == self.symbol.as_char())
    }
}

/// Find the last `@` or `#` in `text[..caret]`.
///
/// The later of the two wins. There is no word-boundary check, so a symbol in
/// the middle of a word still opens a trigger, and whitespace does not close one.
pub fn find_trigger(text: &str, caret: usize) -> Option<Trigger> {
    let prefix = &text[..floor_char_boundary(text, caret)];
    let at = prefix.rfind('@');
    let hash = prefix.rfind('#');
    let (pos, symbol) = match (at, hash) {
        (Some(a), Some(h)) if a > h => (a, TriggerSymbol::At),
        (Some(_), Some(h)) => (h, TriggerSymbol::Hash),
        (Some(a), None) => (a, TriggerSymbol::At),
        (None, Some(h)) => (h, TriggerSymbol::Hash),
        (None, None) => return None,
    };
    Some(Trigger {
        symbol,
        offset: pos + 1,
    })
}

/// Clamp `offset` into `text` and back it up to a char boundary.
pub(crate) fn floor_char_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
