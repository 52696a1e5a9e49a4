use ratatui::style::Color;

use crate::mention::TriggerSymbol;
use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    /// `@handle` tokens in the editor
    pub mention: Color,
    /// `#tag` tokens in the editor
    pub tag: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x2B, 0x30, 0x35),
            text: Color::Rgb(0xDE, 0xE2, 0xE6),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x0D, 0x6E, 0xFD),
            dim: Color::Rgb(0x6C, 0x75, 0x7D),
            mention: Color::Rgb(0x6E, 0xA8, 0xFE),
            tag: Color::Rgb(0x75, 0xB7, 0x98),
            selection_bg: Color::Rgb(0x21, 0x25, 0x29),
            selection_fg: Color::Rgb(0x0D, 0x6E, 0xFD),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                tracing::warn!(key = %key, value = %value, "ignoring invalid color");
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "highlight" => theme.highlight = color,
                "dim" => theme.dim = color,
                "mention" => theme.mention = color,
                "tag" => theme.tag = color,
                "selection_bg" => theme.selection_bg = color,
                "selection_fg" => theme.selection_fg = color,
                _ => {}
            }
        }

        theme
    }

    /// Color for a token opened by `symbol`
    pub fn symbol_color(&self, symbol: TriggerSymbol) -> Color {
        match symbol {
            TriggerSymbol::At => self.mention,
            TriggerSymbol::Hash => self.tag,
        }
    }
}
