// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::cell::Style;
use crate::error::RainError;

/// Styles the renderer paints with: `active` for glyphs, `blank` for erased cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub active: Style,
    pub blank: Style,
}

impl Palette {
    pub fn new(fg: Color) -> Self {
        Self {
            active: Style {
                fg: Some(fg),
                bg: None,
            },
            blank: Style::default(),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Color::Green)
    }
}

pub fn parse_color(s: &str) -> Result<Palette, RainError> {
    let fg = match s.trim().to_ascii_lowercase().as_str() {
        "green" => Color::Green,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "cyan" => Color::Cyan,
        "yellow" => Color::Yellow,
        "magenta" | "purple" => Color::Magenta,
        "white" => Color::White,
        _ => return Err(RainError::UnknownColor(s.to_string())),
    };
    Ok(Palette::new(fg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_is_green_on_reset() {
        let p = Palette::default();
        assert_eq!(p.active.fg, Some(Color::Green));
        assert_eq!(p.active.bg, None);
        assert_eq!(p.blank, Style::default());
    }

    #[test]
    fn parse_color_accepts_aliases_and_rejects_unknown() {
        assert_eq!(parse_color("Purple").unwrap().active.fg, Some(Color::Magenta));
        assert!(matches!(
            parse_color("mauve"),
            Err(RainError::UnknownColor(c)) if c == "mauve"
        ));
    }
}
