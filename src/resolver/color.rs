use std::fmt;

use serde::{Serialize, Serializer};

/// A fully resolved RGBA color.
///
/// Parsed from 3/6/8-digit hex strings, with or without a leading `#`.
/// Eight-digit values are `AARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Parse a hex color string. Returns `None` for anything else.
    pub fn parse(text: &str) -> Option<Color> {
        let hex = text.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            3 => {
                let r = nibble(hex, 0)?;
                let g = nibble(hex, 1)?;
                let b = nibble(hex, 2)?;
                Some(Color::rgb(r, g, b))
            }
            6 => {
                let r = byte(hex, 0)?;
                let g = byte(hex, 2)?;
                let b = byte(hex, 4)?;
                Some(Color::rgb(r, g, b))
            }
            8 => {
                let a = byte(hex, 0)?;
                let r = byte(hex, 2)?;
                let g = byte(hex, 4)?;
                let b = byte(hex, 6)?;
                Some(Color::rgba(r, g, b, a))
            }
            _ => None,
        }
    }
}

/// Expand one shorthand digit to its full byte (`f` -> `0xff`).
fn nibble(hex: &str, index: usize) -> Option<u8> {
    let digit = u8::from_str_radix(hex.get(index..index + 1)?, 16).ok()?;
    Some(digit * 0x11)
}

fn byte(hex: &str, index: usize) -> Option<u8> {
    u8::from_str_radix(hex.get(index..index + 2)?, 16).ok()
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_six_digit() {
        assert_eq!(Color::parse("#ff8000"), Some(Color::rgb(0xff, 0x80, 0x00)));
        assert_eq!(Color::parse("ff8000"), Some(Color::rgb(0xff, 0x80, 0x00)));
    }

    #[test]
    fn test_parse_three_digit_expands() {
        assert_eq!(Color::parse("#f80"), Some(Color::rgb(0xff, 0x88, 0x00)));
    }

    #[test]
    fn test_parse_eight_digit_is_aarrggbb() {
        assert_eq!(
            Color::parse("#80ff0000"),
            Some(Color::rgba(0xff, 0x00, 0x00, 0x80))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Color::parse("red"), None);
        assert_eq!(Color::parse("#ff"), None);
        assert_eq!(Color::parse("#ggg"), None);
        assert_eq!(Color::parse(""), None);
    }

    #[test]
    fn test_display_round_trips() {
        let color = Color::rgba(0x12, 0x34, 0x56, 0x78);
        assert_eq!(color.to_string(), "#78123456");
        assert_eq!(Color::parse(&color.to_string()), Some(color));
    }
}
