//! Translucent colours
//!
//! Colour maths is somebody else's job. Here a colour is four
//! floating-point channels in `0.0..=1.0` that backends read verbatim.

use serde::{Deserialize, Serialize};

/// An RGBA colour with straight (non-premultiplied) alpha
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Build from 8-bit channels
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0,
            a as f64 / 255.0,
        )
    }

    /// Same colour with a different alpha
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Channels clamped into range and scaled to 8 bits
    pub fn to_rgba8(self) -> [u8; 4] {
        let scale = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [scale(self.r), scale(self.g), scale(self.b), scale(self.a)]
    }

    /// `#rrggbb` hex form, alpha dropped
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(digits.chars()) {
                    let v = c.to_digit(16)? as u8;
                    *slot = v * 17;
                }
                Some(Self::rgba8(out[0], out[1], out[2], 255))
            },
            6 => Some(Self::rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Self::rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        BLACK
    }
}

pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);
pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_clamps() {
        assert_eq!(Color::rgba(1.5, -0.2, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(Color::from_hex("#ff0000"), Some(RED));
        assert_eq!(Color::from_hex("fff"), Some(WHITE));
        assert_eq!(
            Color::from_hex("#00000080").map(|c| c.to_rgba8()),
            Some([0, 0, 0, 128])
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(RED.to_hex(), "#ff0000");
    }
}
