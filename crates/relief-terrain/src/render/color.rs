//! RGBA colors with channel clamping and CSS-style parsing.

use crate::error::TerrainError;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Clamps a floating channel value into `0..=255`, flooring fractions.
    pub fn clamp_channel(value: f64) -> u8 {
        value.clamp(0.0, 255.0).floor() as u8
    }

    /// Per-channel `other - self` for RGB.
    pub fn difference(self, other: Color) -> [f64; 3] {
        [
            f64::from(other.r) - f64::from(self.r),
            f64::from(other.g) - f64::from(self.g),
            f64::from(other.b) - f64::from(self.b),
        ]
    }

    /// Adds `delta` to each RGB channel, clamping and flooring the result.
    pub fn increased(self, delta: [f64; 3]) -> Self {
        Self {
            r: Self::clamp_channel(f64::from(self.r) + delta[0]),
            g: Self::clamp_channel(f64::from(self.g) + delta[1]),
            b: Self::clamp_channel(f64::from(self.b) + delta[2]),
            a: self.a,
        }
    }

    /// `#rrggbb` representation (alpha omitted).
    pub fn hex_string(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channels as an `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parses `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
    ///
    /// In the `rgba(...)` form alpha is a fraction in `0..=1`. The short `#rgb`
    /// form expands each digit (`#f80` is `#ff8800`).
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::InvalidColor`] for anything else.
    pub fn parse(input: &str) -> Result<Self, TerrainError> {
        let s = input.trim();
        let invalid = || TerrainError::InvalidColor(input.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return match hex.len() {
                3 => {
                    let digit = |i: usize| {
                        u8::from_str_radix(&hex[i..i + 1], 16)
                            .map(|d| d * 17)
                            .map_err(|_| invalid())
                    };
                    Ok(Self::rgb(digit(0)?, digit(1)?, digit(2)?))
                }
                6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
                8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
                _ => Err(invalid()),
            };
        }

        let lower = s.to_ascii_lowercase();
        let (body, has_alpha) = if let Some(rest) = lower.strip_prefix("rgba") {
            (rest, true)
        } else if let Some(rest) = lower.strip_prefix("rgb") {
            (rest, false)
        } else {
            return Err(invalid());
        };
        let inner = body
            .trim()
            .strip_prefix('(')
            .and_then(|b| b.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(invalid());
        }
        let channel = |p: &str| p.parse::<u8>().map_err(|_| invalid());
        let alpha = if has_alpha {
            let a = parts[3].parse::<f64>().map_err(|_| invalid())?;
            if !(0.0..=1.0).contains(&a) {
                return Err(invalid());
            }
            (a * 255.0).round() as u8
        } else {
            255
        };
        Ok(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }
}
