//! ARGB colors and the overlay style.

use std::str::FromStr;

use serde::Serialize;

use crate::consts::{DEFAULT_LASER_ARGB, DEFAULT_MASK_ARGB};

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Error returned when a theme color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    /// The string has neither 6 (`#RRGGBB`) nor 8 (`#AARRGGBB`) hex digits.
    #[error("color must be #RRGGBB or #AARRGGBB, got {0} digits")]
    BadLength(usize),
    /// A character outside `[0-9a-fA-F]` was found.
    #[error("invalid hex digit in color: {0:?}")]
    InvalidDigit(String),
}

/// A straight (non-premultiplied) ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    #[must_use]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Unpack a `0xAARRGGBB` value.
    #[must_use]
    pub const fn from_argb(argb: u32) -> Self {
        let [a, r, g, b] = argb.to_be_bytes();
        Self { a, r, g, b }
    }

    /// Pack into `0xAARRGGBB`.
    #[must_use]
    pub const fn argb(self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    /// Same RGB with the alpha channel replaced.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some(digits) = s.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(s.to_owned()));
        };
        let opaque = match digits.len() {
            6 => true,
            8 => false,
            n => return Err(ColorParseError::BadLength(n)),
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_owned()));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::InvalidDigit(s.to_owned()))?;
        Ok(Self::from_argb(if opaque { 0xFF00_0000 | value } else { value }))
    }
}

/// Colors used by the overlay. Fixed for the renderer's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayStyle {
    /// Fill for everything outside the scan frame.
    pub mask_color: Color,
    /// Base laser color; its alpha is replaced by the alpha cycle.
    pub laser_color: Color,
    /// Color of result-point dots, when a trail is enabled.
    pub result_point_color: Color,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self::new(Color::from_argb(DEFAULT_MASK_ARGB), Color::from_argb(DEFAULT_LASER_ARGB))
    }
}

impl OverlayStyle {
    /// Style with result points drawn in the laser color.
    #[must_use]
    pub fn new(mask_color: Color, laser_color: Color) -> Self {
        Self { mask_color, laser_color, result_point_color: laser_color }
    }

    /// Parse a style from theme hex strings.
    ///
    /// # Errors
    ///
    /// Returns [`ColorParseError`] if either string is not a valid color.
    pub fn from_hex(mask: &str, laser: &str) -> Result<Self, ColorParseError> {
        Ok(Self::new(mask.parse()?, laser.parse()?))
    }

    #[must_use]
    pub fn with_result_point_color(mut self, color: Color) -> Self {
        self.result_point_color = color;
        self
    }
}
