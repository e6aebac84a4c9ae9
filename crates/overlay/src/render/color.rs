use std::{fmt, str::FromStr};

use crate::error::{OverlayError, Result};

/// An opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse named, `#rgb`, `#rrggbb` and `rgb(...)` forms
    pub fn parse(value: &str) -> Result<Self> {
        let color = svgtypes::Color::from_str(value.trim())
            .map_err(|_| OverlayError::InvalidColor(value.to_string()))?;
        Ok(Self::new(color.red, color.green, color.blue))
    }

    /// Offset every channel, saturating at the 0-255 bounds
    pub fn offset(&self, deltas: [i32; 3]) -> Self {
        let shift = |channel: u8, delta: i32| (channel as i32 + delta).clamp(0, 255) as u8;
        Self::new(
            shift(self.red, deltas[0]),
            shift(self.green, deltas[1]),
            shift(self.blue, deltas[2]),
        )
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(Rgb::parse("#ff8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(Rgb::parse("#f80").unwrap(), Rgb::new(255, 136, 0));
        assert_eq!(Rgb::parse("rgb(10, 20, 30)").unwrap(), Rgb::new(10, 20, 30));
        assert_eq!(Rgb::parse("steelblue").unwrap(), Rgb::new(70, 130, 180));
    }

    #[test]
    fn test_invalid_color() {
        assert!(matches!(Rgb::parse("not-a-color"), Err(OverlayError::InvalidColor(_))));
    }

    #[test]
    fn test_offset_saturates() {
        let c = Rgb::new(250, 5, 128).offset([10, -10, 0]);
        assert_eq!(c, Rgb::new(255, 0, 128));
        assert_eq!(c.to_hex(), "#ff0080");
    }
}
