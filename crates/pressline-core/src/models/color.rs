use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An sRGB color parsed from a hex string such as `1a2b3c`, `#1a2b3c` or `abc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 3 or 6 digit hex color. A single leading `#` is tolerated.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let digits = input.strip_prefix('#').unwrap_or(input);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidColor(input.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| CoreError::InvalidColor(input.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            // Shorthand: each digit is doubled, `abc` == `aabbcc`.
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::new(r * 17, g * 17, b * 17))
            }
            _ => Err(CoreError::InvalidColor(input.to_string())),
        }
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for HexColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
