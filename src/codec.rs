use crate::error::PaletteError;
use std::{fmt, str::FromStr};

/// Luminance threshold separating light backgrounds from dark ones, on the
/// 0-255 scale.
const CONTRAST_THRESHOLD: f32 = 128.0;

/// A canonical color code: an RGB triple whose textual form is always
/// `#rrggbb` in lowercase hex, 7 characters total.
///
/// Equality is exact channel equality. Alpha never participates; two pixels
/// with the same RGB channels map to the same code regardless of their
/// alpha values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorCode {
    red: u8,
    green: u8,
    blue: u8,
}

/// Which side of the contrast threshold a color's background falls on.
///
/// A `Light` background wants dark label text, a `Dark` background wants
/// light label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Contrast {
    Light,
    Dark,
}

impl ColorCode {
    pub fn new(red: u8, green: u8, blue: u8) -> ColorCode {
        Self { red, green, blue }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Classify this color as a swatch background using the weighted
    /// luminance `0.299 r + 0.587 g + 0.114 b`.
    pub fn contrast(self) -> Contrast {
        let luminance =
            0.299 * self.red as f32 + 0.587 * self.green as f32 + 0.114 * self.blue as f32;

        if luminance >= CONTRAST_THRESHOLD {
            Contrast::Light
        } else {
            Contrast::Dark
        }
    }
}

impl fmt::Display for ColorCode {
    // each channel is padded to two digits on its own, so a zero red
    // channel still yields the full 7-character code
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for ColorCode {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || PaletteError::InvalidFormat(s.to_string());

        let hex = s.strip_prefix('#').ok_or_else(malformed)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let red = u8::from_str_radix(&hex[0..2], 16).map_err(|_| malformed())?;
        let green = u8::from_str_radix(&hex[2..4], 16).map_err(|_| malformed())?;
        let blue = u8::from_str_radix(&hex[4..6], 16).map_err(|_| malformed())?;

        Ok(ColorCode::new(red, green, blue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_pads_each_channel() {
        assert_eq!(ColorCode::new(0, 0, 0).to_string(), "#000000");
        assert_eq!(ColorCode::new(255, 255, 255).to_string(), "#ffffff");
        assert_eq!(ColorCode::new(0, 171, 205).to_string(), "#00abcd");
        assert_eq!(ColorCode::new(26, 43, 60).to_string(), "#1a2b3c");
    }

    #[test]
    fn decode_round_trips() {
        for &(r, g, b) in &[(0, 0, 0), (255, 255, 255), (0, 128, 7), (1, 2, 3)] {
            let code = ColorCode::new(r, g, b);
            let parsed: ColorCode = code.to_string().parse().unwrap();
            assert_eq!(parsed.rgb(), (r, g, b));
        }
    }

    #[test]
    fn decode_accepts_uppercase() {
        let code: ColorCode = "#00ABCD".parse().unwrap();
        assert_eq!(code.rgb(), (0, 0xab, 0xcd));
    }

    #[test]
    fn decode_rejects_malformed_input() {
        for bad in ["", "#", "000000", "#00000", "#0000000", "#gg0000", "#00 000"] {
            assert!(
                matches!(bad.parse::<ColorCode>(), Err(PaletteError::InvalidFormat(_))),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn contrast_classifies_extremes() {
        assert_eq!(ColorCode::new(255, 255, 255).contrast(), Contrast::Light);
        assert_eq!(ColorCode::new(0, 0, 0).contrast(), Contrast::Dark);
        // pure green is above the threshold, pure blue well below
        assert_eq!(ColorCode::new(0, 255, 0).contrast(), Contrast::Light);
        assert_eq!(ColorCode::new(0, 0, 255).contrast(), Contrast::Dark);
    }
}
