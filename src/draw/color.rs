use std::{fmt, str::FromStr};

use crate::error::MazeError;

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const MID_GRAY: Rgb = Rgb::new(0x55, 0x55, 0x55);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Fully saturated colour of the given hue in degrees (any value, wrapped into `[0, 360)`).
    pub fn from_hue(hue: f64) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let x = 1.0 - (h % 2.0 - 1.0).abs();
        let (r, g, b) = match h as u8 {
            0 => (1.0, x, 0.0),
            1 => (x, 1.0, 0.0),
            2 => (0.0, 1.0, x),
            3 => (0.0, x, 1.0),
            4 => (x, 0.0, 1.0),
            _ => (1.0, 0.0, x),
        };
        let channel = |v: f64| (v * 255.0).round() as u8;
        Rgb::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = MazeError;

    /// Parses `#rgb` or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MazeError::InvalidColor {
            value: s.to_string(),
        };
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| invalid());
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        match hex.len() {
            3 => Ok(Rgb::new(digit(0)? * 17, digit(1)? * 17, digit(2)? * 17)),
            6 => Ok(Rgb::new(pair(0)?, pair(2)?, pair(4)?)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("#000".parse(), Ok(Rgb::BLACK));
        assert_eq!("#fff".parse(), Ok(Rgb::WHITE));
        assert_eq!("#555555".parse(), Ok(Rgb::MID_GRAY));
        assert_eq!("#1A2b3C".parse(), Ok(Rgb::new(0x1a, 0x2b, 0x3c)));
        assert!("555".parse::<Rgb>().is_err());
        assert!("#12".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let color = Rgb::new(0x0a, 0xbc, 0xff);
        assert_eq!(color.to_string(), "#0abcff");
    }

    #[test]
    fn test_from_hue() {
        assert_eq!(Rgb::from_hue(0.0), Rgb::new(255, 0, 0));
        assert_eq!(Rgb::from_hue(120.0), Rgb::new(0, 255, 0));
        assert_eq!(Rgb::from_hue(240.0), Rgb::new(0, 0, 255));
        assert_eq!(Rgb::from_hue(360.0), Rgb::from_hue(0.0));
        assert_eq!(Rgb::from_hue(-120.0), Rgb::from_hue(240.0));
    }
}
