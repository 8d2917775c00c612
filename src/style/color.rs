//! Series colours.
//!
//! Accepted forms: "#D62728" or one of a few names used by the benchmark plots.

use crate::style::StyleError;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colours used by the throughput comparison plots, in series order.
pub const DEFAULT_PALETTE: [Rgb; 6] = [
    Rgb(0xD6, 0x27, 0x28),
    Rgb(0x0A, 0x64, 0x0C),
    Rgb(0x20, 0x77, 0xB4),
    Rgb(0xFF, 0x7F, 0x0E),
    Rgb(0x34, 0x34, 0x34),
    Rgb(0x80, 0x80, 0x80),
];

/// Palette entry for series `index`, wrapping around.
pub fn palette_color(index: usize) -> Rgb {
    DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()]
}

impl Rgb {
    pub fn parse(s: &str) -> Result<Self, StyleError> {
        let s = s.trim();
        let named = match s.to_ascii_lowercase().as_str() {
            "grey" | "gray" => Some(Rgb(0x80, 0x80, 0x80)),
            "black" => Some(Rgb(0, 0, 0)),
            "red" => Some(Rgb(0xD6, 0x27, 0x28)),
            "green" => Some(Rgb(0x0A, 0x64, 0x0C)),
            "blue" => Some(Rgb(0x20, 0x77, 0xB4)),
            "orange" => Some(Rgb(0xFF, 0x7F, 0x0E)),
            _ => None,
        };
        if let Some(c) = named {
            return Ok(c);
        }

        let re = Regex::new(r"^#([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")?;
        let caps = re
            .captures(s)
            .ok_or_else(|| StyleError::BadColor(s.to_string()))?;
        let channel = |i: usize| {
            u8::from_str_radix(&caps[i], 16).map_err(|_| StyleError::BadColor(s.to_string()))
        };
        Ok(Rgb(channel(1)?, channel(2)?, channel(3)?))
    }
}
