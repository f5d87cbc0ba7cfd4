#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Colour handling for the wind map.
//!
//! Normalizes the colour representations accepted on the command line and
//! in marker options (named colours, hex strings, fractional and 8-bit RGB
//! tuples) into a single 8-bit [`Rgb`] triple, and picks a legible outline
//! colour for a fill using its relative luminance.

pub mod named;
pub mod palette;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Luminance above which a dark outline is drawn around a marker.
pub const OUTLINE_LUMINANCE_THRESHOLD: f64 = 0.5;

/// Errors that can occur while parsing or normalizing a colour.
#[derive(Debug, thiserror::Error)]
pub enum ColorError {
    /// The colour name is not in the named colour table.
    #[error("Unknown colour name: {0}")]
    UnknownName(String),

    /// A `#` colour string has the wrong length or non-hex digits.
    #[error("Invalid hex colour: {0}")]
    InvalidHex(String),

    /// A tuple channel is not a number, or lies outside the accepted range.
    #[error("Invalid colour channel '{channel}' in {input}")]
    InvalidChannel {
        /// The offending channel text.
        channel: String,
        /// The full colour input.
        input: String,
    },

    /// A tuple does not have three (or four, with alpha) channels.
    #[error("Expected 3 or 4 colour channels, got {0}")]
    ChannelCount(usize),
}

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its three channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a colour from a `0x00RRGGBB` integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u32(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    /// Formats as CSS `rgb(r,g,b)`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    /// Formats as a lowercase `#rrggbb` hex string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Any of the colour representations accepted by [`to_rgb`].
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    /// A named colour such as `"sienna"` or `"tab:blue"`.
    Named(String),
    /// A hex string such as `"#ff00ff"`, `"#f0f"` or `"#ff00ff80"`.
    Hex(String),
    /// Channels in `[0, 1]`.
    Fractional(f64, f64, f64),
    /// Channels already in `0..=255`.
    Rgb8(u8, u8, u8),
}

impl From<Rgb> for ColorInput {
    fn from(value: Rgb) -> Self {
        Self::Rgb8(value.r, value.g, value.b)
    }
}

impl FromStr for ColorInput {
    type Err = ColorError;

    /// Classifies a textual colour.
    ///
    /// Strings starting with `#` are hex, strings containing a comma are
    /// tuples and anything else is a name. A tuple whose channels are all
    /// at most `1` is fractional; otherwise every channel must be an
    /// integer in `0..=255`. A fourth (alpha) channel is accepted and
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.starts_with('#') {
            return Ok(Self::Hex(trimmed.to_string()));
        }

        if !trimmed.contains(',') {
            return Ok(Self::Named(trimmed.to_string()));
        }

        let inner = trimmed
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim();
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(ColorError::ChannelCount(parts.len()));
        }

        let channels = parts[..3]
            .iter()
            .map(|part| {
                part.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .ok_or_else(|| ColorError::InvalidChannel {
                        channel: (*part).to_string(),
                        input: trimmed.to_string(),
                    })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if channels.iter().all(|c| *c <= 1.0) {
            return Ok(Self::Fractional(channels[0], channels[1], channels[2]));
        }

        let mut bytes = [0u8; 3];
        for (slot, (value, part)) in bytes.iter_mut().zip(channels.iter().zip(&parts)) {
            *slot = to_byte(*value).ok_or_else(|| ColorError::InvalidChannel {
                channel: (*part).to_string(),
                input: trimmed.to_string(),
            })?;
        }

        Ok(Self::Rgb8(bytes[0], bytes[1], bytes[2]))
    }
}

/// Whether a marker outline is drawn dark or light.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutlineColor {
    /// Used on light fills.
    Black,
    /// Used on dark fills.
    White,
}

impl OutlineColor {
    /// The 8-bit colour of this outline.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0, 0, 0),
            Self::White => Rgb::new(255, 255, 255),
        }
    }
}

/// Normalizes any [`ColorInput`] to an 8-bit [`Rgb`] triple.
///
/// 8-bit input is returned unchanged. Fractional channels are scaled by
/// 255 and truncated.
///
/// # Errors
///
/// Returns [`ColorError`] if a name is unknown, a hex string is malformed,
/// or a fractional channel lies outside `[0, 1]`.
pub fn to_rgb(input: &ColorInput) -> Result<Rgb, ColorError> {
    match input {
        ColorInput::Named(name) => {
            named::lookup(name).ok_or_else(|| ColorError::UnknownName(name.clone()))
        }
        ColorInput::Hex(hex) => parse_hex(hex),
        ColorInput::Fractional(r, g, b) => {
            let channel = |v: f64| {
                fraction_to_byte(v).ok_or_else(|| ColorError::InvalidChannel {
                    channel: v.to_string(),
                    input: format!("({r},{g},{b})"),
                })
            };
            Ok(Rgb::new(channel(*r)?, channel(*g)?, channel(*b)?))
        }
        ColorInput::Rgb8(r, g, b) => Ok(Rgb::new(*r, *g, *b)),
    }
}

/// Parses and normalizes a textual colour in one step.
///
/// # Errors
///
/// Returns [`ColorError`] if the text cannot be classified or normalized.
pub fn parse_color(s: &str) -> Result<Rgb, ColorError> {
    to_rgb(&s.parse()?)
}

/// Relative luminance of an 8-bit colour, in `[0, 1]`.
///
/// A weighted sum of the raw channels (`0.2126 R + 0.7152 G + 0.0722 B`)
/// divided by 255. The sum is taken over integer weights so white is
/// exactly `1.0` and black exactly `0.0`.
#[must_use]
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let weighted =
        2126 * u32::from(rgb.r) + 7152 * u32::from(rgb.g) + 722 * u32::from(rgb.b);
    f64::from(weighted) / 2_550_000.0
}

/// Picks the outline colour that stays legible on top of `fill`.
#[must_use]
pub fn contrasting_outline(fill: Rgb) -> OutlineColor {
    if relative_luminance(fill) > OUTLINE_LUMINANCE_THRESHOLD {
        OutlineColor::Black
    } else {
        OutlineColor::White
    }
}

fn parse_hex(input: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::InvalidHex(input.to_string());
    let digits = input.trim().strip_prefix('#').ok_or_else(invalid)?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match digits.len() {
        3 | 4 => {
            let nibble = |i: usize| {
                u8::from_str_radix(&digits[i..=i], 16)
                    .map(|v| v * 17)
                    .map_err(|_| invalid())
            };
            Ok(Rgb::new(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 | 8 => {
            let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
            Ok(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
        }
        _ => Err(invalid()),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fraction_to_byte(value: f64) -> Option<u8> {
    if !(0.0..=1.0).contains(&value) {
        return None;
    }
    Some((value * 255.0) as u8)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_byte(value: f64) -> Option<u8> {
    if value.fract() > 0.0 || !(0.0..=255.0).contains(&value) {
        return None;
    }
    Some(value as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_named_colour() {
        assert_eq!(parse_color("Red").unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn normalizes_fractional_tuple() {
        assert_eq!(parse_color("(1,1,0)").unwrap(), Rgb::new(255, 255, 0));
        assert_eq!(
            to_rgb(&ColorInput::Fractional(0.5, 0.25, 1.0)).unwrap(),
            Rgb::new(127, 63, 255)
        );
    }

    #[test]
    fn normalizes_hex_strings() {
        assert_eq!(parse_color("#ff00ff").unwrap(), Rgb::new(255, 0, 255));
        assert_eq!(parse_color("#F0F").unwrap(), Rgb::new(255, 0, 255));
        assert_eq!(parse_color("#1f77b480").unwrap(), Rgb::new(31, 119, 180));
    }

    #[test]
    fn normalization_is_idempotent_on_8bit_input() {
        for rgb in [
            Rgb::new(0, 0, 0),
            Rgb::new(1, 0, 0),
            Rgb::new(255, 127, 0),
            Rgb::new(160, 82, 45),
            Rgb::new(255, 255, 255),
        ] {
            let once = to_rgb(&rgb.into()).unwrap();
            assert_eq!(once, rgb);
            assert_eq!(to_rgb(&once.into()).unwrap(), rgb);
        }
    }

    #[test]
    fn textual_8bit_tuple_round_trips_through_display() {
        let rgb = parse_color("255, 127, 0").unwrap();
        assert_eq!(rgb, Rgb::new(255, 127, 0));
        assert_eq!(parse_color(&rgb.to_string()).unwrap(), rgb);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            parse_color("chartreuse-ish"),
            Err(ColorError::UnknownName(_))
        ));
        assert!(matches!(parse_color("#12345"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(parse_color("#gg0000"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(
            parse_color("300,0,0"),
            Err(ColorError::InvalidChannel { .. })
        ));
        assert!(matches!(
            parse_color("12.5,0,0"),
            Err(ColorError::InvalidChannel { .. })
        ));
        assert!(matches!(parse_color("1,2"), Err(ColorError::ChannelCount(2))));
        assert!(to_rgb(&ColorInput::Fractional(1.5, 0.0, 0.0)).is_err());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn luminance_of_white_and_black() {
        assert_eq!(relative_luminance(Rgb::new(255, 255, 255)), 1.0);
        assert_eq!(relative_luminance(Rgb::new(0, 0, 0)), 0.0);
    }

    #[test]
    fn hex_needs_exactly_one_hash() {
        assert!(matches!(parse_color("##fff"), Err(ColorError::InvalidHex(_))));
        assert_eq!(parse_color("#fff").unwrap(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn luminance_matches_reference_values() {
        assert!((relative_luminance(Rgb::new(255, 127, 0)) - 0.568_797_647_058_823_5).abs() < 1e-12);
        assert!((relative_luminance(Rgb::new(0, 50, 255)) - 0.212_435_294_117_647_06).abs() < 1e-12);
    }

    #[test]
    fn outline_contrasts_with_fill() {
        assert_eq!(contrasting_outline(Rgb::new(255, 215, 0)), OutlineColor::Black);
        assert_eq!(contrasting_outline(Rgb::new(192, 192, 192)), OutlineColor::Black);
        assert_eq!(contrasting_outline(Rgb::new(160, 82, 45)), OutlineColor::White);
        assert_eq!(contrasting_outline(Rgb::new(0, 0, 0)), OutlineColor::White);
    }

    #[test]
    fn outline_names_and_colours() {
        assert_eq!(OutlineColor::Black.to_string(), "black");
        assert_eq!(OutlineColor::White.rgb(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn formats_as_css() {
        assert_eq!(Rgb::new(160, 82, 45).to_css(), "rgb(160,82,45)");
        assert_eq!(Rgb::new(160, 82, 45).to_string(), "#a0522d");
    }
}
