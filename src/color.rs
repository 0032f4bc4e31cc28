//! Color model and ANSI color encoding.
//!
//! This module covers the color half of the encoder:
//! - 16 named colors with fixed SGR codes (30-37 / 90-97 foreground,
//!   40-47 / 100-107 background)
//! - `#rrggbb` hex colors and `rgb(r, g, b)` colors, both emitted as
//!   ANSI-256 indices (`ESC[38;5;<n>m` / `ESC[48;5;<n>m`)
//! - RGB to ANSI-256 quantization
//!
//! # Examples
//!
//! ## Parsing Colors
//!
//! ```
//! use termcolorized::color::{Color, ColorTriplet, NamedColor};
//!
//! assert_eq!(Color::parse("red").unwrap(), Color::Named(NamedColor::Red));
//! assert_eq!(Color::parse("brightCyan").unwrap(), Color::Named(NamedColor::BrightCyan));
//! assert_eq!(Color::parse("#FF8800").unwrap(), Color::Hex(ColorTriplet::new(255, 136, 0)));
//! assert_eq!(Color::parse("rgb(1,2, 3)").unwrap(), Color::Rgb(ColorTriplet::new(1, 2, 3)));
//! ```
//!
//! ## Escape Fragments
//!
//! Rendering paths never fail on bad input; an unusable color yields an
//! empty fragment:
//!
//! ```
//! use termcolorized::color::resolve_color;
//!
//! assert_eq!(resolve_color("red", false), "\x1b[31m");
//! assert_eq!(resolve_color("red", true), "\x1b[41m");
//! assert_eq!(resolve_color("#ff0000", false), "\x1b[38;5;196m");
//! assert_eq!(resolve_color("not-a-color", false), "");
//! ```

use lru::LruCache;
use regex::Regex;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex};

use crate::sync::lock_recover;

/// SGR reset sequence closing every styled run.
pub const RESET: &str = "\x1b[0m";

/// RGB color triplet.
///
/// Channels are `u32` because `rgb()` input is taken as written: a value such
/// as `rgb(300, 0, 0)` is not clamped and reaches [`rgb_to_ansi256`] unchanged.
/// Hex input always stays within 0-255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorTriplet {
    pub red: u32,
    pub green: u32,
    pub blue: u32,
}

impl ColorTriplet {
    /// Create a new color triplet from RGB components.
    #[must_use]
    pub const fn new(red: u32, green: u32, blue: u32) -> Self {
        Self { red, green, blue }
    }

    /// Returns true when all three channels are equal.
    #[must_use]
    pub const fn is_gray(&self) -> bool {
        self.red == self.green && self.green == self.blue
    }

    /// ANSI-256 palette index for this triplet.
    #[must_use]
    pub fn ansi256(&self) -> u32 {
        rgb_to_ansi256(self.red, self.green, self.blue)
    }

    /// Linear interpolation towards `other`, each channel rounded half up.
    ///
    /// `factor` 0.0 yields `self`, 1.0 yields `other`.
    #[must_use]
    pub fn lerp(&self, other: &Self, factor: f64) -> Self {
        Self {
            red: lerp_channel(self.red, other.red, factor),
            green: lerp_channel(self.green, other.green, factor),
            blue: lerp_channel(self.blue, other.blue, factor),
        }
    }

    /// Returns CSS-style hex format `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_channel(from: u32, to: u32, factor: f64) -> u32 {
    let from = f64::from(from);
    let to = f64::from(to);
    // Both endpoints are non-negative, so the result is too.
    (from + (to - from) * factor).round() as u32
}

impl From<(u8, u8, u8)> for ColorTriplet {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(u32::from(red), u32::from(green), u32::from(blue))
    }
}

impl From<[u8; 3]> for ColorTriplet {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::from((red, green, blue))
    }
}

impl fmt::Display for ColorTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.red, self.green, self.blue)
    }
}

/// The 16 canonical terminal color names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    /// Every named color, in SGR code order.
    pub const ALL: [Self; 16] = [
        Self::Black,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Blue,
        Self::Magenta,
        Self::Cyan,
        Self::White,
        Self::Gray,
        Self::BrightRed,
        Self::BrightGreen,
        Self::BrightYellow,
        Self::BrightBlue,
        Self::BrightMagenta,
        Self::BrightCyan,
        Self::BrightWhite,
    ];

    /// Look up a color name.
    ///
    /// Matching ignores ASCII case and `_` / `-` separators, so `brightRed`,
    /// `bright_red` and `BRIGHT-RED` all name [`NamedColor::BrightRed`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL
            .into_iter()
            .find(|color| color.name().replace('_', "") == key)
    }

    /// Canonical snake_case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
            Self::BrightRed => "bright_red",
            Self::BrightGreen => "bright_green",
            Self::BrightYellow => "bright_yellow",
            Self::BrightBlue => "bright_blue",
            Self::BrightMagenta => "bright_magenta",
            Self::BrightCyan => "bright_cyan",
            Self::BrightWhite => "bright_white",
        }
    }

    /// Foreground SGR code.
    #[must_use]
    pub const fn fg_code(self) -> u8 {
        match self {
            Self::Black => 30,
            Self::Red => 31,
            Self::Green => 32,
            Self::Yellow => 33,
            Self::Blue => 34,
            Self::Magenta => 35,
            Self::Cyan => 36,
            Self::White => 37,
            Self::Gray => 90,
            Self::BrightRed => 91,
            Self::BrightGreen => 92,
            Self::BrightYellow => 93,
            Self::BrightBlue => 94,
            Self::BrightMagenta => 95,
            Self::BrightCyan => 96,
            Self::BrightWhite => 97,
        }
    }

    /// Background SGR code.
    #[must_use]
    pub const fn bg_code(self) -> u8 {
        self.fg_code() + 10
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A terminal color, as accepted at the string boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 16 named colors.
    Named(NamedColor),
    /// `#rrggbb`.
    Hex(ColorTriplet),
    /// `rgb(r, g, b)`.
    Rgb(ColorTriplet),
}

impl Color {
    /// Parse a color string (cached).
    ///
    /// Dispatch is on the prefix:
    /// - `#` : exactly six hex digits, any case
    /// - `rgb(` : `rgb(R,G,B)` with optional whitespace after the commas;
    ///   anything after the closing parenthesis is ignored
    /// - otherwise a [`NamedColor`] name
    ///
    /// # Errors
    ///
    /// Returns `ColorParseError` if the color string is invalid:
    /// - `Empty` if the string is empty
    /// - `InvalidHex` if the hex digits are malformed
    /// - `InvalidRgb` if the `rgb(...)` form is malformed
    /// - `UnknownColor` if the name is not recognized
    pub fn parse(color: &str) -> Result<Self, ColorParseError> {
        static CACHE: LazyLock<Mutex<LruCache<String, Color>>> = LazyLock::new(|| {
            Mutex::new(LruCache::new(NonZeroUsize::new(1024).expect("non-zero")))
        });

        if let Some(cached) = lock_recover(&CACHE).get(color) {
            return Ok(*cached);
        }

        let result = Self::parse_uncached(color)?;
        lock_recover(&CACHE).put(color.to_string(), result);
        Ok(result)
    }

    fn parse_uncached(color: &str) -> Result<Self, ColorParseError> {
        static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^rgb\(([0-9]+),\s*([0-9]+),\s*([0-9]+)\)").expect("valid regex")
        });

        if color.is_empty() {
            return Err(ColorParseError::Empty);
        }

        if color.starts_with('#') {
            return hex_to_rgb(color)
                .map(Self::Hex)
                .ok_or_else(|| ColorParseError::InvalidHex(color.to_string()));
        }

        if color.starts_with("rgb(") {
            let invalid = || ColorParseError::InvalidRgb(color.to_string());
            let caps = RGB_RE.captures(color).ok_or_else(invalid)?;
            let channel = |i: usize| caps[i].parse::<u32>().map_err(|_| invalid());
            return Ok(Self::Rgb(ColorTriplet::new(channel(1)?, channel(2)?, channel(3)?)));
        }

        NamedColor::from_name(color)
            .map(Self::Named)
            .ok_or_else(|| ColorParseError::UnknownColor(color.to_string()))
    }

    /// RGB components for hex and `rgb()` colors; `None` for named colors.
    #[must_use]
    pub const fn triplet(&self) -> Option<ColorTriplet> {
        match self {
            Self::Named(_) => None,
            Self::Hex(triplet) | Self::Rgb(triplet) => Some(*triplet),
        }
    }

    /// The SGR parameter list for this color, without `ESC[` and `m`.
    #[must_use]
    pub fn sgr_params(&self, background: bool) -> String {
        match self {
            Self::Named(named) => {
                let code = if background { named.bg_code() } else { named.fg_code() };
                code.to_string()
            }
            Self::Hex(triplet) | Self::Rgb(triplet) => {
                let selector = if background { 48 } else { 38 };
                format!("{selector};5;{}", triplet.ansi256())
            }
        }
    }

    /// Full escape fragment selecting this color.
    #[must_use]
    pub fn ansi_fragment(&self, background: bool) -> String {
        format!("\x1b[{}m", self.sgr_params(background))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => write!(f, "{named}"),
            Self::Hex(triplet) => f.write_str(&triplet.hex()),
            Self::Rgb(triplet) => write!(f, "{triplet}"),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Color {
    type Error = ColorParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<NamedColor> for Color {
    fn from(named: NamedColor) -> Self {
        Self::Named(named)
    }
}

impl From<ColorTriplet> for Color {
    fn from(triplet: ColorTriplet) -> Self {
        Self::Rgb(triplet)
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidHex(String),
    InvalidRgb(String),
    UnknownColor(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty color string"),
            Self::InvalidHex(s) => write!(f, "Invalid hex color: {s}"),
            Self::InvalidRgb(s) => write!(f, "Invalid RGB color: {s}"),
            Self::UnknownColor(s) => write!(f, "Unknown color: {s}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

// ============================================================================
// Encoding
// ============================================================================

/// Escape fragment for a color string, or `""` when the string is not a
/// usable color.
#[must_use]
pub fn resolve_color(spec: &str, is_background: bool) -> String {
    Color::parse(spec)
        .map(|color| color.ansi_fragment(is_background))
        .unwrap_or_default()
}

/// Parse `#rrggbb` (the `#` is optional) into a triplet.
#[must_use]
pub fn hex_to_rgb(hex: &str) -> Option<ColorTriplet> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u32::from_str_radix(&digits[range], 16).ok();
    Some(ColorTriplet::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert RGB to an ANSI-256 palette index.
///
/// Equal channels map onto the grayscale ramp (232-255), with values below 8
/// snapping to black (16) and above 248 to white (231). Everything else goes
/// through the 6x6x6 cube: `16 + 36*R + 6*G + B` where each term is the
/// channel scaled to 0-5 and rounded.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb_to_ansi256(red: u32, green: u32, blue: u32) -> u32 {
    if red == green && green == blue {
        if red < 8 {
            return 16;
        }
        if red > 248 {
            return 231;
        }
        return ((f64::from(red - 8) / 247.0) * 24.0).round() as u32 + 232;
    }

    let level = |v: u32| (f64::from(v) / 255.0 * 5.0).round() as u32;
    16 + 36 * level(red) + 6 * level(green) + level(blue)
}
