//! Per-character color gradients.
//!
//! Each function colors every `char` of the input on its own, so the output
//! is one `fg + char + ESC[0m` run per character. All four gradients return
//! the input unchanged for empty text, fewer than two stops, or an empty
//! endpoint.
//!
//! Stops for the interpolating gradients ([`two_stop`], [`multi_stop`]) are
//! resolved with [`parse_stop`], which knows a few more names than the
//! terminal palette (`orange`, `purple`, `navy`, ...). When either end of a
//! segment cannot be resolved, the character is colored with the segment's
//! first stop as written.
//!
//! ```
//! use termcolorized::gradient::two_stop;
//! use termcolorized::style::strip;
//!
//! let sunset = two_stop("Sunset", "#ff6b6b", "#feca57");
//! assert_eq!(strip(&sunset), "Sunset");
//! assert!(sunset.starts_with("\x1b[38;5;210mS\x1b[0m"));
//! ```

use crate::color::{Color, ColorTriplet, hex_to_rgb};
use crate::style::{colorize, colorize_with};

/// Stops used by [`rainbow_sweep`]: red, orange, yellow, lime, green, spring,
/// cyan, azure, blue, violet, magenta, rose.
pub const RAINBOW_STOPS: [&str; 12] = [
    "#ff0000", "#ff8000", "#ffff00", "#80ff00", "#00ff00", "#00ff80", "#00ffff", "#0080ff",
    "#0000ff", "#8000ff", "#ff00ff", "#ff0080",
];

/// Bucket count used by [`stepped`] callers that have no preference.
pub const DEFAULT_STEPS: usize = 10;

/// Names understood by gradient stops, with their RGB values.
const STOP_NAMES: [(&str, ColorTriplet); 18] = [
    ("black", ColorTriplet::new(0, 0, 0)),
    ("red", ColorTriplet::new(255, 0, 0)),
    ("green", ColorTriplet::new(0, 255, 0)),
    ("blue", ColorTriplet::new(0, 0, 255)),
    ("yellow", ColorTriplet::new(255, 255, 0)),
    ("magenta", ColorTriplet::new(255, 0, 255)),
    ("cyan", ColorTriplet::new(0, 255, 255)),
    ("white", ColorTriplet::new(255, 255, 255)),
    ("gray", ColorTriplet::new(128, 128, 128)),
    ("orange", ColorTriplet::new(255, 165, 0)),
    ("purple", ColorTriplet::new(128, 0, 128)),
    ("pink", ColorTriplet::new(255, 192, 203)),
    ("brown", ColorTriplet::new(165, 42, 42)),
    ("lime", ColorTriplet::new(0, 255, 0)),
    ("navy", ColorTriplet::new(0, 0, 128)),
    ("teal", ColorTriplet::new(0, 128, 128)),
    ("olive", ColorTriplet::new(128, 128, 0)),
    ("maroon", ColorTriplet::new(128, 0, 0)),
];

/// Resolve a gradient stop to RGB.
///
/// Accepts `#rrggbb`, `rgb(r, g, b)` and the names in the stop table
/// (case-insensitive). Palette-only names such as `bright_red` have no RGB
/// value here and return `None`.
#[must_use]
pub fn parse_stop(spec: &str) -> Option<ColorTriplet> {
    if spec.starts_with('#') {
        return hex_to_rgb(spec);
    }
    if spec.starts_with("rgb(") {
        return Color::parse(spec).ok().and_then(|c| c.triplet());
    }
    let name = spec.to_ascii_lowercase();
    STOP_NAMES
        .iter()
        .find(|(stop, _)| *stop == name)
        .map(|(_, triplet)| *triplet)
}

/// A stop after resolution: either usable RGB or the raw spec to fall back on.
#[derive(Debug, Clone, Copy)]
struct Stop<'a> {
    spec: &'a str,
    rgb: Option<ColorTriplet>,
}

impl<'a> Stop<'a> {
    fn new(spec: &'a str) -> Self {
        Self {
            spec,
            rgb: parse_stop(spec),
        }
    }
}

/// Color one character at `factor` between two stops.
fn paint_between(ch: char, start: &Stop<'_>, end: &Stop<'_>, factor: f64) -> String {
    let mut buf = [0_u8; 4];
    let ch = ch.encode_utf8(&mut buf);
    match (start.rgb, end.rgb) {
        (Some(from), Some(to)) => {
            colorize_with(ch, Some(&Color::Rgb(from.lerp(&to, factor))), None)
        }
        _ => colorize(ch, Some(start.spec), None),
    }
}

#[allow(clippy::cast_precision_loss)]
fn position(index: usize, len: usize) -> f64 {
    if len > 1 {
        index as f64 / (len - 1) as f64
    } else {
        0.0
    }
}

/// Smooth gradient from `start` to `end`.
///
/// Character `i` of `n` sits at `i / (n - 1)`; a single character takes the
/// start color.
#[must_use]
pub fn two_stop(text: &str, start: &str, end: &str) -> String {
    if text.is_empty() || start.is_empty() || end.is_empty() {
        return text.to_string();
    }

    let start = Stop::new(start);
    let end = Stop::new(end);
    let len = text.chars().count();

    text.chars()
        .enumerate()
        .map(|(i, ch)| paint_between(ch, &start, &end, position(i, len)))
        .collect()
}

/// Discrete bands over [`RAINBOW_STOPS`], no blending between them.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rainbow_sweep(text: &str) -> String {
    if text.is_empty() {
        return text.to_string();
    }

    let len = text.chars().count();
    let bands = RAINBOW_STOPS.len();

    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let band = ((i as f64 / len as f64) * bands as f64).floor() as usize % bands;
            colorize(ch.encode_utf8(&mut [0_u8; 4]), Some(RAINBOW_STOPS[band]), None)
        })
        .collect()
}

/// Smooth gradient through any number of stops, evenly spaced.
///
/// The global position is mapped onto the segment `[k, k + 1]` that contains
/// it and interpolated within that segment only.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn multi_stop<S: AsRef<str>>(text: &str, colors: &[S]) -> String {
    if text.is_empty() || colors.len() < 2 {
        return text.to_string();
    }

    let stops: Vec<Stop<'_>> = colors.iter().map(|c| Stop::new(c.as_ref())).collect();
    let last = stops.len() - 1;
    let len = text.chars().count();

    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let scaled = position(i, len) * last as f64;
            let index = (scaled.floor() as usize).min(last);
            let next = (index + 1).min(last);
            let local = scaled - index as f64;
            paint_between(ch, &stops[index], &stops[next], local)
        })
        .collect()
}

/// Blocky gradient: position is bucketed into `steps`, and each bucket picks
/// one of `colors` with no interpolation.
///
/// Bucket colors are used as written, so they follow the terminal palette
/// grammar rather than [`parse_stop`]. `steps == 0` returns the text unchanged.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn stepped<S: AsRef<str>>(text: &str, colors: &[S], steps: usize) -> String {
    if text.is_empty() || colors.len() < 2 || steps == 0 {
        return text.to_string();
    }

    let len = text.chars().count();
    let last = colors.len() - 1;

    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            let step = ((i as f64 / len as f64) * steps as f64).floor();
            let index = ((step / steps as f64) * last as f64).floor() as usize;
            let color = colors[index.min(last)].as_ref();
            colorize(ch.encode_utf8(&mut [0_u8; 4]), Some(color), None)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::strip;

    fn runs(styled: &str) -> Vec<&str> {
        styled.split_inclusive("\x1b[0m").collect()
    }

    #[test]
    fn test_parse_stop_forms() {
        assert_eq!(parse_stop("#00ff00"), Some(ColorTriplet::new(0, 255, 0)));
        assert_eq!(parse_stop("rgb(1, 2, 3)"), Some(ColorTriplet::new(1, 2, 3)));
        assert_eq!(parse_stop("Orange"), Some(ColorTriplet::new(255, 165, 0)));
        assert_eq!(parse_stop("maroon"), Some(ColorTriplet::new(128, 0, 0)));
        assert_eq!(parse_stop("bright_red"), None);
        assert_eq!(parse_stop("#abc"), None);
        assert_eq!(parse_stop(""), None);
    }

    #[test]
    fn test_two_stop_endpoints() {
        let out = two_stop("abc", "#ff0000", "#0000ff");
        let parts = runs(&out);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "\x1b[38;5;196ma\x1b[0m");
        // Midpoint: rgb(128, 0, 128) -> levels 3,0,3
        assert_eq!(parts[1], "\x1b[38;5;127mb\x1b[0m");
        assert_eq!(parts[2], "\x1b[38;5;21mc\x1b[0m");
    }

    #[test]
    fn test_two_stop_single_char_uses_start() {
        assert_eq!(two_stop("x", "red", "blue"), "\x1b[38;5;196mx\x1b[0m");
    }

    #[test]
    fn test_two_stop_degenerate() {
        assert_eq!(two_stop("", "red", "blue"), "");
        assert_eq!(two_stop("abc", "", "blue"), "abc");
        assert_eq!(two_stop("abc", "red", ""), "abc");
    }

    #[test]
    fn test_two_stop_fallback_uses_first_spec() {
        // "bright_red" has no RGB for gradients, so every char gets the raw
        // first stop, which the palette does know.
        let out = two_stop("ab", "bright_red", "#0000ff");
        assert_eq!(out, "\x1b[91ma\x1b[0m\x1b[91mb\x1b[0m");

        let out = two_stop("ab", "#0000ff", "nonsense");
        assert_eq!(out, "\x1b[38;5;21ma\x1b[0m\x1b[38;5;21mb\x1b[0m");
    }

    #[test]
    fn test_two_stop_unresolvable_first_spec_is_plain() {
        assert_eq!(two_stop("ab", "nonsense", "red"), "a\x1b[0mb\x1b[0m");
    }

    #[test]
    fn test_rainbow_sweep_bands() {
        let text = "abcdefghijkl";
        let out = rainbow_sweep(text);
        let parts = runs(&out);
        assert_eq!(parts.len(), 12);
        for (i, part) in parts.iter().enumerate() {
            let expected = colorize(&text[i..=i], Some(RAINBOW_STOPS[i]), None);
            assert_eq!(*part, expected);
        }
    }

    #[test]
    fn test_rainbow_sweep_short_text_skips_bands() {
        let out = rainbow_sweep("ab");
        let parts = runs(&out);
        assert_eq!(parts[0], colorize("a", Some(RAINBOW_STOPS[0]), None));
        assert_eq!(parts[1], colorize("b", Some(RAINBOW_STOPS[6]), None));
        assert_eq!(rainbow_sweep(""), "");
    }

    #[test]
    fn test_multi_stop_two_stops_matches_two_stop() {
        for text in ["a", "ab", "gradient text", "0123456789abcdef"] {
            assert_eq!(
                multi_stop(text, &["#3498db", "#9b59b6"]),
                two_stop(text, "#3498db", "#9b59b6")
            );
        }
    }

    #[test]
    fn test_multi_stop_hits_every_stop() {
        let out = multi_stop("abcde", &["red", "green", "blue"]);
        let parts = runs(&out);
        assert_eq!(parts[0], "\x1b[38;5;196ma\x1b[0m");
        assert_eq!(parts[2], "\x1b[38;5;46mc\x1b[0m");
        assert_eq!(parts[4], "\x1b[38;5;21me\x1b[0m");
    }

    #[test]
    fn test_multi_stop_degenerate() {
        assert_eq!(multi_stop("abc", &["red"]), "abc");
        assert_eq!(multi_stop::<&str>("abc", &[]), "abc");
        assert_eq!(multi_stop("", &["red", "blue"]), "");
    }

    #[test]
    fn test_stepped_buckets() {
        let colors = ["red", "green", "blue"];
        let out = stepped("abcdef", &colors, 3);
        let codes: Vec<&str> = runs(&out).into_iter().map(|r| &r[..5]).collect();
        // steps 0,0,1,1,2,2 -> colors 0,0,0,0,1,1
        assert_eq!(
            codes,
            vec!["\x1b[31m", "\x1b[31m", "\x1b[31m", "\x1b[31m", "\x1b[32m", "\x1b[32m"]
        );
    }

    #[test]
    fn test_stepped_degenerate() {
        assert_eq!(stepped("abc", &["red", "blue"], 0), "abc");
        assert_eq!(stepped("abc", &["red"], DEFAULT_STEPS), "abc");
        assert_eq!(stepped("", &["red", "blue"], DEFAULT_STEPS), "");
    }

    #[test]
    fn test_gradients_preserve_visible_text() {
        let text = "Hello, gradient!";
        assert_eq!(strip(&two_stop(text, "#ff6b6b", "#feca57")), text);
        assert_eq!(strip(&rainbow_sweep(text)), text);
        assert_eq!(strip(&multi_stop(text, &["navy", "teal", "olive"])), text);
        assert_eq!(strip(&stepped(text, &["red", "yellow"], DEFAULT_STEPS)), text);
    }

    #[test]
    fn test_multibyte_chars_colored_individually() {
        let out = two_stop("héllo", "red", "blue");
        assert_eq!(runs(&out).len(), 5);
        assert_eq!(strip(&out), "héllo");
    }
}
