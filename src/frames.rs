//! Frame builders for the console animations.
//!
//! Every animation in [`crate::animation`] is a loop over frame indices. The
//! functions here map `(text, index)` to the string drawn for that frame and
//! never touch the terminal, so the frames can be checked without timing.
//!
//! ```
//! use termcolorized::frames;
//!
//! assert_eq!(frames::typing("hello", 1), "he");
//! assert_eq!(frames::bounce("hi", 3), "  hi");
//! assert_eq!(frames::progress("Loading", 4, 0.5), "Loading [██░░] 50%");
//! ```

use rand::Rng;

use crate::style::{StyleOptions, colorize, compose, dim};

/// Number of frames drawn by [`blink`].
pub const BLINK_FRAMES: usize = 10;
/// Number of frames drawn by [`pulse`].
pub const PULSE_FRAMES: usize = 6;
/// Number of frames drawn by [`bounce`].
pub const BOUNCE_FRAMES: usize = 20;
/// Number of frames drawn by [`rainbow`].
pub const RAINBOW_FRAMES: usize = 12;

/// Foreground colors cycled by [`rainbow`].
pub const RAINBOW_CYCLE: [&str; 6] = ["red", "yellow", "green", "cyan", "blue", "magenta"];

/// Glyphs shown by [`matrix`] before a position settles.
pub const MATRIX_GLYPHS: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%^&*()";

const WAVE_AMPLITUDE: f64 = 3.0;
const BOUNCE_HEIGHT: f64 = 2.0;
const PHASE_STEP: f64 = 0.5;

const FILLED: &str = "\u{2588}"; // █
const EMPTY: &str = "\u{2591}"; // ░

/// Number of frames [`typing`] and [`wave`] draw for `text`.
#[must_use]
pub fn per_char_frames(text: &str) -> usize {
    text.chars().count()
}

/// Number of frames [`matrix`] draws for `text`.
#[must_use]
pub fn matrix_frames(text: &str) -> usize {
    2 * text.chars().count()
}

/// The first `index + 1` characters.
#[must_use]
pub fn typing(text: &str, index: usize) -> String {
    text.chars().take(index + 1).collect()
}

/// Leading spaces for frame `index` of [`wave`]: `round(sin(i * 0.5) * 3)`,
/// never below zero.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wave_offset(index: usize) -> usize {
    let offset = ((index as f64 * PHASE_STEP).sin() * WAVE_AMPLITUDE).round();
    offset.max(0.0) as usize
}

/// [`typing`] shifted right by [`wave_offset`].
#[must_use]
pub fn wave(text: &str, index: usize) -> String {
    format!("{}{}", " ".repeat(wave_offset(index)), typing(text, index))
}

/// The text on even frames, nothing on odd frames.
#[must_use]
pub fn blink(text: &str, index: usize) -> String {
    if index % 2 == 0 {
        text.to_string()
    } else {
        String::new()
    }
}

/// Dim, plain, bold, repeating.
#[must_use]
pub fn pulse(text: &str, index: usize) -> String {
    match index % 3 {
        0 => dim(text),
        1 => text.to_string(),
        _ => compose(text, &StyleOptions::new().bold()),
    }
}

/// Leading spaces for frame `index` of [`bounce`]: `round(|sin(i * 0.5)| * 2)`.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn bounce_offset(index: usize) -> usize {
    ((index as f64 * PHASE_STEP).sin().abs() * BOUNCE_HEIGHT).round() as usize
}

/// The whole text shifted right by [`bounce_offset`].
#[must_use]
pub fn bounce(text: &str, index: usize) -> String {
    format!("{}{text}", " ".repeat(bounce_offset(index)))
}

/// The whole text in the next color of [`RAINBOW_CYCLE`].
#[must_use]
pub fn rainbow(text: &str, index: usize) -> String {
    colorize(text, Some(RAINBOW_CYCLE[index % RAINBOW_CYCLE.len()]), None)
}

/// Matrix reveal, colored green.
///
/// Position `j` appears at frame `j` as a random glyph and settles on the
/// real character once `index - j` reaches the text length, so the last of
/// the [`matrix_frames`] frames shows the plain text.
#[must_use]
pub fn matrix<R: Rng + ?Sized>(text: &str, index: usize, rng: &mut R) -> String {
    let len = text.chars().count();
    let glyphs = MATRIX_GLYPHS.as_bytes();

    let frame: String = text
        .chars()
        .enumerate()
        .take_while(|(j, _)| *j <= index)
        .map(|(j, ch)| {
            if index - j >= len {
                ch
            } else {
                char::from(glyphs[rng.random_range(0..glyphs.len())])
            }
        })
        .collect();

    colorize(&frame, Some("green"), None)
}

/// `text [███░░░] NN%` for `progress` in 0.0..=1.0 (clamped).
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn progress(text: &str, width: usize, progress: f64) -> String {
    let progress = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let filled = ((width as f64 * progress).round() as usize).min(width);
    let percent = (progress * 100.0).round() as u32;
    format!(
        "{text} [{}{}] {percent}%",
        FILLED.repeat(filled),
        EMPTY.repeat(width - filled)
    )
}
