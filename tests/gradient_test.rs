//! Gradient rendering tests.

mod common;

use common::init_test_logging;
use termcolorized::gradient::{self, DEFAULT_STEPS, RAINBOW_STOPS};
use termcolorized::style::{colorize, strip, visible_length};

/// Split a gradient into its per-character runs.
fn runs(styled: &str) -> Vec<&str> {
    styled.split_inclusive("\x1b[0m").collect()
}

#[test]
fn two_stop_red_to_blue() {
    init_test_logging();
    assert_eq!(
        gradient::two_stop("ab", "#ff0000", "#0000ff"),
        "\x1b[38;5;196ma\x1b[0m\x1b[38;5;21mb\x1b[0m"
    );
}

#[test]
fn two_stop_constant_color() {
    let out = gradient::two_stop("steady", "#808080", "#808080");
    assert_eq!(runs(&out).len(), 6);
    for run in runs(&out) {
        assert!(run.starts_with("\x1b[38;5;244m"), "{run:?}");
    }
    assert_eq!(strip(&out), "steady");
}

#[test]
fn two_stop_accepts_gradient_names_and_rgb() {
    let named = gradient::two_stop("xy", "orange", "navy");
    let explicit = gradient::two_stop("xy", "rgb(255, 165, 0)", "#000080");
    assert_eq!(named, explicit);
}

#[test]
fn two_stop_falls_back_to_start_color() {
    // "bright_red" is not a gradient stop, so every character uses the raw
    // start spec through the palette grammar.
    let out = gradient::two_stop("ok", "red", "bright_red");
    assert_eq!(
        out,
        format!(
            "{}{}",
            colorize("o", Some("red"), None),
            colorize("k", Some("red"), None)
        )
    );

    let out = gradient::two_stop("ok", "nonsense", "blue");
    assert_eq!(out, "o\x1b[0mk\x1b[0m");
}

#[test]
fn degenerate_gradients_return_input() {
    assert_eq!(gradient::two_stop("", "red", "blue"), "");
    assert_eq!(gradient::two_stop("text", "", "blue"), "text");
    assert_eq!(gradient::two_stop("text", "red", ""), "text");
    assert_eq!(gradient::multi_stop("text", &["red"]), "text");
    assert_eq!(gradient::multi_stop::<&str>("text", &[]), "text");
    assert_eq!(gradient::stepped("text", &["red"], DEFAULT_STEPS), "text");
    assert_eq!(gradient::stepped("text", &["red", "blue"], 0), "text");
    assert_eq!(gradient::rainbow_sweep(""), "");
}

#[test]
fn multi_stop_two_stops_equals_two_stop() {
    let text = "gradient text";
    assert_eq!(
        gradient::multi_stop(text, &["#ff6b6b", "#4ecdc4"]),
        gradient::two_stop(text, "#ff6b6b", "#4ecdc4")
    );
}

#[test]
fn multi_stop_hits_every_stop() {
    let out = gradient::multi_stop("abcde", &["#ff0000", "#00ff00", "#0000ff"]);
    let runs = runs(&out);
    assert!(runs[0].starts_with("\x1b[38;5;196m"));
    assert!(runs[2].starts_with("\x1b[38;5;46m"));
    assert!(runs[4].starts_with("\x1b[38;5;21m"));
}

#[test]
fn rainbow_sweep_uses_every_band_for_twelve_chars() {
    let out = gradient::rainbow_sweep("abcdefghijkl");
    for (run, stop) in runs(&out).iter().zip(RAINBOW_STOPS) {
        assert!(run.starts_with(&termcolorized::color::resolve_color(stop, false)));
    }
    assert_eq!(visible_length(&out), 12);
}

#[test]
fn stepped_uses_colors_verbatim() {
    let out = gradient::stepped("abcd", &["red", "green", "blue"], 2);
    assert_eq!(
        out,
        [
            colorize("a", Some("red"), None),
            colorize("b", Some("red"), None),
            colorize("c", Some("green"), None),
            colorize("d", Some("green"), None),
        ]
        .concat()
    );
}

#[test]
fn gradients_work_per_char() {
    let out = gradient::two_stop("日本語", "#ffffff", "#000000");
    assert_eq!(runs(&out).len(), 3);
    assert_eq!(strip(&out), "日本語");
}
