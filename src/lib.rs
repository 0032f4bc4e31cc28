//! # termcolorized
//!
//! Terminal text styling: ANSI colors and attributes, color gradients across
//! the characters of a string, and single-line console animations.
//!
//! ## Quick Start
//!
//! ```rust
//! use termcolorized::prelude::*;
//!
//! let warning = compose("careful", &StyleOptions::new().color("yellow").bold());
//! assert_eq!(strip(&warning), "careful");
//!
//! let sunset = gradient::two_stop("sunset", "#ff6b6b", "#4ecdc4");
//! assert_eq!(visible_length(&sunset), 6);
//! ```
//!
//! ## Core Concepts
//!
//! - **Color**: a named color, `#rrggbb` or `rgb(r, g, b)`, encoded as an SGR
//!   escape. Hex and rgb colors are quantized to the 256-color palette.
//! - **StyleOptions**: colors plus attributes (bold, italic, ...), rendered by
//!   [`style::compose`].
//! - **Gradients**: per-character colors interpolated between stops.
//! - **Animator**: redraws one terminal line per frame; at most one animation
//!   runs per animator.
//! - **ThemeRegistry**: named styles, loadable from `.ini` text.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod color;
pub mod frames;
pub mod gradient;
pub mod logging;
pub mod presets;
pub mod style;
pub mod sync;
pub mod terminal;
pub mod theme;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::animation::{AnimationConfig, AnimationOutcome, Animator, Effect, Pacer};
    pub use crate::color::{Color, ColorParseError, ColorTriplet, NamedColor};
    pub use crate::gradient;
    pub use crate::style::{
        Attributes, StyleFlag, StyleOptions, apply_style_flag, colorize, compose, strip,
        visible_length,
    };
    pub use crate::theme::{ThemeError, ThemeRegistry};
}

// Re-export key types at crate root
pub use animation::{AnimationOutcome, Animator};
pub use color::{Color, ColorTriplet};
pub use style::{Attributes, StyleOptions};
pub use theme::ThemeRegistry;
