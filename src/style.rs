//! Style flags, color wrapping and escape stripping.
//!
//! Every styled string produced here has the shape
//! `ESC[<code>m ... text ... ESC[0m`. Wraps nest: composing bold and italic
//! gives `ESC[3m ESC[1m text ESC[0m ESC[0m`.
//!
//! ```
//! use termcolorized::style::{colorize, compose, strip, StyleOptions};
//!
//! assert_eq!(colorize("hi", Some("red"), None), "\x1b[31mhi\x1b[0m");
//! assert_eq!(colorize("hi", Some("red"), Some("white")), "\x1b[31m\x1b[47mhi\x1b[0m");
//!
//! let styled = compose("warn", &StyleOptions::new().color("yellow").bold());
//! assert_eq!(styled, "\x1b[1m\x1b[33mwarn\x1b[0m");
//! assert_eq!(strip(&styled), "warn");
//! ```

use bitflags::bitflags;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::color::{Color, ColorParseError, RESET};

/// A single SGR style attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFlag {
    Reset,
    Bold,
    Dim,
    Italic,
    Underline,
    Blink,
    Reverse,
    Hidden,
    Strikethrough,
}

impl StyleFlag {
    /// SGR parameter for this flag.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Reset => 0,
            Self::Bold => 1,
            Self::Dim => 2,
            Self::Italic => 3,
            Self::Underline => 4,
            Self::Blink => 5,
            Self::Reverse => 7,
            Self::Hidden => 8,
            Self::Strikethrough => 9,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reset => "reset",
            Self::Bold => "bold",
            Self::Dim => "dim",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Blink => "blink",
            Self::Reverse => "reverse",
            Self::Hidden => "hidden",
            Self::Strikethrough => "strikethrough",
        }
    }

    /// Look up a flag by name or short alias.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "reset" => Some(Self::Reset),
            "bold" | "b" => Some(Self::Bold),
            "dim" | "d" => Some(Self::Dim),
            "italic" | "i" => Some(Self::Italic),
            "underline" | "u" => Some(Self::Underline),
            "blink" => Some(Self::Blink),
            "reverse" | "r" => Some(Self::Reverse),
            "hidden" | "conceal" => Some(Self::Hidden),
            "strikethrough" | "strike" | "s" => Some(Self::Strikethrough),
            _ => None,
        }
    }
}

bitflags! {
    /// Style attributes that a [`StyleOptions`] can turn on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        const BOLD          = 1 << 0;
        const ITALIC        = 1 << 1;
        const UNDERLINE     = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const DIM           = 1 << 4;
        const BLINK         = 1 << 5;
        const REVERSE       = 1 << 6;
        const HIDDEN        = 1 << 7;
    }
}

impl Attributes {
    /// Attribute to flag mapping, in the order wraps are applied.
    const WRAP_ORDER: [(Self, StyleFlag); 8] = [
        (Self::BOLD, StyleFlag::Bold),
        (Self::ITALIC, StyleFlag::Italic),
        (Self::UNDERLINE, StyleFlag::Underline),
        (Self::STRIKETHROUGH, StyleFlag::Strikethrough),
        (Self::DIM, StyleFlag::Dim),
        (Self::BLINK, StyleFlag::Blink),
        (Self::REVERSE, StyleFlag::Reverse),
        (Self::HIDDEN, StyleFlag::Hidden),
    ];

    /// Enabled flags, innermost wrap first.
    pub fn style_flags(&self) -> impl Iterator<Item = StyleFlag> + '_ {
        Self::WRAP_ORDER
            .iter()
            .filter(|(attr, _)| self.contains(*attr))
            .map(|(_, flag)| *flag)
    }

    /// Attribute bit for a flag; `None` for [`StyleFlag::Reset`].
    #[must_use]
    pub fn from_flag(flag: StyleFlag) -> Option<Self> {
        Self::WRAP_ORDER
            .iter()
            .find(|(_, f)| *f == flag)
            .map(|(attr, _)| *attr)
    }
}

/// Colors plus style attributes for one run of text.
///
/// Colors are kept as the strings the caller supplied; an unusable color
/// renders as no color at all rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyleOptions {
    /// Foreground color.
    pub color: Option<String>,
    /// Background color.
    pub bg_color: Option<String>,
    /// Enabled attributes.
    pub attributes: Attributes,
}

impl StyleOptions {
    /// Create an empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the foreground color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Set the background color.
    #[must_use]
    pub fn bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Enable attributes.
    #[must_use]
    pub fn with(mut self, attributes: Attributes) -> Self {
        self.attributes.insert(attributes);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        self.with(Attributes::BOLD)
    }

    #[must_use]
    pub fn italic(self) -> Self {
        self.with(Attributes::ITALIC)
    }

    #[must_use]
    pub fn underline(self) -> Self {
        self.with(Attributes::UNDERLINE)
    }

    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.with(Attributes::STRIKETHROUGH)
    }

    #[must_use]
    pub fn dim(self) -> Self {
        self.with(Attributes::DIM)
    }

    #[must_use]
    pub fn blink(self) -> Self {
        self.with(Attributes::BLINK)
    }

    #[must_use]
    pub fn reverse(self) -> Self {
        self.with(Attributes::REVERSE)
    }

    #[must_use]
    pub fn hidden(self) -> Self {
        self.with(Attributes::HIDDEN)
    }

    /// Returns true when neither color nor attributes are set.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        active(self.color.as_deref()).is_none()
            && active(self.bg_color.as_deref()).is_none()
            && self.attributes.is_empty()
    }

    /// Render text with this style applied. Same as [`compose`].
    #[must_use]
    pub fn render(&self, text: &str) -> String {
        compose(text, self)
    }

    /// Parse a style definition such as `"bold red on white"`.
    ///
    /// Words are attribute names ([`StyleFlag::from_name`]), a foreground
    /// color, or `on <color>` for the background. `""` and `"none"` give the
    /// empty style.
    ///
    /// # Errors
    ///
    /// Returns `StyleParseError` for words that are neither attributes nor
    /// colors, a dangling `on`, or a malformed background color. Definitions
    /// are configuration, so they are checked strictly even though rendering
    /// itself never fails on bad colors.
    pub fn parse(definition: &str) -> Result<Self, StyleParseError> {
        let definition = definition.trim();
        if definition.is_empty() || definition.eq_ignore_ascii_case("none") {
            return Ok(Self::new());
        }

        let mut result = Self::new();
        let mut words = definition_words(definition).into_iter();

        while let Some(word) = words.next() {
            if word.eq_ignore_ascii_case("on") {
                let color = words.next().ok_or(StyleParseError::MissingColor)?;
                Color::parse(color)?;
                result = result.bg_color(color);
                continue;
            }

            if let Some(flag) = StyleFlag::from_name(word) {
                // "reset" carries no attribute; it only matters for single wraps.
                if let Some(attr) = Attributes::from_flag(flag) {
                    result = result.with(attr);
                }
                continue;
            }

            if Color::parse(word).is_ok() {
                result = result.color(word);
                continue;
            }

            return Err(StyleParseError::UnknownToken(word.to_string()));
        }

        Ok(result)
    }
}

/// Split a definition on whitespace, keeping `rgb(r, g, b)` as one word.
fn definition_words(definition: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut rest = definition.trim_start();
    while !rest.is_empty() {
        let end = if rest.starts_with("rgb(") {
            rest.find(')').map_or(rest.len(), |close| close + 1)
        } else {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        };
        words.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    words
}

/// Writes the definition [`StyleOptions::parse`] reads back. Colors that do
/// not parse render as nothing and are left out.
impl fmt::Display for StyleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .attributes
            .style_flags()
            .map(|flag| flag.name().to_string())
            .collect();

        if let Some(color) = parsable(self.color.as_deref()) {
            parts.push(color.to_string());
        }
        if let Some(bg) = parsable(self.bg_color.as_deref()) {
            parts.push(format!("on {bg}"));
        }

        if parts.is_empty() {
            return write!(f, "none");
        }
        write!(f, "{}", parts.join(" "))
    }
}

fn parsable(color: Option<&str>) -> Option<&str> {
    active(color).filter(|c| Color::parse(c).is_ok())
}

impl FromStr for StyleOptions {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error type for style definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleParseError {
    UnknownToken(String),
    MissingColor,
    Color(ColorParseError),
}

impl fmt::Display for StyleParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownToken(s) => write!(f, "Unknown token: {s}"),
            Self::MissingColor => write!(f, "'on' requires a color"),
            Self::Color(e) => write!(f, "Color error: {e}"),
        }
    }
}

impl std::error::Error for StyleParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Color(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ColorParseError> for StyleParseError {
    fn from(err: ColorParseError) -> Self {
        Self::Color(err)
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Empty color strings count as "no color".
fn active(color: Option<&str>) -> Option<&str> {
    color.filter(|c| !c.is_empty())
}

fn fragment(color: Option<&str>, background: bool) -> String {
    active(color)
        .and_then(|spec| Color::parse(spec).ok())
        .map(|c| c.ansi_fragment(background))
        .unwrap_or_default()
}

/// Wrap text in foreground and background color fragments plus a reset.
///
/// A missing or unusable color contributes nothing, but the reset is always
/// appended.
#[must_use]
pub fn colorize(text: &str, color: Option<&str>, bg_color: Option<&str>) -> String {
    let fg = fragment(color, false);
    let bg = fragment(bg_color, true);
    let mut out = String::with_capacity(fg.len() + bg.len() + text.len() + RESET.len());
    out.push_str(&fg);
    out.push_str(&bg);
    out.push_str(text);
    out.push_str(RESET);
    out
}

/// [`colorize`] for already-parsed colors.
#[must_use]
pub fn colorize_with(text: &str, color: Option<&Color>, bg_color: Option<&Color>) -> String {
    let fg = color.map(|c| c.ansi_fragment(false)).unwrap_or_default();
    let bg = bg_color.map(|c| c.ansi_fragment(true)).unwrap_or_default();
    format!("{fg}{bg}{text}{RESET}")
}

/// Wrap text in a single style flag: `ESC[<code>m text ESC[0m`.
#[must_use]
pub fn apply_style_flag(text: &str, flag: StyleFlag) -> String {
    format!("\x1b[{}m{text}{RESET}", flag.code())
}

#[must_use]
pub fn bold(text: &str) -> String {
    apply_style_flag(text, StyleFlag::Bold)
}

#[must_use]
pub fn italic(text: &str) -> String {
    apply_style_flag(text, StyleFlag::Italic)
}

#[must_use]
pub fn underline(text: &str) -> String {
    apply_style_flag(text, StyleFlag::Underline)
}

#[must_use]
pub fn strikethrough(text: &str) -> String {
    apply_style_flag(text, StyleFlag::Strikethrough)
}

#[must_use]
pub fn dim(text: &str) -> String {
    apply_style_flag(text, StyleFlag::Dim)
}

#[must_use]
pub fn blink(text: &str) -> String {
    apply_style_flag(text, StyleFlag::Blink)
}

#[must_use]
pub fn reverse(text: &str) -> String {
    apply_style_flag(text, StyleFlag::Reverse)
}

#[must_use]
pub fn hidden(text: &str) -> String {
    apply_style_flag(text, StyleFlag::Hidden)
}

/// Apply colors, then each enabled attribute as an outward nesting wrap.
///
/// When attributes follow the color step, the color step's own reset is
/// dropped so the attribute wraps close the whole run. Without attributes the
/// color step keeps its reset: a style with colors and no attributes renders
/// exactly like [`colorize`], so the output always ends in one `ESC[0m` and
/// never leaks color into following text.
#[must_use]
pub fn compose(text: &str, options: &StyleOptions) -> String {
    let color = active(options.color.as_deref());
    let bg_color = active(options.bg_color.as_deref());

    let mut result = if color.is_some() || bg_color.is_some() {
        let mut colored = colorize(text, color, bg_color);
        if !options.attributes.is_empty() {
            colored.truncate(colored.len() - RESET.len());
        }
        colored
    } else {
        text.to_string()
    };

    for flag in options.attributes.style_flags() {
        result = apply_style_flag(&result, flag);
    }

    result
}

/// Remove every SGR sequence (`ESC[` digits and `;` then `m`).
#[must_use]
pub fn strip(text: &str) -> String {
    static SGR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("valid regex"));
    SGR_RE.replace_all(text, "").into_owned()
}

/// Number of characters left after [`strip`].
#[must_use]
pub fn visible_length(text: &str) -> usize {
    strip(text).chars().count()
}
