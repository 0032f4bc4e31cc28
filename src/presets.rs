//! Shortcuts for common colors and message styles.
//!
//! ```
//! use termcolorized::presets;
//!
//! assert_eq!(presets::red("x"), "\x1b[31mx\x1b[0m");
//! assert_eq!(presets::error("x"), "\x1b[1m\x1b[31mx\x1b[0m");
//! ```

use std::io::{self, Write};

use crate::style::{StyleOptions, colorize, compose, strip};
use crate::terminal;

macro_rules! color_helpers {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("Color `text` ", stringify!($name), ".")]
            #[must_use]
            pub fn $name(text: &str) -> String {
                colorize(text, Some(stringify!($name)), None)
            }
        )*
    };
}

color_helpers!(red, green, blue, yellow, magenta, cyan, white, black, gray);

/// Red and bold.
#[must_use]
pub fn error_style() -> StyleOptions {
    StyleOptions::new().color("red").bold()
}

/// Green and bold.
#[must_use]
pub fn success_style() -> StyleOptions {
    StyleOptions::new().color("green").bold()
}

/// Yellow and bold.
#[must_use]
pub fn warning_style() -> StyleOptions {
    StyleOptions::new().color("yellow").bold()
}

/// Blue and bold.
#[must_use]
pub fn info_style() -> StyleOptions {
    StyleOptions::new().color("blue").bold()
}

/// Cyan, bold and underlined.
#[must_use]
pub fn highlight_style() -> StyleOptions {
    StyleOptions::new().color("cyan").bold().underline()
}

/// Preset names paired with their styles.
pub const PRESET_STYLES: [(&str, fn() -> StyleOptions); 5] = [
    ("error", error_style),
    ("success", success_style),
    ("warning", warning_style),
    ("info", info_style),
    ("highlight", highlight_style),
];

#[must_use]
pub fn error(text: &str) -> String {
    compose(text, &error_style())
}

#[must_use]
pub fn success(text: &str) -> String {
    compose(text, &success_style())
}

#[must_use]
pub fn warning(text: &str) -> String {
    compose(text, &warning_style())
}

#[must_use]
pub fn info(text: &str) -> String {
    compose(text, &info_style())
}

#[must_use]
pub fn highlight(text: &str) -> String {
    compose(text, &highlight_style())
}

/// Write `text` and a newline, stripping escape codes unless `color` is set.
pub fn write_styled<W: Write + ?Sized>(writer: &mut W, text: &str, color: bool) -> io::Result<()> {
    if color {
        writeln!(writer, "{text}")
    } else {
        writeln!(writer, "{}", strip(text))
    }
}

/// Render `text` with `style`, print it to stdout and return the styled string.
///
/// Escape codes are left out of the printed line when stdout does not support
/// color ([`terminal::supports_color`]); the returned string always has them.
pub fn print_styled(text: &str, style: &StyleOptions) -> io::Result<String> {
    let styled = compose(text, style);
    let mut stdout = io::stdout().lock();
    write_styled(&mut stdout, &styled, terminal::supports_color())?;
    Ok(styled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_helpers() {
        assert_eq!(green("ok"), "\x1b[32mok\x1b[0m");
        assert_eq!(black("x"), "\x1b[30mx\x1b[0m");
        assert_eq!(gray("x"), "\x1b[90mx\x1b[0m");
    }

    #[test]
    fn test_style_presets() {
        assert_eq!(success("done"), "\x1b[1m\x1b[32mdone\x1b[0m");
        assert_eq!(warning("hm"), "\x1b[1m\x1b[33mhm\x1b[0m");
        assert_eq!(info("fyi"), "\x1b[1m\x1b[34mfyi\x1b[0m");
        assert_eq!(
            highlight("look"),
            "\x1b[4m\x1b[1m\x1b[36mlook\x1b[0m\x1b[0m"
        );
    }

    #[test]
    fn test_write_styled_strips_without_color() {
        let mut plain = Vec::new();
        write_styled(&mut plain, &error("bad"), false).unwrap();
        assert_eq!(plain, b"bad\n");

        let mut colored = Vec::new();
        write_styled(&mut colored, &error("bad"), true).unwrap();
        assert_eq!(String::from_utf8(colored).unwrap(), format!("{}\n", error("bad")));
    }
}
