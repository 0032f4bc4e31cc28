//! Named styles.
//!
//! A [`ThemeRegistry`] maps names to [`StyleOptions`]. Names are
//! case-insensitive and stored lowercased, as `.ini` keys are. Registering a
//! name that already exists replaces it; there is no removal. Registries can be built
//! from style definitions or from a `.ini` file with a `[styles]` section:
//!
//! ```ini
//! [styles]
//! alert = bold red on white
//! muted = dim
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::presets;
use crate::style::{StyleOptions, StyleParseError, compose};

/// Named styles owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThemeRegistry {
    styles: HashMap<String, StyleOptions>,
}

impl ThemeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `error`, `success`, `warning`, `info` and
    /// `highlight` presets.
    #[must_use]
    pub fn with_presets() -> Self {
        let mut registry = Self::new();
        for (name, style) in presets::PRESET_STYLES {
            registry.register(name, style());
        }
        registry
    }

    /// Build a registry from string style definitions (`"bold red"`, `"dim"`).
    pub fn from_style_definitions<I, K, V>(styles: I) -> Result<Self, ThemeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut registry = Self::new();
        for (name, definition) in styles {
            let name = name.into();
            let style =
                StyleOptions::parse(definition.as_ref()).map_err(|err| ThemeError::InvalidStyle {
                    name: name.clone(),
                    err,
                })?;
            registry.register(name, style);
        }
        Ok(registry)
    }

    /// Store `style` under `name` (lowercased), replacing any previous entry.
    pub fn register(&mut self, name: impl Into<String>, style: StyleOptions) {
        let mut name = name.into();
        name.make_ascii_lowercase();
        log::trace!("theme {name:?} registered as {style}");
        self.styles.insert(name, style);
    }

    /// Look up a style by name, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StyleOptions> {
        self.styles.get(&name.to_ascii_lowercase())
    }

    /// Render `text` with the style registered as `name`.
    ///
    /// # Errors
    ///
    /// [`ThemeError::NotFound`] when nothing is registered under `name`.
    pub fn apply(&self, name: &str, text: &str) -> Result<String, ThemeError> {
        self.get(name)
            .map(|style| compose(text, style))
            .ok_or_else(|| ThemeError::NotFound {
                name: name.to_string(),
            })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The registry as `.ini` text with a `[styles]` section, readable by
    /// [`ThemeRegistry::from_ini_str`]. Colors that do not parse are left out
    /// (see [`StyleOptions`]'s `Display`).
    #[must_use]
    pub fn config(&self) -> String {
        let mut out = String::from("[styles]\n");
        for name in self.names() {
            if let Some(style) = self.styles.get(name) {
                out.push_str(name);
                out.push_str(" = ");
                out.push_str(&style.to_string());
                out.push('\n');
            }
        }
        out
    }

    /// Parse `.ini` text. Only the `[styles]` section is read; `#` and `;`
    /// start comment lines.
    pub fn from_ini_str(contents: &str) -> Result<Self, ThemeError> {
        let mut in_styles = false;
        let mut seen_styles_section = false;
        let mut registry = Self::new();

        for (line_no, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                in_styles = section.trim().eq_ignore_ascii_case("styles");
                seen_styles_section |= in_styles;
                continue;
            }

            if !in_styles {
                continue;
            }

            let invalid_line = || ThemeError::InvalidIniLine {
                line_no: line_no + 1,
                line: raw_line.to_string(),
            };
            let (name, definition) = line
                .split_once('=')
                .or_else(|| line.split_once(':'))
                .ok_or_else(invalid_line)?;

            let name = name.trim();
            if name.is_empty() {
                return Err(invalid_line());
            }

            let style = StyleOptions::parse(definition).map_err(|err| ThemeError::InvalidStyle {
                name: name.to_ascii_lowercase(),
                err,
            })?;
            registry.register(name, style);
        }

        if !seen_styles_section {
            return Err(ThemeError::MissingStylesSection);
        }

        log::debug!("loaded {} theme styles", registry.len());
        Ok(registry)
    }

    /// Read a `.ini` theme file from disk.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let contents = fs::read_to_string(&path).map_err(|err| ThemeError::Io {
            path: path.as_ref().to_path_buf(),
            err,
        })?;
        Self::from_ini_str(&contents)
    }
}

/// Errors returned by [`ThemeRegistry`] operations.
#[derive(Debug)]
pub enum ThemeError {
    NotFound {
        name: String,
    },
    Io {
        path: PathBuf,
        err: std::io::Error,
    },
    MissingStylesSection,
    InvalidIniLine {
        line_no: usize,
        line: String,
    },
    InvalidStyle {
        name: String,
        err: StyleParseError,
    },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { name } => write!(f, "Theme \"{name}\" not found"),
            Self::Io { path, err } => {
                write!(f, "failed to read theme file {}: {err}", path.display())
            }
            Self::MissingStylesSection => write!(f, "theme ini is missing a [styles] section"),
            Self::InvalidIniLine { line_no, line } => {
                write!(f, "invalid theme ini line {line_no}: {line:?}")
            }
            Self::InvalidStyle { name, err } => {
                write!(f, "invalid style definition for theme {name:?}: {err}")
            }
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { err, .. } => Some(err),
            Self::InvalidStyle { err, .. } => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_then_registered() {
        let mut registry = ThemeRegistry::new();
        let err = registry.apply("ghost", "text").expect_err("expected error");
        assert!(matches!(&err, ThemeError::NotFound { name } if name == "ghost"));
        assert_eq!(err.to_string(), "Theme \"ghost\" not found");

        registry.register("ghost", StyleOptions::new().bold());
        assert_eq!(registry.apply("ghost", "text").unwrap(), "\x1b[1mtext\x1b[0m");
    }

    #[test]
    fn register_overwrites() {
        let mut registry = ThemeRegistry::new();
        registry.register("note", StyleOptions::new().color("red"));
        registry.register("note", StyleOptions::new().color("blue"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.apply("note", "x").unwrap(), "\x1b[34mx\x1b[0m");
    }

    #[test]
    fn presets_registered() {
        let registry = ThemeRegistry::with_presets();
        assert_eq!(
            registry.names(),
            vec!["error", "highlight", "info", "success", "warning"]
        );
        assert_eq!(
            registry.apply("error", "boom").unwrap(),
            presets::error("boom")
        );
    }

    #[test]
    fn from_style_definitions_rejects_unknown_words() {
        let err = ThemeRegistry::from_style_definitions([("bad", "bold sparkly")])
            .expect_err("expected error");
        assert!(matches!(err, ThemeError::InvalidStyle { ref name, .. } if name == "bad"));
    }

    #[test]
    fn config_has_styles_section() {
        let registry =
            ThemeRegistry::from_style_definitions([("warning", "bold red")]).expect("theme");
        let config = registry.config();
        assert!(config.starts_with("[styles]\n"));
        assert!(config.contains("warning = bold red\n"));
    }

    #[test]
    fn from_ini_str_reads_styles_section() {
        let ini = "; comment\n[colors]\nignored = nonsense here\n[styles]\nAlert = bold red on white\nmuted: dim\n";
        let registry = ThemeRegistry::from_ini_str(ini).expect("theme");
        assert_eq!(registry.names(), vec!["alert", "muted"]);
        assert_eq!(registry.get("alert").unwrap().to_string(), "bold red on white");
        assert_eq!(registry.get("muted").unwrap().to_string(), "dim");
    }

    #[test]
    fn from_ini_str_errors() {
        assert!(matches!(
            ThemeRegistry::from_ini_str("alert = bold\n"),
            Err(ThemeError::MissingStylesSection)
        ));
        assert!(matches!(
            ThemeRegistry::from_ini_str("[styles]\njust words\n"),
            Err(ThemeError::InvalidIniLine { line_no: 2, .. })
        ));
    }

    #[test]
    fn names_ignore_case() {
        let mut registry = ThemeRegistry::new();
        registry.register("Banner", StyleOptions::new().bold());
        assert_eq!(registry.names(), vec!["banner"]);
        assert!(registry.contains("BANNER"));
        assert_eq!(registry.apply("banner", "x").unwrap(), "\x1b[1mx\x1b[0m");

        registry.register("BANNER", StyleOptions::new().dim());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Banner"), Some(&StyleOptions::new().dim()));
    }

    #[test]
    fn config_reads_back() {
        let registry = ThemeRegistry::with_presets();
        let reloaded = ThemeRegistry::from_ini_str(&registry.config()).expect("theme");
        assert_eq!(reloaded, registry);
    }

    #[test]
    fn read_missing_file() {
        let err = ThemeRegistry::read("/nonexistent/theme.ini").expect_err("expected error");
        assert!(matches!(err, ThemeError::Io { .. }));
    }
}
