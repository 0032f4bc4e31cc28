//! A `log` backend that renders records with the crate's own styles.
//!
//! ```rust,no_run
//! use log::LevelFilter;
//! use termcolorized::logging::StyledLogger;
//!
//! StyledLogger::new()
//!     .level(LevelFilter::Debug)
//!     .show_target(true)
//!     .init()
//!     .expect("logger already installed");
//!
//! log::info!("ready");
//! ```

use std::io::{self, Write};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use time::{OffsetDateTime, format_description::OwnedFormatItem};

use crate::presets;
use crate::style::{StyleOptions, compose};
use crate::sync::lock_recover;
use crate::terminal;

const DEFAULT_TIME_FORMAT: &str = "[hour]:[minute]:[second]";

/// Logger for the `log` crate that writes one styled line per record.
///
/// `StyledLogger` is `Sync`; the writer sits behind a mutex with poison
/// recovery, so concurrent records never interleave within a line.
pub struct StyledLogger {
    writer: Mutex<Box<dyn Write + Send>>,
    level: LevelFilter,
    show_time: bool,
    omit_repeated_times: bool,
    show_level: bool,
    show_target: bool,
    color: bool,
    time_format: OwnedFormatItem,
    last_time: Mutex<Option<String>>,
}

impl StyledLogger {
    /// Logger writing to stderr, colored when stderr supports it.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stderr())).color(terminal::stderr_supports_color())
    }

    /// Logger writing to `writer`, colored.
    #[must_use]
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        let time_format = time::format_description::parse_owned::<2>(DEFAULT_TIME_FORMAT)
            .unwrap_or_else(|_| OwnedFormatItem::Literal(Vec::<u8>::new().into_boxed_slice()));
        Self {
            writer: Mutex::new(writer),
            level: LevelFilter::Info,
            show_time: true,
            omit_repeated_times: true,
            show_level: true,
            show_target: false,
            color: true,
            time_format,
            last_time: Mutex::new(None),
        }
    }

    /// Set the minimum log level.
    #[must_use]
    pub fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Enable or disable timestamps.
    #[must_use]
    pub fn show_time(mut self, show: bool) -> Self {
        self.show_time = show;
        self
    }

    /// Blank out a timestamp equal to the previous one.
    #[must_use]
    pub fn omit_repeated_times(mut self, omit: bool) -> Self {
        self.omit_repeated_times = omit;
        self
    }

    /// Enable or disable the level column.
    #[must_use]
    pub fn show_level(mut self, show: bool) -> Self {
        self.show_level = show;
        self
    }

    /// Append the record target after the message.
    #[must_use]
    pub fn show_target(mut self, show: bool) -> Self {
        self.show_target = show;
        self
    }

    /// Enable or disable escape codes.
    #[must_use]
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Override the time format (`time` format description syntax). An
    /// invalid description keeps the current format.
    #[must_use]
    pub fn time_format(mut self, format: &str) -> Self {
        if let Ok(parsed) = time::format_description::parse_owned::<2>(format) {
            self.time_format = parsed;
        }
        self
    }

    /// Install as the global logger.
    pub fn init(self) -> Result<(), SetLoggerError> {
        log::set_max_level(self.level);
        log::set_boxed_logger(Box::new(self))
    }

    fn format_time(&self) -> String {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        now.format(&self.time_format)
            .unwrap_or_else(|_| now.to_string())
    }

    fn level_style(level: Level) -> StyleOptions {
        match level {
            Level::Error => presets::error_style(),
            Level::Warn => presets::warning_style(),
            Level::Info => presets::info_style(),
            Level::Debug => StyleOptions::new().dim(),
            Level::Trace => StyleOptions::new().color("gray").dim(),
        }
    }

    fn paint(&self, text: &str, style: &StyleOptions) -> String {
        if self.color {
            compose(text, style)
        } else {
            text.to_string()
        }
    }

    fn format_record(&self, record: &Record<'_>) -> String {
        let mut line = String::new();

        if self.show_time {
            let time_str = self.format_time();
            let display = if self.omit_repeated_times {
                let mut last = lock_recover(&self.last_time);
                if last.as_ref() == Some(&time_str) {
                    " ".repeat(time_str.chars().count())
                } else {
                    *last = Some(time_str.clone());
                    time_str
                }
            } else {
                time_str
            };
            line.push_str(&self.paint(&display, &StyleOptions::new().dim()));
            line.push(' ');
        }

        if self.show_level {
            let padded = format!("{:<5}", record.level());
            line.push_str(&self.paint(&padded, &Self::level_style(record.level())));
            line.push(' ');
        }

        line.push_str(&record.args().to_string());

        if self.show_target && !record.target().is_empty() {
            line.push(' ');
            line.push_str(&self.paint(record.target(), &StyleOptions::new().dim()));
        }

        line
    }
}

impl Default for StyledLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Log for StyledLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(record);
        let mut writer = lock_recover(&self.writer);
        // A logger has nowhere to report its own write failures.
        let _ = writeln!(writer, "{line}");
    }

    fn flush(&self) {
        let _ = lock_recover(&self.writer).flush();
    }
}
