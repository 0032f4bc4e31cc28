//! Single-line console animations.
//!
//! An [`Animator`] owns an output writer and redraws one terminal line per
//! frame: `\r\x1b[K`, the frame, flush, then a pause through its [`Pacer`].
//! Frames come from the pure functions in [`crate::frames`].
//!
//! One animator runs at most one animation at a time. Starting another while
//! one is active returns [`AnimationOutcome::AlreadyRunning`] without writing
//! anything. [`Animator::stop`] releases the slot at once; the running loop
//! notices at the top of its next iteration, after its current pause.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use termcolorized::animation::{AnimationConfig, AnimationOutcome, Animator};
//!
//! let config = AnimationConfig {
//!     typing: Duration::ZERO,
//!     ..AnimationConfig::default()
//! };
//! let animator = Animator::with_writer(Box::new(std::io::sink())).with_config(config);
//!
//! let outcome = animator.type_text("hello").unwrap();
//! assert_eq!(outcome, AnimationOutcome::Finished("hello".to_string()));
//! assert!(!animator.is_running());
//! ```

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::frames;
use crate::sync::lock_recover_debug;

/// Carriage return followed by erase-to-end-of-line.
pub const ERASE_LINE: &str = "\r\x1b[K";

const IDLE: u64 = 0;

/// Source of delays and of the current time for an [`Animator`].
pub trait Pacer: Send + Sync {
    /// Block the animation for `duration`.
    fn sleep(&self, duration: Duration);

    /// Current instant, used to time the progress bar.
    fn now(&self) -> Instant;
}

/// [`Pacer`] backed by `std::thread::sleep` and the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }

    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// The frame-indexed animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    Typing,
    Wave,
    Blink,
    Pulse,
    Bounce,
    Rainbow,
    Matrix,
}

impl Effect {
    pub const ALL: [Effect; 7] = [
        Effect::Typing,
        Effect::Wave,
        Effect::Blink,
        Effect::Pulse,
        Effect::Bounce,
        Effect::Rainbow,
        Effect::Matrix,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Typing => "type",
            Self::Wave => "wave",
            Self::Blink => "blink",
            Self::Pulse => "pulse",
            Self::Bounce => "bounce",
            Self::Rainbow => "rainbow",
            Self::Matrix => "matrix",
        }
    }

    /// Number of frames drawn for `text`.
    #[must_use]
    pub fn frame_count(self, text: &str) -> usize {
        match self {
            Self::Typing | Self::Wave => frames::per_char_frames(text),
            Self::Blink => frames::BLINK_FRAMES,
            Self::Pulse => frames::PULSE_FRAMES,
            Self::Bounce => frames::BOUNCE_FRAMES,
            Self::Rainbow => frames::RAINBOW_FRAMES,
            Self::Matrix => frames::matrix_frames(text),
        }
    }

    /// Frame `index` for `text`. Only [`Effect::Matrix`] draws from `rng`.
    #[must_use]
    pub fn frame<R: Rng + ?Sized>(self, text: &str, index: usize, rng: &mut R) -> String {
        match self {
            Self::Typing => frames::typing(text, index),
            Self::Wave => frames::wave(text, index),
            Self::Blink => frames::blink(text, index),
            Self::Pulse => frames::pulse(text, index),
            Self::Bounce => frames::bounce(text, index),
            Self::Rainbow => frames::rainbow(text, index),
            Self::Matrix => frames::matrix(text, index, rng),
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Frame intervals and progress bar defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationConfig {
    pub typing: Duration,
    pub wave: Duration,
    pub blink: Duration,
    pub pulse: Duration,
    pub bounce: Duration,
    pub rainbow: Duration,
    pub matrix: Duration,
    /// Total time the progress bar takes to fill.
    pub progress_duration: Duration,
    /// Number of cells in the progress bar.
    pub progress_width: usize,
    /// Redraw interval of the progress bar.
    pub progress_poll: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            typing: Duration::from_millis(100),
            wave: Duration::from_millis(200),
            blink: Duration::from_millis(500),
            pulse: Duration::from_millis(300),
            bounce: Duration::from_millis(150),
            rainbow: Duration::from_millis(200),
            matrix: Duration::from_millis(50),
            progress_duration: Duration::from_millis(3000),
            progress_width: 40,
            progress_poll: Duration::from_millis(50),
        }
    }
}

impl AnimationConfig {
    /// Frame interval configured for `effect`.
    #[must_use]
    pub fn interval(&self, effect: Effect) -> Duration {
        match effect {
            Effect::Typing => self.typing,
            Effect::Wave => self.wave,
            Effect::Blink => self.blink,
            Effect::Pulse => self.pulse,
            Effect::Bounce => self.bounce,
            Effect::Rainbow => self.rainbow,
            Effect::Matrix => self.matrix,
        }
    }

    /// Config with every frame interval and the progress duration set to zero.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            typing: Duration::ZERO,
            wave: Duration::ZERO,
            blink: Duration::ZERO,
            pulse: Duration::ZERO,
            bounce: Duration::ZERO,
            rainbow: Duration::ZERO,
            matrix: Duration::ZERO,
            progress_duration: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// How an animation call ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnimationOutcome {
    /// Every frame was drawn. Carries the input text, or the final frame for
    /// the progress bar.
    Finished(String),
    /// [`Animator::stop`] was called, or another session took the line.
    Cancelled(String),
    /// Another animation was running; nothing was written.
    AlreadyRunning,
}

impl AnimationOutcome {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished(_))
    }

    /// The carried text, if the animation ran at all.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Finished(text) | Self::Cancelled(text) => Some(text),
            Self::AlreadyRunning => None,
        }
    }
}

/// Claim on the animator's single animation slot, released on drop.
struct Session<'a> {
    animator: &'a Animator,
    id: u64,
    name: &'static str,
}

impl Session<'_> {
    fn is_current(&self) -> bool {
        self.animator.active.load(Ordering::SeqCst) == self.id
    }

    /// True unless a newer session owns the line.
    fn may_finish(&self) -> bool {
        let active = self.animator.active.load(Ordering::SeqCst);
        active == self.id || active == IDLE
    }

    fn outcome(&self, finished: bool, text: String) -> AnimationOutcome {
        if finished {
            log::debug!("animation {} finished (session {})", self.name, self.id);
            AnimationOutcome::Finished(text)
        } else {
            log::debug!("animation {} cancelled (session {})", self.name, self.id);
            AnimationOutcome::Cancelled(text)
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        let _ = self.animator.active.compare_exchange(
            self.id,
            IDLE,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
    }
}

/// Draws animations on one line of an output stream.
///
/// `Animator` is `Send + Sync`; share it with `Arc` to stop an animation from
/// another thread.
pub struct Animator {
    writer: Mutex<Box<dyn Write + Send>>,
    pacer: Arc<dyn Pacer>,
    config: AnimationConfig,
    active: AtomicU64,
    next_id: AtomicU64,
}

impl Animator {
    /// Animator writing to stdout with real-time pacing.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Animator writing to `writer`.
    #[must_use]
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            pacer: Arc::new(ThreadPacer),
            config: AnimationConfig::default(),
            active: AtomicU64::new(IDLE),
            next_id: AtomicU64::new(1),
        }
    }

    /// Replace the pacer.
    #[must_use]
    pub fn pacer(mut self, pacer: impl Pacer + 'static) -> Self {
        self.pacer = Arc::new(pacer);
        self
    }

    /// Replace the intervals and progress defaults.
    #[must_use]
    pub fn with_config(mut self, config: AnimationConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Whether an animation currently owns the line.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.active.load(Ordering::SeqCst) != IDLE
    }

    /// Cancel the running animation, if any.
    ///
    /// The animator is idle as soon as this returns. The cancelled loop draws
    /// no further frames once its current pause ends.
    pub fn stop(&self) {
        let previous = self.active.swap(IDLE, Ordering::SeqCst);
        if previous != IDLE {
            log::debug!("animation session {previous} stopped");
        }
    }

    /// Reveal `text` one character per frame.
    pub fn type_text(&self, text: &str) -> io::Result<AnimationOutcome> {
        self.play(Effect::Typing, text)
    }

    /// Reveal `text` with a sinusoidal indent.
    pub fn wave(&self, text: &str) -> io::Result<AnimationOutcome> {
        self.play(Effect::Wave, text)
    }

    /// Blink `text` on and off, ending on a visible frame.
    pub fn blink(&self, text: &str) -> io::Result<AnimationOutcome> {
        self.play(Effect::Blink, text)
    }

    /// Cycle `text` through dim, plain and bold.
    pub fn pulse(&self, text: &str) -> io::Result<AnimationOutcome> {
        self.play(Effect::Pulse, text)
    }

    /// Shift `text` right and back.
    pub fn bounce(&self, text: &str) -> io::Result<AnimationOutcome> {
        self.play(Effect::Bounce, text)
    }

    /// Cycle `text` through six foreground colors.
    pub fn rainbow(&self, text: &str) -> io::Result<AnimationOutcome> {
        self.play(Effect::Rainbow, text)
    }

    /// Reveal `text` from random glyphs, in green.
    pub fn matrix(&self, text: &str) -> io::Result<AnimationOutcome> {
        self.play(Effect::Matrix, text)
    }

    /// Run `effect` at its configured interval.
    pub fn play(&self, effect: Effect, text: &str) -> io::Result<AnimationOutcome> {
        self.play_at(effect, text, self.config.interval(effect))
    }

    /// Run `effect` with an explicit frame interval.
    pub fn play_at(
        &self,
        effect: Effect,
        text: &str,
        interval: Duration,
    ) -> io::Result<AnimationOutcome> {
        let Some(session) = self.begin(effect.name()) else {
            return Ok(AnimationOutcome::AlreadyRunning);
        };

        let count = effect.frame_count(text);
        let mut rng = rand::rng();
        let finished = self.drive(&session, interval, |index| {
            (index < count).then(|| effect.frame(text, index, &mut rng))
        })?;

        if effect == Effect::Blink && session.may_finish() {
            self.draw(text)?;
        }
        Ok(session.outcome(finished, text.to_string()))
    }

    /// Progress bar with the configured duration and width.
    pub fn progress_bar(&self, text: &str) -> io::Result<AnimationOutcome> {
        self.progress_bar_for(text, self.config.progress_duration, self.config.progress_width)
    }

    /// Fill a `width`-cell bar over `duration`, redrawing every poll interval.
    ///
    /// The 100% frame is always drawn last, even after [`Animator::stop`],
    /// unless a newer animation already owns the line.
    pub fn progress_bar_for(
        &self,
        text: &str,
        duration: Duration,
        width: usize,
    ) -> io::Result<AnimationOutcome> {
        let Some(session) = self.begin("progress") else {
            return Ok(AnimationOutcome::AlreadyRunning);
        };

        let start = self.pacer.now();
        let finished = loop {
            if !session.is_current() {
                break false;
            }
            let elapsed = self.pacer.now().saturating_duration_since(start);
            if elapsed >= duration {
                break true;
            }
            let progress = elapsed.as_secs_f64() / duration.as_secs_f64();
            self.draw(&frames::progress(text, width, progress))?;
            self.pacer.sleep(self.config.progress_poll);
        };

        let final_frame = frames::progress(text, width, 1.0);
        if session.may_finish() {
            self.draw(&final_frame)?;
        }
        Ok(session.outcome(finished, final_frame))
    }

    /// Run a custom animation.
    ///
    /// `frame` is called with the text and the frame index; returning `None`
    /// ends the animation.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use termcolorized::animation::Animator;
    ///
    /// let animator = Animator::with_writer(Box::new(std::io::sink()));
    /// let outcome = animator
    ///     .animate("abc", Duration::ZERO, |text, i| {
    ///         (i < 3).then(|| text.to_uppercase())
    ///     })
    ///     .unwrap();
    /// assert!(outcome.is_finished());
    /// ```
    pub fn animate<F>(&self, text: &str, interval: Duration, mut frame: F) -> io::Result<AnimationOutcome>
    where
        F: FnMut(&str, usize) -> Option<String>,
    {
        let Some(session) = self.begin("custom") else {
            return Ok(AnimationOutcome::AlreadyRunning);
        };
        let finished = self.drive(&session, interval, |index| frame(text, index))?;
        Ok(session.outcome(finished, text.to_string()))
    }

    fn begin(&self, name: &'static str) -> Option<Session<'_>> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        match self
            .active
            .compare_exchange(IDLE, id, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => {
                log::debug!("animation {name} started (session {id})");
                Some(Session {
                    animator: self,
                    id,
                    name,
                })
            }
            Err(active) => {
                log::trace!("animation {name} ignored, session {active} is running");
                None
            }
        }
    }

    /// Draw frames until `next_frame` returns `None` (true) or the session
    /// loses the slot (false).
    fn drive<F>(&self, session: &Session<'_>, interval: Duration, mut next_frame: F) -> io::Result<bool>
    where
        F: FnMut(usize) -> Option<String>,
    {
        let mut index = 0;
        loop {
            if !session.is_current() {
                return Ok(false);
            }
            let Some(frame) = next_frame(index) else {
                return Ok(true);
            };
            self.draw(&frame)?;
            self.pacer.sleep(interval);
            index += 1;
        }
    }

    fn draw(&self, frame: &str) -> io::Result<()> {
        let mut writer = lock_recover_debug(&self.writer, "Animator::draw");
        writer.write_all(ERASE_LINE.as_bytes())?;
        writer.write_all(frame.as_bytes())?;
        writer.flush()
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Animator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animator")
            .field("config", &self.config)
            .field("active", &self.active.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
