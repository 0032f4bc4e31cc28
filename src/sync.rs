//! Mutex helpers that recover from poisoning.
//!
//! The crate guards two kinds of shared state with mutexes: the color parse
//! cache and the output writers owned by [`crate::animation::Animator`] and
//! [`crate::logging::StyledLogger`]. Neither can be left in a state worse than
//! "stale cache entry" or "half-written frame" by a panicking thread, so every
//! lock in non-test code goes through [`lock_recover`] instead of unwrapping.
//!
//! Tests keep using `.lock().unwrap()` so that poison fails fast there.

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, taking the inner value back if a previous holder panicked.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use termcolorized::sync::lock_recover;
///
/// let frames = Mutex::new(vec!["one"]);
/// lock_recover(&frames).push("two");
/// assert_eq!(lock_recover(&frames).len(), 2);
/// ```
#[inline]
pub fn lock_recover<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Same as [`lock_recover`], but reports the recovery through `log` with the
/// call site supplied in `context`.
#[inline]
pub fn lock_recover_debug<'a, T: ?Sized>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        log::warn!("mutex poison recovered at: {context}");
        poisoned.into_inner()
    })
}
