// Capturing panics as failures.
//
// `catching` is the bridge from panicking code into `Outcome`. A binding
// block's short-circuit travels as an `Abort` return value rather than as
// an unwind, so it is never seen (or swallowed) here: a closure that
// returns `Result<_, Abort>` comes back as `Success(Err(abort))` and the
// caller's `?` carries on propagating it.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;
use tracing::debug;

use crate::outcome::{Failure, Outcome, Success};

/// A panic captured by [`catching`].
#[derive(Debug, Error)]
#[error("panicked: {message}")]
pub struct CaughtPanic {
    message: String,
    payload: Box<dyn Any + Send>,
}

impl CaughtPanic {
    fn new(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Self { message, payload }
    }

    /// The panic message, when the payload was a string.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The raw panic payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload
    }

    /// Continues unwinding with the original payload.
    pub fn resume(self) -> ! {
        panic::resume_unwind(self.payload)
    }
}

/// Runs `f` exactly once, turning a panic into a [`Failure`].
///
/// The closure is treated as unwind safe; state it mutates may be left
/// half-updated when it panics. The process panic hook still runs.
///
/// ```
/// use straightline::catching;
///
/// let ok = catching(|| 1 + 1);
/// assert_eq!(ok.get_or_none(), Some(2));
///
/// let empty: Vec<i32> = Vec::new();
/// let failed = catching(|| empty[0]);
/// assert!(failed.is_failure());
/// ```
pub fn catching<S>(f: impl FnOnce() -> S) -> Outcome<S, CaughtPanic> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Success(value),
        Err(payload) => {
            let caught = CaughtPanic::new(payload);
            debug!(message = %caught.message, "catching: captured panic");
            Failure(caught)
        }
    }
}

impl<S> Outcome<S, CaughtPanic> {
    /// Receiver form of [`catching`]: runs `f(value)` exactly once.
    pub fn catching_with<T>(value: T, f: impl FnOnce(T) -> S) -> Self {
        catching(move || f(value))
    }
}
