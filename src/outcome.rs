// Two-variant outcome values and their combinators.
//
// An `Outcome` is an immutable value: every combinator consumes it and
// produces either a new `Outcome` or a plain value. Branch closures are
// `FnOnce` and run at most once, only for the variant they target.

use std::fmt::Debug;

use crate::chain::ChainedError;

/// Either a successful payload or a typed failure cause.
///
/// By convention `S` is the success type and `F` the failure type.
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome<S, F> {
    /// The operation completed and produced a value.
    Success(S),
    /// The operation failed with a cause.
    Failure(F),
}

pub use Outcome::{Failure, Success};

/// Wraps `value` as a [`Success`].
pub fn success<S, F>(value: S) -> Outcome<S, F> {
    Success(value)
}

/// Wraps `cause` as a [`Failure`].
pub fn failure<S, F>(cause: F) -> Outcome<S, F> {
    Failure(cause)
}

impl<S, F> Outcome<S, F> {
    /// Returns `true` for a [`Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Success(_))
    }

    /// Returns `true` for a [`Failure`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Failure(_))
    }

    /// Converts from `&Outcome<S, F>` to `Outcome<&S, &F>`.
    pub fn as_ref(&self) -> Outcome<&S, &F> {
        match self {
            Success(value) => Success(value),
            Failure(cause) => Failure(cause),
        }
    }

    /// Converts from `&mut Outcome<S, F>` to `Outcome<&mut S, &mut F>`.
    pub fn as_mut(&mut self) -> Outcome<&mut S, &mut F> {
        match self {
            Success(value) => Success(value),
            Failure(cause) => Failure(cause),
        }
    }

    /// Applies exactly one of the two branches to the held payload.
    pub fn fold<C>(self, on_success: impl FnOnce(S) -> C, on_failure: impl FnOnce(F) -> C) -> C {
        match self {
            Success(value) => on_success(value),
            Failure(cause) => on_failure(cause),
        }
    }

    /// Runs `f` on the success payload and returns the outcome unchanged.
    pub fn inspect(self, f: impl FnOnce(&S)) -> Self {
        if let Success(value) = &self {
            f(value);
        }
        self
    }

    /// Runs `f` on the failure cause and returns the outcome unchanged.
    pub fn inspect_failure(self, f: impl FnOnce(&F)) -> Self {
        if let Failure(cause) = &self {
            f(cause);
        }
        self
    }

    /// Transforms the success payload. A [`Failure`] passes through untouched.
    pub fn map<S2>(self, f: impl FnOnce(S) -> S2) -> Outcome<S2, F> {
        match self {
            Success(value) => Success(f(value)),
            Failure(cause) => Failure(cause),
        }
    }

    /// Transforms the failure cause. A [`Success`] passes through untouched.
    pub fn map_failure<F2>(self, f: impl FnOnce(F) -> F2) -> Outcome<S, F2> {
        match self {
            Success(value) => Success(value),
            Failure(cause) => Failure(f(cause)),
        }
    }

    /// Sequences a fallible step after a [`Success`].
    ///
    /// The outcome of `f` is returned as is. On a [`Failure`], `f` is never
    /// called and the original cause is returned.
    ///
    /// ```
    /// use straightline::{success, failure, Outcome};
    ///
    /// fn halve(n: i32) -> Outcome<i32, String> {
    ///     if n % 2 == 0 { success(n / 2) } else { failure(format!("{n} is odd")) }
    /// }
    ///
    /// assert_eq!(success(12).and_then(halve).and_then(halve), success(3));
    /// assert_eq!(success(6).and_then(halve).and_then(halve), failure("3 is odd".to_string()));
    /// ```
    pub fn and_then<S2>(self, f: impl FnOnce(S) -> Outcome<S2, F>) -> Outcome<S2, F> {
        match self {
            Success(value) => f(value),
            Failure(cause) => Failure(cause),
        }
    }

    /// Recovery path: sequences a step after a [`Failure`].
    ///
    /// A [`Success`] is returned untouched and `f` is never called.
    pub fn or_else<F2>(self, f: impl FnOnce(F) -> Outcome<S, F2>) -> Outcome<S, F2> {
        match self {
            Success(value) => Success(value),
            Failure(cause) => f(cause),
        }
    }

    /// Returns the success payload, panicking on a [`Failure`].
    ///
    /// The panic message contains the `Debug` rendering of the cause. For
    /// chained errors prefer [`Outcome::get_or_report`], which renders the
    /// whole cause chain.
    #[track_caller]
    pub fn get_or_panic(self) -> S
    where
        F: Debug,
    {
        match self {
            Success(value) => value,
            Failure(cause) => panic!("expected Success but found Failure: {cause:?}"),
        }
    }

    /// Returns the success payload, panicking with the rendered cause chain
    /// on a [`Failure`].
    #[track_caller]
    pub fn get_or_report(self) -> S
    where
        F: ChainedError,
    {
        match self {
            Success(value) => value,
            Failure(cause) => panic!(
                "expected Success but found Failure<{}>: {}",
                cause.kind_name(),
                cause.render_chain()
            ),
        }
    }

    /// Returns the success payload, if any.
    pub fn get_or_none(self) -> Option<S> {
        match self {
            Success(value) => Some(value),
            Failure(_) => None,
        }
    }

    /// Returns the success payload or `default`.
    pub fn get_or(self, default: S) -> S {
        match self {
            Success(value) => value,
            Failure(_) => default,
        }
    }

    /// Returns the success payload or computes one from the cause.
    pub fn get_or_else(self, f: impl FnOnce(F) -> S) -> S {
        match self {
            Success(value) => value,
            Failure(cause) => f(cause),
        }
    }

    /// Returns the failure cause, panicking on a [`Success`].
    #[track_caller]
    pub fn get_failure_or_panic(self) -> F {
        match self {
            Success(_) => panic!("expected Failure but found Success"),
            Failure(cause) => cause,
        }
    }

    /// Returns the failure cause, if any.
    pub fn get_failure_or_none(self) -> Option<F> {
        match self {
            Success(_) => None,
            Failure(cause) => Some(cause),
        }
    }

    /// Returns the failure cause or `default`.
    pub fn get_failure_or(self, default: F) -> F {
        match self {
            Success(_) => default,
            Failure(cause) => cause,
        }
    }

    /// Returns the failure cause or computes one from the success payload.
    pub fn get_failure_or_else(self, f: impl FnOnce(S) -> F) -> F {
        match self {
            Success(value) => f(value),
            Failure(cause) => cause,
        }
    }

    /// Builds an outcome from an option, calling `error` only on `None`.
    pub fn from_option(option: Option<S>, error: impl FnOnce() -> F) -> Self {
        match option {
            Some(value) => Success(value),
            None => Failure(error()),
        }
    }

    /// Converts into a standard library `Result`.
    pub fn into_result(self) -> Result<S, F> {
        self.into()
    }
}

impl<S, F> Outcome<Option<S>, F> {
    /// Turns `Success(None)` into `Failure(error())`.
    ///
    /// `Success(Some(v))` becomes `Success(v)` and a [`Failure`] passes
    /// through with `error` never called.
    pub fn expect_some_or(self, error: impl FnOnce() -> F) -> Outcome<S, F> {
        match self {
            Success(Some(value)) => Success(value),
            Success(None) => Failure(error()),
            Failure(cause) => Failure(cause),
        }
    }
}

impl<S, F> From<Result<S, F>> for Outcome<S, F> {
    fn from(result: Result<S, F>) -> Self {
        match result {
            Ok(value) => Success(value),
            Err(cause) => Failure(cause),
        }
    }
}

impl<S, F> From<Outcome<S, F>> for Result<S, F> {
    fn from(outcome: Outcome<S, F>) -> Self {
        match outcome {
            Success(value) => Ok(value),
            Failure(cause) => Err(cause),
        }
    }
}

/// Adapter from `Option` to [`Outcome`].
pub trait OptionExt<S> {
    /// `Some(v)` becomes `Success(v)`; `None` becomes `Failure(error())`.
    fn success_or_else<F>(self, error: impl FnOnce() -> F) -> Outcome<S, F>;
}

impl<S> OptionExt<S> for Option<S> {
    fn success_or_else<F>(self, error: impl FnOnce() -> F) -> Outcome<S, F> {
        Outcome::from_option(self, error)
    }
}
