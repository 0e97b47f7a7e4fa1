//! Binding blocks: straight-line code over fallible steps.
//!
//! [`binding`] runs a body with a fresh [`Scope`]. Inside the body,
//! [`Scope::bind`] extracts a [`Success`] payload; on a [`Failure`] it
//! returns an [`Abort`] that the body propagates with `?`. The abort carries
//! the captured cause back to the entry point, which turns it into the
//! block's own [`Failure`]. No statement after the failing `bind` runs.
//!
//! ```
//! use straightline::{binding, failure, success, Outcome};
//!
//! fn divide(a: i32, b: i32) -> Outcome<i32, String> {
//!     if b == 0 { failure("division by zero".into()) } else { success(a / b) }
//! }
//!
//! let total = binding(|mut scope| {
//!     let x = scope.bind(divide(12, 2))?;
//!     let y = scope.bind(divide(x, 2))?;
//!     Ok(x + y)
//! });
//! assert_eq!(total, success(9));
//!
//! let broken: Outcome<i32, String> = binding(|mut scope| {
//!     let x = scope.bind(divide(8, 2))?;
//!     scope.bind(divide(x, 0))
//! });
//! assert_eq!(broken, failure("division by zero".into()));
//! ```
//!
//! Every synchronous scope carries its own lifetime brand, so an [`Abort`]
//! cannot be returned from any binding body other than the one whose scope
//! produced it:
//!
//! ```compile_fail
//! use straightline::{binding, failure, Outcome};
//!
//! let _: Outcome<i32, String> = binding(|mut outer| {
//!     let inner: Outcome<i32, String> = binding(|_inner| {
//!         outer.bind(failure::<i32, String>("leak".into()))?;
//!         Ok(1)
//!     });
//!     Ok(inner.get_or(0))
//! });
//! ```
//!
//! The scope records the first failure it sees. That captured failure is
//! what the block evaluates to, even when the body drops the [`Abort`]
//! instead of returning it, and a later failure never replaces it. Once a
//! scope has failed, every further `bind*` call aborts immediately.
//!
//! Panics raised inside a body are not converted into failures; they unwind
//! past the entry point untouched.

use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "async")]
use futures::future::BoxFuture;
use tracing::{debug, trace, trace_span};
#[cfg(feature = "async")]
use tracing::Instrument;

use crate::chain::ChainedError;
use crate::outcome::{Failure, Outcome, Success};

// Invariant in 's.
type Brand<'s> = PhantomData<fn(&'s ()) -> &'s ()>;

/// The signal that ends a binding block early.
///
/// An `Abort` carries no cause; the failure itself is held by the scope
/// that raised it. Only a [`Scope`] can create one, and only the body that
/// received that scope can return it. Bodies propagate it with `?`.
#[must_use = "an `Abort` only ends the binding block when it is returned, usually with `?`"]
pub struct Abort<'s, E> {
    _brand: Brand<'s>,
    _failure: PhantomData<fn() -> E>,
}

impl<E> fmt::Debug for Abort<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Abort")
    }
}

/// The capability handed to a binding body.
///
/// A scope is created by [`binding`] or [`binding_async`] and lives exactly
/// as long as the body that received it. It cannot be cloned.
pub struct Scope<'s, E> {
    captured: &'s mut Option<E>,
    _brand: Brand<'s>,
}

impl<'s, E> Scope<'s, E> {
    fn new(captured: &'s mut Option<E>) -> Self {
        Self {
            captured,
            _brand: PhantomData,
        }
    }

    /// Extracts the payload of a [`Success`], or aborts the block with the
    /// cause of a [`Failure`].
    pub fn bind<A>(&mut self, outcome: Outcome<A, E>) -> Result<A, Abort<'s, E>> {
        if self.has_failed() {
            return Err(self.rethrow());
        }
        match outcome {
            Success(value) => Ok(value),
            Failure(cause) => Err(self.capture(cause)),
        }
    }

    /// Like [`Scope::bind`], but converts a foreign cause with
    /// `recontextualize` before aborting.
    pub fn bind_with<A, E0>(
        &mut self,
        outcome: Outcome<A, E0>,
        recontextualize: impl FnOnce(E0) -> E,
    ) -> Result<A, Abort<'s, E>> {
        if self.has_failed() {
            return Err(self.rethrow());
        }
        match outcome {
            Success(value) => Ok(value),
            Failure(cause) => Err(self.capture(recontextualize(cause))),
        }
    }

    /// Like [`Scope::bind_with`] for chained errors on both sides.
    ///
    /// The new cause is built from a reference to the old one, then the old
    /// cause is attached as its upstream before the block aborts.
    ///
    /// ```
    /// use straightline::{binding, failure, CauseSlot, ChainedError, Outcome};
    ///
    /// #[derive(Debug, thiserror::Error, straightline::ChainedError)]
    /// #[error("{message}")]
    /// struct InnerError { message: String, cause: CauseSlot }
    ///
    /// #[derive(Debug, thiserror::Error, straightline::ChainedError)]
    /// #[error("{message}")]
    /// struct OuterError { message: String, cause: CauseSlot }
    ///
    /// let inner: Outcome<i32, InnerError> =
    ///     failure(InnerError { message: "bad input".into(), cause: CauseSlot::empty() });
    ///
    /// let outer = binding(|mut scope| {
    ///     scope.bind_caused(inner, |_| OuterError {
    ///         message: "request failed".into(),
    ///         cause: CauseSlot::empty(),
    ///     })
    /// });
    ///
    /// let rendered = outer.get_failure_or_panic().render_chain();
    /// assert_eq!(rendered, "Error: request failed\n\nCaused by: InnerError\n\tbad input");
    /// ```
    pub fn bind_caused<A, E0>(
        &mut self,
        outcome: Outcome<A, E0>,
        recontextualize: impl FnOnce(&E0) -> E,
    ) -> Result<A, Abort<'s, E>>
    where
        E0: ChainedError,
        E: ChainedError,
    {
        if self.has_failed() {
            return Err(self.rethrow());
        }
        match outcome {
            Success(value) => Ok(value),
            Failure(old) => {
                let mut new = recontextualize(&old);
                debug!(
                    outer = new.kind_name(),
                    inner = old.kind_name(),
                    "binding: recontextualized failure"
                );
                new.attach_cause(Box::new(old));
                Err(self.capture(new))
            }
        }
    }

    /// Aborts the block with `cause`, unless it has already failed.
    pub fn fail<A>(&mut self, cause: E) -> Result<A, Abort<'s, E>> {
        Err(self.capture(cause))
    }

    /// Returns `true` once a failure has been captured.
    pub fn has_failed(&self) -> bool {
        self.captured.is_some()
    }

    fn capture(&mut self, cause: E) -> Abort<'s, E> {
        if self.has_failed() {
            trace!("binding: block already failed, later failure dropped");
        } else {
            debug!(
                failure = std::any::type_name::<E>(),
                "binding: short-circuit"
            );
            *self.captured = Some(cause);
        }
        self.rethrow()
    }

    fn rethrow(&self) -> Abort<'s, E> {
        Abort {
            _brand: PhantomData,
            _failure: PhantomData,
        }
    }
}

/// Runs `body` once with a fresh [`Scope`] and returns its result as an
/// [`Outcome`].
///
/// The block is `Failure(cause)` when the scope captured a failure, with
/// the cause from the first failing `bind`. Otherwise it is
/// `Success(value)` with the value the body returned.
pub fn binding<T, E, B>(body: B) -> Outcome<T, E>
where
    B: for<'s> FnOnce(Scope<'s, E>) -> Result<T, Abort<'s, E>>,
{
    let _span = trace_span!("binding").entered();
    let mut captured = None;
    let finished = body(Scope::new(&mut captured)).ok();
    settle(captured, finished)
}

/// Suspending form of [`binding`].
///
/// The body returns a boxed future that owns its scope across every
/// suspension point; it is awaited in place. Short-circuit behavior is
/// identical to [`binding`]. Like a spawned task, the future may only
/// borrow from its own scope, so state shared with the caller is moved in.
///
/// ```
/// use futures::FutureExt;
/// use straightline::{binding_async, failure, success, Outcome};
///
/// async fn divide(a: i32, b: i32) -> Outcome<i32, String> {
///     if b == 0 { failure("division by zero".into()) } else { success(a / b) }
/// }
///
/// let total = futures::executor::block_on(binding_async(|mut scope| {
///     async move {
///         let x = scope.bind(divide(12, 2).await)?;
///         let y = scope.bind(divide(x, 2).await)?;
///         Ok(x + y)
///     }
///     .boxed()
/// }));
/// assert_eq!(total, success(9));
/// ```
///
/// Each async scope is branded like a synchronous one, so an abort from an
/// outer block cannot be returned by a nested block:
///
/// ```compile_fail
/// use futures::FutureExt;
/// use straightline::{binding_async, failure, Outcome};
///
/// let _ = binding_async(|mut outer| {
///     async move {
///         let inner: Outcome<i32, String> = binding_async(|_inner| {
///             async move {
///                 outer.bind(failure::<i32, String>("leak".into()))?;
///                 Ok(1)
///             }
///             .boxed()
///         })
///         .await;
///         Ok(inner.get_or(0))
///     }
///     .boxed()
/// });
/// ```
///
/// Nor can it cross into a synchronous block:
///
/// ```compile_fail
/// use futures::FutureExt;
/// use straightline::{binding, binding_async, failure, Outcome};
///
/// let _ = binding_async(|mut outer| {
///     async move {
///         let inner: Outcome<i32, String> = binding(|_inner| {
///             outer.bind(failure::<i32, String>("leak".into()))?;
///             Ok(1)
///         });
///         Ok(inner.get_or(0))
///     }
///     .boxed()
/// });
/// ```
#[cfg(feature = "async")]
pub async fn binding_async<T, E, B>(body: B) -> Outcome<T, E>
where
    B: for<'s> FnOnce(Scope<'s, E>) -> BoxFuture<'s, Result<T, Abort<'s, E>>>,
{
    let span = trace_span!("binding_async");
    let mut captured = None;
    let finished = body(Scope::new(&mut captured)).instrument(span).await.ok();
    settle(captured, finished)
}

fn settle<T, E>(captured: Option<E>, finished: Option<T>) -> Outcome<T, E> {
    match (captured, finished) {
        (Some(cause), _) => Failure(cause),
        (None, Some(value)) => Success(value),
        (None, None) => unreachable!("an Abort is only raised after its scope captured a failure"),
    }
}
