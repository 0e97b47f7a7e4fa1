//! Straight-line error handling with typed outcomes.
//!
//! This crate provides [`Outcome`], a two-variant success/failure value with
//! the usual combinators, and [`binding`] blocks that let a sequence of
//! fallible steps read like direct-style code: the first failing step ends
//! the block, and the block itself evaluates to that failure.
//!
//! Failures can carry provenance through [`ChainedError`]: when a binding
//! block converts an inner failure into an outer one with
//! [`Scope::bind_caused`], the inner cause is attached upstream and shows up
//! in [`ChainedError::render_chain`].
//!
//! ```
//! use straightline::{binding, failure, success, Outcome, OutcomeIteratorExt};
//!
//! fn parse(s: &str) -> Outcome<i32, String> {
//!     Outcome::from(s.parse::<i32>().map_err(|_| format!("not a number: {s}")))
//! }
//!
//! let sum = binding(|mut scope| {
//!     let a = scope.bind(parse("4"))?;
//!     let b = scope.bind(parse("5"))?;
//!     Ok(a + b)
//! });
//! assert_eq!(sum, success(9));
//!
//! let parsed = ["1", "x", "3"].into_iter().map(parse).all_successful();
//! assert_eq!(parsed, failure("not a number: x".to_string()));
//! ```
//!
//! # Features
//!
//! - `async` (default): `binding_async` and the `stream` combinators.
//! - `derive` (default): `#[derive(ChainedError)]`.

pub mod binding;
pub mod catching;
pub mod chain;
pub mod collect;
pub mod outcome;
#[cfg(feature = "async")]
pub mod stream;

// Re-export main APIs
pub use binding::{binding, Abort, Scope};
#[cfg(feature = "async")]
pub use binding::binding_async;
pub use catching::{catching, CaughtPanic};
pub use chain::{Ancestors, CauseSlot, ChainedError, ChainedErrorExt};
pub use collect::{all_successful, any_successful, partition_outcomes, OutcomeIteratorExt};
pub use outcome::{failure, success, Failure, OptionExt, Outcome, Success};

#[cfg(feature = "derive")]
pub use straightline_macros::ChainedError;
