// Reducing sequences of outcomes.
//
// `all_successful` is lazy: it pulls from the iterator only until the
// first failure. `any_successful` and `partition_outcomes` always drain.

use crate::outcome::{Failure, Outcome, Success};

/// Collects every success payload in order, or returns the first failure.
///
/// Elements after the first failure are never pulled from the iterator.
pub fn all_successful<A, B>(results: impl IntoIterator<Item = Outcome<A, B>>) -> Outcome<Vec<A>, B> {
    results.into_iter().collect()
}

/// Collects the success payloads in order, dropping every failure.
pub fn any_successful<A, B>(results: impl IntoIterator<Item = Outcome<A, B>>) -> Vec<A> {
    results
        .into_iter()
        .filter_map(Outcome::get_or_none)
        .collect()
}

/// Splits outcomes into success payloads and failure causes, each in order.
pub fn partition_outcomes<A, B>(results: impl IntoIterator<Item = Outcome<A, B>>) -> (Vec<A>, Vec<B>) {
    let mut successes = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Success(value) => successes.push(value),
            Failure(cause) => failures.push(cause),
        }
    }
    (successes, failures)
}

/// Method forms of the collection combinators.
pub trait OutcomeIteratorExt<A, B>: Iterator<Item = Outcome<A, B>> + Sized {
    /// See [`all_successful`].
    fn all_successful(self) -> Outcome<Vec<A>, B> {
        all_successful(self)
    }

    /// See [`any_successful`].
    fn any_successful(self) -> Vec<A> {
        any_successful(self)
    }

    /// See [`partition_outcomes`].
    fn partition_outcomes(self) -> (Vec<A>, Vec<B>) {
        partition_outcomes(self)
    }
}

impl<A, B, I> OutcomeIteratorExt<A, B> for I where I: Iterator<Item = Outcome<A, B>> {}

/// Short-circuiting collection: the first failure wins, otherwise every
/// payload is gathered into `C`.
impl<A, B, C> FromIterator<Outcome<A, B>> for Outcome<C, B>
where
    C: FromIterator<A>,
{
    fn from_iter<I: IntoIterator<Item = Outcome<A, B>>>(iter: I) -> Self {
        let mut first_failure = None;
        let collected = iter
            .into_iter()
            .map_while(|result| match result {
                Success(value) => Some(value),
                Failure(cause) => {
                    first_failure = Some(cause);
                    None
                }
            })
            .collect();
        match first_failure {
            Some(cause) => Failure(cause),
            None => Success(collected),
        }
    }
}
