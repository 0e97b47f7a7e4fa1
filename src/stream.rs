//! Collection combinators over asynchronous streams of outcomes.
//!
//! These mirror [`crate::all_successful`] and [`crate::any_successful`] for
//! `futures::Stream`s.

use futures::stream::{Stream, StreamExt};

use crate::outcome::{Failure, Outcome, Success};

/// Collects every success payload in arrival order, or returns the first
/// failure. The stream is not polled again after a failure arrives.
///
/// ```
/// use futures::stream;
/// use straightline::{failure, success, Outcome};
///
/// let items: Vec<Outcome<i32, &str>> = vec![success(1), failure("e"), success(3)];
/// let all = futures::executor::block_on(straightline::stream::all_successful(stream::iter(items)));
/// assert_eq!(all, failure("e"));
/// ```
pub async fn all_successful<A, B, S>(stream: S) -> Outcome<Vec<A>, B>
where
    S: Stream<Item = Outcome<A, B>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut values = Vec::new();
    while let Some(item) = stream.next().await {
        match item {
            Success(value) => values.push(value),
            Failure(cause) => return Failure(cause),
        }
    }
    Success(values)
}

/// Collects the success payloads in arrival order, dropping every failure.
pub async fn any_successful<A, B, S>(stream: S) -> Vec<A>
where
    S: Stream<Item = Outcome<A, B>>,
{
    stream
        .filter_map(|item| async move { item.get_or_none() })
        .collect()
        .await
}
