//! Failure causes that record their upstream provenance.
//!
//! A [`ChainedError`] owns at most one upstream cause through its
//! [`CauseSlot`]. Because each node owns its upstream node, a chain is a
//! plain owned list: it always terminates and cannot contain a cycle.
//!
//! Domain error types usually derive the trait:
//!
//! ```
//! use straightline::{CauseSlot, ChainedError, ChainedErrorExt};
//!
//! #[derive(Debug, thiserror::Error, straightline::ChainedError)]
//! #[error("{message}")]
//! struct ParseError {
//!     message: String,
//!     cause: CauseSlot,
//! }
//!
//! #[derive(Debug, thiserror::Error, straightline::ChainedError)]
//! #[error("{message}")]
//! struct RequestError {
//!     message: String,
//!     cause: CauseSlot,
//! }
//!
//! let inner = ParseError { message: "bad input".into(), cause: CauseSlot::empty() };
//! let outer = RequestError { message: "request failed".into(), cause: CauseSlot::empty() }
//!     .caused_by(inner);
//!
//! assert_eq!(
//!     outer.render_chain(),
//!     "Error: request failed\n\nCaused by: ParseError\n\tbad input"
//! );
//! ```

use std::error::Error;
use std::fmt;

use tracing::trace;

/// Holds the optional upstream cause of a [`ChainedError`].
#[derive(Default)]
pub struct CauseSlot(Option<Box<dyn ChainedError>>);

impl CauseSlot {
    /// A slot with no upstream cause.
    pub fn empty() -> Self {
        Self(None)
    }

    /// A slot already holding `upstream`.
    pub fn with(upstream: impl ChainedError) -> Self {
        Self(Some(Box::new(upstream)))
    }

    /// The attached upstream cause, if any.
    pub fn get(&self) -> Option<&dyn ChainedError> {
        self.0.as_deref()
    }

    /// Stores `upstream`, returning whatever was attached before.
    pub fn replace(&mut self, upstream: Box<dyn ChainedError>) -> Option<Box<dyn ChainedError>> {
        self.0.replace(upstream)
    }

    /// Detaches and returns the upstream cause.
    pub fn take(&mut self) -> Option<Box<dyn ChainedError>> {
        self.0.take()
    }

    /// Returns `true` when no cause is attached.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Debug for CauseSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(upstream) => f.debug_tuple("CauseSlot").field(upstream).finish(),
            None => f.write_str("CauseSlot(None)"),
        }
    }
}

/// A failure cause with a message and a single owned upstream cause.
///
/// Implementors only provide access to their [`CauseSlot`]; usually through
/// `#[derive(ChainedError)]`. The trait is object safe.
pub trait ChainedError: Error + Send + Sync + 'static {
    /// The slot holding the upstream cause.
    fn cause_slot(&self) -> &CauseSlot;

    /// Mutable access to the slot holding the upstream cause.
    fn cause_slot_mut(&mut self) -> &mut CauseSlot;

    /// Human-readable message for this node alone. Defaults to `Display`.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Concrete type name without module path or generic arguments.
    fn kind_name(&self) -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// The directly attached upstream cause.
    fn upstream(&self) -> Option<&dyn ChainedError> {
        self.cause_slot().get()
    }

    /// Attaches `upstream` as this node's cause, replacing any previous one.
    ///
    /// `upstream` is moved in, so it can never be an ancestor of `self`.
    fn attach_cause(&mut self, upstream: Box<dyn ChainedError>) {
        if let Some(previous) = self.cause_slot_mut().replace(upstream) {
            trace!(
                replaced = previous.kind_name(),
                "attach_cause: dropped previously attached cause"
            );
        }
    }

    /// Iterates over the upstream causes, nearest first.
    fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: self.upstream() }
    }

    /// Renders this node and every ancestor, outermost first.
    ///
    /// ```text
    /// Error: <message>
    ///
    /// Caused by: <KindName>
    ///     <message>
    /// ```
    fn render_chain(&self) -> String {
        let mut out = format!("Error: {}", self.message());
        let mut ancestors = self.ancestors().peekable();
        if ancestors.peek().is_some() {
            out.push('\n');
        }
        for ancestor in ancestors {
            out.push_str(&format!(
                "\nCaused by: {}\n\t{}",
                ancestor.kind_name(),
                ancestor.message()
            ));
        }
        out
    }
}

/// Builder-style helpers for sized [`ChainedError`] values.
pub trait ChainedErrorExt: ChainedError + Sized {
    /// Attaches `upstream` as the cause and returns `self`.
    fn caused_by(mut self, upstream: impl ChainedError) -> Self {
        self.attach_cause(Box::new(upstream));
        self
    }
}

impl<T: ChainedError> ChainedErrorExt for T {}

/// Iterator over the upstream causes of a [`ChainedError`].
pub struct Ancestors<'a> {
    next: Option<&'a dyn ChainedError>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a dyn ChainedError;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.upstream();
        Some(current)
    }
}

fn short_type_name(full: &'static str) -> &'static str {
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("{message}")]
    struct Leaf {
        message: String,
        cause: CauseSlot,
    }

    impl ChainedError for Leaf {
        fn cause_slot(&self) -> &CauseSlot {
            &self.cause
        }

        fn cause_slot_mut(&mut self) -> &mut CauseSlot {
            &mut self.cause
        }
    }

    #[derive(Debug, Error)]
    #[error("wrapped: {reason}")]
    struct Wrapper {
        reason: &'static str,
        upstream: CauseSlot,
    }

    impl ChainedError for Wrapper {
        fn cause_slot(&self) -> &CauseSlot {
            &self.upstream
        }

        fn cause_slot_mut(&mut self) -> &mut CauseSlot {
            &mut self.upstream
        }
    }

    fn leaf(message: &str) -> Leaf {
        Leaf {
            message: message.to_string(),
            cause: CauseSlot::empty(),
        }
    }

    #[test]
    fn test_render_without_cause() {
        assert_eq!(leaf("lonely").render_chain(), "Error: lonely");
    }

    #[test]
    fn test_render_orders_outermost_first() {
        let chain = Wrapper {
            reason: "outer",
            upstream: CauseSlot::empty(),
        }
        .caused_by(leaf("middle").caused_by(leaf("root")));

        assert_eq!(
            chain.render_chain(),
            "Error: wrapped: outer\n\nCaused by: Leaf\n\tmiddle\nCaused by: Leaf\n\troot"
        );
        let messages: Vec<_> = chain.ancestors().map(|a| a.message()).collect();
        assert_eq!(messages, ["middle", "root"]);
    }

    #[test]
    fn test_upstream_is_the_direct_cause() {
        let node = leaf("outer").caused_by(leaf("middle").caused_by(leaf("root")));
        let direct = node.upstream().map(|c| c.message());
        assert_eq!(direct, Some("middle".to_string()));
        assert!(leaf("alone").upstream().is_none());
    }

    #[test]
    fn test_attach_replaces_previous_cause() {
        let mut node = leaf("node").caused_by(leaf("first"));
        node.attach_cause(Box::new(leaf("second")));
        let messages: Vec<_> = node.ancestors().map(|a| a.message()).collect();
        assert_eq!(messages, ["second"]);
    }

    #[test]
    fn test_kind_name_is_short() {
        assert_eq!(leaf("x").kind_name(), "Leaf");
        let wrapper = Wrapper {
            reason: "r",
            upstream: CauseSlot::with(leaf("x")),
        };
        assert_eq!(wrapper.kind_name(), "Wrapper");
        assert_eq!(short_type_name("a::b::Gen<c::D>"), "Gen");
    }

    #[test]
    fn test_debug_includes_nested_cause() {
        let node = leaf("outer").caused_by(leaf("inner"));
        let debug = format!("{node:?}");
        assert!(debug.contains("outer"));
        assert!(debug.contains("inner"));
    }
}
