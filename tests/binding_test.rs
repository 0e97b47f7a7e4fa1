// Binding blocks end-to-end: short-circuiting, recontextualization and
// interaction with `catching`.

mod support;

use std::cell::Cell;

use straightline::{
    binding, catching, failure, success, ChainedError, Outcome, OutcomeIteratorExt,
};
use support::{save_divide, unsafe_divide, InnerError, OuterError};

#[test]
fn test_chain_complex_computations() {
    support::init_tracing();
    let r: Outcome<i32, String> = binding(|mut scope| {
        let r1 = scope.bind(save_divide(12, 2))?;
        let r2 = scope.bind(save_divide(r1, 2))?;
        Ok(r1 + r2)
    });

    assert_eq!(r.get_or_panic(), 9);
}

#[test]
fn test_failed_computation_aborts_block() {
    let side_effects = Cell::new(0);
    let r: Outcome<i32, String> = binding(|mut scope| {
        let r1 = scope.bind(save_divide(8, 2))?;
        let r2 = scope.bind(save_divide(r1, 0))?;
        side_effects.set(side_effects.get() + 1);
        Ok(r2)
    });

    assert!(r.is_failure());
    assert_eq!(side_effects.get(), 0);
}

#[test]
fn test_discarded_abort_still_fails_block() {
    let side_effects = Cell::new(0);
    let r: Outcome<i32, String> = binding(|mut scope| {
        let v = scope.bind(save_divide(1, 0)).unwrap_or(0);
        side_effects.set(side_effects.get() + 1);
        Ok(v + 5)
    });

    assert_eq!(r, failure("Error".to_string()));
    assert_eq!(side_effects.get(), 1);
}

#[test]
fn test_first_failure_wins_even_if_later_abort_returned() {
    let r: Outcome<(), &str> = binding(|mut scope| {
        let _first = scope.bind(failure::<(), _>("first"));
        scope.bind(failure::<(), _>("second"))?;
        Ok(())
    });
    assert_eq!(r, failure("first"));

    let r: Outcome<(), &str> = binding(|mut scope| {
        let _first = scope.fail::<()>("first");
        scope.fail("second")
    });
    assert_eq!(r, failure("first"));
}

#[test]
fn test_outer_failure_stays_with_outer_block() {
    let r: Outcome<i32, String> = binding(|mut outer| {
        let inner: Outcome<i32, String> = binding(|_inner| {
            let _ = outer.bind(save_divide(3, 0));
            Ok(1)
        });
        assert_eq!(inner, success(1));
        Ok(inner.get_or(0))
    });
    assert_eq!(r, failure("Error".to_string()));
}

#[test]
fn test_recontextualized_failure_keeps_provenance() {
    let r: Outcome<i32, OuterError> = binding(|mut scope| {
        let value = scope.bind_caused(failure::<i32, _>(InnerError::new("bad input")), |_| {
            OuterError::new("request failed")
        })?;
        Ok(value)
    });

    let cause = r.get_failure_or_panic();
    let rendered = cause.render_chain();
    let outer_at = rendered.find("request failed");
    let inner_at = rendered.find("bad input");
    assert!(outer_at.is_some() && inner_at.is_some());
    assert!(outer_at < inner_at);
    assert_eq!(cause.upstream().map(|c| c.kind_name()), Some("InnerError"));
}

#[test]
fn test_recontextualization_across_two_blocks() {
    fn parse(input: &str) -> Outcome<i32, InnerError> {
        binding(|mut scope| {
            let n = scope.bind_with(
                Outcome::from(input.parse::<i32>()),
                |e| InnerError::new(&e.to_string()),
            )?;
            Ok(n)
        })
    }

    let r: Outcome<i32, OuterError> = binding(|mut scope| {
        let a = scope.bind_caused(parse("40"), |_| OuterError::new("first operand"))?;
        let b = scope.bind_caused(parse("two"), |_| OuterError::new("second operand"))?;
        Ok(a + b)
    });

    let rendered = r.get_failure_or_panic().render_chain();
    assert!(rendered.starts_with("Error: second operand\n\nCaused by: InnerError\n\t"));
    assert!(rendered.contains("invalid digit"));
}

#[test]
fn test_plain_recontextualization_does_not_chain() {
    let r: Outcome<(), OuterError> = binding(|mut scope| {
        scope.bind_with(failure::<(), _>(InnerError::new("inner")), |inner| {
            OuterError::new(&format!("outer ({})", inner.message))
        })
    });
    let cause = r.get_failure_or_panic();
    assert!(cause.upstream().is_none());
    assert_eq!(cause.render_chain(), "Error: outer (inner)");
}

#[test]
fn test_catching_inside_block_does_not_swallow_abort() {
    let after = Cell::new(false);
    let r: Outcome<i32, String> = binding(|mut scope| {
        let caught = catching(|| scope.bind(save_divide(1, 0)));
        let value = match caught.get_or_none() {
            Some(inner) => inner?,
            None => return scope.fail("panicked".to_string()),
        };
        after.set(true);
        Ok(value)
    });

    assert_eq!(r, failure("Error".to_string()));
    assert!(!after.get());
}

#[test]
fn test_catching_inside_block_reports_panics() {
    let r: Outcome<i32, String> = binding(|mut scope| {
        let quotient = scope.bind_with(catching(|| unsafe_divide(1, 0)), |p| p.message().to_string())?;
        Ok(quotient)
    });

    assert!(r.get_failure_or_panic().contains("divide by zero"));
}

#[test]
#[should_panic(expected = "boom")]
fn test_panics_escape_the_block() {
    let _: Outcome<(), String> = binding(|_scope| panic!("boom"));
}

#[test]
fn test_block_over_collections() {
    let r: Outcome<i32, String> = binding(|mut scope| {
        let quotients = scope.bind(
            [(12, 2), (9, 3), (8, 4)]
                .into_iter()
                .map(|(a, b)| save_divide(a, b))
                .all_successful(),
        )?;
        Ok(quotients.iter().sum())
    });
    assert_eq!(r, success(11));

    let partial = [(12, 2), (1, 0), (8, 4)]
        .into_iter()
        .map(|(a, b)| save_divide(a, b))
        .any_successful();
    assert_eq!(partial, vec![6, 2]);
}

#[test]
fn test_get_or_report_passes_successes_through() {
    let r: Outcome<i32, OuterError> = success(5);
    assert_eq!(r.get_or_report(), 5);
}

#[test]
#[should_panic(expected = "Caused by: InnerError")]
fn test_get_or_report_renders_chain() {
    let r: Outcome<i32, OuterError> = binding(|mut scope| {
        scope.bind_caused(failure(InnerError::new("bad input")), |_| {
            OuterError::new("request failed")
        })
    });
    let _ = r.get_or_report();
}

#[test]
#[should_panic(expected = "bad input")]
fn test_get_or_panic_debug_includes_upstream() {
    let r: Outcome<i32, OuterError> = binding(|mut scope| {
        scope.bind_caused(failure(InnerError::new("bad input")), |_| {
            OuterError::new("request failed")
        })
    });
    let _ = r.get_or_panic();
}
