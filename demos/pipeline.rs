// Demonstration of binding blocks over a small order pipeline.
// Field parsing failures are recontextualized into line-level and then
// order-level errors; the program boundary folds the outcome into an
// `anyhow` report with the full cause chain.

use straightline::{binding, failure, success, CauseSlot, ChainedError, Outcome};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error, straightline::ChainedError)]
#[error("field `{field}`: {reason}")]
struct FieldError {
    field: &'static str,
    reason: String,
    cause: CauseSlot,
}

#[derive(Debug, Error, straightline::ChainedError)]
#[error("line {line}: malformed order line")]
struct LineError {
    line: usize,
    cause: CauseSlot,
}

#[derive(Debug, Error, straightline::ChainedError)]
#[error("order rejected")]
struct OrderError {
    cause: CauseSlot,
}

#[derive(Debug)]
struct Item {
    sku: String,
    quantity: u32,
    unit_cents: u64,
}

fn field<'a>(line: &'a str, name: &'static str) -> Outcome<&'a str, FieldError> {
    let found = line
        .split(';')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| value.trim());
    Outcome::from_option(found, || FieldError {
        field: name,
        reason: "missing".into(),
        cause: CauseSlot::empty(),
    })
}

fn number<T: std::str::FromStr>(raw: &str, name: &'static str) -> Outcome<T, FieldError>
where
    T::Err: std::fmt::Display,
{
    Outcome::from(raw.parse::<T>()).map_failure(|e| FieldError {
        field: name,
        reason: e.to_string(),
        cause: CauseSlot::empty(),
    })
}

fn parse_item(index: usize, line: &str) -> Outcome<Item, LineError> {
    let context = |_: &FieldError| LineError {
        line: index + 1,
        cause: CauseSlot::empty(),
    };
    binding(|mut scope| {
        let sku = scope.bind_caused(field(line, "sku"), context)?;
        let quantity = scope.bind_caused(field(line, "qty").and_then(|q| number(q, "qty")), context)?;
        let unit_cents = scope.bind_caused(field(line, "cents").and_then(|c| number(c, "cents")), context)?;
        Ok(Item {
            sku: sku.to_string(),
            quantity,
            unit_cents,
        })
    })
}

fn order_total(input: &str) -> Outcome<u64, OrderError> {
    binding(|mut scope| {
        let mut total = 0;
        for (index, line) in input.lines().enumerate().filter(|(_, l)| !l.trim().is_empty()) {
            let item = scope.bind_caused(parse_item(index, line), |_| OrderError {
                cause: CauseSlot::empty(),
            })?;
            info!(sku = %item.sku, quantity = item.quantity, "accepted item");
            total += u64::from(item.quantity) * item.unit_cents;
        }
        if total == 0 {
            return scope.fail(OrderError {
                cause: CauseSlot::empty(),
            });
        }
        Ok(total)
    })
}

fn report(outcome: Outcome<u64, OrderError>) -> anyhow::Result<u64> {
    outcome.fold(Ok, |error| Err(anyhow::anyhow!(error.render_chain())))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let good = "sku=A-1; qty=2; cents=1250\nsku=B-7; qty=1; cents=399\n";
    let total = report(order_total(good))?;
    println!("order total: {}.{:02}", total / 100, total % 100);

    let bad = "sku=A-1; qty=2; cents=1250\nsku=B-7; qty=lots; cents=399\n";
    match report(order_total(bad)) {
        Ok(total) => println!("unexpected total {total}"),
        Err(error) => println!("{error}"),
    }

    let summary = [success(1), failure("skipped"), success(2)]
        .into_iter()
        .collect::<Vec<Outcome<i32, &str>>>();
    println!("any successful: {:?}", straightline::any_successful(summary));
    Ok(())
}
