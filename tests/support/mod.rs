// Toy arithmetic used to exercise the API.
#![allow(dead_code)]

use straightline::{failure, success, CauseSlot, Outcome};
use thiserror::Error;

pub fn save_divide(a: i32, b: i32) -> Outcome<i32, String> {
    if b != 0 {
        success(a / b)
    } else {
        failure("Error".to_string())
    }
}

pub async fn co_save_divide(a: i32, b: i32) -> Outcome<i32, String> {
    tokio::task::yield_now().await;
    save_divide(a, b)
}

pub fn unsafe_divide(a: i32, b: i32) -> i32 {
    a / b
}

pub async fn co_unsafe_divide(a: i32, b: i32) -> i32 {
    tokio::task::yield_now().await;
    unsafe_divide(a, b)
}

#[derive(Debug, Error, straightline::ChainedError)]
#[error("{message}")]
pub struct InnerError {
    pub message: String,
    pub cause: CauseSlot,
}

impl InnerError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            cause: CauseSlot::empty(),
        }
    }
}

#[derive(Debug, Error, straightline::ChainedError)]
#[error("{message}")]
pub struct OuterError {
    pub message: String,
    #[cause]
    pub upstream: CauseSlot,
}

impl OuterError {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            upstream: CauseSlot::empty(),
        }
    }
}

/// Installs a test-friendly subscriber; honors `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
