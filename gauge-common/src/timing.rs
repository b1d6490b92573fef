//! Measure the wall-clock duration of an async operation.
//!
//! Extractors run under [`timed`] so the elapsed seconds can be attached to
//! the resulting record afterwards; the operation itself stays oblivious to
//! being measured.

use std::future::Future;
use std::time::Instant;

/// Await `op` and return its output together with the elapsed seconds.
///
/// ```
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (value, elapsed) = gauge_common::timing::timed(async { 2 + 2 }).await;
/// assert_eq!(value, 4);
/// assert!(elapsed >= 0.0);
/// # }
/// ```
pub async fn timed<T, F>(op: F) -> (T, f64)
where
    F: Future<Output = T>,
{
    let started = Instant::now();
    let value = op.await;
    (value, started.elapsed().as_secs_f64())
}
