use std::future::Future;

use tokio::time::{Duration, Instant};

/// Awaits `fut` and returns its output with the wall time it took.
///
/// Uses the monotonic clock, so the elapsed time never goes negative even if
/// the system clock is adjusted mid-probe.
pub async fn measure<F: Future>(fut: F) -> (F::Output, Duration) {
    let start = Instant::now();
    let output = fut.await;
    (output, Instant::now().saturating_duration_since(start))
}
