use tracing::{error, info};

use crate::config::Target;
use crate::prober::{ProbeOutcome, ProbeResult};
use crate::util::format_elapsed;

/// Logs the outcome of a probe. A refused connection is an ordinary closed
/// port; any other failure reason is logged before the FAILURE line.
pub fn report(target: &Target, result: &ProbeResult) {
    let elapsed = format_elapsed(result.elapsed);
    if result.outcome.is_open() {
        info!(
            "[SUCCESS] Port {} OPEN on {} (time: {}s)",
            target.port, target.host, elapsed
        );
    } else {
        if result.outcome != ProbeOutcome::Refused {
            error!("Connection error: {}", result.outcome);
        }
        error!(
            "[FAILURE] Port {} CLOSED/UNREACHABLE on {} (time: {}s)",
            target.port, target.host, elapsed
        );
    }
}
