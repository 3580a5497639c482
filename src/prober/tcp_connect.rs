use std::future::Future;
use std::io::ErrorKind;

use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::debug;

use super::ProbeOutcome;
use crate::config::Target;
use crate::util::resolve_host;

/// Attempts one TCP connection to the target; resolution and connect share
/// the target's timeout. The stream is dropped as soon as it is established.
pub async fn probe_tcp(target: &Target) -> ProbeOutcome {
    within_timeout(target, connect(target)).await
}

/// Bounds `attempt` by the target timeout. Dropping the attempt on expiry
/// closes any half-open socket.
async fn within_timeout<F>(target: &Target, attempt: F) -> ProbeOutcome
where
    F: Future<Output = ProbeOutcome>,
{
    match timeout(target.timeout, attempt).await {
        Ok(outcome) => outcome,
        Err(_) => {
            debug!("tcp connect {}:{} timed out", target.host, target.port);
            ProbeOutcome::TimedOut(target.timeout)
        }
    }
}

async fn connect(target: &Target) -> ProbeOutcome {
    let addrs = match resolve_host(&target.host, target.port).await {
        Ok(addrs) => addrs,
        Err(e) => return ProbeOutcome::ResolutionFailed(format!("{:#}", e)),
    };

    let mut last_err = None;
    for addr in addrs {
        debug!("tcp connect attempt to {}", addr);
        match TcpStream::connect(addr).await {
            Ok(conn) => {
                drop(conn);
                return ProbeOutcome::Open;
            }
            Err(e) => {
                debug!("tcp connect to {} failed: {}", addr, e);
                last_err = Some(e);
            }
        }
    }

    match last_err {
        Some(e) if e.kind() == ErrorKind::ConnectionRefused => ProbeOutcome::Refused,
        Some(e) => ProbeOutcome::Unreachable(e.to_string()),
        None => ProbeOutcome::ResolutionFailed(format!("no addresses for {}", target.host)),
    }
}
