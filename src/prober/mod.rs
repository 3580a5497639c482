use std::fmt;

use tokio::time::Duration;

use crate::config::Target;
use crate::timestamp::measure;

pub mod tcp_connect;

/// How a single connection attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Open,
    Refused,
    TimedOut(Duration),
    ResolutionFailed(String),
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn is_open(&self) -> bool {
        matches!(self, ProbeOutcome::Open)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Open => write!(f, "connected"),
            ProbeOutcome::Refused => write!(f, "connection refused"),
            ProbeOutcome::TimedOut(after) => write!(f, "timed out after {:?}", after),
            ProbeOutcome::ResolutionFailed(reason) => write!(f, "resolution failed: {}", reason),
            ProbeOutcome::Unreachable(reason) => write!(f, "{}", reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub outcome: ProbeOutcome,
    pub elapsed: Duration,
}

/// Runs one TCP connect probe against `target` and times it.
pub async fn run(target: &Target) -> ProbeResult {
    let (outcome, elapsed) = measure(tcp_connect::probe_tcp(target)).await;
    ProbeResult { outcome, elapsed }
}
