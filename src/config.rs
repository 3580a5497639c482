use std::time::Duration;

use anyhow::{Result, anyhow};
use clap::{ArgAction, CommandFactory, Parser};

pub const DEFAULT_TIMEOUT: &str = "5";

#[derive(Debug, Parser)]
#[command(name = "port-checker", version, about = "Port Checker Tool")]
pub struct Cli {
    /// IP address or hostname
    pub host: Option<String>,
    /// Port number to check
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,
    /// Timeout in seconds
    #[arg(long, value_name = "seconds", default_value = DEFAULT_TIMEOUT, value_parser = parse_timeout)]
    pub timeout: Duration,
    /// Exit with a non-zero code when the port is closed or unreachable
    #[arg(long, default_value_t = false)]
    pub strict: bool,
    /// Increase logging verbosity
    #[arg(short('v'), long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Builds the probe target, or `None` when host or port was not given.
    pub fn target(&self) -> Result<Option<Target>> {
        let host = self.host.as_deref().map(str::trim).filter(|h| !h.is_empty());
        match (host, self.port) {
            (Some(host), Some(port)) => Target::new(host, port, self.timeout).map(Some),
            _ => Ok(None),
        }
    }

    pub fn print_usage() -> std::io::Result<()> {
        Self::command().print_help()
    }

    pub fn tracing_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

/// A single host:port to probe, checked once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub host: String,
    pub port: u16,
    pub timeout: Duration,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16, timeout: Duration) -> Result<Self> {
        let host = host.into();
        if host.trim().is_empty() {
            return Err(anyhow!("host must not be empty"));
        }
        if port == 0 {
            return Err(anyhow!("port must be between 1 and 65535"));
        }
        if timeout.is_zero() {
            return Err(anyhow!("timeout must be positive"));
        }
        Ok(Self { host, port, timeout })
    }
}

pub fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number of seconds", s))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("timeout must be a positive number of seconds, got `{}`", s));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout `{}`: {}", s, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("port-checker").chain(args.iter().copied()))
    }

    #[test]
    fn host_and_port_build_a_target_with_default_timeout() {
        let cli = parse(&["127.0.0.1", "8080"]).unwrap();
        let target = cli.target().unwrap().unwrap();
        assert_eq!(target.host, "127.0.0.1");
        assert_eq!(target.port, 8080);
        assert_eq!(target.timeout, Duration::from_secs(5));
        assert!(!cli.strict);
    }

    #[test]
    fn fractional_timeout_is_accepted() {
        let cli = parse(&["example.com", "443", "--timeout", "1.5"]).unwrap();
        assert_eq!(cli.target().unwrap().unwrap().timeout, Duration::from_millis(1500));
    }

    #[test]
    fn missing_arguments_yield_no_target() {
        assert!(parse(&[]).unwrap().target().unwrap().is_none());
        assert!(parse(&["localhost"]).unwrap().target().unwrap().is_none());
        assert!(parse(&["", "80"]).unwrap().target().unwrap().is_none());
    }

    #[test]
    fn malformed_port_is_a_usage_error() {
        let err = parse(&["localhost", "http"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(parse(&["localhost", "0"]).is_err());
        assert!(parse(&["localhost", "65536"]).is_err());
        assert!(parse(&["localhost", "-1"]).is_err());
    }

    #[test]
    fn timeout_must_be_positive_and_finite() {
        for bad in ["0", "-2", "abc", "NaN", "inf"] {
            assert!(parse_timeout(bad).is_err(), "{} should be rejected", bad);
        }
        assert!(parse(&["localhost", "80", "--timeout", "0"]).is_err());
        assert_eq!(parse_timeout("0.25").unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(parse(&[]).unwrap().tracing_level(), tracing::Level::INFO);
        assert_eq!(parse(&["-v"]).unwrap().tracing_level(), tracing::Level::DEBUG);
        assert_eq!(parse(&["-vvv"]).unwrap().tracing_level(), tracing::Level::TRACE);
    }

    #[test]
    fn target_rejects_invalid_values() {
        assert!(Target::new(" ", 80, Duration::from_secs(1)).is_err());
        assert!(Target::new("localhost", 0, Duration::from_secs(1)).is_err());
        assert!(Target::new("localhost", 80, Duration::ZERO).is_err());
    }
}
