// Helpers for host resolution and elapsed-time formatting.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};

/// Resolves `host` to the socket addresses to try, in resolver order.
pub async fn resolve_host(host: &str, port: u16) -> Result<Vec<SocketAddr>> {
    // First try to parse as IP address
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("could not resolve hostname: {}", host))?
        .collect();
    if addrs.is_empty() {
        return Err(anyhow::anyhow!("no addresses found for hostname: {}", host));
    }
    Ok(addrs)
}

/// Seconds with two decimals, e.g. `0.03`.
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}", elapsed.as_secs_f64())
}
