//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::error::ScanResult;
use crate::types::{Port, PortRange, PortSpec};
use clap::{Parser, ValueEnum};
use std::net::IpAddr;

/// A concurrent TCP port reachability scanner.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A concurrent TCP port reachability scanner", long_about = None)]
pub struct Args {
    /// Target IP address or hostname to scan
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Ports to scan (e.g., "80", "80,443", "22,80,443,8000-8100");
    /// overrides --start/--end
    #[arg(short, long)]
    pub ports: Option<String>,

    /// First port of the default scan range
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u16).range(1..))]
    pub start: u16,

    /// Last port of the default scan range
    #[arg(long, default_value = "1024", value_parser = clap::value_parser!(u16).range(1..))]
    pub end: u16,

    /// Connection timeout in milliseconds
    #[arg(short = 't', long, default_value = "500")]
    pub timeout: u64,

    /// Number of concurrent scanning workers
    #[arg(short = 'w', long, default_value = "100")]
    pub workers: usize,

    /// Results channel buffer size
    #[arg(long = "result-buffer", default_value = "1024")]
    pub result_buffer: usize,

    /// Output format for results
    #[arg(short, long, value_enum, default_value = "plain")]
    pub output: OutputFormat,

    /// Suppress the configuration header; print only the summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (show scanning progress)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Build the list of ports to probe from the parsed arguments.
///
/// An explicit --ports spec wins; otherwise the literal inclusive
/// --start/--end range is used (already contiguous, nothing to dedup).
pub fn port_plan(args: &Args) -> ScanResult<Vec<Port>> {
    match args.ports.as_deref() {
        Some(spec) => Ok(spec.parse::<PortSpec>()?.to_ports()),
        None => {
            let start = Port::try_from(args.start)?;
            let end = Port::try_from(args.end)?;
            Ok(PortRange::new(start, end)?.iter().collect())
        }
    }
}

/// Resolve a hostname or IP address string to an IpAddr.
pub async fn resolve_target(target: &str) -> Result<IpAddr, String> {
    // First, try parsing as IP address
    if let Ok(ip) = target.parse::<IpAddr>() {
        return Ok(ip);
    }

    // Otherwise, perform DNS resolution
    use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
    use trust_dns_resolver::TokioAsyncResolver;

    let resolver = TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default());

    let response = resolver
        .lookup_ip(target)
        .await
        .map_err(|e| format!("Failed to resolve hostname '{}': {}", target, e))?;

    response
        .iter()
        .next()
        .ok_or_else(|| format!("No IP addresses found for hostname '{}'", target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PortError;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_port_plan_spec_overrides_range() {
        let args = args(&[
            "portsweep",
            "127.0.0.1",
            "--ports",
            "80,443",
            "--start",
            "1",
            "--end",
            "10",
        ]);
        let plan: Vec<u16> = port_plan(&args).unwrap().iter().map(|p| p.as_u16()).collect();
        assert_eq!(plan, vec![80, 443]);
    }

    #[test]
    fn test_port_plan_default_range() {
        let args = args(&["portsweep", "127.0.0.1"]);
        let plan = port_plan(&args).unwrap();
        assert_eq!(plan.len(), 1024);
        assert_eq!(plan[0].as_u16(), 1);
        assert_eq!(plan[1023].as_u16(), 1024);
    }

    #[test]
    fn test_port_plan_inverted_range_rejected() {
        let args = args(&["portsweep", "127.0.0.1", "--start", "10", "--end", "5"]);
        assert!(matches!(
            port_plan(&args).unwrap_err(),
            crate::error::ScanError::PortSpec(PortError::InvalidRange(10, 5))
        ));
    }

    #[test]
    fn test_port_plan_bad_spec_rejected() {
        let args = args(&["portsweep", "127.0.0.1", "--ports", "1,,2"]);
        assert!(port_plan(&args).is_err());
    }

    #[test]
    fn test_zero_start_port_rejected_by_clap() {
        assert!(Args::try_parse_from(["portsweep", "127.0.0.1", "--start", "0"]).is_err());
    }

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let ip = resolve_target("127.0.0.1").await.unwrap();
        assert_eq!(ip.to_string(), "127.0.0.1");

        let ip = resolve_target("::1").await.unwrap();
        assert!(ip.is_ipv6());
    }
}
