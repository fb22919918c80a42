//! Portsweep binary entry point.
//!
//! Configuration problems abort here, before any probe is dispatched; an
//! unreachable port is never an error.

use anyhow::{bail, Context, Result};
use clap::Parser;
use portsweep::cli::{self, Args, OutputFormat};
use portsweep::output::{self, Report};
use portsweep::scanner::{run_scan, ScanJob, TcpProbe};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.workers == 0 {
        bail!("workers must be greater than 0");
    }
    if args.result_buffer == 0 {
        bail!("result buffer must be at least 1");
    }

    let ports = cli::port_plan(&args).context("invalid port selection")?;

    let host = cli::resolve_target(&args.target)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    info!(host = %args.target, resolved = %host, targets = ports.len(), "starting scan");

    let range = args.ports.is_none().then_some((args.start, args.end));

    let job = ScanJob::new(host.to_string(), ports)
        .with_timeout(Duration::from_millis(args.timeout))
        .with_workers(args.workers)
        .with_result_buffer(args.result_buffer);
    let job = if args.verbose { job.with_verbose() } else { job };

    if !args.quiet && args.output == OutputFormat::Plain {
        output::print_config_header(&job, args.ports.as_deref(), range)?;
    }

    let summary = run_scan(Arc::new(TcpProbe), job.clone())
        .await
        .context("scan failed")?;
    info!(
        open = summary.open_ports.len(),
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "scan finished"
    );

    let report = Report::new(&job, &summary, args.ports.clone(), range);
    output::print_results(&report, args.output)?;

    Ok(())
}
