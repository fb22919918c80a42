//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::output::Report;
use crate::scanner::ScanJob;
use console::style;
use std::io::{self, Write};

/// Print the pre-scan configuration header.
pub fn print_config_header(
    job: &ScanJob,
    ports_spec: Option<&str>,
    range: Option<(u16, u16)>,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}", style("Portsweep configuration:").cyan().bold())?;
    writeln!(out, "  {} {}", style("host:").bold(), job.host)?;
    if let Some(spec) = ports_spec {
        writeln!(out, "  {} {}", style("ports:").bold(), spec)?;
    } else if let Some((start, end)) = range {
        writeln!(out, "  {} {}", style("start:").bold(), start)?;
        writeln!(out, "  {} {}", style("end:").bold(), end)?;
    }
    writeln!(
        out,
        "  {} {}ms",
        style("timeout:").bold(),
        job.timeout.as_millis()
    )?;
    writeln!(out, "  {} {}", style("workers:").bold(), job.workers)?;
    writeln!(
        out,
        "  {} {}",
        style("result buffer:").bold(),
        job.result_buffer
    )?;
    writeln!(
        out,
        "  {} {} ports",
        style("targets:").bold(),
        job.ports.len()
    )?;
    writeln!(out)?;
    Ok(())
}

/// Print the scan summary in human-readable plain text format.
pub fn print_plain(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "{} {}",
        style("open ports:").bold(),
        style(report.count).green().bold()
    )?;
    if !report.open_ports.is_empty() {
        let list: Vec<String> = report.open_ports.iter().map(|p| p.to_string()).collect();
        writeln!(out, "{} {}", style("list:").bold(), list.join(", "))?;
    }
    writeln!(
        out,
        "{} {:.2}s",
        style("scan duration:").bold(),
        report.duration_ms as f64 / 1000.0
    )?;
    Ok(())
}
