//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan results.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::print_csv;
pub use json_format::print_json;
pub use plain::{print_config_header, print_plain};

use crate::cli::OutputFormat;
use crate::scanner::{ScanJob, ScanSummary};
use serde::Serialize;
use std::io;

/// Final scan report, shaped for rendering.
///
/// Exactly one of `ports_spec` or `start`/`end` is present, reflecting how
/// the port selection was supplied.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports_spec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u16>,
    pub targets: usize,
    pub timeout_ms: u64,
    pub workers: usize,
    #[serde(skip)]
    pub result_buffer: usize,
    pub open_ports: Vec<u16>,
    pub count: usize,
    pub duration_ms: u64,
}

impl Report {
    /// Assemble the report from the job configuration and the scan outcome.
    pub fn new(job: &ScanJob, summary: &ScanSummary, ports_spec: Option<String>, range: Option<(u16, u16)>) -> Self {
        let open_ports: Vec<u16> = summary.open_ports.iter().map(|p| p.as_u16()).collect();
        Self {
            host: job.host.clone(),
            ports_spec,
            start: range.map(|(s, _)| s),
            end: range.map(|(_, e)| e),
            targets: summary.targets,
            timeout_ms: job.timeout.as_millis() as u64,
            workers: job.workers,
            result_buffer: job.result_buffer,
            count: open_ports.len(),
            open_ports,
            duration_ms: summary.elapsed.as_millis() as u64,
        }
    }
}

/// Format and print the scan report according to the specified format.
pub fn print_results(report: &Report, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(report),
        OutputFormat::Json => json_format::print_json(report),
        OutputFormat::Csv => csv_format::print_csv(report),
    }
}
