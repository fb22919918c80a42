//! CSV output formatting.

use crate::output::Report;
use std::io;

/// Print the report in CSV format, one row per open port.
pub fn print_csv(report: &Report) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["host", "port", "state"])?;
    for port in &report.open_ports {
        wtr.write_record([report.host.as_str(), &port.to_string(), "open"])?;
    }

    wtr.flush()?;
    Ok(())
}
