//! JSON output formatting.

use crate::output::Report;
use std::io;

/// Print the report in JSON format.
pub fn print_json(report: &Report) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    println!("{}", json);
    Ok(())
}
