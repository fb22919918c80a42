//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions.
//!
//! An unreachable port is not an error anywhere in this crate: a failed
//! probe is the normal "not open" outcome. Scans only fail through
//! configuration problems caught before any network activity.

use thiserror::Error;

/// Configuration errors that abort a scan before it launches.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid port selection: {0}")]
    PortSpec(#[from] crate::types::PortError),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;
