//! # Portsweep - A Concurrent TCP Port Reachability Scanner
//!
//! Portsweep determines which TCP ports on a host are reachable by
//! attempting a bounded-timeout connection to each and reporting which
//! attempts succeed. Probes run on a fixed-size worker pool pulling from a
//! shared queue; results are aggregated deterministically regardless of
//! discovery order.
//!
//! ## Features
//!
//! - **Flexible port selection**: single ports, comma lists, and ranges
//!   ("22,80,443,8000-8100"), or a plain start/end range
//! - **Bounded concurrency**: fixed worker pool, configurable size
//! - **Deterministic results**: open ports always ascending and
//!   duplicate-free, whatever order the workers find them in
//! - **Binary reachability**: a port is open or it is not; failure causes
//!   are deliberately not distinguished
//! - **Multiple output formats**: plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::scanner::{run_scan, ScanJob, TcpProbe};
//! use portsweep::types::PortSpec;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let ports = "22,80,443".parse::<PortSpec>().unwrap().to_ports();
//!     let job = ScanJob::new("192.168.1.1", ports)
//!         .with_timeout(Duration::from_millis(500))
//!         .with_workers(100);
//!
//!     let summary = run_scan(Arc::new(TcpProbe), job).await.unwrap();
//!     println!("open: {:?} in {:?}", summary.open_ports, summary.elapsed);
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`types`] - Port types and the port-spec expander
//! - [`scanner`] - The probe and the worker-pool scan engine
//! - [`cli`] - Argument definitions and target resolution
//! - [`output`] - Output formatting utilities
//! - [`error`] - Error types

pub mod cli;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{ScanError, ScanResult};
pub use scanner::{run_scan, Probe, ScanJob, ScanSummary, TcpProbe};
pub use types::{Port, PortError, PortRange, PortSpec};
