//! Scan engine - fixed worker pool over a shared port queue.
//!
//! Every port in the job is pushed through a bounded queue consumed by
//! exactly `workers` concurrent tasks. Workers race freely over the queue,
//! so discovery order is nondeterministic; the engine sorts the collected
//! open ports before returning, and that final ordering is the only
//! ordering guarantee the scanner makes.

pub mod probe;

use crate::error::{ScanError, ScanResult};
use crate::types::Port;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

pub use probe::{Probe, TcpProbe};

/// Immutable configuration for one scan run.
///
/// Built once before any network activity and read-only thereafter.
#[derive(Debug, Clone)]
pub struct ScanJob {
    /// Resolved target host (IP literal or hostname).
    pub host: String,
    /// Ports to probe, ascending and duplicate-free.
    pub ports: Vec<Port>,
    /// Per-probe connection timeout.
    pub timeout: Duration,
    /// Number of concurrent worker tasks.
    pub workers: usize,
    /// Capacity of the results channel. A throughput knob only; results
    /// are correct for any capacity >= 1.
    pub result_buffer: usize,
    /// Show a progress bar while scanning.
    pub verbose: bool,
}

impl ScanJob {
    /// Create a job with default tuning (500ms timeout, 100 workers).
    pub fn new(host: impl Into<String>, ports: Vec<Port>) -> Self {
        Self {
            host: host.into(),
            ports,
            timeout: Duration::from_millis(500),
            workers: 100,
            result_buffer: 1024,
            verbose: false,
        }
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the worker count.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the results channel capacity.
    pub fn with_result_buffer(mut self, capacity: usize) -> Self {
        self.result_buffer = capacity;
        self
    }

    /// Enable the progress bar.
    pub fn with_verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Pre-flight validation, before anything touches the network.
    fn validate(&self) -> ScanResult<()> {
        if self.host.is_empty() {
            return Err(ScanError::InvalidConfig("host must not be empty".into()));
        }
        if self.workers == 0 {
            return Err(ScanError::InvalidConfig(
                "worker count must be greater than 0".into(),
            ));
        }
        if self.result_buffer == 0 {
            return Err(ScanError::InvalidConfig(
                "result buffer must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome of one scan run. Constructed once, never mutated.
#[derive(Debug, Clone)]
pub struct ScanSummary {
    /// Open ports, ascending and duplicate-free.
    pub open_ports: Vec<Port>,
    /// Number of ports probed.
    pub targets: usize,
    /// Wall clock from worker launch to full drain of the results stream.
    pub elapsed: Duration,
}

/// Execute a complete scan.
///
/// An unreachable port is not an error; after [`ScanJob`] validation this
/// function always runs the full port list to completion.
pub async fn run_scan<P: Probe>(probe: Arc<P>, job: ScanJob) -> ScanResult<ScanSummary> {
    job.validate()?;
    let targets = job.ports.len();

    let progress = if job.verbose {
        let pb = ProgressBar::new(targets as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .unwrap()
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let started = Instant::now();

    let (port_tx, port_rx) = mpsc::channel::<Port>(job.workers);
    let port_rx = Arc::new(Mutex::new(port_rx));
    let (open_tx, mut open_rx) = mpsc::channel::<Port>(job.result_buffer);

    let mut workers = Vec::with_capacity(job.workers);
    for _ in 0..job.workers {
        let queue = Arc::clone(&port_rx);
        let results = open_tx.clone();
        let probe = Arc::clone(&probe);
        let host = job.host.clone();
        let limit = job.timeout;
        let progress = progress.clone();

        workers.push(tokio::spawn(async move {
            loop {
                // Hold the queue lock only while waiting for the next port,
                // never across the probe itself.
                let port = { queue.lock().await.recv().await };
                let Some(port) = port else { break };

                let open = probe.probe(&host, port, limit).await;
                if let Some(pb) = &progress {
                    pb.inc(1);
                    if open {
                        pb.set_message(format!("found open port: {}", port));
                    }
                }
                if open && results.send(port).await.is_err() {
                    break;
                }
            }
        }));
    }
    // Workers hold the only remaining result senders; the channel closes
    // exactly when the last worker exits.
    drop(open_tx);

    let plan = job.ports.clone();
    let feeder = tokio::spawn(async move {
        for port in plan {
            if port_tx.send(port).await.is_err() {
                break;
            }
        }
    });

    let mut open_ports = Vec::new();
    while let Some(port) = open_rx.recv().await {
        debug!(port = port.as_u16(), "port open");
        open_ports.push(port);
    }

    // The drain only ends once every worker has exited, so these joins
    // return immediately; they exist to surface worker panics.
    for handle in join_all(workers).await {
        handle.expect("scan worker panicked");
    }
    feeder.await.expect("port feeder panicked");
    let elapsed = started.elapsed();

    // Arrival order from racing workers must not leak into the result.
    open_ports.sort_unstable();

    if let Some(pb) = progress {
        pb.finish_with_message("scan complete");
    }

    debug!(
        open = open_ports.len(),
        targets,
        elapsed_ms = elapsed.as_millis() as u64,
        "scan finished"
    );

    Ok(ScanSummary {
        open_ports,
        targets,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use tokio::net::TcpListener;

    fn port(n: u16) -> Port {
        Port::new(n).unwrap()
    }

    /// Deterministic probe: a fixed set of "open" ports, counting every
    /// invocation per port.
    struct FixedProbe {
        open: HashSet<u16>,
        calls: std::sync::Mutex<HashMap<u16, usize>>,
    }

    impl FixedProbe {
        fn new(open: impl IntoIterator<Item = u16>) -> Self {
            Self {
                open: open.into_iter().collect(),
                calls: std::sync::Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl Probe for FixedProbe {
        async fn probe(&self, _host: &str, port: Port, _timeout: Duration) -> bool {
            *self
                .calls
                .lock()
                .unwrap()
                .entry(port.as_u16())
                .or_insert(0) += 1;
            self.open.contains(&port.as_u16())
        }
    }

    #[tokio::test]
    async fn test_scan_finds_listeners_regardless_of_worker_count() {
        let a = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let b = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open_a = a.local_addr().unwrap().port();
        let open_b = b.local_addr().unwrap().port();

        // Bind-then-drop to find ports that are currently closed.
        let c = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let d = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let closed_c = c.local_addr().unwrap().port();
        let closed_d = d.local_addr().unwrap().port();
        drop(c);
        drop(d);

        let ports: Vec<Port> = {
            let mut p = vec![open_a, open_b, closed_c, closed_d];
            p.sort_unstable();
            p.into_iter().map(port).collect()
        };
        let mut expected = vec![open_a, open_b];
        expected.sort_unstable();

        for workers in [1, 5, 100] {
            let job = ScanJob::new("127.0.0.1", ports.clone())
                .with_timeout(Duration::from_secs(1))
                .with_workers(workers);
            let summary = run_scan(Arc::new(TcpProbe), job).await.unwrap();

            let found: Vec<u16> = summary.open_ports.iter().map(|p| p.as_u16()).collect();
            assert_eq!(found, expected, "workers={}", workers);
            assert_eq!(summary.targets, 4);
        }
    }

    #[tokio::test]
    async fn test_scan_empty_port_list() {
        let job = ScanJob::new("127.0.0.1", Vec::new());
        let summary = run_scan(Arc::new(TcpProbe), job).await.unwrap();

        assert!(summary.open_ports.is_empty());
        assert_eq!(summary.targets, 0);
        assert!(summary.elapsed < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_each_port_probed_exactly_once_with_excess_workers() {
        let probe = Arc::new(FixedProbe::new([2, 4]));
        let ports: Vec<Port> = (1..=6).map(port).collect();

        let job = ScanJob::new("test-host", ports).with_workers(50);
        let summary = run_scan(Arc::clone(&probe), job).await.unwrap();

        let found: Vec<u16> = summary.open_ports.iter().map(|p| p.as_u16()).collect();
        assert_eq!(found, vec![2, 4]);

        let calls = probe.calls.lock().unwrap();
        assert_eq!(calls.len(), 6);
        for (port, count) in calls.iter() {
            assert_eq!(*count, 1, "port {} probed {} times", port, count);
        }
    }

    #[tokio::test]
    async fn test_results_stay_within_requested_set() {
        // The probe would report 20 and 30 open, but they are not requested.
        let probe = Arc::new(FixedProbe::new([10, 20, 30]));
        let job = ScanJob::new("test-host", vec![port(10), port(15)]);
        let summary = run_scan(probe, job).await.unwrap();

        let found: Vec<u16> = summary.open_ports.iter().map(|p| p.as_u16()).collect();
        assert_eq!(found, vec![10]);
    }

    #[tokio::test]
    async fn test_minimal_result_buffer_is_correct() {
        let probe = Arc::new(FixedProbe::new(1..=50));
        let ports: Vec<Port> = (1..=50).map(port).collect();

        let job = ScanJob::new("test-host", ports)
            .with_workers(8)
            .with_result_buffer(1);
        let summary = run_scan(probe, job).await.unwrap();

        let found: Vec<u16> = summary.open_ports.iter().map(|p| p.as_u16()).collect();
        let expected: Vec<u16> = (1..=50).collect();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let job = ScanJob::new("127.0.0.1", vec![port(80)]).with_workers(0);
        assert!(matches!(
            run_scan(Arc::new(TcpProbe), job).await,
            Err(ScanError::InvalidConfig(_))
        ));

        let job = ScanJob::new("127.0.0.1", vec![port(80)]).with_result_buffer(0);
        assert!(matches!(
            run_scan(Arc::new(TcpProbe), job).await,
            Err(ScanError::InvalidConfig(_))
        ));

        let job = ScanJob::new("", vec![port(80)]);
        assert!(matches!(
            run_scan(Arc::new(TcpProbe), job).await,
            Err(ScanError::InvalidConfig(_))
        ));
    }
}
