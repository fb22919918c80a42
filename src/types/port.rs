//! Port types with validation and spec parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortSpec` parses the textual "22,80,443,8000-8100" form into a canonical
//! ascending, duplicate-free port list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw u16 values
/// and ensures port numbers are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Create a Port without validation. Use only when the value is known valid.
    #[inline]
    pub const fn new_unchecked(port: u16) -> Self {
        Self(port)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value as u32))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
///
/// Any variant aborts the entire spec expansion; there are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u32),
    #[error("invalid port number: {0:?}")]
    NotANumber(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
    #[error("empty token in port specification: {0:?}")]
    Malformed(String),
}

/// Parse one decimal port value.
///
/// Parses through u32 so oversized literals like "70000" report out of
/// range rather than a generic parse failure.
fn parse_port_value(s: &str) -> Result<Port, PortError> {
    let value: u32 = s
        .parse()
        .map_err(|_| PortError::NotANumber(s.to_string()))?;
    if value < Port::MIN as u32 || value > Port::MAX as u32 {
        return Err(PortError::OutOfRange(value));
    }
    Ok(Port::new_unchecked(value as u16))
}

/// A range of ports (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range. Fails if start > end.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start.0 > end.0 {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0 + 1) as usize
    }

    /// A valid PortRange always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port::new_unchecked)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A complete port specification that can contain multiple ranges.
///
/// Supports formats like:
/// - Single port: "80"
/// - Comma-separated: "80,443,8080"
/// - Range: "1-1000"
/// - Mixed: "22,80,443,8000-9000"
///
/// Whitespace around tokens and range bounds is ignored. Overlapping tokens
/// collapse silently; expansion is order-independent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortSpec {
    ranges: Vec<PortRange>,
}

impl PortSpec {
    /// Create an empty port specification.
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Add a port range to the specification.
    pub fn add_range(&mut self, range: PortRange) {
        self.ranges.push(range);
    }

    /// Add a single port to the specification.
    pub fn add_port(&mut self, port: Port) {
        self.ranges.push(PortRange::single(port));
    }

    /// Build the canonical spec for a set of ports, collapsing consecutive
    /// runs into ranges. Re-parsing the `Display` form of the result yields
    /// the same port set.
    pub fn from_ports(ports: &[Port]) -> Self {
        let mut sorted: Vec<Port> = ports.to_vec();
        sorted.sort_unstable();
        sorted.dedup();

        let mut spec = Self::new();
        let mut run: Option<(Port, Port)> = None;
        for port in sorted {
            match run {
                Some((start, end)) if port.0 == end.0 + 1 => {
                    run = Some((start, port));
                }
                Some((start, end)) => {
                    spec.ranges.push(PortRange { start, end });
                    run = Some((port, port));
                }
                None => run = Some((port, port)),
            }
        }
        if let Some((start, end)) = run {
            spec.ranges.push(PortRange { start, end });
        }
        spec
    }

    /// Expand to all ports as a sorted, deduplicated vector.
    ///
    /// The union goes through a set keyed by port number, so duplicates
    /// across overlapping singles and ranges collapse structurally.
    pub fn to_ports(&self) -> Vec<Port> {
        let set: BTreeSet<Port> = self.ranges.iter().flat_map(|r| r.iter()).collect();
        set.into_iter().collect()
    }

    /// Get the total number of unique ports.
    pub fn count(&self) -> usize {
        self.to_ports().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl FromStr for PortSpec {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        let mut spec = Self::new();

        for token in s.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err(PortError::Malformed(token.to_string()));
            }

            // A token is a range iff it contains a hyphen.
            if let Some((left, right)) = token.split_once('-') {
                let left = left.trim();
                let right = right.trim();
                if left.is_empty() || right.is_empty() {
                    return Err(PortError::Malformed(token.to_string()));
                }

                let start = parse_port_value(left)?;
                let end = parse_port_value(right)?;
                spec.add_range(PortRange::new(start, end)?);
            } else {
                spec.add_port(parse_port_value(token)?);
            }
        }

        Ok(spec)
    }
}

impl fmt::Display for PortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        write!(f, "{}", parts.join(","))
    }
}
