//! Resident-memory snapshots keyed by stage name.

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Resident memory of this process at one named stage.
#[derive(Debug, Clone)]
pub struct MemorySnapshot {
    pub rss_bytes: u64,
    pub stage: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    ProcessNotFound { pid: u32 },
}

impl MemoryError {
    pub fn code(&self) -> &'static str {
        match self {
            MemoryError::ProcessNotFound { .. } => "TOOLS_PROCESS_NOT_FOUND",
        }
    }
}

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemoryError::ProcessNotFound { pid } => {
                write!(f, "[{}] Process {} is not visible", self.code(), pid)
            }
        }
    }
}

impl std::error::Error for MemoryError {}

impl MemorySnapshot {
    /// Read the current resident set size of this process.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::ProcessNotFound`] when the platform does not
    /// expose the current process.
    pub fn capture(stage: &str) -> Result<Self, MemoryError> {
        let raw_pid = std::process::id();
        let pid = Pid::from_u32(raw_pid);

        let mut sys = System::new();
        sys.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory(),
        );

        let process = sys
            .process(pid)
            .ok_or(MemoryError::ProcessNotFound { pid: raw_pid })?;

        Ok(Self {
            rss_bytes: process.memory(),
            stage: stage.to_string(),
        })
    }

    pub fn rss_mb(&self) -> f64 {
        self.rss_bytes as f64 / BYTES_PER_MB
    }

    /// Signed growth in bytes from `earlier` to `self`.
    pub fn diff(&self, earlier: &Self) -> i64 {
        self.rss_bytes as i64 - earlier.rss_bytes as i64
    }
}

/// Current resident memory in megabytes, or `None` when unavailable.
///
/// Intended for log fields, where a missing reading should never fail the
/// caller.
pub fn rss_mb() -> Option<f64> {
    MemorySnapshot::capture("current").ok().map(|s| s.rss_mb())
}

/// Ordered snapshots across the stages of one build or solve.
#[derive(Debug, Default)]
pub struct MemoryTrail {
    snapshots: Vec<MemorySnapshot>,
}

impl MemoryTrail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture and keep a snapshot for `stage`.
    ///
    /// # Errors
    ///
    /// Propagates [`MemorySnapshot::capture`] failures.
    pub fn record(&mut self, stage: &str) -> Result<&MemorySnapshot, MemoryError> {
        self.snapshots.push(MemorySnapshot::capture(stage)?);
        Ok(&self.snapshots[self.snapshots.len() - 1])
    }

    /// Growth between the first and the most recent snapshot.
    pub fn total_diff(&self) -> Option<i64> {
        match self.snapshots.as_slice() {
            [first, .., last] => Some(last.diff(first)),
            _ => None,
        }
    }
}
