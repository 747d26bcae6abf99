//! Per-process I/O counters
//!
//! Counters are cumulative since process start. Linux exposes them in
//! `/proc/<pid>/io`, Windows through GetProcessIoCounters.

/// Cumulative per-process I/O statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IoCounters {
    /// Number of read operations
    pub read_ops: u64,
    /// Number of write operations
    pub write_ops: u64,
    /// Total bytes read
    pub read_bytes: u64,
    /// Total bytes written
    pub write_bytes: u64,
}

impl IoCounters {
    /// Activity since `baseline`, field by field.
    ///
    /// Saturates at zero so a counter reset never shows up as a huge value.
    pub fn delta_since(&self, baseline: &IoCounters) -> IoCounters {
        IoCounters {
            read_ops: self.read_ops.saturating_sub(baseline.read_ops),
            write_ops: self.write_ops.saturating_sub(baseline.write_ops),
            read_bytes: self.read_bytes.saturating_sub(baseline.read_bytes),
            write_bytes: self.write_bytes.saturating_sub(baseline.write_bytes),
        }
    }
}

/// Operation counts come from `syscr`/`syscw`, byte counts from
/// `read_bytes`/`write_bytes` (storage-layer traffic).
#[cfg(target_os = "linux")]
impl From<&procfs::process::Io> for IoCounters {
    fn from(io: &procfs::process::Io) -> Self {
        IoCounters {
            read_ops: io.syscr,
            write_ops: io.syscw,
            read_bytes: io.read_bytes,
            write_bytes: io.write_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io(read_ops: u64, write_ops: u64, read_bytes: u64, write_bytes: u64) -> IoCounters {
        IoCounters {
            read_ops,
            write_ops,
            read_bytes,
            write_bytes,
        }
    }

    #[test]
    fn test_delta_since() {
        let baseline = io(5, 2, 100, 50);
        let now = io(15, 2, 2148, 40);
        assert_eq!(now.delta_since(&baseline), io(10, 0, 2048, 0));
    }

    #[test]
    fn test_delta_since_itself_is_zero() {
        let counters = io(7, 8, 9, 10);
        assert_eq!(counters.delta_since(&counters), IoCounters::default());
    }
}
