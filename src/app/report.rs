//! Final summary printed after the monitoring window closes

use std::fmt;

use crate::constants::BYTES_PER_KIB;

use super::cli::SamplerConfig;
use super::sampler::Aggregate;

/// Aggregates plus the parameters they were collected with
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub aggregate: Aggregate,
    pub interval_secs: u64,
    pub duration_secs: u64,
}

impl Summary {
    pub fn new(aggregate: Aggregate, config: &SamplerConfig) -> Self {
        Self {
            aggregate,
            interval_secs: config.interval_secs,
            duration_secs: config.duration_secs,
        }
    }
}

/// Truncating bytes-to-KiB conversion
fn kib(bytes: u64) -> u64 {
    bytes / BYTES_PER_KIB
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let agg = &self.aggregate;
        let io = &agg.io;

        writeln!(
            f,
            "Monitoring completed over {} seconds (interval: {} seconds):",
            self.duration_secs, self.interval_secs
        )?;
        writeln!(f, "Average CPU Usage: {:.2}%", agg.average_cpu())?;
        writeln!(f, "Maximum Memory Usage: {} KiB", kib(agg.max_memory))?;
        writeln!(f, "Total Read Operations: {}", io.read_ops)?;
        writeln!(f, "Total Write Operations: {}", io.write_ops)?;
        writeln!(f, "Total Read Bytes: {} Bytes({} KiB)", io.read_bytes, kib(io.read_bytes))?;
        write!(f, "Total Write Bytes: {} Bytes({} KiB)", io.write_bytes, kib(io.write_bytes))
    }
}
