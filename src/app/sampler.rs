//! The sampling loop
//!
//! Captures baseline I/O counters, then polls CPU, memory and I/O until the
//! elapsed wall time reaches the configured duration. A failed query is
//! logged and skipped; it never ends the run.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::system::{IoCounters, ProcessMetricsSource, ProcessResult};

/// Time source and sleep primitive for the loop.
///
/// Time is reported as an offset from the clock's own origin, so no caller
/// ever adds a user-supplied duration to an `Instant`.
pub trait Clock {
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

/// Real wall clock with a blocking sleep
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Running totals owned by one sampling run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    /// Sum of successfully read CPU percentages
    pub cpu_total: f64,
    /// Sampling attempts, including ones where every query failed
    pub samples: u64,
    /// Largest resident set size seen, in bytes
    pub max_memory: u64,
    /// Latest I/O counters minus the baseline
    pub io: IoCounters,
}

impl Aggregate {
    /// Average CPU usage over all attempted samples.
    ///
    /// Failed CPU reads still count in the divisor. With zero samples the
    /// result is NaN.
    pub fn average_cpu(&self) -> f64 {
        self.cpu_total / self.samples as f64
    }

    fn record_memory(&mut self, rss_bytes: u64) {
        if rss_bytes > self.max_memory {
            self.max_memory = rss_bytes;
        }
    }
}

/// Polls a process at a fixed interval over a bounded window.
#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    interval: Duration,
    duration: Duration,
}

impl Sampler {
    pub fn new(interval: Duration, duration: Duration) -> Self {
        Self { interval, duration }
    }

    /// Runs the loop until `duration` has elapsed and returns the totals.
    ///
    /// # Errors
    /// Only when the baseline I/O counters cannot be read. Errors inside the
    /// loop are logged and skipped.
    pub fn run<S, C>(&self, source: &mut S, clock: &mut C) -> ProcessResult<Aggregate>
    where
        S: ProcessMetricsSource + ?Sized,
        C: Clock,
    {
        let baseline = source.io_counters()?;
        let start = clock.now();
        let mut aggregate = Aggregate::default();

        while clock.now().saturating_sub(start) < self.duration {
            Self::sample(source, &baseline, &mut aggregate);
            clock.sleep(self.interval);
        }

        Ok(aggregate)
    }

    /// One round of queries.
    fn sample<S>(source: &mut S, baseline: &IoCounters, aggregate: &mut Aggregate)
    where
        S: ProcessMetricsSource + ?Sized,
    {
        match source.cpu_percent() {
            Ok(percent) => aggregate.cpu_total += percent,
            Err(e) => warn!("Error retrieving CPU usage: {}", e),
        }

        match source.memory_info() {
            Ok(mem) => aggregate.record_memory(mem.rss_bytes),
            Err(e) => warn!("Error retrieving memory info: {}", e),
        }

        // Deltas are recomputed from the baseline, so a failed read keeps
        // the previous values
        match source.io_counters() {
            Ok(current) => aggregate.io = current.delta_since(baseline),
            Err(e) => warn!("Error retrieving I/O counters: {}", e),
        }

        aggregate.samples += 1;

        debug!(
            "Sample {}: CPU total={:.2}%, max RSS={} bytes, read ops={}, write ops={}",
            aggregate.samples,
            aggregate.cpu_total,
            aggregate.max_memory,
            aggregate.io.read_ops,
            aggregate.io.write_ops
        );
    }
}
