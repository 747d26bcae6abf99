//! CPU usage tracking
//!
//! The OS only reports cumulative CPU time, so usage is a delta measurement
//! between two time points. The first reading has no previous point and
//! measures against the process start instead.

use std::time::{Duration, Instant};

/// Previous measurement kept for the next delta
#[derive(Debug, Clone, Copy)]
struct CpuSnapshot {
    /// Total CPU time (user + kernel) consumed by the process so far
    cpu_time: Duration,
    /// Wall clock time of the measurement
    taken_at: Instant,
}

/// Turns cumulative CPU time readings into a percentage per interval.
#[derive(Debug, Clone, Default)]
pub struct CpuTracker {
    prev: Option<CpuSnapshot>,
}

impl CpuTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a reading and returns usage since the previous one.
    ///
    /// # Arguments
    /// * `cpu_time` - Cumulative CPU time reported by the OS
    /// * `now` - When the reading was taken
    /// * `since_start` - Wall time the process has been alive; only used on
    ///   the first call
    pub fn update(&mut self, cpu_time: Duration, now: Instant, since_start: Duration) -> f64 {
        let usage = match self.prev {
            Some(prev) => percent(
                cpu_time.saturating_sub(prev.cpu_time),
                now.saturating_duration_since(prev.taken_at),
            ),
            None => percent(cpu_time, since_start),
        };

        self.prev = Some(CpuSnapshot {
            cpu_time,
            taken_at: now,
        });

        usage
    }
}

/// CPU time as a percentage of wall time.
///
/// Not clamped to 100: a process running on several cores reports more.
pub fn percent(cpu_delta: Duration, wall_delta: Duration) -> f64 {
    let wall = wall_delta.as_secs_f64();
    if wall <= 0.0 {
        return 0.0;
    }
    (cpu_delta.as_secs_f64() / wall) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(Duration::from_millis(500), Duration::from_secs(1)), 50.0);
        assert_eq!(percent(Duration::from_secs(3), Duration::from_secs(1)), 300.0);
        assert_eq!(percent(Duration::from_secs(1), Duration::ZERO), 0.0);
    }

    #[test]
    fn test_first_update_measures_since_start() {
        let mut tracker = CpuTracker::new();
        let usage = tracker.update(Duration::from_secs(2), Instant::now(), Duration::from_secs(8));
        assert_eq!(usage, 25.0);
    }

    #[test]
    fn test_later_updates_measure_since_previous() {
        let mut tracker = CpuTracker::new();
        let t0 = Instant::now();
        tracker.update(Duration::from_secs(10), t0, Duration::from_secs(100));

        let usage = tracker.update(
            Duration::from_millis(10_250),
            t0 + Duration::from_secs(1),
            Duration::from_secs(101),
        );
        assert_eq!(usage, 25.0);
    }

    #[test]
    fn test_counter_going_backwards_reads_as_idle() {
        let mut tracker = CpuTracker::new();
        let t0 = Instant::now();
        tracker.update(Duration::from_secs(10), t0, Duration::from_secs(100));
        let later = t0 + Duration::from_secs(1);
        let usage = tracker.update(Duration::from_secs(5), later, Duration::ZERO);
        assert_eq!(usage, 0.0);
    }
}
