//! Command-line argument parsing (manual implementation)
//!
//! Exactly three positional integers: pid, interval and duration. Any other
//! argument count means "show usage", which is not an error.

use std::time::Duration;

use crate::constants::{APP_NAME, APP_VERSION};
use crate::system::{ConfigError, ConfigResult};

/// What the program was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage and exit successfully
    Usage,
    /// Monitor a process
    Run(SamplerConfig),
}

/// Validated monitoring parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Target process identifier
    pub pid: u32,
    /// Seconds between samples
    pub interval_secs: u64,
    /// Seconds to keep sampling
    pub duration_secs: u64,
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_secs)
    }
}

/// Usage text shown for a wrong argument count
pub fn usage() -> String {
    format!(
        "{} {}
Samples a process's CPU, memory and I/O counters and prints a summary.

Usage: {} <pid> <interval_in_seconds> <duration_in_seconds>",
        APP_NAME, APP_VERSION, APP_NAME
    )
}

/// Parses a signed integer; negative numbers are integers too, they are
/// rejected later by range checks.
fn parse_int(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

/// Requires a strictly positive seconds value
fn positive_secs(name: &'static str, value: i64) -> ConfigResult<u64> {
    if value > 0 {
        Ok(value as u64)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Parse command-line arguments (program name already stripped).
///
/// Interval and duration are checked before the pid.
pub fn parse_args<I>(args: I) -> ConfigResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let argv: Vec<String> = args.into_iter().collect();
    let [pid, interval, duration] = argv.as_slice() else {
        return Ok(Command::Usage);
    };

    let interval =
        parse_int(interval).ok_or_else(|| ConfigError::InvalidInterval(interval.clone()))?;
    let duration =
        parse_int(duration).ok_or_else(|| ConfigError::InvalidDuration(duration.clone()))?;
    let pid_value = parse_int(pid).ok_or_else(|| ConfigError::InvalidPid(pid.clone()))?;

    let interval_secs = positive_secs("interval", interval)?;
    let duration_secs = positive_secs("duration", duration)?;
    if pid_value <= 0 {
        return Err(ConfigError::NotPositive {
            name: "PID",
            value: pid_value,
        });
    }
    let pid = u32::try_from(pid_value).map_err(|_| ConfigError::InvalidPid(pid.clone()))?;

    Ok(Command::Run(SamplerConfig {
        pid,
        interval_secs,
        duration_secs,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_valid_arguments() {
        let cmd = parse_args(args(&["1234", "1", "3"])).expect("valid args");
        assert_eq!(
            cmd,
            Command::Run(SamplerConfig {
                pid: 1234,
                interval_secs: 1,
                duration_secs: 3,
            })
        );
        if let Command::Run(config) = cmd {
            assert_eq!(config.interval(), Duration::from_secs(1));
            assert_eq!(config.duration(), Duration::from_secs(3));
        }
    }

    #[test]
    fn test_wrong_count_shows_usage() {
        for list in [
            &[][..],
            &["1234"][..],
            &["1234", "1"][..],
            &["1234", "1", "3", "extra"][..],
            &["not", "even", "numbers", "here", "either"][..],
        ] {
            assert_eq!(parse_args(args(list)), Ok(Command::Usage), "{:?}", list);
        }
    }

    #[test]
    fn test_non_integer_arguments_are_fatal() {
        assert_eq!(
            parse_args(args(&["1234", "fast", "3"])),
            Err(ConfigError::InvalidInterval("fast".into()))
        );
        assert_eq!(
            parse_args(args(&["1234", "1", "3.5"])),
            Err(ConfigError::InvalidDuration("3.5".into()))
        );
        assert_eq!(
            parse_args(args(&["init", "1", "3"])),
            Err(ConfigError::InvalidPid("init".into()))
        );
    }

    #[test]
    fn test_interval_is_checked_before_pid() {
        assert_eq!(
            parse_args(args(&["abc", "x", "y"])),
            Err(ConfigError::InvalidInterval("x".into()))
        );
    }

    #[test]
    fn test_non_positive_values_are_fatal() {
        assert_eq!(
            parse_args(args(&["1234", "0", "3"])),
            Err(ConfigError::NotPositive {
                name: "interval",
                value: 0,
            })
        );
        assert_eq!(
            parse_args(args(&["1234", "1", "-5"])),
            Err(ConfigError::NotPositive {
                name: "duration",
                value: -5,
            })
        );
        assert_eq!(
            parse_args(args(&["-1", "1", "3"])),
            Err(ConfigError::NotPositive {
                name: "PID",
                value: -1,
            })
        );
    }

    #[test]
    fn test_huge_duration_is_accepted() {
        let cmd = parse_args(args(&["1234", "1", "9223372036854775807"]));
        let Ok(Command::Run(config)) = &cmd else {
            panic!("expected a run command, got {:?}", cmd);
        };
        assert_eq!(config.duration(), Duration::from_secs(i64::MAX as u64));
    }

    #[test]
    fn test_pid_out_of_range() {
        assert_eq!(
            parse_args(args(&["99999999999", "1", "3"])),
            Err(ConfigError::InvalidPid("99999999999".into()))
        );
    }

    #[test]
    fn test_usage_mentions_arguments() {
        let text = usage();
        assert!(text.contains("<pid> <interval_in_seconds> <duration_in_seconds>"));
        assert!(text.contains(APP_NAME));
    }
}
