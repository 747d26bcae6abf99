//! Application layer - argument handling, the sampling loop and the report

pub mod cli;
pub mod logger;
pub mod report;
pub mod sampler;

use log::info;

use crate::system::{self, MonitorError};

use cli::SamplerConfig;
use report::Summary;
use sampler::{Sampler, SystemClock};

/// Resolves the target, samples it for the configured window and returns
/// the summary to print.
///
/// # Errors
/// Fails before sampling starts if the process cannot be resolved or its
/// baseline I/O counters cannot be read.
pub fn run(config: &SamplerConfig) -> Result<Summary, MonitorError> {
    let mut process = system::open_process(config.pid).map_err(MonitorError::Resolve)?;

    info!(
        "Monitoring process {} every {}s for {}s",
        config.pid, config.interval_secs, config.duration_secs
    );

    let aggregate = Sampler::new(config.interval(), config.duration())
        .run(process.as_mut(), &mut SystemClock::new())
        .map_err(MonitorError::Baseline)?;

    Ok(Summary::new(aggregate, config))
}

#[cfg(all(test, target_os = "linux"))]
mod tests {
    use super::*;
    use crate::system::ProcessError;

    #[test]
    fn test_run_against_missing_process() {
        // Above the kernel's pid_max ceiling (2^22), so never allocated
        let pid = 4_194_304 + 17;
        let config = SamplerConfig {
            pid,
            interval_secs: 1,
            duration_secs: 1,
        };
        assert_eq!(
            run(&config),
            Err(MonitorError::Resolve(ProcessError::NotFound { pid }))
        );
    }

    #[test]
    fn test_run_against_own_process() {
        let config = SamplerConfig {
            pid: std::process::id(),
            interval_secs: 1,
            duration_secs: 1,
        };

        // procfs io can be restricted in sandboxes; then the baseline fails
        match run(&config) {
            Ok(summary) => {
                assert_eq!(summary.aggregate.samples, 1);
                assert!(summary.aggregate.max_memory > 0);
                assert!(summary.to_string().starts_with("Monitoring completed over 1 seconds"));
            }
            Err(err) => assert!(matches!(err, MonitorError::Baseline(_)), "{}", err),
        }
    }
}
