//! OS process-metrics provider
//!
//! The sampler only sees the [`ProcessMetricsSource`] trait; the live
//! implementation reads procfs on Linux and calls Win32 on Windows.

#[cfg_attr(not(any(target_os = "linux", windows)), allow(dead_code))]
pub mod cpu;
pub mod disk;
pub mod error;
pub mod memory;
#[cfg(any(target_os = "linux", windows))]
mod process;

pub use disk::IoCounters;
pub use error::{ConfigError, ConfigResult, MonitorError, ProcessError, ProcessResult};
pub use memory::MemoryInfo;

/// Queries one resolved process.
///
/// Each call goes to the OS again; nothing is cached between calls except
/// what `cpu_percent` needs for its delta.
pub trait ProcessMetricsSource {
    /// CPU usage in percent since the previous call, or since process
    /// start on the first call.
    fn cpu_percent(&mut self) -> ProcessResult<f64>;

    /// Current resident memory.
    fn memory_info(&mut self) -> ProcessResult<MemoryInfo>;

    /// Cumulative I/O counters since process start.
    fn io_counters(&mut self) -> ProcessResult<IoCounters>;
}

/// Resolves `pid` to a live process.
///
/// Fails if the process does not exist or cannot be accessed.
#[cfg(any(target_os = "linux", windows))]
pub fn open_process(pid: u32) -> ProcessResult<Box<dyn ProcessMetricsSource>> {
    let process = process::OsProcess::open(pid)?;
    log::debug!("Resolved process {}", process.pid());
    Ok(Box::new(process))
}

#[cfg(not(any(target_os = "linux", windows)))]
pub fn open_process(_pid: u32) -> ProcessResult<Box<dyn ProcessMetricsSource>> {
    Err(ProcessError::Unsupported {
        what: "per-process metrics",
    })
}
