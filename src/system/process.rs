//! The live OS backend for [`ProcessMetricsSource`]
//!
//! On Linux every query re-reads `/proc/<pid>` through the procfs crate, so
//! a process that exits mid-run turns into `NotFound` errors on the next
//! sample. On Windows the process handle is opened once and held until the
//! sampler is dropped.

use std::time::Instant;
#[cfg(target_os = "linux")]
use std::time::Duration;

use super::cpu::CpuTracker;
use super::disk::IoCounters;
use super::error::{ProcessError, ProcessResult};
use super::memory::MemoryInfo;
use super::ProcessMetricsSource;

/// A resolved target process
pub struct OsProcess {
    pid: u32,
    cpu: CpuTracker,
    #[cfg(target_os = "linux")]
    process: procfs::process::Process,
    /// Page size in bytes
    #[cfg(target_os = "linux")]
    page_size: u64,
    /// Clock ticks per second
    #[cfg(target_os = "linux")]
    ticks_per_second: f64,
    #[cfg(windows)]
    handle: crate::ffi::ProcessHandle,
}

// ============================================================================
// Linux (procfs)
// ============================================================================

#[cfg(target_os = "linux")]
impl OsProcess {
    /// Resolves `pid` by reading its stat file once.
    pub fn open(pid: u32) -> ProcessResult<Self> {
        if pid == 0 {
            return Err(ProcessError::InvalidPid);
        }
        // Kernel pids are positive i32 values
        let raw_pid = i32::try_from(pid).map_err(|_| ProcessError::NotFound { pid })?;

        let process = procfs::process::Process::new(raw_pid)
            .map_err(|e| ProcessError::from_procfs(pid, e))?;
        process
            .stat()
            .map_err(|e| ProcessError::from_procfs(pid, e))?;

        Ok(Self {
            pid,
            cpu: CpuTracker::new(),
            process,
            page_size: procfs::page_size(),
            ticks_per_second: procfs::ticks_per_second() as f64,
        })
    }

    fn ticks_to_secs(&self, ticks: u64) -> f64 {
        ticks as f64 / self.ticks_per_second
    }
}

#[cfg(target_os = "linux")]
impl ProcessMetricsSource for OsProcess {
    fn cpu_percent(&mut self) -> ProcessResult<f64> {
        use procfs::Current;

        let stat = self
            .process
            .stat()
            .map_err(|e| ProcessError::from_procfs(self.pid, e))?;
        let uptime = procfs::Uptime::current()
            .map_err(|e| ProcessError::from_procfs(self.pid, e))?
            .uptime;
        let now = Instant::now();

        let cpu_time = Duration::from_secs_f64(self.ticks_to_secs(stat.utime + stat.stime));
        let alive = (uptime - self.ticks_to_secs(stat.starttime)).max(0.0);
        let since_start = Duration::from_secs_f64(alive);

        Ok(self.cpu.update(cpu_time, now, since_start))
    }

    fn memory_info(&mut self) -> ProcessResult<MemoryInfo> {
        let statm = self
            .process
            .statm()
            .map_err(|e| ProcessError::from_procfs(self.pid, e))?;
        Ok(MemoryInfo::from_pages(statm.resident, self.page_size))
    }

    fn io_counters(&mut self) -> ProcessResult<IoCounters> {
        let io = self
            .process
            .io()
            .map_err(|e| ProcessError::from_procfs(self.pid, e))?;
        Ok(IoCounters::from(&io))
    }
}

// ============================================================================
// Windows (Win32)
// ============================================================================

#[cfg(windows)]
mod win32 {
    use std::mem;
    use std::time::Duration;

    use windows::Win32::Foundation::{E_ACCESSDENIED, E_INVALIDARG, FILETIME};

    use crate::system::error::ProcessError;

    /// Converts a FILETIME to a u64 (100-nanosecond intervals since 1601)
    pub fn filetime_to_u64(ft: &FILETIME) -> u64 {
        ((ft.dwHighDateTime as u64) << 32) | (ft.dwLowDateTime as u64)
    }

    /// Converts a count of 100-nanosecond intervals to a Duration
    pub fn filetime_duration(intervals: u64) -> Duration {
        Duration::from_nanos(intervals.saturating_mul(100))
    }

    /// Gets the current system time as FILETIME (100-nanosecond intervals since 1601)
    pub fn current_filetime() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};

        // Seconds between 1601-01-01 and 1970-01-01
        const FILETIME_UNIX_DIFF: u64 = 11644473600;

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();

        (now.as_secs() + FILETIME_UNIX_DIFF) * 10_000_000 + (now.subsec_nanos() as u64 / 100)
    }

    pub fn struct_size<T>() -> u32 {
        mem::size_of::<T>() as u32
    }

    /// Maps an OpenProcess failure to a structured error.
    pub fn open_error(pid: u32, err: &windows::core::Error) -> ProcessError {
        let code = err.code();
        if code == E_ACCESSDENIED {
            ProcessError::AccessDenied { pid }
        } else if code == E_INVALIDARG {
            // OpenProcess reports ERROR_INVALID_PARAMETER for unknown PIDs
            ProcessError::NotFound { pid }
        } else {
            api_error("OpenProcess", err)
        }
    }

    pub fn api_error(api: &'static str, err: &windows::core::Error) -> ProcessError {
        ProcessError::WinApiError {
            api,
            code: err.code().0,
        }
    }
}

#[cfg(windows)]
impl OsProcess {
    /// Opens a handle to `pid` that stays valid for the whole run.
    pub fn open(pid: u32) -> ProcessResult<Self> {
        use windows::Win32::System::Threading::{
            PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_VM_READ,
        };

        if pid == 0 {
            return Err(ProcessError::InvalidPid);
        }

        // Some protected processes refuse VM_READ but still allow limited queries
        let handle = crate::ffi::ProcessHandle::open(
            pid,
            PROCESS_QUERY_LIMITED_INFORMATION | PROCESS_VM_READ,
        )
        .or_else(|_| crate::ffi::ProcessHandle::open(pid, PROCESS_QUERY_LIMITED_INFORMATION))
        .map_err(|e| win32::open_error(pid, &e))?;

        Ok(Self {
            pid,
            cpu: CpuTracker::new(),
            handle,
        })
    }
}

#[cfg(windows)]
impl ProcessMetricsSource for OsProcess {
    fn cpu_percent(&mut self) -> ProcessResult<f64> {
        use windows::Win32::Foundation::FILETIME;
        use windows::Win32::System::Threading::GetProcessTimes;

        let mut creation_time = FILETIME::default();
        let mut exit_time = FILETIME::default();
        let mut kernel_time = FILETIME::default();
        let mut user_time = FILETIME::default();

        // SAFETY: The handle is owned by self and the out-pointers are valid locals.
        unsafe {
            GetProcessTimes(
                self.handle.as_raw(),
                &mut creation_time,
                &mut exit_time,
                &mut kernel_time,
                &mut user_time,
            )
        }
        .map_err(|e| win32::api_error("GetProcessTimes", &e))?;

        let now = Instant::now();
        let cpu_time = win32::filetime_duration(
            win32::filetime_to_u64(&kernel_time) + win32::filetime_to_u64(&user_time),
        );
        let since_start = win32::filetime_duration(
            win32::current_filetime().saturating_sub(win32::filetime_to_u64(&creation_time)),
        );

        Ok(self.cpu.update(cpu_time, now, since_start))
    }

    fn memory_info(&mut self) -> ProcessResult<MemoryInfo> {
        use windows::Win32::System::ProcessStatus::{
            GetProcessMemoryInfo, PROCESS_MEMORY_COUNTERS,
        };

        // cb must be set before the call
        let mut counters = PROCESS_MEMORY_COUNTERS {
            cb: win32::struct_size::<PROCESS_MEMORY_COUNTERS>(),
            ..Default::default()
        };

        // SAFETY: Valid handle and a properly sized counters struct.
        unsafe {
            GetProcessMemoryInfo(
                self.handle.as_raw(),
                &mut counters,
                win32::struct_size::<PROCESS_MEMORY_COUNTERS>(),
            )
        }
        .map_err(|e| win32::api_error("GetProcessMemoryInfo", &e))?;

        Ok(MemoryInfo {
            rss_bytes: counters.WorkingSetSize as u64,
        })
    }

    fn io_counters(&mut self) -> ProcessResult<IoCounters> {
        use windows::Win32::System::Threading::{GetProcessIoCounters, IO_COUNTERS};

        let mut io = IO_COUNTERS::default();

        // SAFETY: Valid handle and an initialized struct.
        unsafe { GetProcessIoCounters(self.handle.as_raw(), &mut io) }
            .map_err(|e| win32::api_error("GetProcessIoCounters", &e))?;

        Ok(IoCounters {
            read_ops: io.ReadOperationCount,
            write_ops: io.WriteOperationCount,
            read_bytes: io.ReadTransferCount,
            write_bytes: io.WriteTransferCount,
        })
    }
}

impl OsProcess {
    pub fn pid(&self) -> u32 {
        self.pid
    }
}
