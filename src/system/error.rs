//! Custom error types for type-safe error handling
//!
//! Startup configuration problems and process query failures are kept
//! apart so the caller can tell a fatal misconfiguration from a metric
//! that simply could not be read this time around.

use std::fmt;

// ============================================================================
// Process Error
// ============================================================================

/// Errors that can occur while resolving or querying the target process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// Process does not exist or has already terminated
    NotFound {
        /// The requested process identifier
        pid: u32,
    },

    /// Access denied - typically requires elevation or the same user
    AccessDenied {
        /// The requested process identifier
        pid: u32,
    },

    /// PID 0 names the idle/scheduler task, never a user process
    InvalidPid,

    /// No metrics backend exists for this platform
    #[cfg_attr(any(target_os = "linux", windows), allow(dead_code))]
    Unsupported {
        /// What could not be provided
        what: &'static str,
    },

    /// procfs reported an error other than a missing or denied process
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    Procfs {
        /// Error text from the procfs crate
        message: String,
    },

    /// Windows API call failed with an error code
    #[cfg_attr(not(windows), allow(dead_code))]
    WinApiError {
        /// Name of the failing API function
        api: &'static str,
        /// Windows error code (HRESULT)
        code: i32,
    },
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::NotFound { pid } => {
                write!(f, "process {} not found or has terminated", pid)
            }
            ProcessError::AccessDenied { pid } => {
                write!(f, "access denied to process {}", pid)
            }
            ProcessError::InvalidPid => {
                write!(f, "process id 0 does not name a user process")
            }
            ProcessError::Unsupported { what } => {
                write!(f, "{} is not supported on this platform", what)
            }
            ProcessError::Procfs { message } => {
                write!(f, "procfs error: {}", message)
            }
            ProcessError::WinApiError { api, code } => {
                write!(f, "{} failed (error code: 0x{:08X})", api, code)
            }
        }
    }
}

impl std::error::Error for ProcessError {}

#[cfg(target_os = "linux")]
impl ProcessError {
    /// Maps a procfs failure for `pid` to a structured error.
    ///
    /// A missing `/proc/<pid>` entry means the process is gone.
    pub fn from_procfs(pid: u32, err: procfs::ProcError) -> Self {
        match err {
            procfs::ProcError::NotFound(_) => ProcessError::NotFound { pid },
            procfs::ProcError::PermissionDenied(_) => ProcessError::AccessDenied { pid },
            other => ProcessError::Procfs {
                message: other.to_string(),
            },
        }
    }
}

// ============================================================================
// Config Error
// ============================================================================

/// Errors in the command-line configuration. All of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Interval argument is not an integer
    InvalidInterval(String),

    /// Duration argument is not an integer
    InvalidDuration(String),

    /// PID argument is not an integer or does not fit a process id
    InvalidPid(String),

    /// An integer argument that must be positive was zero or negative
    NotPositive {
        /// Argument name
        name: &'static str,
        /// Rejected value
        value: i64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidInterval(s) => {
                write!(f, "Invalid interval: '{}' is not an integer", s)
            }
            ConfigError::InvalidDuration(s) => {
                write!(f, "Invalid duration: '{}' is not an integer", s)
            }
            ConfigError::InvalidPid(s) => {
                write!(f, "Invalid PID: '{}' is not a valid process id", s)
            }
            ConfigError::NotPositive { name, value } => {
                write!(f, "Invalid {}: {} must be greater than zero", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Monitor Error
// ============================================================================

/// Fatal startup errors. Each one ends the program before any report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorError {
    /// Bad command-line arguments
    Config(ConfigError),

    /// The PID could not be resolved to an accessible process
    Resolve(ProcessError),

    /// The baseline I/O counters could not be read
    Baseline(ProcessError),
}

impl fmt::Display for MonitorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorError::Config(err) => write!(f, "{}", err),
            MonitorError::Resolve(err) => {
                write!(f, "Error retrieving process info: {}", err)
            }
            MonitorError::Baseline(err) => {
                write!(f, "Error retrieving initial I/O counters: {}", err)
            }
        }
    }
}

impl std::error::Error for MonitorError {}

impl From<ConfigError> for MonitorError {
    fn from(err: ConfigError) -> Self {
        MonitorError::Config(err)
    }
}

// ============================================================================
// Result type aliases
// ============================================================================

/// Result type for process queries
pub type ProcessResult<T> = Result<T, ProcessError>;

/// Result type for configuration parsing
pub type ConfigResult<T> = Result<T, ConfigError>;
