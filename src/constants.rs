//! Centralized constants for the application

// ============================================================================
// Application Info
// ============================================================================

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Application version from Cargo.toml
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Logging
// ============================================================================

/// Environment variable holding the log level (e.g. `debug` or
/// `process_sampler::app=trace,warn`)
pub const LOG_LEVEL_ENV: &str = "PROCESS_SAMPLER_LOG";

/// Level used when the environment variable is unset
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit status for fatal configuration or resolution errors
pub const EXIT_FATAL: i32 = 1;

// ============================================================================
// Byte Size Conversions
// ============================================================================

/// Bytes in a kibibyte; report conversions use integer division
pub const BYTES_PER_KIB: u64 = 1024;
