//! Process sampler
//!
//! Samples one process's CPU, memory and I/O counters at a fixed interval
//! for a bounded duration, then prints the average CPU usage, peak resident
//! memory and the I/O activity seen during the window.
//!
//! Usage: process_sampler <pid> <interval_in_seconds> <duration_in_seconds>

mod app;
mod constants;
#[cfg(windows)]
mod ffi;
mod system;

use std::env;
use std::process;

use log::error;

use app::cli::{self, Command};
use app::logger;
use constants::EXIT_FATAL;
use system::MonitorError;

fn main() {
    logger::init_logger();

    let config = match cli::parse_args(env::args().skip(1)) {
        Ok(Command::Usage) => {
            println!("{}", cli::usage());
            return;
        }
        Ok(Command::Run(config)) => config,
        Err(err) => fatal(&MonitorError::from(err)),
    };

    match app::run(&config) {
        Ok(summary) => println!("\n{}", summary),
        Err(err) => fatal(&err),
    }
}

/// Logs a fatal error and exits with a nonzero status
fn fatal(err: &MonitorError) -> ! {
    error!("{}", err);
    process::exit(EXIT_FATAL);
}
