//! Logger setup
//!
//! Logs go to stderr so stdout only carries the usage text and the report.
//! The level comes from `PROCESS_SAMPLER_LOG` and accepts either a bare
//! level or `module=level` pairs separated by commas.

use std::env;

use env_logger::{Builder, Target};
use log::LevelFilter;

use crate::constants::{DEFAULT_LOG_LEVEL, LOG_LEVEL_ENV};

fn get_log_level(log_level: &str) -> LevelFilter {
    match log_level.trim().to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// Splits a level filter string into `(module, level)` directives; `None` is global.
fn parse_directives(filters: &str) -> Vec<(Option<String>, LevelFilter)> {
    filters.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((module, level)) => (Some(module.trim().to_string()), get_log_level(level)),
            None => (None, get_log_level(part)),
        })
        .collect()
}

pub fn init_logger() {
    let log_level = env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

    let mut log_builder = Builder::from_default_env();
    log_builder.target(Target::Stderr);

    for (module, level) in parse_directives(&log_level) {
        match module {
            Some(module) => log_builder.filter_module(&module, level),
            None => log_builder.filter_level(level),
        };
    }

    log_builder.init();
}
