#![cfg(feature = "std")]

use std::env;

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Environment variable holding the log level (`error` .. `trace`).
pub const LOG_ENV: &str = "BROADSIDE_LOG";

/// Initialize terminal logging with a level taken from `BROADSIDE_LOG`.
/// Defaults to `info` if the variable is not set or invalid. Calling it
/// twice is harmless.
pub fn init_logging() {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info);
    let config = ConfigBuilder::new().set_target_level(LevelFilter::Debug).build();
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}
