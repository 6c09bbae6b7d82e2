//! Logger setup for the binary and the test suite.
//!
//! Library code only talks to the `log` facade; the binary installs a
//! `simplelog` terminal logger once at startup.

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Install the terminal logger. `verbose` raises the level to debug.
///
/// Returns an error if a logger was already installed.
pub fn init(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

/// Initializes a debug-level logger for unit tests.
///
/// This safely no-ops if another logger has already been initialized.
#[cfg(test)]
pub fn initialize_for_tests() {
    let _ = init(true);
}
