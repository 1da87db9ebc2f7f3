//! Logging setup for the command-line tool
//!
//! Messages go to stderr and, when a log directory is available, are appended to
//! `<data_local_dir>/coverstamp/logs/coverstamp.log` as well.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "coverstamp.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

pub fn log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("coverstamp").join("logs"))
}

/// Terminal level for a `-v` count: warn, info, debug, then trace.
pub fn terminal_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// Install the global logger.
///
/// Returns the log file path when file logging could be set up. Any problem
/// with the log file falls back to terminal-only logging.
pub fn init_logging(verbosity: u8) -> Option<PathBuf> {
    let term_level = terminal_level(verbosity);

    let Some(log_dir) = log_directory() else {
        init_terminal_only(term_level);
        return None;
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: could not create log directory: {e}");
        init_terminal_only(term_level);
        return None;
    }

    let log_path = log_dir.join(LOG_FILE);

    if let Ok(metadata) = fs::metadata(&log_path) {
        if metadata.len() > MAX_LOG_BYTES {
            let _ = fs::rename(&log_path, log_dir.join(format!("{LOG_FILE}.old")));
        }
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: could not open log file: {e}");
            init_terminal_only(term_level);
            return None;
        }
    };

    // The file always gets at least debug output, whatever the terminal shows.
    let file_level = term_level.max(LevelFilter::Debug);
    let config = log_config();
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(
            term_level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(file_level, config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: logger already initialized");
    }

    log::debug!("=== coverstamp {} ===", env!("CARGO_PKG_VERSION"));
    log::debug!("log file: {}", log_path.display());

    Some(log_path)
}

fn init_terminal_only(level: LevelFilter) {
    let term_logger = TermLogger::new(level, log_config(), TerminalMode::Stderr, ColorChoice::Auto);
    let _ = CombinedLogger::init(vec![term_logger]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_steps_up_from_warn() {
        assert_eq!(terminal_level(0), LevelFilter::Warn);
        assert_eq!(terminal_level(1), LevelFilter::Info);
        assert_eq!(terminal_level(2), LevelFilter::Debug);
        assert_eq!(terminal_level(3), LevelFilter::Trace);
        assert_eq!(terminal_level(200), LevelFilter::Trace);
    }

    #[test]
    fn log_directory_is_app_specific() {
        if let Some(dir) = log_directory() {
            assert!(dir.ends_with("coverstamp/logs"));
        }
    }
}
