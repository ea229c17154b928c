//! Generic logger utility functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::{self, info};
use fern;
use colored::{ColoredString, Colorize};
use thiserror::Error;

// Internal imports
use crate::session;

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("Expected a log level less than `INFO`, found `{0}`")]
    InvalidMinLogLevel(log::LevelFilter),

    #[error("Error initialising the log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("An error occured while setting up the logger: {0}")]
    FernInitError(log::SetLoggerError)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this execution.
///
/// # Notes
///
/// - `min_level` must be greater than `log::Level::Info`.
/// - Only the first call in a process succeeds, later calls return
///   `FernInitError`.
pub fn logger_init(
    min_level: self::LevelFilter,
    session: &session::Session
) -> Result<(), LoggerInitError> {

    if min_level < log::Level::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level))
    }

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileInitError)?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            let prefix = line_prefix(session::get_elapsed_seconds(), record.level());

            // Debug and trace lines also name the module they come from
            match record.level() {
                log::Level::Debug | log::Level::Trace => out.finish(format_args!(
                    "{} {}: {}", prefix, record.target(), message
                )),
                _ => out.finish(format_args!("{} {}", prefix, message))
            }
        })
        .level(min_level)
        .chain(std::io::stdout())
        .chain(log_file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!(
        "Logging to {:?} at {:?}, session epoch {}",
        session.log_file_path,
        min_level,
        session::get_epoch()
            .map(|e| e.to_rfc3339())
            .unwrap_or_else(|| String::from("unset"))
    );

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Prefix of every log line, the seconds elapsed since the session epoch
/// followed by the level tag.
///
/// The elapsed time is NaN until a session has been created.
fn line_prefix(elapsed_s: f64, level: log::Level) -> String {
    format!("[{:10.6} {}]", elapsed_s, level_tag(level))
}

fn level_tag(level: log::Level) -> ColoredString {
    match level {
        log::Level::Trace => "TRC".dimmed().italic(),
        log::Level::Debug => "DBG".dimmed(),
        log::Level::Info  => "INF".normal(),
        log::Level::Warn  => "WRN".yellow(),
        log::Level::Error => "ERR".red().bold()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_rejects_quiet_levels() {
        let dir = TempDir::new().unwrap();
        let session = session::Session::new("logger_test", dir.path()).unwrap();

        match logger_init(LevelFilter::Warn, &session) {
            Err(LoggerInitError::InvalidMinLogLevel(LevelFilter::Warn)) => (),
            r => panic!("Expected InvalidMinLogLevel, got {:?}", r)
        }
    }

    #[test]
    fn test_line_prefix() {
        colored::control::set_override(false);

        assert_eq!(line_prefix(1.5, log::Level::Warn), "[  1.500000 WRN]");
        assert_eq!(line_prefix(f64::NAN, log::Level::Debug), "[       NaN DBG]");
    }
}
