use color_eyre::eyre::Result;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

/// Log filename used by the daemon.
pub const LOG_FILENAME: &str = "luminous-daemon.log";

static LOG_FILE_PATH: OnceLock<String> = OnceLock::new();

/// Record the active log file path so structured errors can point at it.
pub fn set_log_file_path(path: String) {
    LOG_FILE_PATH.set(path).ok();
}

/// The active log file path, or empty before logging is initialized.
pub fn get_log_file_path() -> &'static str {
    LOG_FILE_PATH.get().map_or("", String::as_str)
}

/// Configuration for the logging system.
pub struct LogConfig {
    /// Directory where log files will be written.
    pub log_dir: PathBuf,
    /// Default log level when RUST_LOG is not set.
    pub log_level: Level,
    /// Whether to use JSON format for logs.
    pub json_format: bool,
    /// Log rotation period.
    pub rotation: Rotation,
}

impl Default for LogConfig {
    fn default() -> Self {
        let log_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".luminous")
            .join("logs");

        Self {
            log_dir,
            log_level: Level::INFO,
            json_format: false,
            rotation: Rotation::DAILY,
        }
    }
}

fn default_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("luminous_daemon={level}")))
}

/// Initialize the logging system with the given configuration.
///
/// Sets up dual output to file and stdout, with runtime level control via
/// RUST_LOG, optional JSON format, and rotation.
///
/// # Errors
///
/// Returns an error if the log directory cannot be created.
pub fn init_logging(config: LogConfig) -> Result<()> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = RollingFileAppender::new(config.rotation, &config.log_dir, LOG_FILENAME);

    if config.json_format {
        let json_file_layer = fmt::layer()
            .json()
            .with_writer(file_appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_filter(default_filter(config.log_level));

        let json_stdout_layer = fmt::layer()
            .json()
            .with_writer(std::io::stdout)
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_target(true)
            .with_filter(default_filter(config.log_level));

        tracing_subscriber::registry()
            .with(json_file_layer)
            .with(json_stdout_layer)
            .with(ErrorLayer::default())
            .init();
    } else {
        let file_layer = fmt::layer()
            .with_writer(file_appender)
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .with_ansi(false) // No ANSI colors in files
            .with_filter(default_filter(config.log_level));

        let stdout_layer = fmt::layer()
            .with_writer(std::io::stdout)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(true)
            .with_filter(default_filter(config.log_level));

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stdout_layer)
            .with(ErrorLayer::default())
            .init();
    }

    Ok(())
}

/// Parse rotation period from string.
pub fn parse_rotation(s: &str) -> Rotation {
    match s.to_lowercase().as_str() {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.log_level, Level::INFO);
        assert!(!config.json_format);
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn test_log_config_default_dir_contains_luminous() {
        let config = LogConfig::default();
        assert!(config.log_dir.to_string_lossy().contains(".luminous"));
    }

    #[test]
    fn test_parse_rotation_hourly() {
        let debug = format!("{:?}", parse_rotation("hourly"));
        assert!(debug.to_lowercase().contains("hourly") || debug.contains("3600"));
    }

    #[test]
    fn test_parse_rotation_never() {
        let debug = format!("{:?}", parse_rotation("never"));
        assert!(debug.to_lowercase().contains("never"));
    }

    #[test]
    fn test_parse_rotation_unknown_defaults_to_daily() {
        let unknown = format!("{:?}", parse_rotation("weekly"));
        let daily = format!("{:?}", parse_rotation("daily"));
        assert_eq!(unknown, daily);
    }

    #[test]
    fn test_parse_rotation_case_insensitive() {
        let upper = format!("{:?}", parse_rotation("HOURLY"));
        let lower = format!("{:?}", parse_rotation("hourly"));
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_log_filename_constant() {
        assert_eq!(LOG_FILENAME, "luminous-daemon.log");
    }
}
