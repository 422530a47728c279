//! Logging setup
//!
//! Console output is always enabled. With a log directory, a daily rotating
//! file log is added that keeps the last [`MAX_LOG_FILES`] files.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, prelude::*};

pub const MAX_LOG_FILES: usize = 14;
const LOG_PREFIX: &str = "cafe";
const LOG_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// `RUST_LOG` wins over the configured level
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

fn console_layer(level: &str, json_format: bool) -> BoxedLayer {
    if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(level))
            .boxed()
    }
}

fn file_layer(level: &str, json_format: bool, dir: &Path) -> anyhow::Result<BoxedLayer> {
    fs::create_dir_all(dir)?;

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix(LOG_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(dir)?;
    let writer = std::sync::Mutex::new(appender);

    let layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(env_filter(level))
            .boxed()
    } else {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(writer)
            .with_filter(env_filter(level))
            .boxed()
    };
    Ok(layer)
}

/// Initialize logging, optionally mirrored to daily rotating files
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON lines instead of the human readable format
/// * `log_dir` - Directory for file logging (e.g., Some("./logs"))
///
/// # Examples
/// ```no_run
/// use cafe_client::logger::init_logger_with_file;
///
/// init_logger_with_file("debug", false, None)?;
/// init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// Fails when a global subscriber is already installed.
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let mut layers = vec![console_layer(level, json_format)];
    if let Some(dir) = log_dir {
        layers.push(file_layer(level, json_format, Path::new(dir))?);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(level, json_format, log_dir = ?log_dir, "Logger initialized");
    Ok(())
}

/// Console-only logging
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layer_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");
        assert!(file_layer("info", false, &logs).is_ok());
        assert!(logs.is_dir());
    }

    #[test]
    fn test_second_init_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap().to_string();
        let _ = init_logger_with_file("debug", true, Some(&path));
        assert!(init_logger("info", false).is_err());
    }
}
