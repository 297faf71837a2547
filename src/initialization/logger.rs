//! Logger initialization.

use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` is read first and `level` then overrides it for this crate,
/// so `RUST_LOG=reqwest=trace` still works next to `--log-level`. HTTP stack
/// crates are clamped to `Info`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a global logger is already
/// installed.
///
/// ```bash
/// RUST_LOG=debug bing_webmaster --log-level info sites
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(true);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("bing_webmaster", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{}", line)
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    chrono::Local::now().format("%H:%M:%S"),
                    record.target().cyan(),
                    colored_level(record.level()),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;
    Ok(())
}

/// One structured log record: `{"ts":…,"level":…,"target":…,"msg":…}`.
fn json_line(ts_millis: i64, level: Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": message,
    })
    .to_string()
}

fn colored_level(level: Level) -> ColoredString {
    let name = level.as_str();
    match level {
        Level::Error => name.red(),
        Level::Warn => name.yellow(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.purple(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(
            1_700_000_000_000,
            Level::Warn,
            "bing_webmaster::execution",
            "GetUserSites attempt 1 failed (\"timeout\"), retrying",
        );
        let parsed: Value = serde_json::from_str(&line).expect("line is valid JSON");

        assert_eq!(parsed["ts"], 1_700_000_000_000i64);
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["target"], "bing_webmaster::execution");
        assert_eq!(
            parsed["msg"],
            "GetUserSites attempt 1 failed (\"timeout\"), retrying"
        );
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_colored_level_keeps_level_name() {
        assert!(colored_level(Level::Error).to_string().contains("ERROR"));
        assert!(colored_level(Level::Debug).to_string().contains("DEBUG"));
    }

    #[test]
    fn test_second_initialization_is_an_error_not_a_panic() {
        // Only one global logger per process: whichever call comes second fails
        let first = init_logger_with(LevelFilter::Info, LogFormat::Plain);
        let second = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(second.is_err());
        if let Err(error) = first {
            assert!(matches!(error, InitializationError::LoggerError(_)));
        }
    }
}
