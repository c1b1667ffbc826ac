use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Map common level spellings (`WARNING`, `CRITICAL`, ...) onto tracing's.
pub fn normalize_level(level: &str) -> String {
    match level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        "TRACE" => "trace".to_string(),
        _ => level.to_string(),
    }
}

/// Install the global subscriber writing to stderr.
///
/// Precedence: `--log-level`, then `RUST_LOG`, then the config file level.
/// Unparseable directives fall back to `info`.
pub fn setup_logging(cli_level: Option<&str>, config_level: &str) -> Result<()> {
    let filter = match cli_level {
        Some(level) => EnvFilter::try_new(normalize_level(level)),
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(normalize_level(config_level))),
    }
    .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;

    Ok(())
}
