use crate::error::{FunalyticsError, Result};
use tracing_subscriber::EnvFilter;

/// Level implied by the CLI flags when `RUST_LOG` is unset.
pub fn default_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8, quiet: bool) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let level = default_level(verbose, quiet);
            EnvFilter::try_new(level)
                .map_err(|e| FunalyticsError::Telemetry(format!("invalid filter '{level}': {e}")))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(|e| FunalyticsError::Telemetry(e.to_string()))
}
