//! Diagnostics go to stderr so they never mix with the interactive transcript.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::prelude::AppError;

pub const LOG_ENV: &str = "ADDRESS_BOOK_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Builds the filter from `ADDRESS_BOOK_LOG`, falling back to `warn`
/// (or `debug` when verbose).
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback))
}

pub fn init(verbose: bool, format: LogFormat) -> Result<(), AppError> {
    let filter = env_filter(verbose);

    let result = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .with(filter)
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .try_init(),
    };

    result.map_err(|e| AppError::Logging(e.to_string()))
}
