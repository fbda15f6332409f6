//! Structured logging and secret-scrubbing utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing a helper that keeps
//! generation API keys out of log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Logs go to stderr so command output on stdout stays clean.
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let result = match config.format.as_str() {
        "json" => registry.with(fmt_layer.json()).try_init(),
        "compact" => registry.with(fmt_layer.compact()).try_init(),
        _ => registry.with(fmt_layer.pretty()).try_init(),
    };

    result.map_err(|e| crate::error::AppError::Internal(format!("Failed to init logging: {}", e)))
}

/// Redacts credentials from text before it is logged.
///
/// Replaces `Bearer <token>` values and `sk-` prefixed API keys with
/// placeholders. Everything else is left untouched.
pub fn sanitize(input: &str) -> String {
    let mut result = input.to_string();

    // Pattern 1: Authorization header values
    result = redact_after(&result, "Bearer ", "[REDACTED_BEARER_TOKEN]");

    // Pattern 2: Provider API keys
    result = redact_after(&result, "sk-", "[REDACTED_API_KEY]");

    result
}

/// Replace every `marker` and the token that follows it with `placeholder`.
fn redact_after(input: &str, marker: &str, placeholder: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(marker) {
        out.push_str(&rest[..pos]);
        let token_start = pos + marker.len();
        // Search for the end of the token (delimiter or end of string)
        let token_end = rest[token_start..]
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',')
            .map(|i| token_start + i)
            .unwrap_or(rest.len());
        out.push_str(placeholder);
        rest = &rest[token_end..];
    }

    out.push_str(rest);
    out
}
