//! # Structured Logging Module
//!
//! Environment-aware structured logging for fixture construction. Builders
//! only emit `tracing` events; tests that want to see them call
//! [`init_structured_logging`] once.

use crate::constants::{DEFAULT_ENVIRONMENT, ENVIRONMENT_VARS, LOG_FORMAT_VAR};
use crate::models::ModelRef;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging with environment-specific configuration
pub fn init_structured_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(get_log_level(&environment)));

        let layer = if use_json_format() {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(filter)
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_test_writer()
                .with_filter(filter)
                .boxed()
        };

        // A subscriber installed by the host test harness wins
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(environment = %environment, "Structured logging initialized");
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    ENVIRONMENT_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok())
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "test" | "development" => "debug",
        "production" => "info",
        _ => "debug",
    }
}

fn use_json_format() -> bool {
    std::env::var(LOG_FORMAT_VAR)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// RFC 3339 timestamp attached to structured build events
pub fn timestamp() -> String {
    Utc::now().to_rfc3339()
}

/// Log structured data for a per-model build operation
pub fn log_model_operation(
    operation: &str,
    model_ref: ModelRef,
    model_type: &str,
    status: &str,
    details: Option<&str>,
) {
    tracing::debug!(
        operation = %operation,
        model_ref = %model_ref,
        model_type = %model_type,
        status = %status,
        details = details,
        timestamp = %timestamp(),
        "MODEL_OPERATION"
    );
}

/// Log builder-level operations with optional extra fields
#[macro_export]
macro_rules! log_builder {
    ($level:ident, $operation:expr $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            timestamp = %$crate::logging::timestamp(),
            "{}", $operation
        );
    };
    ($level:ident, $operation:expr, $($key:ident: $value:expr),+ $(,)?) => {
        tracing::$level!(
            operation = %$operation,
            $($key = ?$value,)*
            timestamp = %$crate::logging::timestamp(),
            "{}", $operation
        );
    };
}
