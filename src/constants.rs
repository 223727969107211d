//! # Builder Constants
//!
//! Environment variable names and defaults shared by configuration and logging.

/// Prefix for every environment variable the crate reads
pub const ENV_PREFIX: &str = "CODEFIXTURE";

/// Environment variables consulted, in order, to detect the running environment
pub const ENVIRONMENT_VARS: [&str; 2] = ["CODEFIXTURE_ENV", "APP_ENV"];

/// Selects the log output format (`json` or anything else for plain text)
pub const LOG_FORMAT_VAR: &str = "CODEFIXTURE_LOG_FORMAT";

pub const DEFAULT_ENVIRONMENT: &str = "test";

/// Operation names used in structured build logs
pub mod operations {
    pub const MODEL_ADDED: &str = "model.added";
    pub const RELATION_ADDED: &str = "relation.added";
    pub const ORDER_RESOLVED: &str = "build.order_resolved";
    pub const MODEL_CONNECTED: &str = "model.connected";
    pub const MODEL_WRITTEN: &str = "model.written";
    pub const MODEL_PASSED_THROUGH: &str = "model.passed_through";
    pub const BUILD_COMPLETED: &str = "build.completed";
    pub const BUILD_FAILED: &str = "build.failed";
}
