//! Error types for fixture construction.
//!

use crate::models::ModelRef;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    /// A relation or lookup named a ref with no stored (or no finalized) model
    #[error("Model ref {model_ref} not found")]
    ModelRefNotFound { model_ref: ModelRef },

    /// A model without `Default` was added but no constructor is registered
    #[error("Constructor for {type_name} is not registered")]
    ConstructorNotFound { type_name: &'static str },

    /// No writer is registered for the model's type
    #[error("Writer for {type_name} is not found (model {model_ref})")]
    WriterNotFound {
        model_ref: ModelRef,
        type_name: &'static str,
    },

    /// A registered writer reported failure
    #[error("Writer for {type_name} failed on model {model_ref}: {source}")]
    WriterFailed {
        model_ref: ModelRef,
        type_name: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// A model was requested or connected under an incompatible type
    #[error("Invalid type for model {model_ref}: expected {expected}, found {found}")]
    InvalidType {
        model_ref: ModelRef,
        expected: &'static str,
        found: &'static str,
    },

    /// Rank relaxation did not converge within the pass limit
    #[error(
        "Cyclic dependency detected: ranks still changing after {passes} passes ({} model(s) involved)",
        .unresolved.len()
    )]
    CyclicDependency {
        passes: usize,
        unresolved: Vec<ModelRef>,
    },

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl FixtureError {
    /// Whether the error indicates a contract violation between the place a
    /// model was registered and the place it was consumed.
    pub fn is_programmer_error(&self) -> bool {
        matches!(self, FixtureError::InvalidType { .. })
    }
}

impl From<config::ConfigError> for FixtureError {
    fn from(error: config::ConfigError) -> Self {
        FixtureError::ConfigurationError(error.to_string())
    }
}

pub type FixtureResult<T> = std::result::Result<T, FixtureError>;
