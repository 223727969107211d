//! # Builder Configuration
//!
//! Options that change how a [`FixtureBuilder`](crate::FixtureBuilder) treats
//! incomplete registrations. Values come from code, from `CODEFIXTURE_*`
//! environment variables, or from a TOML/YAML/JSON file.

use crate::constants::ENV_PREFIX;
use crate::error::{FixtureError, FixtureResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Pass models whose type has no writer through unchanged instead of
    /// failing the build
    pub allow_missing_writer: bool,
    /// Cap on dependency resolution passes; `None` derives the cap from the
    /// number of declared relations
    pub max_resolution_passes: Option<usize>,
}

impl BuilderConfig {
    /// Configuration that tolerates missing writers
    pub fn permissive() -> Self {
        Self {
            allow_missing_writer: true,
            ..Self::default()
        }
    }

    pub fn with_max_resolution_passes(mut self, passes: usize) -> Self {
        self.max_resolution_passes = Some(passes);
        self
    }

    /// Load from `CODEFIXTURE_ALLOW_MISSING_WRITER` and
    /// `CODEFIXTURE_MAX_RESOLUTION_PASSES`, defaulting anything unset
    pub fn from_env() -> FixtureResult<Self> {
        Self::from_environment(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load from a configuration file; the format follows the extension
    pub fn from_file(path: impl AsRef<Path>) -> FixtureResult<Self> {
        let path = path.as_ref();
        let config: Self = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?
            .try_deserialize()?;

        tracing::debug!(
            path = %path.display(),
            config = %serde_json::to_string(&config).unwrap_or_else(|_| "[serialization error]".to_string()),
            "Builder configuration loaded from file"
        );

        config.validate()?;
        Ok(config)
    }

    pub(crate) fn from_environment(environment: config::Environment) -> FixtureResult<Self> {
        let config: Self = config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FixtureResult<()> {
        if self.max_resolution_passes == Some(0) {
            return Err(FixtureError::ConfigurationError(
                "max_resolution_passes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
