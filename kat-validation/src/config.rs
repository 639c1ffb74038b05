//! Configuration for the KAT harness.
//!
//! Controls scratch-buffer capacities, which verification passes run and
//! whether execution is timed.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use crate::hash_kat::HashKatError;
use crate::hash_kat::buffers::{INPUT_BUF_SIZE, OUTPUT_BUF_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest digest produced by any supported engine, in bytes.
pub const MAX_DIGEST_SIZE: usize = 20;

/// Harness configuration settings.
///
/// # Examples
/// ```rust
/// use kat_validation::config::HarnessConfig;
///
/// let config = HarnessConfig::new()
///     .with_verify_one_shot(false)
///     .with_name_filter("long")
///     .build()
///     .expect("valid config");
/// assert!(!config.verify_one_shot);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Capacity of the input scratch buffer.
    ///
    /// Bounds the decoded length of short vectors and the chunk length of
    /// long vectors. Default: 4125
    pub input_capacity: usize,

    /// Capacity of the output and expected-output scratch buffers.
    ///
    /// Must hold the largest digest. Default: 64
    pub output_capacity: usize,

    /// Whether short vectors are re-hashed through the one-shot API.
    ///
    /// Default: `true`
    pub verify_one_shot: bool,

    /// Whether the streaming pass is timed.
    ///
    /// Default: `true`
    pub measure_time: bool,

    /// Only run vectors whose test case or vector name contains this string.
    ///
    /// Default: `None`
    pub name_filter: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            input_capacity: INPUT_BUF_SIZE,
            output_capacity: OUTPUT_BUF_SIZE,
            verify_one_shot: true,
            measure_time: true,
            name_filter: None,
        }
    }
}

impl HarnessConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a JSON document; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `HashKatError::InvalidConfig` if the JSON is malformed or the
    /// resulting configuration fails validation.
    pub fn from_json(json: &str) -> Result<Self, HashKatError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| HashKatError::InvalidConfig(e.to_string()))?;
        config.build()
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns `HashKatError::InvalidConfig` if the file cannot be read or parsed.
    pub fn from_json_file(path: &Path) -> Result<Self, HashKatError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            HashKatError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// Set the input buffer capacity and return self for method chaining.
    #[must_use]
    pub fn with_input_capacity(mut self, capacity: usize) -> Self {
        self.input_capacity = capacity;
        self
    }

    /// Set the output buffer capacity and return self for method chaining.
    #[must_use]
    pub fn with_output_capacity(mut self, capacity: usize) -> Self {
        self.output_capacity = capacity;
        self
    }

    /// Enable or disable the one-shot pass and return self for method chaining.
    #[must_use]
    pub fn with_verify_one_shot(mut self, enabled: bool) -> Self {
        self.verify_one_shot = enabled;
        self
    }

    /// Enable or disable timing and return self for method chaining.
    #[must_use]
    pub fn with_measure_time(mut self, enabled: bool) -> Self {
        self.measure_time = enabled;
        self
    }

    /// Restrict execution to matching names and return self for method chaining.
    #[must_use]
    pub fn with_name_filter(mut self, filter: impl Into<String>) -> Self {
        self.name_filter = Some(filter.into());
        self
    }

    /// Whether a vector of `test_case` named `vector` is selected by the filter.
    #[must_use]
    pub fn selects(&self, test_case: &str, vector: &str) -> bool {
        self.name_filter
            .as_deref()
            .map_or(true, |filter| test_case.contains(filter) || vector.contains(filter))
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `HashKatError::InvalidConfig` if the input capacity is zero or
    /// the output capacity cannot hold a digest.
    pub fn validate(&self) -> Result<(), HashKatError> {
        if self.input_capacity == 0 {
            return Err(HashKatError::InvalidConfig(
                "input_capacity must be greater than zero".to_string(),
            ));
        }
        if self.output_capacity < MAX_DIGEST_SIZE {
            return Err(HashKatError::InvalidConfig(format!(
                "output_capacity {} cannot hold a {MAX_DIGEST_SIZE}-byte digest",
                self.output_capacity
            )));
        }
        Ok(())
    }

    /// Validate and return the configuration.
    ///
    /// # Errors
    ///
    /// See [`HarnessConfig::validate`].
    pub fn build(self) -> Result<Self, HashKatError> {
        self.validate()?;
        Ok(self)
    }
}
