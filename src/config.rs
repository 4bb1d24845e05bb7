//! Camera configuration.
//!
//! Configuration is plain serde data. Validation uses stillwater's
//! `Validation` so every problem is reported at once instead of only the
//! first one.

use crate::core::PowerOffPolicy;
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Default label used in logs and checkpoints.
pub const DEFAULT_LABEL: &str = "camera";

/// Default number of history records a camera keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

/// Problems found in a [`CameraConfig`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("label must not be empty")]
    EmptyLabel,

    #[error("history limit must be greater than zero")]
    ZeroHistoryLimit,
}

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse camera config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid camera config: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Settings for a [`crate::camera::Camera`].
///
/// # Example
///
/// ```rust
/// use shutterbug::config::{CameraConfig, DEFAULT_HISTORY_LIMIT};
/// use shutterbug::core::PowerOffPolicy;
///
/// let config = CameraConfig::from_json(
///     r#"{ "label": "rear", "power_off_policy": "drop_while_writing" }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.label, "rear");
/// assert_eq!(config.power_off_policy, PowerOffPolicy::DropWhileWriting);
/// assert_eq!(config.history_limit, Some(DEFAULT_HISTORY_LIMIT));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Name used in log fields and checkpoints
    pub label: String,
    /// Handling of power-off while writes are outstanding
    pub power_off_policy: PowerOffPolicy,
    /// Maximum number of history records kept, [`DEFAULT_HISTORY_LIMIT`]
    /// unless set; unbounded when `None` (`null` in JSON)
    pub history_limit: Option<usize>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            power_off_policy: PowerOffPolicy::default(),
            history_limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

impl CameraConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_policy(mut self, policy: PowerOffPolicy) -> Self {
        self.power_off_policy = policy;
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Check every rule, accumulating all violations.
    pub fn check(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let label = if self.label.trim().is_empty() {
            Validation::fail(ConfigViolation::EmptyLabel)
        } else {
            Validation::success(())
        };

        let limit = if self.history_limit == Some(0) {
            Validation::fail(ConfigViolation::ZeroHistoryLimit)
        } else {
            Validation::success(())
        };

        Validation::all_vec(vec![label, limit]).map(|_| ())
    }

    /// Like [`CameraConfig::check`], as a `Result`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.check() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CameraConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.label, DEFAULT_LABEL);
        assert_eq!(config.power_off_policy, PowerOffPolicy::Deferred);
    }

    #[test]
    fn default_history_is_bounded() {
        assert_eq!(
            CameraConfig::default().history_limit,
            Some(DEFAULT_HISTORY_LIMIT)
        );

        let unbounded = CameraConfig::from_json(r#"{ "history_limit": null }"#).unwrap();
        assert_eq!(unbounded.history_limit, None);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = CameraConfig::from_json("{}").unwrap();
        assert_eq!(config, CameraConfig::default());
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = CameraConfig::default()
            .with_label("  ")
            .with_history_limit(0);

        match config.check() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| *e == ConfigViolation::EmptyLabel));
                assert!(errors.iter().any(|e| *e == ConfigViolation::ZeroHistoryLimit));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn invalid_json_config_is_rejected() {
        let result = CameraConfig::from_json(r#"{ "label": "" }"#);
        match result {
            Err(ConfigError::Invalid(violations)) => {
                assert_eq!(violations, vec![ConfigViolation::EmptyLabel]);
            }
            other => panic!("Expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = CameraConfig::from_json("{ label");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let result = CameraConfig::from_json(r#"{ "power_off_policy": "sometimes" }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_error_lists_every_violation() {
        let err = ConfigError::Invalid(vec![
            ConfigViolation::EmptyLabel,
            ConfigViolation::ZeroHistoryLimit,
        ]);
        assert_eq!(
            err.to_string(),
            "Invalid camera config: label must not be empty; history limit must be greater than zero"
        );
    }
}
