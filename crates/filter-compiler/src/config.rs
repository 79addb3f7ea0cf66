use search_index::encoding::number::DEFAULT_PRECISION_STEP;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_SCORED_TERMS_LIMIT: usize = 128;
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read the compiler configuration: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse the compiler configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting {setting}: {message}")]
    Invalid { setting: String, message: String },
}

/// Settings that shape the filters the compiler emits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Scored-terms limit of `ir::starts_with` when the call gives none.
    pub scored_terms_limit: usize,

    /// Bits dropped between two precision levels of a numeric range term.
    /// Must match the step the index was built with.
    pub precision_step: u32,

    /// Deepest logical nesting accepted in a condition.
    pub max_depth: usize,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            scored_terms_limit: DEFAULT_SCORED_TERMS_LIMIT,
            precision_step: DEFAULT_PRECISION_STEP,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompilerConfig {
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: CompilerConfig = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scored_terms_limit == 0 {
            return Err(invalid("scored_terms_limit", "must be greater than zero"));
        }
        if self.precision_step == 0 || self.precision_step > 64 {
            return Err(invalid("precision_step", "must be between 1 and 64"));
        }
        if self.max_depth == 0 {
            return Err(invalid("max_depth", "must be greater than zero"));
        }
        Ok(())
    }
}

fn invalid(setting: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        setting: setting.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CompilerConfig::default();
        assert_eq!(config.scored_terms_limit, 128);
        assert_eq!(config.precision_step, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CompilerConfig::from_json(r#"{ "scored_terms_limit": 64 }"#).unwrap();
        assert_eq!(config.scored_terms_limit, 64);
        assert_eq!(config.precision_step, DEFAULT_PRECISION_STEP);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = CompilerConfig::from_json(r#"{ "precision_step": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref setting, .. } if setting == "precision_step"));

        let err = CompilerConfig::from_json(r#"{ "scored_terms_limit": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = CompilerConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "precision_step": 8, "max_depth": 32 }}"#).unwrap();

        let config = CompilerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.precision_step, 8);
        assert_eq!(config.max_depth, 32);
    }

    #[test]
    fn test_missing_file() {
        let err = CompilerConfig::from_file("/nonexistent/compiler.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }
}
