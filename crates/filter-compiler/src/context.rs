use crate::config::{CompilerConfig, ConfigError};

/// Everything the compiler needs besides the expression itself.
#[derive(Debug, Clone, Default)]
pub struct CompileContext {
    config: CompilerConfig,
    iteration_variable: Option<String>,
}

impl CompileContext {
    /// Fails when `config` holds a setting no condition could compile under.
    pub fn new(config: CompilerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(CompileContext {
            config,
            iteration_variable: None,
        })
    }

    /// Only accept attributes rooted at `name`, the variable the query
    /// iterates over. Without it, attributes of any variable are accepted.
    pub fn with_iteration_variable(mut self, name: &str) -> Self {
        self.iteration_variable = Some(name.to_string());
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn iteration_variable(&self) -> Option<&str> {
        self.iteration_variable.as_deref()
    }
}
