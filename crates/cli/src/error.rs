use filter_compiler::{FilterError, config::ConfigError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read the input file: {0}")]
    InputRead(#[from] std::io::Error),

    #[error("Failed to deserialize the condition as a JSON expression tree: {0}")]
    InputDeserialize(#[from] serde_json::Error),

    #[error("Failed to load the compiler configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to compile the condition: {0}")]
    Compile(#[from] FilterError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),
}
