use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EncodingError {
    #[error("NaN cannot be indexed")]
    NaN,

    #[error("Invalid precision step {0}: expected a value between 1 and 64")]
    InvalidPrecisionStep(u32),
}
