use search_index::EncodingError;
use thiserror::Error;

/// Broad category of a compilation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An operand that must be a document attribute is not one.
    InvalidAttribute,
    /// A literal has the wrong type, or a constant was expected.
    Type,
    /// A function got the wrong number of arguments.
    Arity,
    /// The expression has a shape the compiler does not accept.
    Syntax,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid attribute access: {0}")]
    InvalidAttribute(String),

    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Range bounds have different types: {low} and {high}")]
    MixedRange { low: String, high: String },

    #[error("Invalid argument for {function}: {message}")]
    InvalidArgument { function: String, message: String },

    #[error("Wrong number of arguments for {function}: expected {expected}, got {found}")]
    Arity {
        function: String,
        expected: String,
        found: usize,
    },

    #[error("Range literal cannot be used as a range bound")]
    NestedRange,

    #[error("Expression is nested deeper than {0} levels")]
    TooDeep(usize),

    #[error("Value cannot be encoded: {0}")]
    Encoding(#[from] EncodingError),
}

impl FilterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::InvalidAttribute(_) => ErrorKind::InvalidAttribute,
            FilterError::UnknownFunction(_) => ErrorKind::InvalidAttribute,
            FilterError::TypeMismatch { .. } => ErrorKind::Type,
            FilterError::MixedRange { .. } => ErrorKind::Type,
            FilterError::InvalidArgument { .. } => ErrorKind::Type,
            FilterError::Encoding(_) => ErrorKind::Type,
            FilterError::Arity { .. } => ErrorKind::Arity,
            FilterError::NestedRange => ErrorKind::Syntax,
            FilterError::TooDeep(_) => ErrorKind::Syntax,
        }
    }

    pub(crate) fn type_mismatch(expected: &str, found: &str) -> Self {
        FilterError::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
