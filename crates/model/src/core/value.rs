use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar literal carried by a condition.
///
/// Integers and floats are kept apart so that callers can round-trip what the
/// parser produced; everything that indexes a value treats them as one
/// numeric type (see [`Value::as_f64`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::String(_) => None,
            Value::Boolean(_) => None,
            Value::Null => None,
        }
    }

    /// Boolean interpretation of a literal used directly as a condition.
    ///
    /// Empty strings, zero, `null` and `false` are falsy; everything else is
    /// truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::String(v) => !v.is_empty(),
            Value::Boolean(v) => *v,
            Value::Null => false,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "\\'")),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Null => write!(f, "null"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(Value::from("1").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::Int(1).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(!Value::Float(0.0).is_truthy());
        assert!(Value::Float(0.1).is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(Value::Boolean(true).is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
    }

    #[test]
    fn test_numbers_share_a_type() {
        assert_eq!(Value::Int(4).type_name(), Value::Float(4.0).type_name());
        assert_eq!(Value::Int(4).as_f64(), Value::Float(4.0).as_f64());
        assert_eq!(Value::from("4").as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("it's").to_string(), "'it\\'s'");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Float(4.5).to_string(), "4.5");
    }
}
