use crate::error::{FilterError, Result};
use model::{core::value::Value, execution::expr::CompiledExpression};
use search_index::{
    Token,
    encoding::{
        bool_token,
        null_token,
        number::{GranularTerms, exact_term},
    },
};

/// Type of an indexed value. Each type lives in its own field so that
/// `d.a == 1` never matches a document where `a` is `"1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Boolean,
    Null,
    Number,
}

impl ValueType {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
            Value::Int(_) | Value::Float(_) => ValueType::Number,
        }
    }

    /// Suffix appended to the attribute path; strings have none.
    pub fn suffix(&self) -> &'static str {
        match self {
            ValueType::String => "",
            ValueType::Boolean => "_b",
            ValueType::Null => "_n",
            ValueType::Number => "_d",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Null => "null",
            ValueType::Number => "number",
        }
    }
}

/// A range bound in the representation its type is indexed with.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedBound {
    Plain(Token),
    Granular(GranularTerms),
}

/// Turns literals into the tokens the index stores.
#[derive(Debug, Clone, Copy)]
pub struct ValueEncoder {
    precision_step: u32,
}

impl ValueEncoder {
    pub fn new(precision_step: u32) -> Self {
        ValueEncoder { precision_step }
    }

    /// The scalar literal behind `expr`; anything else is a type error.
    pub fn scalar(expr: &CompiledExpression) -> Result<&Value> {
        match expr {
            CompiledExpression::Literal(value) => Ok(value),
            other => Err(FilterError::type_mismatch(
                "scalar literal",
                other.kind_name(),
            )),
        }
    }

    /// Token for an exact match on `value`.
    pub fn encode_term(&self, value: &Value) -> Result<(ValueType, Token)> {
        let token = match value {
            Value::String(s) => Token::from(s.as_str()),
            Value::Boolean(b) => bool_token(*b),
            Value::Null => null_token(),
            Value::Int(_) | Value::Float(_) => exact_term(number(value)?)?,
        };
        Ok((ValueType::of(value), token))
    }

    /// Bound for a range over `value`. Numbers get every precision level.
    pub fn encode_bound(&self, value: &Value) -> Result<(ValueType, EncodedBound)> {
        let bound = match value {
            Value::Int(_) | Value::Float(_) => {
                EncodedBound::Granular(GranularTerms::encode(number(value)?, self.precision_step)?)
            }
            other => EncodedBound::Plain(self.encode_term(other)?.1),
        };
        Ok((ValueType::of(value), bound))
    }
}

fn number(value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| FilterError::type_mismatch("number", value.type_name()))
}
