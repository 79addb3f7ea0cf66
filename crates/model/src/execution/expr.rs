use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parsed condition tree handed over by the query layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompiledExpression {
    Literal(Value),
    /// A variable, e.g. the loop variable `d` in `FOR d IN ...`.
    Reference(String),
    /// Static member access: `target.name`.
    Attribute {
        target: Box<CompiledExpression>,
        name: String,
    },
    /// Computed member access: `target[index]`.
    IndexedAccess {
        target: Box<CompiledExpression>,
        index: Box<CompiledExpression>,
    },
    Array(Vec<CompiledExpression>),
    Object(Vec<(String, CompiledExpression)>),
    /// Inclusive range literal `low..high`.
    Range {
        low: Box<CompiledExpression>,
        high: Box<CompiledExpression>,
    },
    Binary {
        left: Box<CompiledExpression>,
        op: BinaryOp,
        right: Box<CompiledExpression>,
    },
    FunctionCall {
        name: String,
        args: Vec<CompiledExpression>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    // Comparison
    Equal,
    NotEqual,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    // Membership
    In,
    NotIn,
    // Logical
    And,
    Or,
}

impl BinaryOp {
    pub fn is_ordering(&self) -> bool {
        matches!(
            self,
            BinaryOp::GreaterThan
                | BinaryOp::LessThan
                | BinaryOp::GreaterOrEqual
                | BinaryOp::LessOrEqual
        )
    }

    pub fn is_membership(&self) -> bool {
        matches!(self, BinaryOp::In | BinaryOp::NotIn)
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryOp::Equal => write!(f, "=="),
            BinaryOp::NotEqual => write!(f, "!="),
            BinaryOp::GreaterThan => write!(f, ">"),
            BinaryOp::LessThan => write!(f, "<"),
            BinaryOp::GreaterOrEqual => write!(f, ">="),
            BinaryOp::LessOrEqual => write!(f, "<="),
            BinaryOp::In => write!(f, "IN"),
            BinaryOp::NotIn => write!(f, "NOT IN"),
            BinaryOp::And => write!(f, "AND"),
            BinaryOp::Or => write!(f, "OR"),
        }
    }
}

impl CompiledExpression {
    pub fn literal(value: impl Into<Value>) -> Self {
        CompiledExpression::Literal(value.into())
    }

    pub fn null() -> Self {
        CompiledExpression::Literal(Value::Null)
    }

    pub fn reference(name: &str) -> Self {
        CompiledExpression::Reference(name.to_string())
    }

    /// Builds a chain of static member accesses from a dotted path. The first
    /// segment becomes the root variable: `path("d.a.b")` is `d.a.b`.
    pub fn path(path: &str) -> Self {
        let mut segments = path.split('.');
        let root = segments.next().unwrap_or_default();
        segments.fold(CompiledExpression::reference(root), |target, name| {
            CompiledExpression::attribute(target, name)
        })
    }

    pub fn attribute(target: CompiledExpression, name: &str) -> Self {
        CompiledExpression::Attribute {
            target: Box::new(target),
            name: name.to_string(),
        }
    }

    pub fn indexed(target: CompiledExpression, index: CompiledExpression) -> Self {
        CompiledExpression::IndexedAccess {
            target: Box::new(target),
            index: Box::new(index),
        }
    }

    pub fn array(items: Vec<CompiledExpression>) -> Self {
        CompiledExpression::Array(items)
    }

    pub fn range(low: CompiledExpression, high: CompiledExpression) -> Self {
        CompiledExpression::Range {
            low: Box::new(low),
            high: Box::new(high),
        }
    }

    pub fn binary(left: CompiledExpression, op: BinaryOp, right: CompiledExpression) -> Self {
        CompiledExpression::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn and(left: CompiledExpression, right: CompiledExpression) -> Self {
        Self::binary(left, BinaryOp::And, right)
    }

    pub fn or(left: CompiledExpression, right: CompiledExpression) -> Self {
        Self::binary(left, BinaryOp::Or, right)
    }

    pub fn call(name: &str, args: Vec<CompiledExpression>) -> Self {
        CompiledExpression::FunctionCall {
            name: name.to_string(),
            args,
        }
    }

    /// Short label of the node kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CompiledExpression::Literal(_) => "literal",
            CompiledExpression::Reference(_) => "reference",
            CompiledExpression::Attribute { .. } => "attribute access",
            CompiledExpression::IndexedAccess { .. } => "indexed access",
            CompiledExpression::Array(_) => "array",
            CompiledExpression::Object(_) => "object",
            CompiledExpression::Range { .. } => "range",
            CompiledExpression::Binary { .. } => "binary expression",
            CompiledExpression::FunctionCall { .. } => "function call",
        }
    }
}

impl fmt::Display for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompiledExpression::Literal(v) => write!(f, "{v}"),
            CompiledExpression::Reference(name) => write!(f, "{name}"),
            CompiledExpression::Attribute { target, name } => write!(f, "{target}.{name}"),
            CompiledExpression::IndexedAccess { target, index } => write!(f, "{target}[{index}]"),
            CompiledExpression::Array(items) => {
                let items = items.iter().map(|i| i.to_string()).collect::<Vec<_>>();
                write!(f, "[{}]", items.join(", "))
            }
            CompiledExpression::Object(entries) => {
                let entries = entries
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>();
                write!(f, "{{{}}}", entries.join(", "))
            }
            CompiledExpression::Range { low, high } => write!(f, "{low}..{high}"),
            CompiledExpression::Binary { left, op, right } => write!(f, "({left} {op} {right})"),
            CompiledExpression::FunctionCall { name, args } => {
                let args = args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
                write!(f, "{name}({})", args.join(", "))
            }
        }
    }
}
