use super::encoder::ValueType;
use crate::{
    context::CompileContext,
    error::{FilterError, Result},
};
use model::execution::expr::CompiledExpression;
use std::fmt;

/// A static member path on a variable, e.g. `d.a.b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttributeRef {
    root: String,
    path: Vec<String>,
}

impl AttributeRef {
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The path without the variable: `a.b` for `d.a.b`.
    pub fn dotted(&self) -> String {
        self.path.join(".")
    }

    /// Field name the index stores values of type `ty` under.
    pub fn mangled(&self, ty: ValueType) -> String {
        mangle(&self.dotted(), ty)
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.root, self.dotted())
    }
}

pub fn mangle(path: &str, ty: ValueType) -> String {
    match ty.suffix() {
        "" => path.to_string(),
        suffix => format!("{path}\0{suffix}"),
    }
}

/// Resolves operands that must name a document attribute.
pub struct AttributeMangler<'a> {
    ctx: &'a CompileContext,
}

impl<'a> AttributeMangler<'a> {
    pub fn new(ctx: &'a CompileContext) -> Self {
        AttributeMangler { ctx }
    }

    pub fn resolve(&self, expr: &CompiledExpression) -> Result<AttributeRef> {
        let mut path = Vec::new();
        let mut current = expr;

        let root = loop {
            match current {
                CompiledExpression::Attribute { target, name } => {
                    path.push(name.clone());
                    current = &**target;
                }
                CompiledExpression::Reference(name) => break name,
                CompiledExpression::IndexedAccess { .. } => {
                    return Err(FilterError::InvalidAttribute(format!(
                        "computed member access in {expr} is not supported"
                    )));
                }
                other => {
                    return Err(FilterError::InvalidAttribute(format!(
                        "expected an attribute, got {} {expr}",
                        other.kind_name()
                    )));
                }
            }
        };

        if path.is_empty() {
            return Err(FilterError::InvalidAttribute(format!(
                "variable {root} used without an attribute"
            )));
        }

        if let Some(variable) = self.ctx.iteration_variable() {
            if variable != root.as_str() {
                return Err(FilterError::InvalidAttribute(format!(
                    "{expr} does not belong to the iteration variable {variable}"
                )));
            }
        }

        path.reverse();
        Ok(AttributeRef {
            root: root.clone(),
            path,
        })
    }
}
