use super::{encoder::ValueType, mangle::AttributeMangler};
use crate::{
    context::CompileContext,
    error::{FilterError, Result},
};
use model::{core::value::Value, execution::expr::CompiledExpression};
use search_index::filter::leaf::{PhraseFilter, PrefixFilter};
use std::{collections::HashMap, num::NonZeroUsize};

pub const PHRASE: &str = "ir::phrase";
pub const STARTS_WITH: &str = "ir::starts_with";

/// Leaf produced by a search function.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionFilter {
    Phrase(PhraseFilter),
    Prefix(PrefixFilter),
}

/// Type alias for function implementations. Arguments arrive with their
/// count already checked against the function's [`Arity`].
pub type FunctionImpl = fn(&[CompiledExpression], &CompileContext) -> Result<FunctionFilter>;

/// Accepted argument counts of a function.
#[derive(Debug, Clone, Copy)]
pub enum Arity {
    Range { min: usize, max: usize },
    /// An attribute, a term, then any number of `(gap, term)` pairs.
    TermPairs,
}

impl Arity {
    fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Range { min, max } => (*min..=*max).contains(&count),
            Arity::TermPairs => count >= 2 && count % 2 == 0,
        }
    }

    fn describe(&self) -> String {
        match self {
            Arity::Range { min, max } if min == max => min.to_string(),
            Arity::Range { min, max } => format!("{min} to {max}"),
            Arity::TermPairs => "an attribute, a term and (gap, term) pairs".to_string(),
        }
    }
}

struct FunctionSpec {
    arity: Arity,
    build: FunctionImpl,
}

/// Registry of the functions a condition may call.
pub struct FunctionRegistry {
    functions: HashMap<String, FunctionSpec>,
}

impl FunctionRegistry {
    /// Create a new function registry with all built-in functions
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };

        registry.register(PHRASE, Arity::TermPairs, build_phrase);
        registry.register(STARTS_WITH, Arity::Range { min: 2, max: 3 }, build_starts_with);

        registry
    }

    pub fn register(&mut self, name: &str, arity: Arity, build: FunctionImpl) {
        self.functions
            .insert(name.to_lowercase(), FunctionSpec { arity, build });
    }

    pub fn build(
        &self,
        name: &str,
        args: &[CompiledExpression],
        ctx: &CompileContext,
    ) -> Result<FunctionFilter> {
        let spec = self
            .functions
            .get(&name.to_lowercase())
            .ok_or_else(|| FilterError::UnknownFunction(name.to_string()))?;

        if !spec.arity.accepts(args.len()) {
            return Err(FilterError::Arity {
                function: name.to_string(),
                expected: spec.arity.describe(),
                found: args.len(),
            });
        }

        (spec.build)(args, ctx)
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn build_phrase(args: &[CompiledExpression], ctx: &CompileContext) -> Result<FunctionFilter> {
    let attribute = AttributeMangler::new(ctx).resolve(&args[0])?;
    let first = string_arg(PHRASE, &args[1])?;

    let mut phrase = PhraseFilter::new(attribute.mangled(ValueType::String), first);
    for pair in args[2..].chunks(2) {
        let gap = gap_arg(&pair[0])?;
        let term = string_arg(PHRASE, &pair[1])?;
        phrase = phrase.push(term, gap);
    }

    Ok(FunctionFilter::Phrase(phrase))
}

fn build_starts_with(args: &[CompiledExpression], ctx: &CompileContext) -> Result<FunctionFilter> {
    let attribute = AttributeMangler::new(ctx).resolve(&args[0])?;
    let prefix = string_arg(STARTS_WITH, &args[1])?;

    let limit = match args.get(2) {
        Some(arg) => limit_arg(arg)?,
        None => NonZeroUsize::new(ctx.config().scored_terms_limit).ok_or_else(|| {
            invalid_argument(STARTS_WITH, "configured scored-terms limit is zero")
        })?,
    };

    Ok(FunctionFilter::Prefix(PrefixFilter::new(
        attribute.mangled(ValueType::String),
        prefix,
        limit,
    )))
}

fn string_arg<'a>(function: &str, arg: &'a CompiledExpression) -> Result<&'a str> {
    match arg {
        CompiledExpression::Literal(Value::String(s)) => Ok(s.as_str()),
        other => Err(invalid_argument(
            function,
            &format!("expected a string literal, got {other}"),
        )),
    }
}

fn number_arg(function: &str, arg: &CompiledExpression) -> Result<f64> {
    match arg {
        CompiledExpression::Literal(value) => match value.as_f64() {
            Some(n) if n.is_finite() => Ok(n),
            _ => Err(invalid_argument(
                function,
                &format!("expected a finite number, got {value}"),
            )),
        },
        other => Err(invalid_argument(
            function,
            &format!("expected a numeric literal, got {other}"),
        )),
    }
}

/// Gaps are truncated toward zero: `5.5` skips five positions.
fn gap_arg(arg: &CompiledExpression) -> Result<usize> {
    let gap = number_arg(PHRASE, arg)?;
    if gap < 0.0 {
        return Err(invalid_argument(
            PHRASE,
            &format!("gap must not be negative, got {gap}"),
        ));
    }
    Ok(gap.trunc() as usize)
}

fn limit_arg(arg: &CompiledExpression) -> Result<NonZeroUsize> {
    let limit = number_arg(STARTS_WITH, arg)?;
    let truncated = if limit < 0.0 { 0 } else { limit.trunc() as usize };
    NonZeroUsize::new(truncated).ok_or_else(|| {
        invalid_argument(
            STARTS_WITH,
            &format!("scored-terms limit must be at least 1, got {limit}"),
        )
    })
}

fn invalid_argument(function: &str, message: &str) -> FilterError {
    FilterError::InvalidArgument {
        function: function.to_string(),
        message: message.to_string(),
    }
}
