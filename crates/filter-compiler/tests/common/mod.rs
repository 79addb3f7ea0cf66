#![allow(dead_code)]

use filter_compiler::{
    CompileContext, DryRunCompiler, ErrorKind, FilterCompiler, FilterError, SearchFilterCompiler,
};
use model::{
    core::value::Value,
    execution::expr::{BinaryOp, CompiledExpression},
};
use search_index::{
    FilterNode, Token,
    encoding::{
        bool_token, null_token,
        number::{DEFAULT_PRECISION_STEP, GranularTerms, exact_term},
    },
    filter::leaf::{Bound, RangeFilter, Side},
};

pub fn lit(v: impl Into<Value>) -> CompiledExpression {
    CompiledExpression::literal(v)
}

pub fn path(p: &str) -> CompiledExpression {
    CompiledExpression::path(p)
}

pub fn cmp(attr: &str, op: BinaryOp, value: CompiledExpression) -> CompiledExpression {
    CompiledExpression::binary(path(attr), op, value)
}

pub fn str_term(field: &str, value: &str) -> FilterNode {
    FilterNode::term(field, Token::from(value))
}

pub fn num_term(field: &str, value: f64) -> FilterNode {
    FilterNode::term(format!("{field}\0_d"), exact_term(value).unwrap())
}

pub fn bool_term(field: &str, value: bool) -> FilterNode {
    FilterNode::term(format!("{field}\0_b"), bool_token(value))
}

pub fn null_term(field: &str) -> FilterNode {
    FilterNode::term(format!("{field}\0_n"), null_token())
}

pub fn granular(value: f64) -> GranularTerms {
    GranularTerms::encode(value, DEFAULT_PRECISION_STEP).unwrap()
}

pub fn num_range(
    field: &str,
    min: Option<Bound<GranularTerms>>,
    max: Option<Bound<GranularTerms>>,
) -> FilterNode {
    let field = format!("{field}\0_d");
    let range = match (min, max) {
        (Some(min), Some(max)) => RangeFilter::between(field, min, max),
        (Some(min), None) => RangeFilter::single(field, Side::Min, min),
        (None, Some(max)) => RangeFilter::single(field, Side::Max, max),
        (None, None) => panic!("a range needs a bound"),
    };
    FilterNode::GranularRange(range)
}

pub fn str_range(field: &str, min: Option<Bound<Token>>, max: Option<Bound<Token>>) -> FilterNode {
    let range = match (min, max) {
        (Some(min), Some(max)) => RangeFilter::between(field, min, max),
        (Some(min), None) => RangeFilter::single(field, Side::Min, min),
        (None, Some(max)) => RangeFilter::single(field, Side::Max, max),
        (None, None) => panic!("a range needs a bound"),
    };
    FilterNode::Range(range)
}

/// Compile in both modes with `ctx` and check they agree.
pub fn compile_with(ctx: CompileContext, expr: &CompiledExpression) -> Result<FilterNode, FilterError> {
    let compiled = SearchFilterCompiler::new(ctx.clone()).compile(expr);
    let validated = DryRunCompiler::new(ctx).compile(expr);
    match (&compiled, &validated) {
        (Ok(_), Ok(())) => {}
        (Err(a), Err(b)) => assert_eq!(a, b, "modes report different errors for {expr}"),
        _ => panic!("modes disagree on {expr}: {compiled:?} vs {validated:?}"),
    }
    compiled.map(|filter| filter.into_node())
}

pub fn compile(expr: &CompiledExpression) -> Result<FilterNode, FilterError> {
    compile_with(CompileContext::default(), expr)
}

/// The compiled tree must be `OR(expected)`.
pub fn assert_filter(expr: &CompiledExpression, expected: FilterNode) {
    let node = compile(expr).unwrap_or_else(|e| panic!("{expr} failed to compile: {e}"));
    assert_eq!(node, FilterNode::or(vec![expected]), "unexpected filter for {expr}");
}

pub fn assert_rejected(expr: &CompiledExpression, kind: ErrorKind) {
    match compile(expr) {
        Ok(node) => panic!("{expr} compiled to {node}"),
        Err(e) => assert_eq!(e.kind(), kind, "{expr} failed with {e}"),
    }
}
