mod common;

use common::*;
use filter_compiler::{CompileContext, CompilerConfig, ErrorKind, FilterError};
use model::execution::expr::{BinaryOp, CompiledExpression};
use search_index::{
    FilterNode,
    filter::leaf::{PhraseFilter, PrefixFilter},
};
use std::num::NonZeroUsize;

fn call(name: &str, args: Vec<CompiledExpression>) -> CompiledExpression {
    CompiledExpression::call(name, args)
}

fn limit(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

#[test]
fn phrase_single_term() {
    assert_filter(
        &call("ir::phrase", vec![path("d.name"), lit("quick")]),
        PhraseFilter::new("name", "quick").into(),
    );
}

// Scenario: offsets between terms, fractional and zero.
// Expected Outcome: offsets truncated toward zero, the first term has none.
#[test]
fn phrase_with_offsets() {
    assert_filter(
        &call(
            "ir::phrase",
            vec![
                path("d.obj.name"),
                lit("quick"),
                lit(5.5),
                lit("brown"),
                lit(0),
                lit("fox"),
            ],
        ),
        PhraseFilter::new("obj.name", "quick")
            .push("brown", 5)
            .push("fox", 0)
            .into(),
    );
}

#[test]
fn function_names_are_case_insensitive() {
    assert_filter(
        &call("IR::Phrase", vec![path("d.name"), lit("quick")]),
        PhraseFilter::new("name", "quick").into(),
    );
    assert_filter(
        &call("IR::STARTS_WITH", vec![path("d.name"), lit("qui")]),
        PrefixFilter::new("name", "qui", limit(128)).into(),
    );
}

#[test]
fn phrase_inside_boolean_expression() {
    assert_filter(
        &CompiledExpression::and(
            call("ir::phrase", vec![path("d.name"), lit("quick")]),
            cmp("d.a", BinaryOp::Equal, lit("1")),
        ),
        FilterNode::and(vec![
            PhraseFilter::new("name", "quick").into(),
            str_term("a", "1"),
        ]),
    );
}

#[test]
fn phrase_arity() {
    let cases = [
        vec![],
        vec![path("d.name")],
        vec![path("d.name"), lit("quick"), lit(3)],
        vec![path("d.name"), lit("quick"), lit(3), lit("brown"), lit(1)],
    ];
    for args in cases {
        assert_rejected(&call("ir::phrase", args), ErrorKind::Arity);
    }
}

#[test]
fn phrase_argument_types() {
    let cases = [
        vec![path("d.name"), lit(1)],
        vec![path("d.name"), path("d.term")],
        vec![path("d.name"), lit("quick"), lit("3"), lit("brown")],
        vec![path("d.name"), lit("quick"), lit(-1), lit("brown")],
        vec![path("d.name"), lit("quick"), lit(1), lit(true)],
        vec![path("d.name"), CompiledExpression::array(vec![lit("quick")])],
    ];
    for args in cases {
        assert_rejected(&call("ir::phrase", args), ErrorKind::Type);
    }
}

#[test]
fn phrase_needs_an_attribute() {
    for target in [
        CompiledExpression::reference("d"),
        lit("d.name"),
        CompiledExpression::indexed(path("d.name"), lit(0)),
    ] {
        assert_rejected(
            &call("ir::phrase", vec![target, lit("quick")]),
            ErrorKind::InvalidAttribute,
        );
    }
}

#[test]
fn starts_with_limits() {
    assert_filter(
        &call("ir::starts_with", vec![path("d.name"), lit("abc")]),
        PrefixFilter::new("name", "abc", limit(128)).into(),
    );
    assert_filter(
        &call("ir::starts_with", vec![path("d.name"), lit("abc"), lit(1024)]),
        PrefixFilter::new("name", "abc", limit(1024)).into(),
    );
    assert_filter(
        &call("ir::starts_with", vec![path("d.name"), lit("abc"), lit(100.5)]),
        PrefixFilter::new("name", "abc", limit(100)).into(),
    );
}

#[test]
fn starts_with_configured_limit() {
    let config = CompilerConfig {
        scored_terms_limit: 16,
        ..CompilerConfig::default()
    };
    let node = compile_with(
        CompileContext::new(config).unwrap(),
        &call("ir::starts_with", vec![path("d.name"), lit("abc")]),
    )
    .unwrap();
    assert_eq!(
        node,
        FilterNode::or(vec![PrefixFilter::new("name", "abc", limit(16)).into()])
    );
}

#[test]
fn starts_with_bad_arguments() {
    let type_errors = [
        vec![path("d.name"), lit("abc"), lit("1024")],
        vec![path("d.name"), lit("abc"), lit(0)],
        vec![path("d.name"), lit(1)],
        vec![path("d.name"), lit("abc"), path("d.limit")],
    ];
    for args in type_errors {
        assert_rejected(&call("ir::starts_with", args), ErrorKind::Type);
    }

    assert_rejected(&call("ir::starts_with", vec![path("d.name")]), ErrorKind::Arity);
    assert_rejected(
        &call("ir::starts_with", vec![lit("name"), lit("abc")]),
        ErrorKind::InvalidAttribute,
    );
}

#[test]
fn unknown_functions_rejected() {
    let expr = call("ir::tfidf", vec![path("d.name")]);
    assert_eq!(
        compile(&expr).unwrap_err(),
        FilterError::UnknownFunction("ir::tfidf".to_string())
    );
    assert_rejected(&expr, ErrorKind::InvalidAttribute);
}

#[test]
fn phrase_zero_offset() {
    assert_filter(
        &call(
            "ir::phrase",
            vec![path("d.name"), lit("quick"), lit(0), lit("brown")],
        ),
        PhraseFilter::new("name", "quick").push("brown", 0).into(),
    );
}
