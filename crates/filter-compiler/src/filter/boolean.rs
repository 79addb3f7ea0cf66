use super::{
    builder::FilterBuilder,
    encoder::ValueEncoder,
    mangle::AttributeRef,
    range::{RangeBuilder, RangeSpec, bound_position},
};
use crate::error::{FilterError, Result};
use model::execution::expr::{BinaryOp, CompiledExpression};
use search_index::filter::leaf::TermFilter;

/// Turns comparisons, membership tests and constants into filter nodes.
pub struct BooleanCombinator<'b, B: FilterBuilder> {
    builder: &'b B,
    encoder: ValueEncoder,
}

impl<'b, B: FilterBuilder> BooleanCombinator<'b, B> {
    pub fn new(builder: &'b B, encoder: ValueEncoder) -> Self {
        BooleanCombinator { builder, encoder }
    }

    /// `attribute op value` for the six comparison operators.
    pub fn comparison(
        &self,
        attribute: AttributeRef,
        op: BinaryOp,
        value: &CompiledExpression,
    ) -> Result<B::Node> {
        match op {
            BinaryOp::Equal => self.equality(&attribute, value),
            BinaryOp::NotEqual => Ok(self.builder.not(self.equality(&attribute, value)?)),
            other => {
                let (side, inclusive) = bound_position(other).ok_or_else(|| {
                    FilterError::type_mismatch("comparison operator", &other.to_string())
                })?;
                let bound = RangeBuilder::new(self.encoder).single_bound(
                    attribute, side, inclusive, value,
                )?;
                Ok(self.builder.range(bound.into_range()))
            }
        }
    }

    fn equality(&self, attribute: &AttributeRef, value: &CompiledExpression) -> Result<B::Node> {
        Ok(self.builder.term(self.term(attribute, value)?))
    }

    fn term(&self, attribute: &AttributeRef, value: &CompiledExpression) -> Result<TermFilter> {
        let value = ValueEncoder::scalar(value)?;
        let (ty, token) = self.encoder.encode_term(value)?;
        Ok(TermFilter::new(attribute.mangled(ty), token))
    }

    /// `attribute IN [..]` matches any element; `NOT IN` is the negated
    /// conjunction of the element terms. Elements must be scalar literals.
    pub fn membership(
        &self,
        attribute: &AttributeRef,
        items: &[CompiledExpression],
        negated: bool,
    ) -> Result<B::Node> {
        let terms = items
            .iter()
            .map(|item| self.equality(attribute, item))
            .collect::<Result<Vec<_>>>()?;

        Ok(match (terms.is_empty(), negated) {
            (true, false) => self.builder.match_none(),
            (true, true) => self.builder.match_all(),
            (false, false) => self.builder.or(terms),
            (false, true) => self.builder.not(self.builder.and(terms)),
        })
    }

    /// `attribute IN low..high` is the range itself; `NOT IN` negates it.
    pub fn range_membership(&self, range: RangeSpec, negated: bool) -> B::Node {
        let node = self.builder.range(range);
        if negated {
            self.builder.not(self.builder.or(vec![node]))
        } else {
            node
        }
    }

    pub fn conjunction(&self, left: B::Node, right: B::Node) -> B::Node {
        self.builder.and(vec![left, right])
    }

    pub fn disjunction(&self, left: B::Node, right: B::Node) -> B::Node {
        self.builder.or(vec![left, right])
    }

    /// A value used directly as a condition matches everything or nothing.
    pub fn constant(&self, expr: &CompiledExpression) -> Result<B::Node> {
        if truthiness(expr)? {
            Ok(self.builder.match_all())
        } else {
            Ok(self.builder.match_none())
        }
    }
}

/// Truthiness of a constant. Arrays, objects and ranges are truthy even when
/// empty. Attributes and variables have no value at compile time.
pub fn truthiness(expr: &CompiledExpression) -> Result<bool> {
    match expr {
        CompiledExpression::Literal(value) => Ok(value.is_truthy()),
        CompiledExpression::Array(_)
        | CompiledExpression::Object(_)
        | CompiledExpression::Range { .. } => Ok(true),
        CompiledExpression::Reference(_)
        | CompiledExpression::Attribute { .. }
        | CompiledExpression::IndexedAccess { .. } => Err(FilterError::InvalidAttribute(format!(
            "{expr} cannot be used as a condition on its own"
        ))),
        CompiledExpression::Binary { .. } | CompiledExpression::FunctionCall { .. } => {
            Err(FilterError::type_mismatch("constant value", expr.kind_name()))
        }
    }
}
