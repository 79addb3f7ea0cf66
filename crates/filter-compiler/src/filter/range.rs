use super::{
    encoder::{EncodedBound, ValueEncoder},
    mangle::AttributeRef,
};
use crate::error::{FilterError, Result};
use model::execution::expr::{BinaryOp, CompiledExpression};
use search_index::{
    FilterNode, Token,
    encoding::number::GranularTerms,
    filter::leaf::{Bound, RangeFilter, Side},
};
use std::fmt;

/// A range over one mangled field, plain or granular depending on the type
/// of its bounds.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeSpec {
    Plain(RangeFilter<Token>),
    Granular(RangeFilter<GranularTerms>),
}

impl RangeSpec {
    fn single(field: String, side: Side, inclusive: bool, value: EncodedBound) -> Self {
        match value {
            EncodedBound::Plain(token) => {
                RangeSpec::Plain(RangeFilter::single(field, side, bound(token, inclusive)))
            }
            EncodedBound::Granular(terms) => {
                RangeSpec::Granular(RangeFilter::single(field, side, bound(terms, inclusive)))
            }
        }
    }

    pub fn field(&self) -> &str {
        match self {
            RangeSpec::Plain(r) => r.field(),
            RangeSpec::Granular(r) => r.field(),
        }
    }

    pub fn open_side(&self) -> Option<Side> {
        match self {
            RangeSpec::Plain(r) => r.open_side(),
            RangeSpec::Granular(r) => r.open_side(),
        }
    }

    pub fn merge(self, other: Self) -> std::result::Result<Self, (Self, Self)> {
        match (self, other) {
            (RangeSpec::Plain(a), RangeSpec::Plain(b)) => a
                .merge(b)
                .map(RangeSpec::Plain)
                .map_err(|(a, b)| (RangeSpec::Plain(a), RangeSpec::Plain(b))),
            (RangeSpec::Granular(a), RangeSpec::Granular(b)) => a
                .merge(b)
                .map(RangeSpec::Granular)
                .map_err(|(a, b)| (RangeSpec::Granular(a), RangeSpec::Granular(b))),
            (a, b) => Err((a, b)),
        }
    }
}

fn bound<T>(value: T, inclusive: bool) -> Bound<T> {
    if inclusive {
        Bound::inclusive(value)
    } else {
        Bound::exclusive(value)
    }
}

impl From<RangeSpec> for FilterNode {
    fn from(range: RangeSpec) -> Self {
        match range {
            RangeSpec::Plain(r) => FilterNode::Range(r),
            RangeSpec::Granular(r) => FilterNode::GranularRange(r),
        }
    }
}

impl fmt::Display for RangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSpec::Plain(r) => write!(f, "{r}"),
            RangeSpec::Granular(r) => write!(f, "{r}"),
        }
    }
}

/// A one-sided range produced by `<`, `<=`, `>` or `>=`, still tied to the
/// attribute it came from so it can be merged with its counterpart.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleBound {
    attribute: AttributeRef,
    range: RangeSpec,
}

impl SingleBound {
    pub fn range(&self) -> &RangeSpec {
        &self.range
    }

    pub fn into_range(self) -> RangeSpec {
        self.range
    }
}

/// Side and inclusiveness of the bound an ordering operator sets, with the
/// attribute on the left.
pub fn bound_position(op: BinaryOp) -> Option<(Side, bool)> {
    match op {
        BinaryOp::GreaterThan => Some((Side::Min, false)),
        BinaryOp::GreaterOrEqual => Some((Side::Min, true)),
        BinaryOp::LessThan => Some((Side::Max, false)),
        BinaryOp::LessOrEqual => Some((Side::Max, true)),
        _ => None,
    }
}

pub struct RangeBuilder {
    encoder: ValueEncoder,
}

impl RangeBuilder {
    pub fn new(encoder: ValueEncoder) -> Self {
        RangeBuilder { encoder }
    }

    pub fn single_bound(
        &self,
        attribute: AttributeRef,
        side: Side,
        inclusive: bool,
        value: &CompiledExpression,
    ) -> Result<SingleBound> {
        let value = ValueEncoder::scalar(value)?;
        let (ty, encoded) = self.encoder.encode_bound(value)?;
        let range = RangeSpec::single(attribute.mangled(ty), side, inclusive, encoded);
        Ok(SingleBound { attribute, range })
    }

    /// Range for `attribute IN low..high`; both ends are inclusive and must
    /// be literals of one type.
    pub fn literal_range(
        &self,
        attribute: &AttributeRef,
        low: &CompiledExpression,
        high: &CompiledExpression,
    ) -> Result<RangeSpec> {
        if matches!(low, CompiledExpression::Range { .. })
            || matches!(high, CompiledExpression::Range { .. })
        {
            return Err(FilterError::NestedRange);
        }

        let low = ValueEncoder::scalar(low)?;
        let high = ValueEncoder::scalar(high)?;
        let (low_type, min) = self.encoder.encode_bound(low)?;
        let (high_type, max) = self.encoder.encode_bound(high)?;
        if low_type != high_type {
            return Err(FilterError::MixedRange {
                low: low_type.name().to_string(),
                high: high_type.name().to_string(),
            });
        }

        let field = attribute.mangled(low_type);
        match (min, max) {
            (EncodedBound::Plain(min), EncodedBound::Plain(max)) => Ok(RangeSpec::Plain(
                RangeFilter::between(field, Bound::inclusive(min), Bound::inclusive(max)),
            )),
            (EncodedBound::Granular(min), EncodedBound::Granular(max)) => {
                Ok(RangeSpec::Granular(RangeFilter::between(
                    field,
                    Bound::inclusive(min),
                    Bound::inclusive(max),
                )))
            }
            _ => Err(FilterError::MixedRange {
                low: low.type_name().to_string(),
                high: high.type_name().to_string(),
            }),
        }
    }

    /// Fold `a AND b` into one two-sided range when both bound the same
    /// attribute, with the same value type, from opposite sides.
    pub fn merge(
        a: SingleBound,
        b: SingleBound,
    ) -> std::result::Result<RangeSpec, (SingleBound, SingleBound)> {
        if a.attribute != b.attribute {
            return Err((a, b));
        }

        let SingleBound { attribute, range } = a;
        range.merge(b.range).map_err(|(range_a, range_b)| {
            (
                SingleBound {
                    attribute,
                    range: range_a,
                },
                SingleBound {
                    attribute: b.attribute,
                    range: range_b,
                },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, context::CompileContext, filter::mangle::AttributeMangler};
    use search_index::encoding::number::{DEFAULT_PRECISION_STEP, exact_term};

    fn builder() -> RangeBuilder {
        RangeBuilder::new(ValueEncoder::new(DEFAULT_PRECISION_STEP))
    }

    fn attr(path: &str) -> AttributeRef {
        AttributeMangler::new(&CompileContext::default())
            .resolve(&CompiledExpression::path(path))
            .unwrap()
    }

    fn lit(v: impl Into<model::core::value::Value>) -> CompiledExpression {
        CompiledExpression::literal(v)
    }

    #[test]
    fn test_bound_position() {
        assert_eq!(bound_position(BinaryOp::GreaterThan), Some((Side::Min, false)));
        assert_eq!(bound_position(BinaryOp::LessOrEqual), Some((Side::Max, true)));
        assert_eq!(bound_position(BinaryOp::Equal), None);
    }

    #[test]
    fn test_single_numeric_bound() {
        let bound = builder()
            .single_bound(attr("d.a"), Side::Min, false, &lit(15))
            .unwrap();
        assert_eq!(bound.range().field(), "a\0_d");
        assert_eq!(bound.range().open_side(), Some(Side::Min));
        let RangeSpec::Granular(range) = bound.into_range() else {
            panic!("expected granular range");
        };
        let min = range.min().unwrap();
        assert!(!min.inclusive);
        assert_eq!(min.value.exact(), &exact_term(15.0).unwrap());
    }

    #[test]
    fn test_merge_opposite_bounds() {
        let b = builder();
        let low = b.single_bound(attr("d.a.b"), Side::Min, false, &lit(15)).unwrap();
        let high = b.single_bound(attr("d.a.b"), Side::Max, true, &lit(40)).unwrap();

        let merged = RangeBuilder::merge(high, low).unwrap();
        assert_eq!(merged.open_side(), None);
        assert_eq!(merged.field(), "a.b\0_d");
    }

    #[test]
    fn test_merge_refused() {
        let b = builder();

        // same side
        let x = b.single_bound(attr("d.a"), Side::Min, false, &lit(1)).unwrap();
        let y = b.single_bound(attr("d.a"), Side::Min, true, &lit(2)).unwrap();
        let (x, y) = RangeBuilder::merge(x, y).unwrap_err();
        assert_eq!(x.range().open_side(), Some(Side::Min));
        assert_eq!(y.range().open_side(), Some(Side::Min));

        // different value types
        let x = b.single_bound(attr("d.a"), Side::Min, false, &lit(1)).unwrap();
        let y = b.single_bound(attr("d.a"), Side::Max, true, &lit("z")).unwrap();
        assert!(RangeBuilder::merge(x, y).is_err());

        // same path on another variable
        let x = b.single_bound(attr("d.a"), Side::Min, false, &lit(1)).unwrap();
        let y = b.single_bound(attr("k.a"), Side::Max, true, &lit(5)).unwrap();
        assert!(RangeBuilder::merge(x, y).is_err());
    }

    #[test]
    fn test_literal_range_string() {
        let range = builder()
            .literal_range(&attr("d.a"), &lit("a"), &lit("z"))
            .unwrap();
        let RangeSpec::Plain(range) = range else {
            panic!("expected plain range");
        };
        assert_eq!(range.field(), "a");
        assert_eq!(range.min(), Some(&Bound::inclusive(Token::from("a"))));
        assert_eq!(range.max(), Some(&Bound::inclusive(Token::from("z"))));
    }

    #[test]
    fn test_literal_range_errors() {
        let b = builder();
        let a = attr("d.a");

        let err = b.literal_range(&a, &lit(1), &lit("5")).unwrap_err();
        assert!(matches!(err, FilterError::MixedRange { .. }));
        assert_eq!(err.kind(), ErrorKind::Type);

        let nested = CompiledExpression::range(lit(1), lit(4));
        let err = b.literal_range(&a, &nested, &lit(5)).unwrap_err();
        assert_eq!(err, FilterError::NestedRange);
        assert_eq!(err.kind(), ErrorKind::Syntax);

        let err = b
            .literal_range(&a, &CompiledExpression::path("d.b"), &lit(5))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }
}
