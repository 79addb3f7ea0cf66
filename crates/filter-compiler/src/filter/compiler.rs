use super::{
    boolean::BooleanCombinator,
    builder::{DryRunBuilder, FilterBuilder, NodeBuilder},
    encoder::ValueEncoder,
    functions::{FunctionFilter, FunctionRegistry},
    mangle::{AttributeMangler, AttributeRef},
    range::{RangeBuilder, SingleBound, bound_position},
};
use crate::{
    context::CompileContext,
    error::{FilterError, Result},
};
use model::execution::expr::{BinaryOp, CompiledExpression};
use search_index::SearchFilter;
use tracing::{debug, trace, warn};

/// A trait for compiling filter expressions into a specific format.
pub trait FilterCompiler {
    /// The type of filter that this compiler produces.
    type Filter;

    /// Compile the AST into a filter.
    fn compile(&self, expr: &CompiledExpression) -> Result<Self::Filter>;
}

/// Compiles conditions into the filter tree executed by the index.
#[derive(Default)]
pub struct SearchFilterCompiler {
    ctx: CompileContext,
    functions: FunctionRegistry,
}

impl SearchFilterCompiler {
    pub fn new(ctx: CompileContext) -> Self {
        SearchFilterCompiler {
            ctx,
            functions: FunctionRegistry::new(),
        }
    }
}

impl FilterCompiler for SearchFilterCompiler {
    type Filter = SearchFilter;

    fn compile(&self, expr: &CompiledExpression) -> Result<SearchFilter> {
        debug!("Compiling filter condition rooted at {}", expr.kind_name());
        let root = walk(&self.ctx, &self.functions, NodeBuilder, expr)?;
        let filter = SearchFilter::with_root(root);
        debug!("Compiled filter: {}", filter);
        Ok(filter)
    }
}

/// Runs every check the search filter compiler runs, without building
/// anything. Accepts exactly the conditions [`SearchFilterCompiler`] accepts.
#[derive(Default)]
pub struct DryRunCompiler {
    ctx: CompileContext,
    functions: FunctionRegistry,
}

impl DryRunCompiler {
    pub fn new(ctx: CompileContext) -> Self {
        DryRunCompiler {
            ctx,
            functions: FunctionRegistry::new(),
        }
    }
}

impl FilterCompiler for DryRunCompiler {
    type Filter = ();

    fn compile(&self, expr: &CompiledExpression) -> Result<()> {
        debug!("Validating filter condition rooted at {}", expr.kind_name());
        walk(&self.ctx, &self.functions, DryRunBuilder, expr)
    }
}

fn walk<B: FilterBuilder>(
    ctx: &CompileContext,
    functions: &FunctionRegistry,
    builder: B,
    expr: &CompiledExpression,
) -> Result<B::Node> {
    ExpressionCompiler::new(ctx, functions, builder)
        .compile_node(expr, 1)
        .inspect_err(|e| {
            warn!(
                "Rejected filter condition rooted at {}: {}",
                expr.kind_name(),
                e
            )
        })
}

fn is_ordering(expr: &CompiledExpression) -> bool {
    matches!(expr, CompiledExpression::Binary { op, .. } if op.is_ordering())
}

/// Recursive walk over a condition, shared by every [`FilterBuilder`].
struct ExpressionCompiler<'a, B: FilterBuilder> {
    ctx: &'a CompileContext,
    functions: &'a FunctionRegistry,
    encoder: ValueEncoder,
    builder: B,
}

impl<'a, B: FilterBuilder> ExpressionCompiler<'a, B> {
    fn new(ctx: &'a CompileContext, functions: &'a FunctionRegistry, builder: B) -> Self {
        ExpressionCompiler {
            ctx,
            functions,
            encoder: ValueEncoder::new(ctx.config().precision_step),
            builder,
        }
    }

    fn combinator(&self) -> BooleanCombinator<'_, B> {
        BooleanCombinator::new(&self.builder, self.encoder)
    }

    fn compile_node(&self, expr: &CompiledExpression, depth: usize) -> Result<B::Node> {
        let max_depth = self.ctx.config().max_depth;
        if depth > max_depth {
            return Err(FilterError::TooDeep(max_depth));
        }
        trace!("Compiling {} at depth {}", expr.kind_name(), depth);

        match expr {
            CompiledExpression::Binary { left, op, right } if op.is_logical() => {
                self.compile_logical(left, *op, right, depth)
            }
            CompiledExpression::Binary { left, op, right } if op.is_membership() => {
                self.compile_membership(left, *op == BinaryOp::NotIn, right)
            }
            CompiledExpression::Binary { left, op, right } => {
                let attribute = self.attribute(left)?;
                self.combinator().comparison(attribute, *op, right)
            }
            CompiledExpression::FunctionCall { name, args } => self.compile_function(name, args),
            other => self.combinator().constant(other),
        }
    }

    fn compile_logical(
        &self,
        left: &CompiledExpression,
        op: BinaryOp,
        right: &CompiledExpression,
        depth: usize,
    ) -> Result<B::Node> {
        let max_depth = self.ctx.config().max_depth;
        if depth + 1 > max_depth {
            return Err(FilterError::TooDeep(max_depth));
        }

        if op == BinaryOp::And && is_ordering(left) && is_ordering(right) {
            let bounds = (self.single_bound(left)?, self.single_bound(right)?);
            if let (Some(a), Some(b)) = bounds {
                return Ok(self.merge_bounds(a, b));
            }
        }

        let left = self.compile_node(left, depth + 1)?;
        let right = self.compile_node(right, depth + 1)?;
        Ok(match op {
            BinaryOp::And => self.combinator().conjunction(left, right),
            _ => self.combinator().disjunction(left, right),
        })
    }

    fn merge_bounds(&self, a: SingleBound, b: SingleBound) -> B::Node {
        match RangeBuilder::merge(a, b) {
            Ok(range) => {
                debug!("Merged opposite bounds into {}", range);
                self.builder.range(range)
            }
            Err((a, b)) => self.combinator().conjunction(
                self.builder.range(a.into_range()),
                self.builder.range(b.into_range()),
            ),
        }
    }

    /// The bound set by an ordering comparison, `None` for anything else.
    fn single_bound(&self, expr: &CompiledExpression) -> Result<Option<SingleBound>> {
        let CompiledExpression::Binary { left, op, right } = expr else {
            return Ok(None);
        };
        let Some((side, inclusive)) = bound_position(*op) else {
            return Ok(None);
        };

        let attribute = self.attribute(left)?;
        RangeBuilder::new(self.encoder)
            .single_bound(attribute, side, inclusive, right)
            .map(Some)
    }

    fn compile_membership(
        &self,
        left: &CompiledExpression,
        negated: bool,
        right: &CompiledExpression,
    ) -> Result<B::Node> {
        let attribute = self.attribute(left)?;
        match right {
            CompiledExpression::Array(items) => {
                self.combinator().membership(&attribute, items, negated)
            }
            CompiledExpression::Range { low, high } => {
                let range = RangeBuilder::new(self.encoder).literal_range(&attribute, low, high)?;
                Ok(self.combinator().range_membership(range, negated))
            }
            other => Err(FilterError::type_mismatch(
                "array or range",
                other.kind_name(),
            )),
        }
    }

    fn compile_function(&self, name: &str, args: &[CompiledExpression]) -> Result<B::Node> {
        Ok(match self.functions.build(name, args, self.ctx)? {
            FunctionFilter::Phrase(phrase) => self.builder.phrase(phrase),
            FunctionFilter::Prefix(prefix) => self.builder.prefix(prefix),
        })
    }

    fn attribute(&self, expr: &CompiledExpression) -> Result<AttributeRef> {
        AttributeMangler::new(self.ctx).resolve(expr)
    }
}
