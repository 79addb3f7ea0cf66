pub mod config;
pub mod context;
pub mod error;
pub mod filter;

pub use config::CompilerConfig;
pub use context::CompileContext;
pub use error::{ErrorKind, FilterError, Result};
pub use filter::compiler::{DryRunCompiler, FilterCompiler, SearchFilterCompiler};

use model::execution::expr::CompiledExpression;
use search_index::SearchFilter;

/// Compile a condition with the default context.
pub fn compile(expr: &CompiledExpression) -> Result<SearchFilter> {
    SearchFilterCompiler::default().compile(expr)
}

/// Check that a condition compiles with the default context, without
/// building the filter tree.
pub fn validate(expr: &CompiledExpression) -> Result<()> {
    DryRunCompiler::default().compile(expr)
}
