use crate::{
    commands::{Commands, SourceArgs},
    error::CliError,
};
use clap::Parser;
use filter_compiler::{
    CompileContext, CompilerConfig, DryRunCompiler, FilterCompiler, SearchFilterCompiler,
};
use model::execution::expr::CompiledExpression;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "filterc",
    version = "0.0.1",
    about = "Compile query conditions into search index filters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Initialize logger
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            source,
            json,
            output,
        } => {
            let (expr, ctx) = load_source(&source).await?;
            let filter = SearchFilterCompiler::new(ctx).compile(&expr)?;
            info!(
                "Compiled {} into a filter of depth {}",
                source.input,
                filter.root().depth()
            );

            match output {
                Some(path) => output::write_filter(&filter, json, path).await?,
                None => output::print_filter(&filter, json)?,
            }
        }
        Commands::Validate { source } => {
            let (expr, ctx) = load_source(&source).await?;
            DryRunCompiler::new(ctx).compile(&expr)?;
            info!("Condition in {} is valid", source.input);
            println!("OK");
        }
        Commands::Ast { input } => {
            let expr = load_expression(&input).await?;
            let json = serde_json::to_string_pretty(&expr).map_err(CliError::JsonSerialize)?;
            println!("{json}");
            println!("{expr}");
        }
    }

    Ok(())
}

async fn load_expression(path: &str) -> Result<CompiledExpression, CliError> {
    let source = tokio::fs::read_to_string(path).await?;
    let expr = serde_json::from_str(&source)?;
    Ok(expr)
}

async fn load_source(args: &SourceArgs) -> Result<(CompiledExpression, CompileContext), CliError> {
    let expr = load_expression(&args.input).await?;

    let config = match &args.config {
        Some(path) => {
            let source = tokio::fs::read_to_string(path).await?;
            CompilerConfig::from_json(&source)?
        }
        None => CompilerConfig::default(),
    };

    let mut ctx = CompileContext::new(config)?;
    if let Some(variable) = &args.variable {
        ctx = ctx.with_iteration_variable(variable);
    }

    Ok((expr, ctx))
}
