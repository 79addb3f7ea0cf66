use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Compile a condition into a search filter
    Compile {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, help = "Print the filter tree as JSON instead of text")]
        json: bool,

        #[arg(
            long,
            help = "If specified, writes the compiled filter to this file instead of stdout"
        )]
        output: Option<String>,
    },
    /// Check that a condition compiles, without building the filter
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print the parsed condition tree
    Ast {
        #[arg(long, help = "Condition file path (JSON expression tree)")]
        input: String,
    },
}

#[derive(Args)]
pub struct SourceArgs {
    #[arg(long, help = "Condition file path (JSON expression tree)")]
    pub input: String,

    #[arg(long, help = "Compiler config file path")]
    pub config: Option<String>,

    #[arg(
        long,
        help = "Only accept attributes of this variable, e.g. the loop variable `d`"
    )]
    pub variable: Option<String>,
}
