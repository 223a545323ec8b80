mod commands;
mod config;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use provex_engine::Domain;

use commands::explain::{cmd_explain, ExplainOptions};
use commands::rule::cmd_rule;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Proof trees for tuples of an evaluated Datalog program.
#[derive(Parser)]
#[command(
    name = "provex",
    version,
    about = "Proof trees for tuples of an evaluated Datalog program"
)]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Print subproof cache statistics to stderr
    #[arg(long, global = true)]
    verbose: bool,

    /// Path to a provex.toml configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Explain how a tuple was derived
    Explain {
        /// Path to the program JSON file
        program: PathBuf,
        /// Relation of the tuple to explain
        relation: String,
        /// Tuple arguments, one per user column
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
        /// Rule applications expanded before a branch becomes a subproof reference
        #[arg(long)]
        depth: Option<usize>,
        /// Subproof reference to expand afterwards, written as in the tree: rel(idx)
        #[arg(long)]
        expand: Vec<String>,
        /// Depth budget for each --expand (defaults to the configured depth limit)
        #[arg(long)]
        expand_depth: Option<usize>,
    },

    /// Show the source text of a relation's rules
    Rule {
        /// Path to the program JSON file
        program: PathBuf,
        /// Relation whose rules to show
        relation: String,
        /// Rule number; all rules of the relation when omitted
        rule_id: Option<Domain>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Explain {
            program,
            relation,
            args,
            depth,
            expand,
            expand_depth,
        } => {
            let settings = match config::load(cli.config.as_deref()) {
                Ok(s) => s,
                Err(e) => fail(&e, cli.output, cli.quiet),
            };
            let options = ExplainOptions {
                depth,
                expand: &expand,
                expand_depth,
                settings: settings.explain,
                verbose: cli.verbose,
            };
            cmd_explain(&program, &relation, &args, options, cli.output, cli.quiet);
        }
        Commands::Rule {
            program,
            relation,
            rule_id,
        } => {
            cmd_rule(&program, &relation, rule_id, cli.output, cli.quiet);
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
    }
}

/// Report `msg` and exit with status 1.
pub(crate) fn fail(msg: &str, output: OutputFormat, quiet: bool) -> ! {
    report_error(msg, output, quiet);
    process::exit(1);
}
