use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

mod commands;
mod context;
mod logging;
mod render;

use commands::RequestArgs;
use context::AppContext;

#[derive(Parser, Debug)]
#[command(name = "plancmp")]
#[command(about = "plan-compare - compare healthcare plans with AI21 Jamba", long_about = None)]
struct Cli {
    /// Directory holding the plan `.txt` files (overrides config.toml)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the plan documents available for comparison
    Plans,
    /// List the preset questions and their indices
    Questions,
    /// Compare the selected plans against a question
    Compare {
        #[command(flatten)]
        request: RequestArgs,
        /// Also print the raw API response as JSON
        #[arg(long)]
        raw: bool,
        /// Print the answer without markdown escaping
        #[arg(long)]
        plain: bool,
    },
    /// Print the prompt that would be sent, without calling the API
    Prompt {
        #[command(flatten)]
        request: RequestArgs,
    },
    /// Start the interactive comparison shell
    Shell,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let _log_guard = logging::init_logging(cli.verbose);

    let context = AppContext::load(cli.config, cli.data_dir)?;

    match cli.command {
        Commands::Plans => commands::plans::run(&context).await,
        Commands::Questions => {
            commands::questions::run();
            Ok(ExitCode::SUCCESS)
        }
        Commands::Compare {
            request,
            raw,
            plain,
        } => commands::compare::run(&context, &request, render::RenderOptions { raw, plain }).await,
        Commands::Prompt { request } => commands::prompt::run(&context, &request).await,
        Commands::Shell => commands::shell::run(&context).await,
    }
}
