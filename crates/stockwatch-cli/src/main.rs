mod check;
mod parse;
mod state;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "stockwatch")]
#[command(about = "Watch retail stock availability and alert on changes")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one check cycle: fetch, normalize, compare, notify
    Check {
        /// Print the would-be notification; never send or write state
        #[arg(long)]
        dry_run: bool,

        /// Watch file to use instead of `STOCKWATCH_WATCH_PATH`
        #[arg(long)]
        watch: Option<PathBuf>,
    },
    /// Normalize a saved fulfillment response and print the report
    Parse {
        /// File holding the raw response body
        file: PathBuf,

        /// Treat the file as an HTML page with an embedded payload
        #[arg(long)]
        embedded: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Watch file to use instead of `STOCKWATCH_WATCH_PATH`
        #[arg(long)]
        watch: Option<PathBuf>,
    },
    /// Inspect or reset the last notified report
    State {
        #[command(subcommand)]
        command: StateCommands,
    },
}

#[derive(Debug, Subcommand)]
enum StateCommands {
    /// Print the last notified report
    Show,
    /// Forget the last notified report so the next hit notifies again
    Clear,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = stockwatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match command {
        Commands::Check { dry_run, watch } => {
            let watch_path = watch.unwrap_or_else(|| config.watch_path.clone());
            check::run_check(&config, &watch_path, dry_run).await?;
        }
        Commands::Parse {
            file,
            embedded,
            json,
            watch,
        } => {
            let watch_path = watch.unwrap_or_else(|| config.watch_path.clone());
            parse::run_parse(&watch_path, &file, embedded, json).await?;
        }
        Commands::State { command } => match command {
            StateCommands::Show => state::run_state_show(&config).await?,
            StateCommands::Clear => state::run_state_clear(&config).await?,
        },
    }

    Ok(())
}
