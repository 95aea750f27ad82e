use anyhow::Result;
use clap::{Parser, Subcommand};
use tickerbar::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging (written to stderr)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tickerbar::AppCommand {
    fn from(cmd: Commands) -> tickerbar::AppCommand {
        match cmd {
            Commands::Render => tickerbar::AppCommand::Render,
            Commands::Snapshot { group } => tickerbar::AppCommand::Snapshot { group },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Print the menu report (default)
    Render,
    /// Print a JSON snapshot of one group's holdings
    Snapshot {
        /// Title of the asset group, or of the watchlist
        group: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Menu hosts run the plugin without arguments
    let result = match cli.command.unwrap_or(Commands::Render) {
        Commands::Setup => tickerbar::cli::setup::setup(),
        cmd => tickerbar::run_command(cmd.into(), cli.config_path.as_deref()).await,
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
