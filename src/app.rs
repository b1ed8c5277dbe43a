use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::{TableScrubber, TicketAnalysis};
use crate::domain::error::Result;
use crate::infrastructure::config::{ConfigService, Settings};

#[derive(Parser, Debug)]
#[command(
    name = "ticketscrub",
    version,
    about = "Scrub PII from support-ticket spreadsheets and summarize ticket topics"
)]
pub struct Cli {
    /// TOML configuration file (default: ./ticketscrub.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove PII from free-text columns and drop identifying columns
    Scrub {
        /// Ticket export to read (.xlsx or .csv)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Cleaned CSV to write
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Categorize cleaned tickets and write frequency statistics
    Analyze {
        /// Cleaned ticket table to read (.csv or .xlsx)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Directory for the report files
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Execute a parsed command with loaded settings
pub fn execute(cli: Cli, settings: Settings) -> Result<()> {
    match cli.command {
        Command::Scrub { input, output } => {
            let input = input.unwrap_or(settings.paths.scrub_input);
            let output = output.unwrap_or(settings.paths.scrub_output);

            info!("Reading input file {}", input.display());
            let report = TableScrubber::new(settings.scrub).run(&input, &output)?;
            info!(
                "Success! {} cells scrubbed with {} removals",
                report.cells_changed,
                report.total_removals()
            );
        }
        Command::Analyze { input, output_dir } => {
            let input = input.unwrap_or(settings.paths.analysis_input);
            let output_dir = output_dir.unwrap_or(settings.paths.analysis_output_dir);

            TicketAnalysis::new(settings.analysis).run(&input, &output_dir)?;
            info!("Report saved to {}", output_dir.display());
        }
    }
    Ok(())
}

pub fn run() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let result = ConfigService::load(cli.config.as_deref()).and_then(|settings| execute(cli, settings));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
