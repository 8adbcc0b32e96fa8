//! Command implementations for the ingestion CLI
//!
//! Each subcommand lives in its own module and returns a [`CommandSummary`]
//! once its report has been written:
//! - `analyze`: CSV datasets to locations and a per-day parameter series
//! - `columns`: header inference report
//! - `sample`: summary-service excerpt or parsed preview
//! - `trends`: monthly submission trend and status summary
//! - `search`: free-text submission search

pub mod analyze;
pub mod columns;
pub mod sample;
pub mod search;
pub mod shared;
pub mod trends;

pub use shared::CommandSummary;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Sets up logging from the selected command's flags, then dispatches.
pub async fn run(args: Args) -> Result<CommandSummary> {
    let command = args
        .command
        .ok_or_else(|| Error::invalid_arguments("No command given"))?;

    shared::setup_logging(command.logging());

    match command {
        Commands::Analyze(analyze_args) => analyze::run_analyze(analyze_args).await,
        Commands::Columns(columns_args) => columns::run_columns(columns_args).await,
        Commands::Sample(sample_args) => sample::run_sample(sample_args).await,
        Commands::Trends(trends_args) => trends::run_trends(trends_args).await,
        Commands::Search(search_args) => search::run_search(search_args).await,
    }
}
