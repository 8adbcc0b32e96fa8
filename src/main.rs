use clap::Parser;
use cmlre_ingest::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            // Without a signal handler, never resolve rather than abort the command
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = commands::run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(cmlre_ingest::Error::processing_interrupted(
                    "Processing interrupted by user"
                ))
            }
        }
    });

    match result {
        Ok(_summary) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("CMLRE Ingest - Oceanographic Dataset Metrics");
    println!("============================================");
    println!();
    println!("Turn uploaded oceanographic CSV datasets into location lists and");
    println!("per-day parameter series, and summarise submission exports.");
    println!();
    println!("USAGE:");
    println!("    cmlre-ingest <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    analyze     Locations and averaged temperature/salinity/wind series");
    println!("    columns     Show which header maps to each field");
    println!("    sample      Leading lines or a parsed preview of a dataset");
    println!("    trends      Monthly submission trend, status counts and record totals");
    println!("    search      Search submissions by text and status");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Analyze every CSV under a directory as one pooled series:");
    println!("    cmlre-ingest analyze uploads/ --combined");
    println!();
    println!("    # Export a dataset's series as CSV:");
    println!("    cmlre-ingest analyze cruise_42.csv --format csv -o series.csv");
    println!();
    println!("    # Trend over active and archived exports:");
    println!("    cmlre-ingest trends -s submissions.json archived.json");
    println!();
    println!("    # Approved datasets mentioning salinity:");
    println!("    cmlre-ingest search -s submissions.json archived.json --approved salinity");
    println!();
    println!("For detailed help on any command, use:");
    println!("    cmlre-ingest <COMMAND> --help");
}
