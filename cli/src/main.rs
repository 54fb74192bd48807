//! # cfnkit Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the `cfnkit` CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to appropriate command handlers
//!
//! ## Examples
//!
//! ```bash
//! # Merge a generated fragment into a hand-written stack
//! cfnkit merge lambda.json stack.json -o build/stack.json
//!
//! # Describe a resource for a dependent function
//! cfnkit -v discover stack.json MyQueue
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to appropriate command handler
//! 4. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Handles specific command logic (merge, discover, outputs)
mod common; // Shared utilities (filesystem I/O)
mod core; // Core infrastructure (errors, config)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "cfnkit",
    about = "Compose CloudFormation templates",
    long_about = "Merge CloudFormation templates without clobbering resources, and render\n\
                  discovery documents describing a resource's referenceable attributes.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Merge SOURCE into DESTINATION, failing on duplicate logical names.
    #[command(alias = "m")]
    Merge(commands::merge::MergeArgs),
    /// Print the discovery document for a resource.
    #[command(alias = "d")]
    Discover(commands::discover::DiscoverArgs),
    /// List the output attributes resources expose.
    #[command(alias = "o")]
    Outputs(commands::outputs::OutputsArgs),
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Merge(args) => commands::merge::handle_merge(args),
        Commands::Discover(args) => commands::discover::handle_discover(args),
        Commands::Outputs(args) => commands::outputs::handle_outputs(args),
    };

    if let Err(e) = command_result {
        tracing::debug!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["cfnkit", "outputs", "t.json", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Outputs(_)));
    }
}
