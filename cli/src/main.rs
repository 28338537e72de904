//! # PabloBot Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the PabloBot CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading configuration once for every command
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - `bot`: the rule-based responder and its knowledge base
//! - `commands`: one module per subcommand (`chat`, `srv`, `ask`, `kb`)
//! - `core`: configuration, errors and page templating
//!
//! ## Examples
//!
//! ```bash
//! # Talk in the terminal
//! pablobot chat
//!
//! # Serve the web page and JSON endpoint with more logging
//! pablobot -v srv --port 8080
//!
//! # One question, one answer
//! pablobot ask what is the powerhouse of the cell
//! ```
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod bot; // Responder, rules, knowledge base
mod commands; // Handles specific command logic (chat, srv, ask, kb)
mod core; // Core infrastructure (errors, config, templating)

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "pablobot",
    about = "🤖 PabloBot: a small rule-based chat bot for the terminal and the browser",
    long_about = "Answers greetings, a fixed set of questions, time/date/day queries, jokes and facts.\n\
                  Runs as an interactive terminal chat or as an HTTP service with a web page.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Read configuration from this file only, skipping the user and project files.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Chat interactively in the terminal.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// Run the HTTP chat service.
    #[command(alias = "s")]
    Srv(commands::srv::SrvArgs),
    /// Print the reply to a single message.
    #[command(alias = "a")]
    Ask(commands::ask::AskArgs),
    /// Summarize or validate a knowledge base.
    Kb(commands::kb::KbArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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

    let command_result = match core::config::load_config(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Chat(args) => commands::chat::handle_chat(args, config).await,
            Commands::Srv(args) => commands::srv::handle_srv(args, config).await,
            Commands::Ask(args) => commands::ask::handle_ask(args, config).await,
            Commands::Kb(args) => commands::kb::handle_kb(args, config).await,
        },
        Err(e) => Err(e),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
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
    fn test_parse_ask_with_global_flags() {
        let cli = Cli::parse_from(["pablobot", "-vv", "ask", "tell", "me", "a", "joke"]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Ask(args) => assert_eq!(args.message.join(" "), "tell me a joke"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
