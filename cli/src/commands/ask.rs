//! # PabloBot One-Shot Reply
//!
//! File: cli/src/commands/ask.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `pablobot ask <MESSAGE>...` prints the reply to a single message and exits.
//! Handy for scripts and for checking how a phrase is dispatched:
//!
//! ```bash
//! pablobot ask what is the powerhouse of the cell
//! pablobot ask --show-intent tell me a joke
//! ```
//!
use crate::bot::FallbackPolicy;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for `pablobot ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The message; multiple words are joined with spaces.
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub message: Vec<String>,

    /// Reply used when nothing matches (defaults to `chat.fallback` from config).
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackPolicy>,

    /// Print the matched intent before the reply.
    #[arg(long)]
    pub show_intent: bool,
}

pub async fn handle_ask(args: AskArgs, config: Config) -> Result<()> {
    info!("Handling ask command with args: {:?}", args);

    let fallback = args.fallback.unwrap_or(config.chat.fallback);
    let responder = super::build_responder(&config, fallback)?;
    let message = args.message.join(" ");

    let reply = responder.respond(&message);
    if args.show_intent {
        println!("[{}] {}", reply.intent, reply.text);
    } else {
        println!("{}", reply.text);
    }
    Ok(())
}
