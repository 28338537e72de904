//! # PabloBot Interactive Chat
//!
//! File: cli/src/commands/chat/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `pablobot chat` runs a line-based conversation on the terminal:
//!
//! ```text
//! PabloBot: Hello. How may I assist you?
//! You: what is the powerhouse of the cell
//! PabloBot: The powerhouse of the cell is the mitochondria.
//! You: exit
//! PabloBot: Goodbye.
//! ```
//!
//! Typing `exit` (any case) or closing stdin ends the session. The name
//! learned from "my name is ..." lives only in the session and replaces the
//! `You:` prompt.
//!
//! ## Architecture
//!
//! - `handle_chat`: builds the responder and runs the session on a blocking task
//! - `session`: the read-reply loop, generic over any `BufRead`/`Write` pair
//!
use crate::bot::FallbackPolicy;
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io;
use tracing::info;

pub mod session;

/// Arguments for `pablobot chat`.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Reply used when nothing matches (defaults to `chat.fallback` from config).
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackPolicy>,
}

/// # Handle Chat Command (`handle_chat`)
///
/// Resolves the fallback policy, builds the responder and runs an interactive
/// session on stdin/stdout until the user types `exit` or input ends.
pub async fn handle_chat(args: ChatArgs, config: Config) -> Result<()> {
    info!("Handling chat command with args: {:?}", args);

    let fallback = args.fallback.unwrap_or(config.chat.fallback);
    let responder = super::build_responder(&config, fallback)?;
    info!("Chat fallback policy: {:?}", responder.fallback());
    let bot = config.bot;

    let summary = tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        let stdout = io::stdout();
        session::run_session(&responder, &bot, stdin.lock(), stdout.lock())
    })
    .await
    .context("Chat session task failed")??;

    info!(
        turns = summary.turns,
        named = summary.name.is_some(),
        "Chat session ended"
    );
    Ok(())
}
