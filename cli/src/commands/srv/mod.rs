//! # PabloBot HTTP Chat Service
//!
//! File: cli/src/commands/srv/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `pablobot srv` exposes the responder over HTTP:
//! - `GET /` serves the chat page
//! - `POST /chat` accepts `{"message": "..."}` and answers `{"reply": "..."}`
//! - `GET /health` reports liveness
//!
//! The user's name is remembered by the page (browser local storage), never
//! by the server.
//!
//! ## Architecture
//!
//! - `config.rs`: merging of CLI flags with the `[server]` configuration
//! - `handlers.rs`: request handlers and their JSON shapes
//! - `server_logic.rs`: router, port selection and the server loop
//!
//! ## Examples
//!
//! ```bash
//! pablobot srv
//! pablobot srv --port 9000 --host 0.0.0.0 --fallback apology
//! curl -s localhost:5000/chat -d '{"message":"tell me a joke"}' -H 'content-type: application/json'
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::templating::{self, PageContext};
use std::sync::Arc;
use tracing::info;

pub use config::SrvArgs;

/// Merges command-line flags with the `[server]` configuration section.
pub mod config;

/// Axum request handlers and shared state.
pub mod handlers;

/// Router construction, port selection and the server loop.
pub mod server_logic;

/// # Handle Server Command (`handle_srv`)
///
/// 1. Merges the CLI flags with the loaded configuration.
/// 2. Builds the responder with the server's fallback policy.
/// 3. Renders the chat page once.
/// 4. Runs the server until shutdown.
pub async fn handle_srv(args: SrvArgs, config: Config) -> Result<()> {
    info!("Handling srv command with args: {:?}", args);

    let server_config = config::merge_config(&args, &config.server)?;
    info!("Effective server config: {:?}", server_config);

    let responder = super::build_responder(&config, server_config.fallback)?;
    info!(
        "Loaded {} Q&A triggers for {}",
        responder.knowledge().qa_pairs().len(),
        responder.bot_name()
    );
    let index_html = templating::render_index(&PageContext {
        bot_name: &config.bot.name,
        greeting: &config.bot.greeting,
    })?;

    let state = handlers::AppState {
        responder,
        index_html: Arc::new(index_html),
    };
    server_logic::run_server(server_config, state).await?;

    Ok(())
}
