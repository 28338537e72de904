//! # PabloBot Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the `pablobot` CLI and
//! the small amount of setup they share: loading the knowledge base named by
//! the configuration and building a `Responder` from it.
//!
//! ## Command Groups
//!
//! - `ask`: reply to a single message and exit
//! - `chat`: interactive terminal conversation
//! - `kb`: summarize or validate a knowledge base
//! - `srv`: HTTP chat service
//!
use crate::bot::knowledge::KnowledgeBase;
use crate::bot::{FallbackPolicy, Responder};
use crate::core::config::Config;
use crate::core::error::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// One-shot reply command.
pub mod ask;
/// Interactive terminal conversation.
pub mod chat;
/// Knowledge base inspection.
pub mod kb;
/// HTTP chat service with the web page.
pub mod srv;

/// Knowledge base named by `knowledge.path`, or the built-in tables.
pub fn load_knowledge(config: &Config) -> Result<KnowledgeBase> {
    match &config.knowledge.path {
        Some(path) => KnowledgeBase::load(Path::new(path)),
        None => {
            debug!("No knowledge path configured, using built-in tables.");
            Ok(KnowledgeBase::builtin())
        }
    }
}

/// Responder for the configured bot and knowledge base.
pub fn build_responder(config: &Config, fallback: FallbackPolicy) -> Result<Responder> {
    let knowledge = load_knowledge(config)?;
    Ok(Responder::new(
        Arc::new(knowledge),
        config.bot.name.clone(),
        fallback,
    ))
}
