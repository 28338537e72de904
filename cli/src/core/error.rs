//! # PabloBot Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used around the responder. The
//! responder itself cannot fail; errors come from the layers that feed it
//! (configuration, knowledge files, page templates) and from the HTTP server.
//!
//! ## Architecture
//!
//! - `PabloError`: a `thiserror` enum naming the failure domain
//! - `Result<T>`: an alias for `anyhow::Result<T>` so callers can attach context
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if config.bot.name.trim().is_empty() {
//!     return Err(anyhow!(PabloError::Config("bot.name must not be empty".into())));
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read knowledge file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for PabloBot.
#[derive(Error, Debug)]
pub enum PabloError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Template rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },

    #[error("Server error: {0}")]
    Server(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
