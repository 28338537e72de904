//! # PabloBot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Foundational pieces used by the command modules:
//! - `config`: configuration loading, merging, and validation
//! - `error`: error types and the crate-wide `Result` alias
//! - `templating`: rendering of the chat page served by `pablobot srv`
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{PabloError, Result}; // For error handling
//! use crate::core::templating; // For the index page
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
