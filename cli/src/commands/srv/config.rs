//! # PabloBot HTTP Server Configuration
//!
//! File: cli/src/commands/srv/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Combines the `[server]` section of the loaded configuration with the
//! command-line flags of `pablobot srv`:
//! 1. Command-line arguments (highest priority)
//! 2. `[server]` from `.pablobot.toml` / the user config file
//! 3. Default values (lowest priority)
//!
//! ## Examples
//!
//! ```bash
//! # Listen on all interfaces, port 8080, without CORS headers
//! pablobot srv --host 0.0.0.0 --port 8080 --no-cors
//!
//! # Serve the page assets from a local directory while editing them
//! pablobot srv --static-dir ./assets
//! ```
//!
use crate::bot::FallbackPolicy;
use crate::core::config::ServerSection;
use crate::core::error::{PabloError, Result};
use anyhow::{anyhow, Context};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use tracing::{debug, warn};

/// # Server Command Arguments (`SrvArgs`)
///
/// Flags left unset fall back to the `[server]` configuration section.
#[derive(Parser, Debug, Default)]
pub struct SrvArgs {
    /// Port to listen on (default 5000). The next free port is used if it is taken.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Address to bind. Use `0.0.0.0` to accept connections from other machines.
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,

    /// Serve `/static/*` from this directory instead of the embedded script.
    #[arg(long)]
    pub static_dir: Option<PathBuf>,

    /// Reply used when nothing matches (defaults to `server.fallback` from config).
    #[arg(long, value_enum)]
    pub fallback: Option<FallbackPolicy>,
}

/// # Effective Server Configuration (`ServerConfig`)
///
/// Final settings used by `server_logic::run_server`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub host: IpAddr,
    pub enable_cors: bool,
    /// Absolute path of the static directory, when one is in use.
    pub static_dir: Option<PathBuf>,
    pub fallback: FallbackPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let section = ServerSection::default();
        Self {
            port: section.port,
            host: section.host,
            enable_cors: section.enable_cors,
            static_dir: None,
            fallback: section.fallback,
        }
    }
}

/// # Merge Server Configuration (`merge_config`)
///
/// Applies `args` on top of `section`.
///
/// ## Errors
///
/// Returns an error if `--static-dir` names something that is not an existing
/// directory. A configured `static_dir` that does not exist is skipped with a
/// warning instead, so a stale config file does not stop the server.
pub fn merge_config(args: &SrvArgs, section: &ServerSection) -> Result<ServerConfig> {
    let static_dir = match (&args.static_dir, &section.static_dir) {
        (Some(dir), _) => {
            if !dir.is_dir() {
                return Err(anyhow!(PabloError::Config(format!(
                    "Static directory '{}' does not exist or is not a directory.",
                    dir.display()
                ))));
            }
            Some(absolute(dir.clone())?)
        }
        (None, Some(dir)) => {
            let dir = PathBuf::from(dir);
            if dir.is_dir() {
                Some(absolute(dir)?)
            } else {
                warn!(
                    "Ignoring configured static directory '{}': not a directory.",
                    dir.display()
                );
                None
            }
        }
        (None, None) => None,
    };

    let config = ServerConfig {
        port: args.port.unwrap_or(section.port),
        host: args.host.unwrap_or(section.host),
        enable_cors: section.enable_cors && !args.no_cors,
        static_dir,
        fallback: args.fallback.unwrap_or(section.fallback),
    };
    debug!("Merged server configuration: {:?}", config);
    Ok(config)
}

fn absolute(dir: PathBuf) -> Result<PathBuf> {
    dir.canonicalize()
        .with_context(|| format!("Failed to resolve directory: {}", dir.display()))
}
