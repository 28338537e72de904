//! # PabloBot Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module loads, merges and validates PabloBot's configuration. Every
//! setting has a built-in default, so running without any file is normal.
//!
//! Configuration sources (in order of precedence):
//! 1. A file passed with `--config <PATH>` (replaces 2 and 3)
//! 2. Project-specific `.pablobot.toml` in the current directory or an ancestor
//! 3. User-specific `config.toml` in the platform config dir (`~/.config/pablobot/` on Linux)
//! 4. Default values defined in the code
//!
//! Command-line flags of the individual commands override all of the above.
//!
//! ## Example
//!
//! ```toml
//! [bot]
//! name = "PabloBot"
//! greeting = "Hello. How may I assist you?"
//! farewell = "Goodbye."
//!
//! [knowledge]
//! path = "~/pablobot/knowledge.toml"
//!
//! [server]
//! port = 5000
//! host = "127.0.0.1"
//! enable_cors = true
//! fallback = "small-talk"
//!
//! [chat]
//! fallback = "apology"
//! ```
//!
use crate::bot::FallbackPolicy;
use crate::core::error::{PabloError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Identity and fixed lines of the bot.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// First line printed by `pablobot chat` and shown on the web page.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Printed when the chat loop ends.
    #[serde(default = "default_farewell")]
    pub farewell: String,
}

/// Where the Q&A pairs, jokes and facts come from.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Knowledge TOML file (can use ~). The built-in tables are used when unset.
    pub path: Option<String>,
}

/// Settings for `pablobot srv`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_true")]
    pub enable_cors: bool,
    /// Directory served under `/static` instead of the embedded assets (can use ~).
    pub static_dir: Option<String>,
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

/// Settings for `pablobot chat` and `pablobot ask`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    #[serde(default = "default_chat_fallback")]
    pub fallback: FallbackPolicy,
}

fn default_bot_name() -> String {
    "PabloBot".to_string()
}
fn default_greeting() -> String {
    "Hello. How may I assist you?".to_string()
}
fn default_farewell() -> String {
    "Goodbye.".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}
fn default_true() -> bool {
    true
}
fn default_chat_fallback() -> FallbackPolicy {
    FallbackPolicy::Apology
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            greeting: default_greeting(),
            farewell: default_farewell(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: true,
            static_dir: None,
            fallback: FallbackPolicy::SmallTalk,
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            fallback: default_chat_fallback(),
        }
    }
}

const PROJECT_CONFIG_FILENAME: &str = ".pablobot.toml";

/// Loads the effective configuration.
///
/// With `explicit` set, only that file is read on top of the defaults.
/// Otherwise the user file and the nearest project file are merged.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let mut config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            let user_config = load_user_config()?;
            let project_config = load_project_config()?;
            merge_configs(user_config.unwrap_or_default(), project_config)
        }
    };
    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "PabloBot", "pablobot") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.pablobot.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks up from `start` looking for `.pablobot.toml`, stopping at a `.git` directory.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win wherever they differ from the defaults.
fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user,
    };
    let defaults = Config::default();
    let pick = |project_value: String, user_value: String, default_value: String| {
        if project_value != default_value {
            project_value
        } else {
            user_value
        }
    };

    let mut merged = Config::default();
    merged.bot.name = pick(project.bot.name, user.bot.name, defaults.bot.name);
    merged.bot.greeting = pick(
        project.bot.greeting,
        user.bot.greeting,
        defaults.bot.greeting,
    );
    merged.bot.farewell = pick(
        project.bot.farewell,
        user.bot.farewell,
        defaults.bot.farewell,
    );
    merged.knowledge.path = project.knowledge.path.or(user.knowledge.path);
    merged.server.port = if project.server.port != defaults.server.port {
        project.server.port
    } else {
        user.server.port
    };
    merged.server.host = if project.server.host != defaults.server.host {
        project.server.host
    } else {
        user.server.host
    };
    merged.server.enable_cors = project.server.enable_cors && user.server.enable_cors;
    merged.server.static_dir = project.server.static_dir.or(user.server.static_dir);
    merged.server.fallback = if project.server.fallback != defaults.server.fallback {
        project.server.fallback
    } else {
        user.server.fallback
    };
    merged.chat.fallback = if project.chat.fallback != defaults.chat.fallback {
        project.chat.fallback
    } else {
        user.chat.fallback
    };
    merged
}

fn expand_config_paths(config: &mut Config) {
    if let Some(path) = config.knowledge.path.as_mut() {
        *path = shellexpand::tilde(path.as_str()).into_owned();
        debug!("Expanded knowledge path: {}", path);
    }
    if let Some(dir) = config.server.static_dir.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded static directory: {}", dir);
    }
}

fn validate_config(config: &Config) -> Result<()> {
    for (key, value) in [
        ("bot.name", &config.bot.name),
        ("bot.greeting", &config.bot.greeting),
        ("bot.farewell", &config.bot.farewell),
    ] {
        if value.trim().is_empty() {
            return Err(anyhow!(PabloError::Config(format!(
                "'{}' must not be empty.",
                key
            ))));
        }
    }
    if let Some(dir) = &config.server.static_dir {
        let dir = PathBuf::from(dir);
        if !dir.exists() {
            warn!(
                "Configured static directory '{}' does not exist; embedded assets will be used.",
                dir.display()
            );
        } else if !dir.is_dir() {
            return Err(anyhow!(PabloError::Config(format!(
                "Configured static path '{}' exists but is not a directory.",
                dir.display()
            ))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() {
        let config: Config = toml::from_str("").expect("Failed to parse TOML");
        assert_eq!(config, Config::default());
        assert_eq!(config.bot.name, "PabloBot");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.fallback, FallbackPolicy::SmallTalk);
        assert_eq!(config.chat.fallback, FallbackPolicy::Apology);
    }

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [bot]
            name = "Sofia"

            [knowledge]
            path = "~/kb.toml"

            [server]
            port = 9000
            host = "0.0.0.0"
            enable_cors = false
            fallback = "apology"
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.bot.name, "Sofia");
        assert_eq!(config.bot.farewell, "Goodbye."); // Default
        assert_eq!(config.knowledge.path.as_deref(), Some("~/kb.toml")); // Not yet expanded
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0".parse::<IpAddr>().unwrap());
        assert!(!config.server.enable_cors);
        assert_eq!(config.server.fallback, FallbackPolicy::Apology);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[bot]\nnickname = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config::default();
        config.knowledge.path = Some("~/kb.toml".to_string());
        config.server.static_dir = Some("/absolute/static".to_string());

        expand_config_paths(&mut config);

        let home_dir = directories::BaseDirs::new().unwrap().home_dir().to_path_buf();
        assert_eq!(
            config.knowledge.path.unwrap(),
            home_dir.join("kb.toml").to_string_lossy().to_string()
        );
        assert_eq!(config.server.static_dir.as_deref(), Some("/absolute/static"));
    }

    #[test]
    fn test_merge_project_overrides_user() {
        let mut user = Config::default();
        user.bot.name = "UserBot".into();
        user.server.port = 7000;
        user.knowledge.path = Some("/user/kb.toml".into());

        let mut project = Config::default();
        project.server.port = 8080;
        project.chat.fallback = FallbackPolicy::SmallTalk;

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.bot.name, "UserBot");
        assert_eq!(merged.server.port, 8080);
        assert_eq!(merged.knowledge.path.as_deref(), Some("/user/kb.toml"));
        assert_eq!(merged.chat.fallback, FallbackPolicy::SmallTalk);
    }

    #[test]
    fn test_find_project_config_in_ancestor() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(temp_dir.path().join(".git")).unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        let found = find_project_config_path(&nested);
        assert_eq!(found, Some(temp_dir.path().join(PROJECT_CONFIG_FILENAME)));
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();

        assert_eq!(find_project_config_path(&repo), None);
    }

    #[test]
    fn test_load_explicit_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("pablobot.toml");
        fs::write(&path, "[bot]\nfarewell = \"See you.\"\n").unwrap();

        let config = load_config(Some(path.as_path())).unwrap();
        assert_eq!(config.bot.farewell, "See you.");
        assert_eq!(config.bot.name, "PabloBot");
    }

    #[test]
    fn test_validate_config_empty_name() {
        let mut config = Config::default();
        config.bot.name = "  ".into();
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("'bot.name' must not be empty"));
    }

    #[test]
    fn test_validate_config_static_path_is_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("not_a_dir");
        fs::write(&file_path, "").unwrap();

        let mut config = Config::default();
        config.server.static_dir = Some(file_path.to_string_lossy().to_string());
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("is not a directory"));
    }
}
