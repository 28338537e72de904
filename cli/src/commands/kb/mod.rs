//! # PabloBot Knowledge Summary
//!
//! File: cli/src/commands/kb/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! `pablobot kb` shows which knowledge base would be used and what it holds:
//! the trigger phrases in the order they are tried, plus joke and fact
//! counts. With `--file` it loads and validates a specific knowledge file,
//! which makes it the quickest way to check a hand-edited file.
//!
//! ```bash
//! pablobot kb
//! pablobot kb --file ./knowledge.toml
//! ```
//!
use crate::bot::knowledge::KnowledgeBase;
use crate::core::config::Config;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Arguments for `pablobot kb`.
#[derive(Parser, Debug)]
pub struct KbArgs {
    /// Knowledge file to inspect instead of the configured one.
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

pub async fn handle_kb(args: KbArgs, config: Config) -> Result<()> {
    info!("Handling kb command with args: {:?}", args);

    let (source, kb) = match &args.file {
        Some(path) => (path.display().to_string(), KnowledgeBase::load(path)?),
        None => match &config.knowledge.path {
            Some(path) => (path.clone(), super::load_knowledge(&config)?),
            None => ("built-in".to_string(), KnowledgeBase::builtin()),
        },
    };

    print!("{}", summarize(&source, &kb));
    Ok(())
}

/// Human-readable overview of `kb`.
fn summarize(source: &str, kb: &KnowledgeBase) -> String {
    let mut out = format!("Knowledge base: {}\n", source);
    out.push_str(&format!("Triggers ({}):\n", kb.qa_pairs().len()));
    for (index, pair) in kb.qa_pairs().iter().enumerate() {
        out.push_str(&format!("  {:>2}. {}\n", index + 1, pair.trigger));
    }
    out.push_str(&format!("Jokes: {}\n", kb.jokes().len()));
    out.push_str(&format!("Facts: {}\n", kb.facts().len()));
    out
}
