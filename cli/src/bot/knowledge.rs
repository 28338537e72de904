//! # PabloBot Knowledge Base
//!
//! File: cli/src/bot/knowledge.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The knowledge base holds the static data the responder draws on:
//! - an ordered list of trigger phrase → answer pairs
//! - a list of jokes
//! - a list of facts
//!
//! It is built once at startup, either from the built-in tables or from a
//! TOML file, and is read-only afterwards (shared behind an `Arc`).
//!
//! ## Knowledge File Format
//!
//! ```toml
//! jokes = ["What do you call a cold dog? A chili dog."]
//! facts = ["Octopuses have three hearts."]
//!
//! [[qa]]
//! trigger = "what is the powerhouse of the cell"
//! answer = "The powerhouse of the cell is the mitochondria."
//! ```
//!
//! The order of `[[qa]]` entries is the order in which triggers are tried.
//!
use crate::core::error::{PabloError, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Trigger whose answer doubles as the reply of the game recommendation rule.
pub const GAME_TRIGGER: &str = "hey give me game recommendations";

/// One trigger phrase and its fixed answer.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct QaPair {
    pub trigger: String,
    pub answer: String,
}

/// Raw shape of a knowledge TOML file before validation.
#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct KnowledgeFile {
    #[serde(default)]
    qa: Vec<QaPair>,
    jokes: Vec<String>,
    facts: Vec<String>,
}

/// Validated, immutable knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    qa_pairs: Vec<QaPair>,
    jokes: Vec<String>,
    facts: Vec<String>,
}

impl KnowledgeBase {
    /// Builds a knowledge base, normalizing triggers and rejecting empty lists,
    /// blank entries and duplicate triggers.
    pub fn new(qa_pairs: Vec<QaPair>, jokes: Vec<String>, facts: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(qa_pairs.len());
        for pair in qa_pairs {
            let trigger = pair.trigger.trim().to_lowercase();
            if trigger.is_empty() {
                return Err(anyhow!(PabloError::KnowledgeBase(
                    "Q&A entry has an empty trigger.".to_string()
                )));
            }
            if pair.answer.trim().is_empty() {
                return Err(anyhow!(PabloError::KnowledgeBase(format!(
                    "Q&A trigger '{}' has an empty answer.",
                    trigger
                ))));
            }
            if !seen.insert(trigger.clone()) {
                return Err(anyhow!(PabloError::KnowledgeBase(format!(
                    "Duplicate Q&A trigger '{}'.",
                    trigger
                ))));
            }
            normalized.push(QaPair {
                trigger,
                answer: pair.answer,
            });
        }

        check_entries("joke", &jokes)?;
        check_entries("fact", &facts)?;

        Ok(Self {
            qa_pairs: normalized,
            jokes,
            facts,
        })
    }

    /// The tables PabloBot ships with.
    pub fn builtin() -> Self {
        let qa_pairs = BUILTIN_QA
            .iter()
            .map(|(trigger, answer)| QaPair {
                trigger: trigger.to_string(),
                answer: answer.to_string(),
            })
            .collect();
        Self {
            qa_pairs,
            jokes: BUILTIN_JOKES.iter().map(|s| s.to_string()).collect(),
            facts: BUILTIN_FACTS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parses and validates knowledge from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: KnowledgeFile =
            toml::from_str(content).context("Failed to parse knowledge TOML")?;
        Self::new(file.qa, file.jokes, file.facts)
    }

    /// Reads a knowledge file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading knowledge base from {}", path.display());
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read knowledge file: {}", path.display()))?;
        let kb = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid knowledge file: {}", path.display()))?;
        debug!(
            "Loaded {} Q&A pairs, {} jokes, {} facts",
            kb.qa_pairs.len(),
            kb.jokes.len(),
            kb.facts.len()
        );
        Ok(kb)
    }

    /// First answer whose trigger occurs in `text`, in declaration order.
    /// `text` is expected to be normalized already.
    pub fn find_answer(&self, text: &str) -> Option<&str> {
        self.qa_pairs
            .iter()
            .find(|pair| text.contains(pair.trigger.as_str()))
            .map(|pair| pair.answer.as_str())
    }

    /// Answer registered for exactly `trigger`.
    pub fn answer_for(&self, trigger: &str) -> Option<&str> {
        self.qa_pairs
            .iter()
            .find(|pair| pair.trigger == trigger)
            .map(|pair| pair.answer.as_str())
    }

    pub fn qa_pairs(&self) -> &[QaPair] {
        &self.qa_pairs
    }

    pub fn jokes(&self) -> &[String] {
        &self.jokes
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_entries(kind: &str, entries: &[String]) -> Result<()> {
    if entries.is_empty() {
        return Err(anyhow!(PabloError::KnowledgeBase(format!(
            "At least one {} is required.",
            kind
        ))));
    }
    if let Some(pos) = entries.iter().position(|e| e.trim().is_empty()) {
        return Err(anyhow!(PabloError::KnowledgeBase(format!(
            "{} #{} is empty.",
            kind,
            pos + 1
        ))));
    }
    Ok(())
}

const BUILTIN_QA: &[(&str, &str)] = &[
    (
        GAME_TRIGGER,
        "Red Dead Redemption 2, Ghost of Tsushima, Grand Theft Auto V, Hitman World of Assassination, Forza Horizon, Assassin's Creed, Ace Combat 7.",
    ),
    (
        "list the greatest football players of all time",
        "The greatest football players include Cristiano Ronaldo, Lionel Messi, Sergio Ramos, and Neymar.",
    ),
    (
        "what is the powerhouse of the cell",
        "The powerhouse of the cell is the mitochondria.",
    ),
    (
        "list the best movies of all time",
        "Some of the best movies include Transformers, John Wick, Terminator, Fast and Furious, Fight Club, Red Notice, and The Avengers.",
    ),
    (
        "list the most famous comic book characters",
        "Batman, Superman, Spider-Man, Iron Man, Deadpool, Black Widow, and Hulk.",
    ),
];

const BUILTIN_JOKES: &[&str] = &[
    "Do you want to hear a pizza joke? Nahhh, it's too cheesy!",
    "What did the buffalo say when his son left? Bison!",
    "What do you call a cold dog? A chili dog.",
    "Where do you learn to make banana splits? At sundae school.",
    "What did one ocean say to the other? Nothing, they just waved.",
];

const BUILTIN_FACTS: &[&str] = &[
    "Honey never spoils; archaeologists found edible honey in ancient tombs.",
    "Octopuses have three hearts.",
    "Bananas are berries but strawberries are not.",
    "A group of flamingos is called a flamboyance.",
];
