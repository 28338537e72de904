//! # PabloBot Responder
//!
//! File: cli/src/bot/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module holds the conversational core shared by `pablobot chat`,
//! `pablobot ask` and the HTTP service. Given a line of free text it walks an
//! ordered rule table (see `rules`) and returns the first matching reply.
//!
//! ## Architecture
//!
//! - `knowledge`: the read-only Q&A pairs, jokes and facts
//! - `clock`: the `Clock` trait used by the time, date and day rules
//! - `rules`: the ordered predicate/reply table and its helpers
//!
//! `Responder` bundles a shared `KnowledgeBase`, a clock, the bot's name and
//! a `FallbackPolicy`. It is cheap to clone and safe to share across tasks.
//!
//! ## Examples
//!
//! ```rust
//! let responder = Responder::new(Arc::new(KnowledgeBase::builtin()), "PabloBot", FallbackPolicy::Apology);
//! let reply = responder.respond("what is the powerhouse of the cell");
//! assert_eq!(reply.text, "The powerhouse of the cell is the mitochondria.");
//! ```
//!
use clap::ValueEnum;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

pub mod clock;
pub mod knowledge;
pub mod rules;

use clock::{Clock, SystemClock};
use knowledge::KnowledgeBase;
use rules::Turn;

/// Which rule produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Intent {
    Introduction,
    NameQuery,
    Greeting,
    KnownQuestion,
    Time,
    Date,
    Day,
    GameRecommendation,
    Joke,
    Fact,
    Fallback,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Intent::Introduction => "introduction",
            Intent::NameQuery => "name-query",
            Intent::Greeting => "greeting",
            Intent::KnownQuestion => "known-question",
            Intent::Time => "time",
            Intent::Date => "date",
            Intent::Day => "day",
            Intent::GameRecommendation => "game-recommendation",
            Intent::Joke => "joke",
            Intent::Fact => "fact",
            Intent::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// What to say when no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// A random generic acknowledgement ("I see. Can you clarify?").
    #[default]
    SmallTalk,
    /// The fixed "I do not have an answer for that yet" line.
    Apology,
}

/// Result of one call to the responder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub intent: Intent,
    /// Name learned from "my name is ...". The caller decides where to keep it.
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct Responder {
    knowledge: Arc<KnowledgeBase>,
    clock: Arc<dyn Clock>,
    bot_name: String,
    fallback: FallbackPolicy,
}

impl Responder {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        bot_name: impl Into<String>,
        fallback: FallbackPolicy,
    ) -> Self {
        Self {
            knowledge,
            clock: Arc::new(SystemClock),
            bot_name: bot_name.into(),
            fallback,
        }
    }

    /// Replaces the system clock, e.g. with a `FixedClock` in tests.
    #[allow(dead_code)]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Replies to `input` using the thread-local random source.
    pub fn respond(&self, input: &str) -> Reply {
        self.respond_with(input, &mut rand::thread_rng())
    }

    /// Replies to `input`, drawing random picks from `rng`. Never fails.
    pub fn respond_with(&self, input: &str, rng: &mut dyn RngCore) -> Reply {
        let turn = self.turn(input);
        let rule = rules::select(&turn);
        let text = (rule.reply)(&turn, rng);
        let name = match rule.intent {
            Intent::Introduction => rules::extract_name(turn.raw),
            _ => None,
        };

        trace!(input = turn.raw, "Responding");
        debug!(intent = %rule.intent, "Matched rule");

        Reply {
            text,
            intent: rule.intent,
            name,
        }
    }

    /// Intent the responder would pick for `input`, without building a reply.
    #[allow(dead_code)]
    pub fn classify(&self, input: &str) -> Intent {
        rules::select(&self.turn(input)).intent
    }

    fn turn<'a>(&'a self, input: &'a str) -> Turn<'a> {
        Turn::new(
            input,
            &self.knowledge,
            self.clock.now(),
            &self.bot_name,
            self.fallback,
        )
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("bot_name", &self.bot_name)
            .field("fallback", &self.fallback)
            .field("qa_pairs", &self.knowledge.qa_pairs().len())
            .finish()
    }
}
