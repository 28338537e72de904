//! # PabloBot Dispatch Rules
//!
//! File: cli/src/bot/rules.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The responder's behavior is an ordered table of rules. Each rule pairs a
//! predicate with a reply builder; the first rule whose predicate accepts the
//! normalized input produces the reply. The last rule always matches.
//!
//! ## Precedence
//!
//! | #  | Intent               | Predicate on normalized text `t`                         |
//! |----|----------------------|----------------------------------------------------------|
//! | 1  | `Introduction`       | contains `"my name is "` followed by a non-empty name     |
//! | 2  | `NameQuery`          | contains `"what is my name"` or `"who am i"`             |
//! | 3  | `Greeting`           | a bare greeting (`"hi"`, `"hey there"`, `"good morning!"`) |
//! | 4  | `KnownQuestion`      | contains a knowledge-base trigger (declaration order)     |
//! | 5  | `Time`               | `"time"`, but not `"best movies of all time"`            |
//! | 6  | `Date`               | `"date"`, but not `"update"`                             |
//! | 7  | `Day`                | `"day"`, but not `"birthday"`                            |
//! | 8  | `GameRecommendation` | `"game"` and (`"recommend"` or `"give"`)                 |
//! | 9  | `Joke`               | `"joke"`                                                 |
//! | 10 | `Fact`               | `"fun fact"` or `"fact"`                                 |
//! | 11 | `Fallback`           | always                                                   |
//!
use super::clock::{DATE_FORMAT, DAY_FORMAT, TIME_FORMAT};
use super::knowledge::{KnowledgeBase, GAME_TRIGGER};
use super::{FallbackPolicy, Intent};
use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::RngCore;

const NAME_MARKER: &str = "my name is ";
const NAME_QUERIES: &[&str] = &["what is my name", "who am i"];

const GREETINGS: &[&str] = &[
    "good afternoon",
    "good morning",
    "good evening",
    "hello",
    "hey",
    "hi",
    "yo",
];
/// Words that may follow a greeting without turning it into a request.
const VOCATIVES: &[&str] = &["there", "everyone", "all", "friend", "again"];

const TIME_GUARD: &str = "best movies of all time";
const DATE_GUARD: &str = "update";
const DAY_GUARD: &str = "birthday";

pub const GREETING_REPLY: &str = "Hello. How may I assist you?";
pub const NAME_QUERY_REPLY: &str =
    "I can remember your name for this session if you tell me 'My name is ...'";
pub const APOLOGY_REPLY: &str = "I am sorry, I do not have an answer for that yet.";
pub const SMALL_TALK: &[&str] = &[
    "Interesting, tell me more.",
    "I see. Can you clarify?",
    "Okay. What else would you like to ask?",
];

/// Everything a rule may look at for one utterance.
pub(crate) struct Turn<'a> {
    /// Input as typed, with surrounding whitespace removed.
    pub raw: &'a str,
    /// Lowercased `raw`.
    pub text: String,
    pub kb: &'a KnowledgeBase,
    pub now: DateTime<Local>,
    /// Lowercased bot name, accepted after a greeting.
    pub bot_name: String,
    pub fallback: FallbackPolicy,
}

impl<'a> Turn<'a> {
    pub fn new(
        raw: &'a str,
        kb: &'a KnowledgeBase,
        now: DateTime<Local>,
        bot_name: &str,
        fallback: FallbackPolicy,
    ) -> Self {
        let raw = raw.trim();
        Self {
            raw,
            text: raw.to_lowercase(),
            kb,
            now,
            bot_name: bot_name.trim().to_lowercase(),
            fallback,
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.text.contains(needle)
    }
}

pub(crate) struct Rule {
    pub intent: Intent,
    pub matches: fn(&Turn<'_>) -> bool,
    pub reply: fn(&Turn<'_>, &mut dyn RngCore) -> String,
}

pub(crate) const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Introduction,
        matches: introduces_name,
        reply: introduction_reply,
    },
    Rule {
        intent: Intent::NameQuery,
        matches: asks_for_name,
        reply: name_query_reply,
    },
    Rule {
        intent: Intent::Greeting,
        matches: greets,
        reply: greeting_reply,
    },
    Rule {
        intent: Intent::KnownQuestion,
        matches: has_known_question,
        reply: known_answer,
    },
    Rule {
        intent: Intent::Time,
        matches: asks_time,
        reply: time_reply,
    },
    Rule {
        intent: Intent::Date,
        matches: asks_date,
        reply: date_reply,
    },
    Rule {
        intent: Intent::Day,
        matches: asks_day,
        reply: day_reply,
    },
    Rule {
        intent: Intent::GameRecommendation,
        matches: asks_games,
        reply: games_reply,
    },
    Rule {
        intent: Intent::Joke,
        matches: asks_joke,
        reply: joke_reply,
    },
    Rule {
        intent: Intent::Fact,
        matches: asks_fact,
        reply: fact_reply,
    },
    Rule {
        intent: Intent::Fallback,
        matches: always,
        reply: fallback_reply,
    },
];

fn introduces_name(turn: &Turn<'_>) -> bool {
    turn.contains(NAME_MARKER) && extract_name(turn.raw).is_some()
}

fn introduction_reply(turn: &Turn<'_>, _: &mut dyn RngCore) -> String {
    let name = extract_name(turn.raw).unwrap_or_default();
    format!(
        "Nice to meet you, {}. I will remember your name for this session.",
        name
    )
}

fn asks_for_name(turn: &Turn<'_>) -> bool {
    NAME_QUERIES.iter().any(|q| turn.contains(q))
}

fn name_query_reply(_: &Turn<'_>, _: &mut dyn RngCore) -> String {
    NAME_QUERY_REPLY.to_string()
}

fn greets(turn: &Turn<'_>) -> bool {
    is_greeting(&turn.text, &turn.bot_name)
}

fn greeting_reply(_: &Turn<'_>, _: &mut dyn RngCore) -> String {
    GREETING_REPLY.to_string()
}

fn has_known_question(turn: &Turn<'_>) -> bool {
    turn.kb.find_answer(&turn.text).is_some()
}

fn known_answer(turn: &Turn<'_>, _: &mut dyn RngCore) -> String {
    turn.kb
        .find_answer(&turn.text)
        .map(str::to_string)
        .unwrap_or_default()
}

fn asks_time(turn: &Turn<'_>) -> bool {
    turn.contains("time") && !turn.contains(TIME_GUARD)
}

fn time_reply(turn: &Turn<'_>, _: &mut dyn RngCore) -> String {
    format!("The current time is {}.", turn.now.format(TIME_FORMAT))
}

fn asks_date(turn: &Turn<'_>) -> bool {
    turn.contains("date") && !turn.contains(DATE_GUARD)
}

fn date_reply(turn: &Turn<'_>, _: &mut dyn RngCore) -> String {
    format!("Today's date is {}.", turn.now.format(DATE_FORMAT))
}

fn asks_day(turn: &Turn<'_>) -> bool {
    turn.contains("day") && !turn.contains(DAY_GUARD)
}

fn day_reply(turn: &Turn<'_>, _: &mut dyn RngCore) -> String {
    format!("Today is {}.", turn.now.format(DAY_FORMAT))
}

fn asks_games(turn: &Turn<'_>) -> bool {
    turn.contains("game")
        && (turn.contains("recommend") || turn.contains("give"))
        && turn.kb.answer_for(GAME_TRIGGER).is_some()
}

fn games_reply(turn: &Turn<'_>, _: &mut dyn RngCore) -> String {
    turn.kb
        .answer_for(GAME_TRIGGER)
        .map(str::to_string)
        .unwrap_or_default()
}

fn asks_joke(turn: &Turn<'_>) -> bool {
    turn.contains("joke")
}

fn joke_reply(turn: &Turn<'_>, rng: &mut dyn RngCore) -> String {
    pick(turn.kb.jokes(), rng)
}

fn asks_fact(turn: &Turn<'_>) -> bool {
    turn.contains("fun fact") || turn.contains("fact")
}

fn fact_reply(turn: &Turn<'_>, rng: &mut dyn RngCore) -> String {
    pick(turn.kb.facts(), rng)
}

fn always(_: &Turn<'_>) -> bool {
    true
}

fn fallback_reply(turn: &Turn<'_>, rng: &mut dyn RngCore) -> String {
    match turn.fallback {
        FallbackPolicy::Apology => APOLOGY_REPLY.to_string(),
        FallbackPolicy::SmallTalk => SMALL_TALK
            .choose(rng)
            .copied()
            .unwrap_or(APOLOGY_REPLY)
            .to_string(),
    }
}

/// First rule accepting `turn`.
pub(crate) fn select(turn: &Turn<'_>) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.matches)(turn))
        .unwrap_or(&RULES[RULES.len() - 1])
}

/// Name following "my name is", case preserved and trailing punctuation removed.
pub fn extract_name(raw: &str) -> Option<String> {
    let marker = NAME_MARKER.as_bytes();
    let start = raw
        .as_bytes()
        .windows(marker.len())
        .position(|window| window.eq_ignore_ascii_case(marker))?;
    // The marker is ASCII, so `start + marker.len()` is a char boundary.
    let name = raw[start + marker.len()..]
        .trim()
        .trim_end_matches(&['.', '!', '?', ','][..])
        .trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// True when `text` is a greeting and nothing but a greeting.
fn is_greeting(text: &str, bot_name: &str) -> bool {
    GREETINGS.iter().any(|greeting| {
        let Some(rest) = text.strip_prefix(greeting) else {
            return false;
        };
        if rest.starts_with(|c: char| c.is_alphanumeric()) {
            return false;
        }
        words(rest).all(|word| {
            VOCATIVES.contains(&word) || words(bot_name).any(|name_word| name_word == word)
        })
    })
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

fn pick(items: &[String], rng: &mut dyn RngCore) -> String {
    items
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| APOLOGY_REPLY.to_string())
}
