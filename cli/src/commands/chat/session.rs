//! # Chat Session Loop
//!
//! File: cli/src/commands/chat/session.rs
//! Author: Christi Mahu
//!
use crate::bot::{Intent, Responder};
use crate::core::config::BotConfig;
use crate::core::error::Result;
use anyhow::Context;
use std::io::{BufRead, Write};
use tracing::debug;

const EXIT_COMMAND: &str = "exit";

/// What the session learned by the time it ended.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    /// Name given with "my name is ...", if any.
    pub name: Option<String>,
    /// Number of messages answered.
    pub turns: usize,
}

impl Session {
    fn prompt(&self) -> &str {
        self.name.as_deref().unwrap_or("You")
    }
}

/// True for the literal `exit`, ignoring case and surrounding whitespace.
pub fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(EXIT_COMMAND)
}

/// # Run Chat Session (`run_session`)
///
/// Greets, then reads lines from `input` and writes `"<BotName>: <reply>"`
/// for each until `exit` or end of input, and finally writes the farewell.
///
/// ## Errors
///
/// Returns an error only when reading `input` or writing `output` fails.
/// Lines that are not valid UTF-8 are answered with invalid bytes replaced.
pub fn run_session<R: BufRead, W: Write>(
    responder: &Responder,
    bot: &BotConfig,
    mut input: R,
    mut output: W,
) -> Result<Session> {
    let mut session = Session::default();
    let mut buf = Vec::new();

    writeln!(output, "{}: {}", bot.name, bot.greeting).context("Failed to write greeting")?;

    loop {
        write!(output, "{}: ", session.prompt()).context("Failed to write prompt")?;
        output.flush().context("Failed to flush prompt")?;

        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read input line")?;
        if read == 0 {
            // End of input: finish the prompt line before saying goodbye.
            writeln!(output)?;
            debug!("Input closed, ending chat session.");
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);

        if is_exit(line) {
            break;
        }

        let reply = responder.respond(line);
        let text = match (&reply.intent, &session.name) {
            (Intent::NameQuery, Some(name)) => format!("Your name is {}.", name),
            _ => reply.text,
        };
        if let Some(name) = reply.name {
            debug!("Remembering user name for this session.");
            session.name = Some(name);
        }
        session.turns += 1;

        writeln!(output, "{}: {}", bot.name, text).context("Failed to write reply")?;
    }

    writeln!(output, "{}: {}", bot.name, bot.farewell).context("Failed to write farewell")?;
    output.flush()?;
    Ok(session)
}
