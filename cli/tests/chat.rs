//! # PabloBot CLI Chat Integration Tests
//!
//! File: cli/tests/chat.rs
//! Author: Christi Mahu
//!
//! Drives `pablobot chat` through stdin.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_chat_exit_says_goodbye() {
    Sandbox::new()
        .cmd()
        .arg("chat")
        .write_stdin("EXIT\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "PabloBot: Hello. How may I assist you?\n",
        ))
        .stdout(predicate::str::ends_with("PabloBot: Goodbye.\n"));
}

#[test]
fn test_chat_answers_until_exit() {
    Sandbox::new()
        .cmd()
        .arg("chat")
        .write_stdin("what is the powerhouse of the cell\nlist the best movies of all time\nexit\nhey give me game recommendations\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "PabloBot: The powerhouse of the cell is the mitochondria.",
        ))
        .stdout(predicate::str::contains(
            "PabloBot: Some of the best movies include",
        ))
        .stdout(predicate::str::contains("Red Dead Redemption 2").not());
}

#[test]
fn test_chat_remembers_name() {
    Sandbox::new()
        .cmd()
        .arg("chat")
        .write_stdin("my name is Ada\nwho am i\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nice to meet you, Ada."))
        .stdout(predicate::str::contains("Ada: PabloBot: Your name is Ada."));
}

#[test]
fn test_chat_uses_configured_identity() {
    Sandbox::with_config("[bot]\nname = \"Sofia\"\nfarewell = \"Bye for now.\"\n")
        .cmd()
        .arg("chat")
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sofia: Hello. How may I assist you?"))
        .stdout(predicate::str::ends_with("Sofia: Bye for now.\n"));
}

#[test]
fn test_chat_default_fallback_is_apology() {
    Sandbox::new()
        .cmd()
        .arg("chat")
        .write_stdin("qwertyuiop\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "PabloBot: I am sorry, I do not have an answer for that yet.",
        ));
}
