//! # PabloBot CLI Srv Integration Tests
//!
//! File: cli/tests/srv.rs
//! Author: Christi Mahu
//!
//! Startup failures of `pablobot srv`. Request handling is covered by the
//! in-process router tests in `server_logic.rs`; a running server would block.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_srv_rejects_missing_static_dir() {
    Sandbox::new()
        .cmd()
        .args(["srv", "--static-dir", "/no/such/static/dir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_srv_rejects_bad_knowledge_file() {
    let sandbox = Sandbox::new();
    let kb = sandbox.write("kb.toml", "facts = [\"f\"]\n");
    sandbox.write(
        "pablobot.toml",
        &format!("[knowledge]\npath = \"{}\"\n", kb.replace('\\', "\\\\")),
    );
    sandbox
        .cmd()
        .arg("srv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid knowledge file"));
}
