//! End-to-end tests of the compiled binary.
#![allow(clippy::unwrap_used)]

mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::Dataset;
use gpseq_anim::constants::{CONFIG_FILENAME, SETTINGS_FILENAME};
use predicates::prelude::*;

fn bin() -> Result<Command> {
    let mut cmd = Command::cargo_bin("gpseq-anim-bin")?;
    cmd.env_remove("GPSEQ_ENGINE").env_remove("GPSEQ_ANIM_LOG");
    Ok(cmd)
}

#[test]
fn test_missing_positionals_print_usage() -> Result<()> {
    bin()?
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
    Ok(())
}

#[test]
fn test_out_of_set_choice_prints_usage() -> Result<()> {
    let data = Dataset::new();
    bin()?
        .args(data.args(&["--mid-type", "median"]))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("central"));
    Ok(())
}

#[test]
fn test_answer_no_aborts() -> Result<()> {
    let data = Dataset::new();
    bin()?
        .args(data.args(&[]))
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Aborted."));
    assert!(!data.root.path().join("out").exists());
    Ok(())
}

#[test]
fn test_closed_stdin_is_fatal() -> Result<()> {
    let data = Dataset::new();
    bin()?
        .args(data.args(&[]))
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input closed"));
    Ok(())
}

#[test]
fn test_unknown_engine_is_reported() -> Result<()> {
    let data = Dataset::new();
    bin()?
        .args(data.args(&["--yes", "--engine", "gpseq-engine-that-does-not-exist"]))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to launch analysis engine"));
    Ok(())
}

#[test]
fn test_malformed_config_file_is_reported() -> Result<()> {
    let data = Dataset::new();
    std::fs::write(
        data.root.path().join(CONFIG_FILENAME),
        "[gpseq-anim]\nan_type = \"volume\"\n",
    )?;
    bin()?
        .args(data.args(&[]))
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ignoring malformed configuration file"));
    Ok(())
}

#[test]
fn test_unreadable_explicit_config_is_reported() -> Result<()> {
    let data = Dataset::new();
    let missing = data.root.path().join("absent.toml").to_string_lossy().into_owned();
    bin()?
        .args(data.args(&["--config", missing.as_str()]))
        .write_stdin("n\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read configuration file"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_engine_receives_settings_file() -> Result<()> {
    let data = Dataset::new();
    bin()?
        .args(data.args(&["--engine", "true", "--description", "TK24:1 min"]))
        .write_stdin("y\n")
        .assert()
        .success();

    let settings = std::fs::read_to_string(data.root.path().join("out").join(SETTINGS_FILENAME))?;
    let json: serde_json::Value = serde_json::from_str(&settings)?;
    assert_eq!(json["cdescr"]["TK24"], "1 min");
    assert_eq!(json["seg_type"], 2);
    assert_eq!(json["an_type"], 3);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_engine_exit_code_is_propagated() -> Result<()> {
    let data = Dataset::new();
    bin()?
        .args(data.args(&["-y", "--engine", "false"]))
        .assert()
        .code(1);
    Ok(())
}
