//! Exit codes and user-facing error messages.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;

use crate::common::TestProject;

#[test]
fn test_unknown_model_suggests_closest_name() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["-m", "gtp4"], "Hello")?;
    output
        .assert_failure()
        .assert_stderr_contains("Unknown model: gtp4")
        .assert_stderr_contains("Did you mean 'gpt4'?")
        .assert_stderr_contains("Supported models:");
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_unknown_model_is_reported_before_reading_input() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["count", "--models", "gpt4,bogus"], "")?;
    output.assert_failure().assert_stderr_contains("Unknown model: bogus");

    Ok(())
}

#[test]
fn test_empty_input_fails() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&[], "  \n\t\n")?;
    output.assert_failure().assert_stderr_contains("No input provided");

    Ok(())
}

#[test]
fn test_claude_without_api_key_fails() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["-m", "claude"], "Hello")?;
    output
        .assert_failure()
        .assert_stderr_contains("ANTHROPIC_API_KEY is not set")
        .assert_stderr_contains("Export ANTHROPIC_API_KEY");

    let output = project.run_tokviz_with_env(&["-m", "claude"], "Hello", &[("ANTHROPIC_API_KEY", "")])?;
    output.assert_failure().assert_stderr_contains("ANTHROPIC_API_KEY is not set");

    Ok(())
}

#[test]
fn test_missing_credential_stops_the_whole_comparison() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["compare", "--models", "gpt4,claude"], "Hello")?;
    output.assert_failure().assert_stderr_contains("ANTHROPIC_API_KEY");
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_llama3_without_tokenizer_path() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["-m", "llama3"], "Hello")?;
    output.assert_failure().assert_stderr_contains("Configuration error");

    Ok(())
}

#[test]
fn test_llama3_with_missing_tokenizer_file() -> Result<()> {
    let project = TestProject::new()?;
    let missing = project.home_path().join("nope").join("tokenizer.json");

    let output = project.run_tokviz(
        &["-m", "llama3", "--llama3-tokenizer", &missing.display().to_string()],
        "Hello",
    )?;
    output.assert_failure().assert_stderr_contains("Tokenizer file not found");

    Ok(())
}

#[test]
fn test_unknown_encoding() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["-e", "cl200k_base"], "Hello")?;
    output
        .assert_failure()
        .assert_stderr_contains("Unknown encoding: cl200k_base")
        .assert_stderr_contains("Use one of:");

    Ok(())
}

#[test]
fn test_invalid_config_file() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("api_key = \"sk-nope\"\n")?;

    let output = project.run_tokviz(&[], "Hello")?;
    output.assert_failure().assert_stderr_contains("Failed to parse config");

    Ok(())
}

#[test]
fn test_unknown_flag_is_a_usage_error() -> Result<()> {
    Command::cargo_bin("tokviz")?
        .arg("--frobnicate")
        .write_stdin("Hello")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--frobnicate"));

    Ok(())
}

#[test]
fn test_help_lists_commands() -> Result<()> {
    Command::cargo_bin("tokviz")?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("visualize"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("cache"));

    Ok(())
}
