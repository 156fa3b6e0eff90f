//! Tests for `tokviz count`.

use anyhow::Result;

use crate::common::TestProject;

#[test]
fn test_count_markdown_default_model() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["count", "-f", "markdown"], "Hello, world!\n")?;
    output
        .assert_success()
        .assert_stdout_contains("# Token Counts")
        .assert_stdout_contains("| Model | Token Count |")
        .assert_stdout_contains("| cl100k_base | 4 |");

    Ok(())
}

#[test]
fn test_count_keeps_model_order() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["count", "--models", "gpt5,gpt4", "-f", "markdown"], "Hello, world!")?;
    output.assert_success();

    let o200k = output.stdout.find("| o200k_base |").expect("o200k row");
    let cl100k = output.stdout.find("| cl100k_base |").expect("cl100k row");
    assert!(o200k < cl100k, "rows out of order:\n{}", output.stdout);

    Ok(())
}

#[test]
fn test_count_terminal_lines() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["count", "--models", "gpt4,gpt5-mini"], "Hello, world!")?;
    output
        .assert_success()
        .assert_stdout_contains("cl100k_base: 4 tokens")
        .assert_stdout_contains("o200k_base: 4 tokens");

    Ok(())
}

#[test]
fn test_count_html_list() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["count", "-f", "html"], "Hello, world!")?;
    output
        .assert_success()
        .assert_stdout_contains("<title>Token Counts</title>")
        .assert_stdout_contains("cl100k_base");

    Ok(())
}
