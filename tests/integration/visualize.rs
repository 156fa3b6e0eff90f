//! Tests for the default `visualize` command.

use anyhow::Result;

use crate::common::TestProject;

#[test]
fn test_default_command_terminal_output() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&[], "Hello, world!\n")?;
    output.assert_success().assert_stdout_contains("cl100k_base").assert_stdout_contains("Total tokens: 4");

    Ok(())
}

#[test]
fn test_markdown_table_has_one_row_per_token() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["visualize", "-f", "markdown"], "Hello, world!")?;
    output
        .assert_success()
        .assert_stdout_contains("# cl100k_base")
        .assert_stdout_contains("**Total tokens:** 4")
        .assert_stdout_contains("| 1 | `Hello` | 🩷 |")
        .assert_stdout_contains("| 3 | ` world` | 🩵 |");

    let rows = output.stdout.lines().filter(|line| line.starts_with("| ") && !line.starts_with("| #")).count();
    assert_eq!(rows, 4);

    Ok(())
}

#[test]
fn test_markdown_with_ids_and_boundaries() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["-f", "markdown", "--show-ids", "--show-boundaries"], "Hello, world!")?;
    output
        .assert_success()
        .assert_stdout_contains("| # | Token | Color | ID |")
        .assert_stdout_contains("| 1 | `Hello` | 🩷 | 9906 |")
        .assert_stdout_contains("## Boundaries")
        .assert_stdout_contains("Hello|,| world|!");

    Ok(())
}

#[test]
fn test_trailing_newline_is_trimmed() -> Result<()> {
    let project = TestProject::new()?;

    let with_newline = project.run_tokviz(&["-f", "markdown"], "Hello, world!\n\n")?;
    let without = project.run_tokviz(&["-f", "markdown"], "Hello, world!")?;
    with_newline.assert_success();
    assert_eq!(with_newline.stdout, without.stdout);

    Ok(())
}

#[test]
fn test_html_inline_document() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["-m", "gpt5", "-f", "html", "-i"], "Hello, world!")?;
    output
        .assert_success()
        .assert_stdout_contains("<!DOCTYPE html>")
        .assert_stdout_contains("<title>Token Visualization</title>")
        .assert_stdout_contains("<h1>o200k_base</h1>")
        .assert_stdout_contains("<span class=\"token token-0\">")
        .assert_stdout_contains("<span class=\"token-id\">");

    Ok(())
}

#[test]
fn test_markdown_html_document() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["-f", "markdown-html"], "Hello, world!")?;
    output
        .assert_success()
        .assert_stdout_contains("<!DOCTYPE html>")
        .assert_stdout_contains("<h1>cl100k_base</h1>")
        .assert_stdout_contains("<table>")
        .assert_stdout_contains("<td><code>Hello</code></td>");

    Ok(())
}

#[test]
fn test_model_names_are_case_insensitive() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["-m", "GPT4", "-f", "markdown"], "Hello")?;
    output.assert_success().assert_stdout_contains("# cl100k_base");

    Ok(())
}

#[test]
fn test_encoding_override_from_config() -> Result<()> {
    let project = TestProject::new()?;
    project.write_config("encoding = \"p50k_base\"\n")?;

    let output = project.run_tokviz(&["-f", "markdown"], "Hello, world!")?;
    output.assert_success().assert_stdout_contains("# p50k_base");

    let output = project.run_tokviz(&["-f", "markdown", "-e", "o200k_base"], "Hello, world!")?;
    output.assert_success().assert_stdout_contains("# o200k_base");

    Ok(())
}
