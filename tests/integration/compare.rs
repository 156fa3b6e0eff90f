//! Tests for `tokviz compare`.

use anyhow::Result;

use crate::common::TestProject;

#[test]
fn test_compare_markdown() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["compare", "--models", "gpt4,gpt5", "-f", "markdown"], "naïve café")?;
    output
        .assert_success()
        .assert_stdout_contains("# Token Comparison")
        .assert_stdout_contains("## Token Counts")
        .assert_stdout_contains("## cl100k_base")
        .assert_stdout_contains("## o200k_base")
        .assert_stdout_contains("### Tokens");

    Ok(())
}

#[test]
fn test_compare_terminal_columns() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["compare", "--models", "gpt4,gpt5", "-b"], "Hello, world!")?;
    output
        .assert_success()
        .assert_stdout_contains("Token Comparison")
        .assert_stdout_contains("cl100k_base")
        .assert_stdout_contains("o200k_base");

    Ok(())
}

#[test]
fn test_compare_single_model_matches_visualize() -> Result<()> {
    let project = TestProject::new()?;

    let compared = project.run_tokviz(&["compare", "--models", "gpt4", "-f", "markdown"], "Hello, world!")?;
    let visualized = project.run_tokviz(&["-m", "gpt4", "-f", "markdown"], "Hello, world!")?;
    compared.assert_success();
    visualized.assert_success();
    assert_eq!(compared.stdout, visualized.stdout);

    Ok(())
}

#[test]
fn test_compare_html() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["compare", "--models", "gpt4,gpt5", "-f", "html"], "Hello, world!")?;
    output
        .assert_success()
        .assert_stdout_contains("<title>Token Comparison</title>")
        .assert_stdout_contains("<h1>Token Comparison</h1>");

    Ok(())
}
