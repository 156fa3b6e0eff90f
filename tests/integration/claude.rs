//! Remote counting through a mock Anthropic API.

use anyhow::Result;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::TestProject;

const API_KEY: (&str, &str) = ("ANTHROPIC_API_KEY", "test-key");

async fn mock_api(project: &TestProject, expected_calls: u64) -> Result<MockServer> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages/count_tokens"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "input_tokens": 11
        })))
        .expect(expected_calls)
        .mount(&server)
        .await;

    project.write_config(&format!("api_base = \"{}\"\n", server.uri()))?;
    Ok(server)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_claude_count_is_cached_across_runs() -> Result<()> {
    let project = TestProject::new()?;
    let _server = mock_api(&project, 1).await?;

    let first = project.run_tokviz_with_env(&["count", "--models", "claude", "-f", "markdown"], "Hello, world!", &[API_KEY])?;
    first.assert_success().assert_stdout_contains("| claude-3-5-sonnet-20241022 | 11 |");
    assert_eq!(project.cached_entries(), 1);

    let second = project.run_tokviz_with_env(&["count", "--models", "claude", "-f", "markdown"], "Hello, world!", &[API_KEY])?;
    second.assert_success();
    assert_eq!(first.stdout, second.stdout);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_cache_always_asks_the_api() -> Result<()> {
    let project = TestProject::new()?;
    let _server = mock_api(&project, 2).await?;

    for _ in 0..2 {
        let output = project.run_tokviz_with_env(&["count", "--models", "claude", "--no-cache"], "Hello, world!", &[API_KEY])?;
        output.assert_success().assert_stdout_contains("claude-3-5-sonnet-20241022: 11 tokens");
    }
    assert_eq!(project.cached_entries(), 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_claude_visualize_shows_count_only() -> Result<()> {
    let project = TestProject::new()?;
    let _server = mock_api(&project, 1).await?;

    let output = project.run_tokviz_with_env(&["-m", "claude", "-f", "markdown"], "Hello, world!", &[API_KEY])?;
    output
        .assert_success()
        .assert_stdout_contains("**Total tokens:** 11")
        .assert_stdout_contains("## Text");

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_error_status_is_reported() -> Result<()> {
    let project = TestProject::new()?;
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages/count_tokens"))
        .respond_with(ResponseTemplate::new(401).set_body_string("{\"error\":\"invalid x-api-key\"}"))
        .expect(1)
        .mount(&server)
        .await;
    project.write_config(&format!("api_base = \"{}\"\n", server.uri()))?;

    let output = project.run_tokviz_with_env(&["count", "--models", "gpt4,claude"], "Hello, world!", &[API_KEY])?;
    output
        .assert_failure()
        .assert_stderr_contains("Tokenization failed for 'claude': API request failed with status 401")
        .assert_stderr_contains("ANTHROPIC_API_KEY");
    assert!(output.stdout.is_empty(), "partial output: {}", output.stdout);
    assert_eq!(project.cached_entries(), 0);

    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_key_fails_before_any_request() -> Result<()> {
    let project = TestProject::new()?;
    let _server = mock_api(&project, 0).await?;

    let output = project.run_tokviz_with_env(
        &["compare", "--models", "gpt4,claude"],
        "Hello, world!",
        &[("ANTHROPIC_API_KEY", "bad\nkey")],
    )?;
    output.assert_failure().assert_stderr_contains("Invalid API key");
    assert!(output.stdout.is_empty());
    assert_eq!(project.cached_entries(), 0);

    Ok(())
}
