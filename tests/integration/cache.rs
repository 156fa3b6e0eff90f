//! Tests for `tokviz cache`.

use anyhow::Result;
use std::fs;

use crate::common::TestProject;

#[test]
fn test_cache_info_on_missing_directory() -> Result<()> {
    let project = TestProject::new()?;

    let output = project.run_tokviz(&["cache", "info"], "")?;
    output
        .assert_success()
        .assert_stdout_contains("Token count cache")
        .assert_stdout_contains(&project.cache_path().display().to_string())
        .assert_stdout_contains("Entries:  0");

    Ok(())
}

#[test]
fn test_cache_clear_removes_entries() -> Result<()> {
    let project = TestProject::new()?;
    fs::create_dir_all(project.cache_path())?;
    fs::write(project.cache_path().join("a.json"), "1")?;
    fs::write(project.cache_path().join("b.json"), "2")?;

    let output = project.run_tokviz(&["cache", "info"], "")?;
    output.assert_success().assert_stdout_contains("Entries:  2");

    let output = project.run_tokviz(&["cache", "clear"], "")?;
    output.assert_success().assert_stdout_contains("Removed 2 cached count(s)");
    assert_eq!(project.cached_entries(), 0);

    let output = project.run_tokviz(&["cache", "clear"], "")?;
    output.assert_success().assert_stdout_contains("Removed 0 cached count(s)");

    Ok(())
}

#[test]
fn test_cache_dir_from_config() -> Result<()> {
    let project = TestProject::new()?;
    let configured = project.home_path().join("configured-cache");
    project.write_config(&format!("cache_dir = \"{}\"\n", configured.display()))?;

    // The environment variable wins over the config file
    let output = project.run_tokviz(&["cache", "info"], "")?;
    output.assert_success().assert_stdout_contains(&project.cache_path().display().to_string());

    Ok(())
}
