//! Configuration loading and catalog externalization

use anyhow::Result;
use party_predict::cli::load_config_and_catalog;
use party_predict::config::Config;
use party_predict::PartyCatalog;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_has_defaults() -> Result<()> {
    let config = Config::default();

    assert!(!config.llm.provider.is_empty());
    assert!(!config.llm.model.is_empty());
    assert!(config.llm.api_key_env.is_some());

    Ok(())
}

#[test]
fn test_config_load_returns_valid_config() -> Result<()> {
    // Should load config or return defaults without crashing
    let config = Config::load()?;
    assert!(!config.llm.provider.is_empty());
    Ok(())
}

#[test]
fn test_config_explicit_path() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("pp.toml");
    fs::write(
        &path,
        r#"
[llm]
provider = "openai-compatible"
model = "llama3"
api_key_env = "LOCAL_KEY"
base_url = "http://localhost:11434/v1"
max_tokens = 200
"#,
    )?;

    let config = Config::load_with_path(Some(path.to_string_lossy().into_owned()))?;
    assert_eq!(config.llm.provider, "openai-compatible");
    assert_eq!(config.llm.model, "llama3");
    assert_eq!(config.llm.max_tokens, Some(200));
    assert!(config.catalog.path.is_none());

    Ok(())
}

#[test]
fn test_config_explicit_path_missing_fails() {
    let result = Config::load_with_path(Some("/nonexistent/party-predict.toml".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_config_explicit_path_invalid_toml_fails() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[llm\nprovider = ")?;

    let result = Config::load_with_path(Some(path.to_string_lossy().into_owned()));
    assert!(result.is_err());
    Ok(())
}

#[test]
fn test_catalog_file_via_config() -> Result<()> {
    let dir = TempDir::new()?;
    let catalog_path = dir.path().join("parties.toml");
    fs::write(
        &catalog_path,
        r#"
[countries]
Freedonia = ["Firefly Party", "Trentino League"]
"#,
    )?;
    let config_path = dir.path().join("pp.toml");
    fs::write(
        &config_path,
        format!("[catalog]\npath = {:?}\n", catalog_path.to_string_lossy()),
    )?;

    let (_, catalog) =
        load_config_and_catalog(Some(config_path.to_string_lossy().into_owned()), None)?;
    assert_eq!(
        catalog.options_for("Freedonia").unwrap(),
        &["Firefly Party".to_string(), "Trentino League".to_string()]
    );
    assert!(catalog.options_for("India").is_err());

    Ok(())
}

#[test]
fn test_catalog_override_wins() -> Result<()> {
    let dir = TempDir::new()?;
    let catalog_path = dir.path().join("parties.toml");
    fs::write(&catalog_path, "[countries]\nSylvania = [\"Royal Party\"]\n")?;

    let (config, catalog) = load_config_and_catalog(
        None,
        Some(catalog_path.to_string_lossy().into_owned()),
    )?;
    assert!(config.catalog.path.is_some());
    assert_eq!(catalog.len(), 1);
    Ok(())
}

#[test]
fn test_catalog_file_with_empty_list_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("parties.toml");
    fs::write(&path, "[countries]\nNowhere = []\n")?;

    let result = PartyCatalog::from_path(&path);
    assert!(result.is_err());
    Ok(())
}
