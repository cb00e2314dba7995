#![allow(clippy::unwrap_used)]

use super::*;

fn base() -> Config {
    Config {
        api_url: DEFAULT_API_URL.to_string(),
        data_dir: PathBuf::from("/tmp/cachebudget"),
    }
}

#[test]
fn test_toml_overrides_defaults() {
    let mut config = base();
    config
        .apply_toml("api_url = \"https://budget.example.com\"\ndata_dir = \"/var/lib/cb\"\n")
        .unwrap();
    assert_eq!(config.api_url, "https://budget.example.com");
    assert_eq!(config.data_dir, PathBuf::from("/var/lib/cb"));
}

#[test]
fn test_toml_partial_and_unknown_keys() {
    let mut config = base();
    config.apply_toml("theme = \"dark\"\n").unwrap();
    assert_eq!(config, base());
}

#[test]
fn test_toml_invalid_is_error() {
    let mut config = base();
    assert!(config.apply_toml("api_url = ").is_err());
}

#[test]
fn test_env_wins_over_file() {
    let mut config = base();
    config.apply_toml("api_url = \"http://file:1\"\n").unwrap();
    config.apply_env(|key| match key {
        "CACHEBUDGET_API_URL" => Some("http://env:2".to_string()),
        _ => None,
    });
    assert_eq!(config.api_url, "http://env:2");
    assert_eq!(config.data_dir, PathBuf::from("/tmp/cachebudget"));
}

#[test]
fn test_empty_env_is_ignored() {
    let mut config = base();
    config.apply_env(|_| Some(String::new()));
    assert_eq!(config, base());
}

#[test]
fn test_db_path() {
    assert_eq!(
        base().db_path(),
        PathBuf::from("/tmp/cachebudget/cachebudget.db")
    );
}

#[test]
fn test_expand_home() {
    assert_eq!(expand_home("exports/out.csv"), PathBuf::from("exports/out.csv"));
    assert_eq!(expand_home("/abs/out.csv"), PathBuf::from("/abs/out.csv"));
    if let Some(dirs) = directories::BaseDirs::new() {
        assert_eq!(expand_home("~/out.csv"), dirs.home_dir().join("out.csv"));
    }
}
