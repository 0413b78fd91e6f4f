//! Integration tests for the environment-variable overlay.
//!
//! These tests mutate the process environment, so they live in their own
//! test binary and serialize through a lock. Variables are removed before
//! the lock is released.

use std::fs;
use std::sync::Mutex;

use service_bootstrap::config::{ConfigError, ConfigLoader, Defaults, FileFormat};

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn locked() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn load_with_dir(dir: &std::path::Path) -> Result<service_bootstrap::AppConfig, ConfigError> {
    ConfigLoader::new("config", FileFormat::Yaml)
        .search_path(dir)
        .defaults(Defaults::standard())
        .load()
}

#[test]
fn env_overrides_both_default_and_file() {
    let _guard = locked();
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.yaml"),
        "server:\n  bind_address: ':7070'\n",
    )
    .unwrap();

    std::env::set_var("SERVER_BIND_ADDRESS", ":8080");
    let result = load_with_dir(dir.path());
    std::env::remove_var("SERVER_BIND_ADDRESS");

    assert_eq!(result.unwrap().server.bind_address, ":8080");
}

#[test]
fn env_value_is_coerced_to_the_key_type() {
    let _guard = locked();
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("SERVER_READ_TIMEOUT_SECS", "30");
    let result = load_with_dir(dir.path());
    std::env::remove_var("SERVER_READ_TIMEOUT_SECS");

    assert_eq!(result.unwrap().server.read_timeout_secs, Some(30));
}

#[test]
fn env_zero_disables_a_timeout() {
    let _guard = locked();
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("SERVER_WRITE_TIMEOUT_SECS", "0");
    let result = load_with_dir(dir.path());
    std::env::remove_var("SERVER_WRITE_TIMEOUT_SECS");

    let config = result.unwrap();
    assert_eq!(config.server.write_timeout_secs, Some(0));
    assert_eq!(config.server.write_timeout(), None);
}

#[test]
fn env_match_is_case_insensitive() {
    let _guard = locked();
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("database_user", "svc-account");
    let result = load_with_dir(dir.path());
    std::env::remove_var("database_user");

    assert_eq!(result.unwrap().database.user, "svc-account");
}

#[test]
fn unparseable_env_value_is_a_fatal_error() {
    let _guard = locked();
    let dir = tempfile::tempdir().unwrap();

    std::env::set_var("SERVER_IDLE_TIMEOUT_SECS", "never");
    let result = load_with_dir(dir.path());
    std::env::remove_var("SERVER_IDLE_TIMEOUT_SECS");

    assert!(matches!(result, Err(ConfigError::EnvParse { .. })));
}
