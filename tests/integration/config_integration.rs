//! Integration tests for layered configuration and context construction

use super::test_utils::{env_lock, ScopedEnv};
use gamestate::cli::{Commands, OutputFormat, RunContext};
use gamestate::config::ConfigLoader;
use gamestate::GameContext;
use tempfile::TempDir;

fn write_workspace_config(root: &std::path::Path, name: &str, contents: &str) {
    let dir = root.join("config");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn test_environment_overrides_workspace_file() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(temp_dir.path(), "config.toml", "[initial]\ncoins = 30\nstars = 2\n");
    let _home = ScopedEnv::set("HOME", &temp_dir.path().join("nohome").to_string_lossy());
    let _coins = ScopedEnv::set("GAMESTATE__INITIAL__COINS", "99");

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(config.initial.coins, 99);
    assert_eq!(config.initial.stars, 2);
}

#[test]
fn test_env_specific_workspace_file_wins_over_base() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    write_workspace_config(temp_dir.path(), "config.toml", "[initial]\ncoins = 30\n");
    write_workspace_config(temp_dir.path(), "staging.toml", "[initial]\ncoins = 31\n");
    let _home = ScopedEnv::set("HOME", &temp_dir.path().join("nohome").to_string_lossy());
    let _env = ScopedEnv::set("GAMESTATE_ENV", "staging");

    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    assert_eq!(config.initial.coins, 31);
}

#[test]
fn test_invalid_balances_rejected() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    std::fs::write(&path, "[initial]\ncoins = -5\n").unwrap();

    assert!(ConfigLoader::load_from_file(&path).is_err());
}

#[test]
fn test_context_from_config_uses_initial_balances() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("game.toml");
    std::fs::write(&path, "[initial]\ncoins = 12\nstars = 7\n").unwrap();

    let config = ConfigLoader::load_from_file(&path).unwrap();
    let context = GameContext::from_config(&config);
    assert_eq!(context.state().coins(), 12);
    assert_eq!(context.state().stars(), 7);

    let output = RunContext::with_config(config, OutputFormat::Json)
        .execute(&Commands::Run {
            steps: vec!["unlock:1:7".parse().unwrap(), "upgrade:1:2".parse().unwrap()],
        })
        .unwrap();
    let report: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(report["final_state"]["coins"], 10);
    assert_eq!(report["final_state"]["stars"], 0);
    assert_eq!(report["final_state"]["characters"][0]["level"], 2);
    assert_eq!(report["flushes"].as_array().unwrap().len(), 1);
}
