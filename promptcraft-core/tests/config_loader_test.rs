use promptcraft_core::config::constants::defaults;
use promptcraft_core::{ConfigManager, PromptCraftConfig};
use std::fs;
use tempfile::TempDir;

fn write_config(path: &std::path::Path, model: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, format!("[generation]\nmodel = \"{model}\"\n")).unwrap();
}

#[test]
fn workspace_file_wins_over_dot_dir_and_home() {
    let workspace = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_config(&workspace.path().join("promptcraft.toml"), "gemini-1.5-pro");
    write_config(
        &workspace.path().join(".promptcraft/promptcraft.toml"),
        "gemini-1.5-flash",
    );
    write_config(
        &home.path().join(".promptcraft/promptcraft.toml"),
        "gemini-2.5-flash",
    );

    let manager = ConfigManager::load_from_locations(workspace.path(), Some(home.path())).unwrap();
    assert_eq!(manager.config().generation.model, "gemini-1.5-pro");
}

#[test]
fn dot_dir_is_used_before_home() {
    let workspace = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    write_config(
        &workspace.path().join(".promptcraft/promptcraft.toml"),
        "gemini-1.5-flash",
    );
    write_config(
        &home.path().join(".promptcraft/promptcraft.toml"),
        "gemini-1.5-pro",
    );

    let manager = ConfigManager::load_from_locations(workspace.path(), Some(home.path())).unwrap();
    assert_eq!(manager.config().generation.model, "gemini-1.5-flash");
}

#[test]
fn home_config_is_the_last_resort() {
    let workspace = TempDir::new().unwrap();
    let home = TempDir::new().unwrap();
    let home_config = home.path().join(".promptcraft/promptcraft.toml");
    write_config(&home_config, "gemini-1.5-pro");

    let manager = ConfigManager::load_from_locations(workspace.path(), Some(home.path())).unwrap();
    assert_eq!(manager.config().generation.model, "gemini-1.5-pro");
    assert_eq!(manager.config_path(), Some(home_config.as_path()));
}

#[test]
fn defaults_when_nothing_is_found() {
    let workspace = TempDir::new().unwrap();
    let manager = ConfigManager::load_from_locations(workspace.path(), None).unwrap();
    assert!(manager.config_path().is_none());
    assert_eq!(manager.config(), &PromptCraftConfig::default());
    assert_eq!(manager.config().generation.model, defaults::DEFAULT_MODEL);
}

#[test]
fn malformed_file_is_an_error() {
    let workspace = TempDir::new().unwrap();
    fs::write(workspace.path().join("promptcraft.toml"), "[generation\nmodel=").unwrap();

    let err = ConfigManager::load_from_locations(workspace.path(), None).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn api_section_feeds_key_sources() {
    let config = PromptCraftConfig::from_toml_str(
        "[api]\nkey_env = \"MY_GEMINI_KEY\"\nkey = \"from-config\"\n",
    )
    .unwrap();
    let sources = config.api.key_sources();
    assert_eq!(sources.gemini_env, "MY_GEMINI_KEY");
    assert_eq!(sources.gemini_config.as_deref(), Some("from-config"));
}
