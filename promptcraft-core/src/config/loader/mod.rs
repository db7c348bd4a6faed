use crate::config::constants::defaults;
use crate::config::core::{
    ApiConfig, GenerationConfig, HttpConfig, InputConfig, PersonaConfig, RateLimitConfig,
};
use crate::presets::LiveTechniques;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure, read from `promptcraft.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct PromptCraftConfig {
    /// Model and temperature
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Role persona and tone
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Starting manual toggles and detail text
    #[serde(default)]
    pub techniques: LiveTechniques,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub input: InputConfig,

    /// API key lookup
    #[serde(default)]
    pub api: ApiConfig,
}

impl PromptCraftConfig {
    /// Parse TOML and repair out-of-range values
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: PromptCraftConfig = toml::from_str(content)?;
        config.normalize();
        Ok(config)
    }

    /// Clamp values that would otherwise be rejected at request time
    pub fn normalize(&mut self) {
        self.generation.normalize();
        if self.input.max_length == 0 {
            tracing::warn!(
                fallback = defaults::DEFAULT_MAX_INPUT_LENGTH,
                "input.max_length must be positive, using default"
            );
            self.input.max_length = defaults::DEFAULT_MAX_INPUT_LENGTH;
        }
    }

    /// Write `promptcraft.toml` and `.env.example` into `workspace`.
    ///
    /// Refuses to replace an existing config unless `force` is set.
    pub fn bootstrap_project<P: AsRef<Path>>(workspace: P, force: bool) -> Result<Vec<String>> {
        let workspace = workspace.as_ref();
        let mut created_files = Vec::new();

        let config_path = workspace.join(defaults::DEFAULT_CONFIG_FILE);
        if config_path.exists() && !force {
            bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }
        Self::create_sample_config(&config_path)?;
        created_files.push(defaults::DEFAULT_CONFIG_FILE.to_string());

        let env_example_path = workspace.join(".env.example");
        if !env_example_path.exists() || force {
            fs::write(&env_example_path, Self::default_env_example()).with_context(|| {
                format!(
                    "Failed to write env example: {}",
                    env_example_path.display()
                )
            })?;
            created_files.push(".env.example".to_string());
        }

        Ok(created_files)
    }

    fn default_env_example() -> String {
        format!(
            "# Copy to .env and replace the placeholder with your key\n{}=YOUR_API_KEY_HERE\n",
            defaults::DEFAULT_API_KEY_ENV
        )
    }

    /// Create sample configuration file
    pub fn create_sample_config<P: AsRef<Path>>(output: P) -> Result<()> {
        let output = output.as_ref();
        let default_config = PromptCraftConfig::default();
        let config_content = toml::to_string_pretty(&default_config)
            .context("Failed to serialize default configuration")?;

        fs::write(output, config_content)
            .with_context(|| format!("Failed to write config file: {}", output.display()))?;

        Ok(())
    }
}

/// Configuration manager for locating and loading `promptcraft.toml`
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PromptCraftConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Load `explicit` if given, otherwise search the default locations
    pub fn load_with_override(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => Self::load(),
        }
    }

    /// Get the user's home directory path
    fn get_home_dir() -> Option<PathBuf> {
        dirs::home_dir()
    }

    /// Load configuration from a specific workspace
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        Self::load_from_locations(workspace.as_ref(), Self::get_home_dir().as_deref())
    }

    /// Search `workspace`, then `workspace/.promptcraft`, then `home/.promptcraft`
    pub fn load_from_locations(workspace: &Path, home: Option<&Path>) -> Result<Self> {
        let mut candidates = vec![
            workspace.join(defaults::DEFAULT_CONFIG_FILE),
            workspace
                .join(defaults::DEFAULT_CONFIG_DIR)
                .join(defaults::DEFAULT_CONFIG_FILE),
        ];
        if let Some(home_dir) = home {
            candidates.push(
                home_dir
                    .join(defaults::DEFAULT_CONFIG_DIR)
                    .join(defaults::DEFAULT_CONFIG_FILE),
            );
        }

        if let Some(found) = candidates.iter().find(|path| path.exists()) {
            return Self::load_from_file(found);
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Self {
            config: PromptCraftConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = PromptCraftConfig::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &PromptCraftConfig {
        &self.config
    }

    pub fn into_config(self) -> PromptCraftConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
