//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use intake_extractor::{ExtractorConfig, FieldCatalog, FieldProfile};
use intake_llm::ProviderSettings;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active provider profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available provider profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, ProviderSettings>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction and retry settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Custom field profiles, added to or replacing the built-ins
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldProfile>,

    /// Where this configuration was loaded from
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration directory (`~/.intake`).
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".intake"))
    }

    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from `path` (or the default path), or create a default.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };

        config.extractor.validate().map_err(CliError::Config)?;
        config.path = Some(path);
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&ProviderSettings> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: ProviderSettings) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Built-in field profiles plus any configured custom fields.
    pub fn catalog(&self) -> Result<FieldCatalog> {
        Ok(FieldCatalog::builtin().with_custom(self.fields.iter().cloned())?)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("groq".to_string(), ProviderSettings::groq());
        profiles.insert("ollama".to_string(), ProviderSettings::ollama());

        Self {
            active_profile: default_profile(),
            profiles,
            settings: Settings::default(),
            extractor: ExtractorConfig::default(),
            fields: Vec::new(),
            path: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "groq".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_llm::ProviderKind;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "groq");
        assert!(config.profiles.contains_key("ollama"));
        assert!(config.settings.color);
        assert_eq!(config.extractor.max_attempts, None);
        assert_eq!(config.get_active_profile().unwrap().kind, ProviderKind::Groq);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let mut profile = ProviderSettings::ollama();
        profile.model = Some("qwen2.5".to_string());

        config.set_profile("local".to_string(), profile);
        assert!(config.profiles.contains_key("local"));

        config.switch_profile("local".to_string()).unwrap();
        assert_eq!(config.active_profile, "local");
        assert_eq!(config.get_active_profile().unwrap().effective_model(), "qwen2.5");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_gives_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.active_profile, "groq");
        assert!(config.extractor.max_attempts.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load(Some(&path)).unwrap();
        config.extractor.max_attempts = Some(5);
        config.switch_profile("ollama".to_string()).unwrap();
        config.save().unwrap();

        let reloaded = Config::load(Some(&path)).unwrap();
        assert_eq!(reloaded.active_profile, "ollama");
        assert_eq!(reloaded.extractor.max_attempts, Some(5));
        assert_eq!(reloaded.profiles.len(), 2);
    }

    #[test]
    fn test_custom_field_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
active_profile = "ollama"

[profiles.ollama]
kind = "ollama"
model = "llama3.1"

[extractor]
max_input_length = 500
extraction_timeout_secs = 10
max_attempts = 3

[[fields]]
name = "email"
label = "Email"
prompt = "Enter your email: "
instructions = "Extract the email address."

[fields.validation]
pattern = '[^@\s]+@[^@\s]+\.[a-z]{2,}'
description = "Please provide a valid email address"
examples = ["patient@example.com"]
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.extractor.max_attempts, Some(3));

        let catalog = config.catalog().unwrap();
        assert!(catalog.get("email").is_ok());
        assert!(catalog.get("phone").is_ok());
    }

    #[test]
    fn test_invalid_extractor_config_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[extractor]\nmax_input_length = 0\nextraction_timeout_secs = 10\n",
        )
        .unwrap();

        assert!(matches!(Config::load(Some(&path)), Err(CliError::Config(_))));
    }
}
