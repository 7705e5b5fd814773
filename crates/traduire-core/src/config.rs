use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::client::{TranslationClient, DEFAULT_ENDPOINT};
use crate::language::Language;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Option<String>,
    pub contact_email: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the config file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn set_language_pair(&mut self, from: Language, to: Language) {
        self.source_language = Some(from.code().to_string());
        self.target_language = Some(to.code().to_string());
    }

    pub fn source_language(&self) -> Language {
        self.source_language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or(Language::English)
    }

    pub fn target_language(&self) -> Language {
        self.target_language
            .as_deref()
            .and_then(Language::from_code)
            .unwrap_or(Language::French)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn build_client(&self) -> TranslationClient {
        TranslationClient::new(self.endpoint()).with_contact_email(self.contact_email.clone())
    }

    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("traduire").join("config.json"))
    }
}
