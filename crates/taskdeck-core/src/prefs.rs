use crate::error::Result;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ---------------------------------------------------------------------------
// Preferences
// ---------------------------------------------------------------------------

/// Local, non-server preferences: theme, background customization, and
/// the task API endpoint. Stored as YAML under the config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub background_url: Option<String>,
    #[serde(default)]
    pub background_keyword: Option<String>,
    #[serde(default)]
    pub custom_backgrounds: Vec<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "http://localhost:3001".to_string()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            background_url: None,
            background_keyword: None,
            custom_backgrounds: Vec::new(),
            api_url: default_api_url(),
        }
    }
}

impl Preferences {
    /// Load from the default config path, falling back to defaults when
    /// no file exists yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&paths::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Register an uploaded background image and make it current.
    pub fn add_custom_background(&mut self, url: impl Into<String>) {
        let url = url.into();
        if !self.custom_backgrounds.contains(&url) {
            self.custom_backgrounds.push(url.clone());
        }
        self.background_url = Some(url);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
