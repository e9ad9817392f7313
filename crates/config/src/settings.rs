// Scoring settings
// Loaded from ~/.config/riskgrid/settings.json
// Holds a credential, so the file is written 0600 on Unix.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The four persisted scoring settings, stored under fixed keys and
/// cleared as a single batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Scoring API credential
    #[serde(rename = "score.apiKey")]
    pub api_key: String,

    /// Environment selector: "production", "dev", or "custom"
    #[serde(rename = "score.environment")]
    pub environment: String,

    /// Subdomain token used when the selector is "custom"
    #[serde(rename = "score.customEnvironment")]
    pub custom_environment: String,

    /// Optional CORS/relay proxy endpoint; empty = direct calls
    #[serde(rename = "score.proxyUrl")]
    pub proxy_url: String,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("riskgrid");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                // Strip comments (lines starting with //)
                let cleaned: String = contents
                    .lines()
                    .filter(|line| !line.trim().starts_with("//"))
                    .collect::<Vec<_>>()
                    .join("\n");

                match serde_json::from_str(&cleaned) {
                    Ok(settings) => settings,
                    Err(e) => {
                        eprintln!("Error parsing settings.json: {}", e);
                        eprintln!("Using default settings");
                        Self::default()
                    }
                }
            }
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, permissions).map_err(|e| e.to_string())?;
        }

        Ok(())
    }

    /// Clear all four settings in one batch (removes the file).
    pub fn clear() -> Result<(), String> {
        Self::clear_at(&Self::config_path())
    }

    pub fn clear_at(path: &Path) -> Result<(), String> {
        if path.exists() {
            fs::remove_file(path).map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    /// The effective environment selector token. A "custom" selector
    /// requires a non-empty custom-environment token; that check is
    /// here so callers fail before any request is built.
    pub fn effective_environment(&self) -> Result<&str, String> {
        match self.environment.as_str() {
            "" => Ok("production"),
            "custom" => {
                let token = self.custom_environment.trim();
                if token.is_empty() {
                    Err("custom environment selected but no environment name set".into())
                } else {
                    Ok(token)
                }
            }
            other => Ok(other),
        }
    }

    /// Proxy URL as an Option (empty string = none configured).
    pub fn proxy(&self) -> Option<String> {
        let url = self.proxy_url.trim();
        if url.is_empty() {
            None
        } else {
            Some(url.to_string())
        }
    }
}
