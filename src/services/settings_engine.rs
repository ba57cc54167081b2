// Linkboard Settings Engine
// Loads service settings from a JSON file, then layers environment overrides on top.
// A missing file is not an error: defaults apply.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::types::errors::SettingsError;
use crate::types::settings::{BoardSettings, ReorderPolicy};

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "linkboard.json";

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<BoardSettings, SettingsError>;
    fn save(&self) -> Result<(), SettingsError>;
    fn get_settings(&self) -> &BoardSettings;
    /// Applies `LINKBOARD_*` variables from `vars` over the current settings.
    fn apply_env<I>(&mut self, vars: I) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = (String, String)>;
    fn get_config_path(&self) -> &str;
}

/// Settings engine implementation that persists settings as JSON on disk.
pub struct SettingsEngine {
    config_path: String,
    settings: BoardSettings,
}

impl SettingsEngine {
    /// Creates a new SettingsEngine.
    ///
    /// If `path_override` is `Some`, uses that path for the config file,
    /// otherwise `linkboard.json` in the working directory.
    pub fn new(path_override: Option<String>) -> Self {
        Self {
            config_path: path_override.unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string()),
            settings: BoardSettings::default(),
        }
    }

    /// Mutable access for command-line overrides.
    pub fn settings_mut(&mut self) -> &mut BoardSettings {
        &mut self.settings
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(SettingsError::InvalidValue(format!("{}={}", key, other))),
    }
}

fn parse_policy(key: &str, value: &str) -> Result<ReorderPolicy, SettingsError> {
    match value.trim().to_lowercase().as_str() {
        "lenient" => Ok(ReorderPolicy::Lenient),
        "strict" => Ok(ReorderPolicy::Strict),
        other => Err(SettingsError::InvalidValue(format!("{}={}", key, other))),
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings from the JSON config file and the process environment.
    ///
    /// If the file does not exist, starts from defaults.
    /// If the file exists but is malformed, returns a serialization error.
    fn load(&mut self) -> Result<BoardSettings, SettingsError> {
        let path = Path::new(&self.config_path);

        self.settings = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                SettingsError::IoError(format!("Failed to read config file: {}", e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
            })?
        } else {
            debug!(path = %self.config_path, "no config file, using defaults");
            BoardSettings::default()
        };

        self.apply_env(std::env::vars())?;
        Ok(self.settings.clone())
    }

    /// Saves the current settings to the JSON config file.
    ///
    /// Creates parent directories if they don't exist.
    fn save(&self) -> Result<(), SettingsError> {
        let path = Path::new(&self.config_path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(&self.settings).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    fn get_settings(&self) -> &BoardSettings {
        &self.settings
    }

    fn apply_env<I>(&mut self, vars: I) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "LINKBOARD_DB" => self.settings.database_path = value,
                "LINKBOARD_BIND" => self.settings.bind_address = value,
                "LINKBOARD_STATIC_DIR" => self.settings.static_dir = value,
                "LINKBOARD_LOG_DIR" => self.settings.log_dir = Some(value),
                "LINKBOARD_UNIQUE_URLS" => self.settings.unique_urls = parse_bool(&key, &value)?,
                "LINKBOARD_REORDER_POLICY" => {
                    self.settings.reorder_policy = parse_policy(&key, &value)?
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn get_config_path(&self) -> &str {
        &self.config_path
    }
}
