// Bookmarks API Settings Engine
// Loads server settings from an optional JSON file, then applies environment overrides.
// The file path comes from the constructor or the BOOKMARKS_CONFIG variable.

use std::fs;
use std::path::Path;

use crate::types::errors::SettingsError;
use crate::types::settings::ServerSettings;

/// Environment variable naming the JSON settings file.
pub const CONFIG_PATH_VAR: &str = "BOOKMARKS_CONFIG";

/// Looks up one environment variable.
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Trait defining the settings engine interface.
pub trait SettingsEngineTrait {
    fn load(&mut self) -> Result<ServerSettings, SettingsError>;
    fn get_settings(&self) -> &ServerSettings;
    fn get_config_path(&self) -> Option<&str>;
}

/// Settings engine reading a JSON file and the process environment.
pub struct SettingsEngine {
    config_path: Option<String>,
    settings: ServerSettings,
    env: EnvLookup,
    config_missing: bool,
}

impl SettingsEngine {
    /// Creates a SettingsEngine reading the real process environment.
    ///
    /// If `path_override` is `None`, the file path is taken from `BOOKMARKS_CONFIG`;
    /// with neither, only defaults and environment overrides apply.
    pub fn new(path_override: Option<String>) -> Self {
        Self::with_env(path_override, Box::new(|key| std::env::var(key).ok()))
    }

    /// Creates a SettingsEngine with a custom environment lookup.
    pub fn with_env(path_override: Option<String>, env: EnvLookup) -> Self {
        let config_path = path_override.or_else(|| env(CONFIG_PATH_VAR));
        Self {
            config_path,
            settings: ServerSettings::default(),
            env,
            config_missing: false,
        }
    }

    /// The configured settings path, if the last `load` found no file there.
    ///
    /// `load` runs before logging is set up, so the caller reports this.
    pub fn missing_config_file(&self) -> Option<&str> {
        if self.config_missing {
            self.config_path.as_deref()
        } else {
            None
        }
    }

    fn read_file(path: &Path) -> Result<ServerSettings, SettingsError> {
        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Overlays `HOST`, `PORT`, `DATABASE_PATH`, `API_TOKEN` and `LOG_LEVEL`.
    fn apply_env_overrides(&self, settings: &mut ServerSettings) -> Result<(), SettingsError> {
        if let Some(host) = (self.env)("HOST") {
            settings.host = host;
        }
        if let Some(port) = (self.env)("PORT") {
            settings.port = port
                .trim()
                .parse()
                .map_err(|_| SettingsError::InvalidValue(format!("PORT must be a port number, got '{}'", port)))?;
        }
        if let Some(path) = (self.env)("DATABASE_PATH") {
            settings.database_path = path;
        }
        if let Some(token) = (self.env)("API_TOKEN") {
            settings.api_token = Some(token);
        }
        if let Some(level) = (self.env)("LOG_LEVEL") {
            settings.log_level = level;
        }
        Ok(())
    }

    fn validate(settings: &ServerSettings) -> Result<(), SettingsError> {
        match settings.api_token.as_deref() {
            Some(token) if !token.trim().is_empty() => {}
            _ => return Err(SettingsError::MissingApiToken),
        }
        if settings.database_path.trim().is_empty() {
            return Err(SettingsError::InvalidValue(
                "database_path cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl SettingsEngineTrait for SettingsEngine {
    /// Loads settings.
    ///
    /// A configured path that does not exist yields defaults; a file that exists
    /// but is malformed is a serialization error. A missing API token is an error.
    fn load(&mut self) -> Result<ServerSettings, SettingsError> {
        self.config_missing = false;
        let mut settings = match self.config_path.as_deref().map(Path::new) {
            Some(path) if path.exists() => Self::read_file(path)?,
            Some(_) => {
                self.config_missing = true;
                ServerSettings::default()
            }
            None => ServerSettings::default(),
        };

        self.apply_env_overrides(&mut settings)?;
        Self::validate(&settings)?;

        self.settings = settings;
        Ok(self.settings.clone())
    }

    fn get_settings(&self) -> &ServerSettings {
        &self.settings
    }

    fn get_config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }
}
