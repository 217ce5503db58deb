use std::fs;

use directories::ProjectDirs;
use figment::{
    providers::{Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoggingConfig {
    pub studydesk: String,
}

impl LoggingConfig {
    const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
    const STUDYDESK_LEVEL: &str = "info";

    fn default() -> Self {
        LoggingConfig {
            studydesk: Self::STUDYDESK_LEVEL.to_string(),
        }
    }

    fn ensure_valid(&mut self) {
        let str_original = self.studydesk.clone();
        self.studydesk = self.studydesk.trim().to_ascii_lowercase();
        if !Self::LOG_LEVELS.contains(&self.studydesk.as_str()) {
            eprintln!(
                "Config error: studydesk log level of '{}' is invalid - using default of '{}'",
                str_original,
                Self::STUDYDESK_LEVEL
            );
            self.studydesk = Self::STUDYDESK_LEVEL.to_owned();
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    const DEFAULT_HOST: &str = "127.0.0.1";
    const DEFAULT_PORT: u16 = 5000;

    fn default() -> Self {
        ServerConfig {
            host: Self::DEFAULT_HOST.to_string(),
            port: Self::DEFAULT_PORT,
        }
    }

    fn ensure_valid(&mut self) {
        self.host = self.host.trim().to_string();
        if self.host.is_empty() {
            eprintln!(
                "Config error: server host is empty - using default of '{}'",
                Self::DEFAULT_HOST
            );
            self.host = Self::DEFAULT_HOST.to_owned();
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the database file
    pub data_dir: String,
    /// Upload directory, relative to data_dir unless absolute
    pub uploads_dir: String,
}

impl StorageConfig {
    const DEFAULT_DATA_DIR: &str = ".";
    const DEFAULT_UPLOADS_DIR: &str = "uploads";

    fn default() -> Self {
        StorageConfig {
            data_dir: Self::DEFAULT_DATA_DIR.to_string(),
            uploads_dir: Self::DEFAULT_UPLOADS_DIR.to_string(),
        }
    }

    fn ensure_valid(&mut self) {
        if self.data_dir.trim().is_empty() {
            eprintln!(
                "Config error: data_dir is empty - using default of '{}'",
                Self::DEFAULT_DATA_DIR
            );
            self.data_dir = Self::DEFAULT_DATA_DIR.to_owned();
        }
        if self.uploads_dir.trim().is_empty() {
            eprintln!(
                "Config error: uploads_dir is empty - using default of '{}'",
                Self::DEFAULT_UPLOADS_DIR
            );
            self.uploads_dir = Self::DEFAULT_UPLOADS_DIR.to_owned();
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Loads the configuration from a TOML file located in the app's data directory.
    /// If the file is missing or fails to parse, defaults are used.
    /// Additionally, writes the default config to disk if no file exists.
    pub fn load_config(project_dirs: &ProjectDirs) -> Self {
        let config_path = project_dirs.data_local_dir().join("config.toml");

        let default_config = Config {
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        };

        // If the config file doesn't exist, write the default configuration to disk.
        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!(
                        "Failed to create configuration directory {}: {}",
                        parent.display(),
                        e
                    );
                }
            }
            if let Ok(toml_string) = toml::to_string_pretty(&default_config) {
                if let Err(e) = fs::write(&config_path, toml_string) {
                    eprintln!(
                        "Failed to write default config to {}: {}",
                        config_path.display(),
                        e
                    );
                }
            } else {
                eprintln!("Failed to serialize default config.");
            }
        }

        // Build a Figment instance that uses the defaults merged with the TOML file (if it exists)
        let figment = Figment::from(Serialized::defaults(default_config.clone()))
            .merge(Toml::file(&config_path));

        // Attempt to extract the configuration; on error, log a message and fall back to defaults.
        let mut config = figment.extract().unwrap_or_else(|err| {
            eprintln!(
                "Could not load config file {}: {}. Using default configuration.",
                config_path.display(),
                err
            );
            default_config
        });

        config.ensure_valid();

        config
    }

    fn ensure_valid(&mut self) {
        self.logging.ensure_valid();
        self.server.ensure_valid();
        self.storage.ensure_valid();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_log_level_falls_back_to_default() {
        let mut config = Config {
            logging: LoggingConfig {
                studydesk: "Verbose".to_string(),
            },
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        };
        config.ensure_valid();
        assert_eq!(config.logging.studydesk, "info");
    }

    #[test]
    fn test_log_level_is_normalized() {
        let mut config = Config {
            logging: LoggingConfig {
                studydesk: " DEBUG ".to_string(),
            },
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
        };
        config.ensure_valid();
        assert_eq!(config.logging.studydesk, "debug");
    }

    #[test]
    fn test_empty_storage_paths_fall_back_to_defaults() {
        let mut config = Config {
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
            storage: StorageConfig {
                data_dir: "  ".to_string(),
                uploads_dir: String::new(),
            },
        };
        config.ensure_valid();
        assert_eq!(config.storage.data_dir, ".");
        assert_eq!(config.storage.uploads_dir, "uploads");
    }
}
