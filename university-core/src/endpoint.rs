use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;
use tracing::debug;

use crate::error::{Result, UniversityError};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3306;
pub const DEFAULT_DATABASE: &str = "university";

/// Location of the university schema.
///
/// Defaults to `localhost:3306/university`. A TOML file may override any
/// field; fields it leaves out keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub database: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

impl Endpoint {
    /// Load the endpoint.
    ///
    /// An explicit `path` must exist and parse. Without one,
    /// `~/.university/config.toml` is used when present, otherwise defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => match Self::config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("no endpoint config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Default config file path: ~/.university/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".university").join("config.toml"))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            UniversityError::config(format!("failed to read {}: {}", path.display(), err))
        })?;

        let endpoint: Self = toml::from_str(&content).map_err(|err| {
            UniversityError::config(format!("invalid TOML in {}: {}", path.display(), err))
        })?;

        debug!(path = %path.display(), endpoint = %endpoint, "loaded endpoint config");
        Ok(endpoint)
    }

    /// Apply command-line or environment overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(database) = database {
            self.database = database;
        }
        self
    }

    pub fn connect_options(&self, username: &str, password: &str) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(username)
            .password(password)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mysql://{}:{}/{}", self.host, self.port, self.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn default_is_local_university_schema() {
        let endpoint = Endpoint::default();
        assert_eq!(endpoint.to_string(), "mysql://localhost:3306/university");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "port = 3307\n").unwrap();

        let endpoint = Endpoint::load(Some(&path)).unwrap();
        assert_eq!(endpoint.host, "localhost");
        assert_eq!(endpoint.port, 3307);
        assert_eq!(endpoint.database, "university");
    }

    #[test]
    fn explicit_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = Endpoint::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "port = \"not a number\"\n").unwrap();

        let err = Endpoint::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let endpoint = Endpoint::default().with_overrides(Some("db.internal".into()), None, None);
        assert_eq!(endpoint.to_string(), "mysql://db.internal:3306/university");
    }
}
