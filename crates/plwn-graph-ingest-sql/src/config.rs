//! Connection descriptors.
//!
//! Two on-disk forms are accepted:
//!
//! ```text
//! # db.properties
//! User=reader
//! Password=secret
//! Url=jdbc:mysql://localhost:3306/wordnet
//! ```
//!
//! ```yaml
//! # db.yaml
//! drivername: mysql+pymysql
//! username: reader
//! password: secret
//! host: localhost
//! port: 3306
//! database: wordnet
//! ```
//!
//! SQLite stores use `Url=jdbc:sqlite:<path>` or `drivername: sqlite` with the
//! file path in `database`. Relative SQLite paths are resolved against the
//! directory holding the descriptor.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_MYSQL_PORT: u16 = 3306;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML descriptor: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("missing `{0}` in connection descriptor")]
    MissingKey(&'static str),

    #[error("malformed line {line} in connection descriptor: {text:?}")]
    MalformedLine { line: usize, text: String },

    #[error("unsupported JDBC URL {0:?}")]
    InvalidUrl(String),

    #[error("invalid port {0:?}")]
    InvalidPort(String),

    #[error("unsupported database driver {0:?}")]
    UnsupportedDriver(String),

    #[error("the {0} driver is not compiled into this build")]
    DriverNotCompiled(Driver),
}

/// Database engine behind a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Sqlite,
    MySql,
}

impl Driver {
    /// Parse a driver name; SQLAlchemy-style `dialect+dbapi` names are
    /// accepted and the DB-API part ignored.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        let dialect = name.split('+').next().unwrap_or(name).trim();
        match dialect.to_ascii_lowercase().as_str() {
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            "mysql" | "mariadb" => Ok(Self::MySql),
            _ => Err(ConfigError::UnsupportedDriver(name.to_string())),
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite => f.write_str("sqlite"),
            Self::MySql => f.write_str("mysql"),
        }
    }
}

/// Everything needed to open one connection.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub driver: Driver,
    pub user: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Database name (MySQL) or database file path (SQLite).
    pub database: String,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("driver", &self.driver)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .finish()
    }
}

#[derive(Deserialize)]
struct YamlDescriptor {
    drivername: String,
    username: Option<String>,
    password: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    database: String,
}

impl ConnectionConfig {
    /// SQLite descriptor for a database file.
    pub fn sqlite(path: impl AsRef<Path>) -> Self {
        Self {
            driver: Driver::Sqlite,
            user: None,
            password: None,
            host: None,
            port: None,
            database: path.as_ref().to_string_lossy().into_owned(),
        }
    }

    /// Load a descriptor file; `.yaml`/`.yml` files are read as YAML, anything
    /// else as `Key=Value` properties.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let mut config = if is_yaml {
            Self::from_yaml_str(&text)?
        } else {
            Self::from_properties_str(&text)?
        };

        if config.driver == Driver::Sqlite {
            let db = PathBuf::from(&config.database);
            if db.is_relative() && config.database != ":memory:" {
                if let Some(dir) = path.parent() {
                    config.database = dir.join(db).to_string_lossy().into_owned();
                }
            }
        }

        tracing::debug!(
            path = %path.display(),
            driver = %config.driver,
            "loaded connection descriptor"
        );
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: YamlDescriptor = serde_yaml::from_str(text)?;
        Ok(Self {
            driver: Driver::parse(&raw.drivername)?,
            user: raw.username,
            password: raw.password,
            host: raw.host,
            port: raw.port,
            database: raw.database,
        })
    }

    /// Parse `Key=Value` lines with keys `User`, `Password` and `Url`.
    ///
    /// Keys are case-insensitive; blank lines and lines starting with `#` or
    /// `!` are ignored. Values keep everything after the first `=`.
    pub fn from_properties_str(text: &str) -> Result<Self, ConfigError> {
        let mut user = None;
        let mut password = None;
        let mut url = None;

        for (i, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::MalformedLine {
                line: i + 1,
                text: line.to_string(),
            })?;
            let value = value.trim().to_string();
            match key.trim().to_ascii_lowercase().as_str() {
                "user" => user = Some(value),
                "password" => password = Some(value),
                "url" => url = Some(value),
                _ => {}
            }
        }

        let url = url.ok_or(ConfigError::MissingKey("Url"))?;
        let mut config = Self::from_jdbc_url(&url)?;
        config.user = user.filter(|u| !u.is_empty());
        config.password = password.filter(|p| !p.is_empty());
        Ok(config)
    }

    /// Parse `jdbc:mysql://host[:port]/name[?params]` or `jdbc:sqlite:path`.
    pub fn from_jdbc_url(url: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidUrl(url.to_string());
        let rest = url.trim().strip_prefix("jdbc:").unwrap_or(url.trim());
        let (scheme, target) = rest.split_once(':').ok_or_else(invalid)?;

        match Driver::parse(scheme)? {
            Driver::Sqlite => {
                let path = target.strip_prefix("//").unwrap_or(target);
                if path.is_empty() {
                    return Err(invalid());
                }
                Ok(Self::sqlite(path))
            }
            Driver::MySql => {
                let target = target.strip_prefix("//").ok_or_else(invalid)?;
                let (authority, name) = target.split_once('/').ok_or_else(invalid)?;
                let name = name.split(['?', ';']).next().unwrap_or_default();
                if authority.is_empty() || name.is_empty() {
                    return Err(invalid());
                }

                let (host, port) = match authority.rsplit_once(':') {
                    Some((host, port)) => {
                        let port = port
                            .parse::<u16>()
                            .map_err(|_| ConfigError::InvalidPort(port.to_string()))?;
                        (host, port)
                    }
                    None => (authority, DEFAULT_MYSQL_PORT),
                };

                Ok(Self {
                    driver: Driver::MySql,
                    user: None,
                    password: None,
                    host: Some(host.to_string()),
                    port: Some(port),
                    database: name.to_string(),
                })
            }
        }
    }
}
