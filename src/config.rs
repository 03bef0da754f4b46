//! Configuration loading: environment variables plus a YAML file that
//! selects the storage and database backends. All validation happens
//! here, before any network connection is attempted.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// SQLite backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
    pub connector: String,
    pub path: String,
}

impl SqliteConfig {
    pub fn url(&self) -> String {
        format!("sqlite+{}:///{}", self.connector, self.path)
    }
}

/// MySQL backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlConfig {
    pub connector: String,
    pub host: String,
    pub port: u16,
    pub login: String,
    pub password: String,
    pub name: String,
}

impl MySqlConfig {
    pub fn url(&self) -> String {
        format!(
            "mysql+{}://{}:{}@{}:{}/{}",
            self.connector, self.login, self.password, self.host, self.port, self.name
        )
    }
}

/// Postgres backend settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresConfig {
    pub connector: String,
    pub host: String,
    pub port: u16,
    pub login: String,
    pub password: String,
    pub name: String,
}

impl PostgresConfig {
    pub fn url(&self) -> String {
        format!(
            "postgresql+{}://{}:{}@{}:{}/{}",
            self.connector, self.login, self.password, self.host, self.port, self.name
        )
    }
}

/// Database backend selection. Each arm carries only the fields that
/// backend needs; `url` dispatches exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbConfig {
    Sqlite(SqliteConfig),
    MySql(MySqlConfig),
    Postgres(PostgresConfig),
}

impl DbConfig {
    /// Canonical connection URL in the `scheme+connector://` form the
    /// deployment tooling expects. Must stay bit-exact.
    pub fn url(&self) -> String {
        match self {
            DbConfig::Sqlite(c) => c.url(),
            DbConfig::MySql(c) => c.url(),
            DbConfig::Postgres(c) => c.url(),
        }
    }

    /// URL in the form the sqlx `Any` driver accepts.
    pub fn driver_url(&self) -> String {
        match self {
            DbConfig::Sqlite(c) => format!("sqlite://{}", c.path),
            DbConfig::MySql(c) => format!(
                "mysql://{}:{}@{}:{}/{}",
                c.login, c.password, c.host, c.port, c.name
            ),
            DbConfig::Postgres(c) => format!(
                "postgres://{}:{}@{}:{}/{}",
                c.login, c.password, c.host, c.port, c.name
            ),
        }
    }
}

/// Redis connection settings for the external dialogue-state backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub db: u8,
}

impl RedisConfig {
    pub fn url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

/// Where conversation state lives: process memory or an external
/// key-value backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    Redis(RedisConfig),
}

/// Top-level process configuration. Loaded once at startup and shared
/// read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub bot_token: String,
    pub storage: StorageConfig,
    pub db: DbConfig,
    pub logging_config_path: PathBuf,
}

/// Raw shape of the YAML config file. Only type selection lives in the
/// file; credentials come from the environment.
#[derive(Debug, Deserialize)]
struct RawFileConfig {
    storage: RawStorageSection,
    db: RawDbSection,
}

#[derive(Debug, Deserialize)]
struct RawStorageSection {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct RawDbSection {
    #[serde(rename = "type")]
    kind: String,
    connector: Option<String>,
}

/// Reads an environment variable, treating empty values as unset.
pub fn env_var(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(anyhow!("environment variable {} is not set", key)),
    }
}

fn env_var_parsed<T>(key: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_var(key)?
        .trim()
        .parse()
        .with_context(|| format!("invalid value for environment variable {key}"))
}

fn resolve_db_config(section: &RawDbSection) -> Result<DbConfig> {
    let kind = section.kind.as_str();

    if kind.starts_with("sqlite") {
        Ok(DbConfig::Sqlite(SqliteConfig {
            connector: section.connector.clone().unwrap_or_else(|| "sqlite".to_string()),
            path: env_var("BOT_DATABASE_SQLITE_PATH")?,
        }))
    } else if kind.starts_with("mysql") {
        Ok(DbConfig::MySql(MySqlConfig {
            connector: section.connector.clone().unwrap_or_else(|| "pymysql".to_string()),
            host: env_var("BOT_DATABASE_HOST")?,
            port: env_var_parsed("BOT_DATABASE_PORT")?,
            login: env_var("BOT_DATABASE_LOGIN")?,
            password: env_var("BOT_DATABASE_PASSWORD")?,
            name: env_var("BOT_DATABASE_NAME")?,
        }))
    } else if kind.starts_with("postgres") {
        Ok(DbConfig::Postgres(PostgresConfig {
            connector: section.connector.clone().unwrap_or_else(|| "asyncpg".to_string()),
            host: env_var("BOT_DATABASE_HOST")?,
            port: env_var_parsed("BOT_DATABASE_PORT")?,
            login: env_var("BOT_DATABASE_LOGIN")?,
            password: env_var("BOT_DATABASE_PASSWORD")?,
            name: env_var("BOT_DATABASE_NAME")?,
        }))
    } else {
        Err(anyhow!("unsupported database type: {}", kind))
    }
}

fn resolve_storage_config(section: &RawStorageSection) -> Result<StorageConfig> {
    match section.kind.as_str() {
        "memory" => Ok(StorageConfig::Memory),
        "redis" => Ok(StorageConfig::Redis(RedisConfig {
            host: env_var("BOT_STORAGE_REDIS_HOST")?,
            port: env_var_parsed("BOT_STORAGE_REDIS_PORT")?,
            db: env_var_parsed("BOT_STORAGE_REDIS_DB")?,
        })),
        other => Err(anyhow!("unsupported storage type: {}", other)),
    }
}

fn load_file_config(path: &Path) -> Result<RawFileConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

impl BotConfig {
    /// Loads the full configuration. Any missing variable or
    /// unsupported type string aborts startup.
    pub fn load() -> Result<Self> {
        let config_path = PathBuf::from(env_var("BOT_CONFIG_PATH")?);
        let logging_config_path = PathBuf::from(env_var("LOGGING_CONFIG_PATH")?);
        let bot_token = env_var("BOT_TOKEN")?;

        let raw = load_file_config(&config_path)?;

        Ok(BotConfig {
            bot_token,
            storage: resolve_storage_config(&raw.storage)?,
            db: resolve_db_config(&raw.db)?,
            logging_config_path,
        })
    }
}
