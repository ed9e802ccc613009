//! Service configuration
//!
//! Values come from built-in defaults, then an optional `cafes.toml`, then
//! environment variables prefixed with `CAFES_`.
//!
//! # Environment Variables
//! - `CAFES_HOST`: bind address (default: 127.0.0.1)
//! - `CAFES_PORT`: bind port (default: 5000)
//! - `CAFES_DATABASE_URL`: SQLite connection URL (default: sqlite:cafes.db?mode=rwc)
//! - `CAFES_DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//! - `CAFES_SESSION_SECRET`: session signing secret, at least 32 bytes (required)
//! - `CAFES_SESSION_EXPIRY_SECONDS`: session lifetime (default: 604800)
//! - `CAFES_ADMIN_IDS`: comma separated user ids allowed to edit and delete (default: 1)

use common::database::DatabaseConfig;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Deserializer, de::Error as _};

/// Minimum accepted length of the session signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 32;

/// Service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub session_secret: String,
    pub session_expiry_seconds: u64,
    #[serde(deserialize_with = "deserialize_admin_ids")]
    pub admin_ids: Vec<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AdminId {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AdminIds {
    One(AdminId),
    Many(Vec<AdminId>),
}

impl AdminId {
    fn push_into(self, ids: &mut Vec<i64>) -> Result<(), String> {
        match self {
            AdminId::Number(id) => ids.push(id),
            AdminId::Text(text) => {
                for part in text.split(',').map(str::trim).filter(|part| !part.is_empty()) {
                    let id = part
                        .parse()
                        .map_err(|_| format!("admin_ids: `{}` is not a user id", part))?;
                    ids.push(id);
                }
            }
        }
        Ok(())
    }
}

/// Accept `5`, `"5"`, `"1,7"` or `[1, 7]`
///
/// The environment source yields a bare integer for a single id and a
/// list only when the value contains a separator.
fn deserialize_admin_ids<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match AdminIds::deserialize(deserializer)? {
        AdminIds::One(id) => vec![id],
        AdminIds::Many(ids) => ids,
    };

    let mut ids = Vec::with_capacity(raw.len());
    for id in raw {
        id.push_into(&mut ids).map_err(D::Error::custom)?;
    }
    Ok(ids)
}

impl Settings {
    /// Load settings from defaults, `cafes.toml` and the environment
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 5000)?
            .set_default("database_url", "sqlite:cafes.db?mode=rwc")?
            .set_default("database_max_connections", 5)?
            .set_default("session_expiry_seconds", 604800)?
            .set_default("admin_ids", vec![1i64])?
            .add_source(
                File::with_name("cafes.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("CAFES")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("admin_ids"),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session_secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "session_secret must be at least {} bytes long",
                MIN_SECRET_LEN
            )));
        }
        Ok(())
    }

    /// Database configuration derived from these settings
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(self.database_url.clone(), self.database_max_connections)
    }

    /// Socket address the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
