/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_auth")]
    pub auth: AuthSettings,

    #[serde(default = "default_cache")]
    pub cache: CacheSettings,

    #[serde(default = "default_exports")]
    pub exports: ExportSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_database_url")]
    pub database_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration_hours")]
    pub jwt_expiration_hours: u64,

    #[serde(default = "default_jwt_refresh_expiration_days")]
    pub jwt_refresh_expiration_days: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheSettings {
    /// Albums whose like count is kept in memory
    #[serde(default = "default_likes_capacity")]
    pub likes_capacity: usize,

    #[serde(default = "default_likes_ttl_secs")]
    pub likes_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportSettings {
    /// Directory the export worker writes rendered playlists to
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `config.toml` in the working directory.
    /// Environment variables prefixed with `OPENMUSIC_` win over the file;
    /// nested keys use `__`, e.g. `OPENMUSIC_AUTH__JWT_SECRET`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = path.map_or_else(|| PathBuf::from("config.toml"), Path::to_path_buf);
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        } else if path.is_some() {
            return Err(ServerError::Config(format!(
                "config file not found: {}",
                config_path.display()
            )));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("OPENMUSIC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| ServerError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ServerError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(ServerError::Config(
                "JWT secret is required (set OPENMUSIC_AUTH__JWT_SECRET)".to_string(),
            ));
        }

        if self.auth.jwt_expiration_hours == 0 {
            return Err(ServerError::Config(
                "auth.jwt_expiration_hours must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        database_url: default_database_url(),
    }
}

fn default_database_url() -> String {
    "sqlite://./data/openmusic.db".to_string()
}

fn default_auth() -> AuthSettings {
    AuthSettings {
        jwt_secret: String::new(),
        jwt_expiration_hours: default_jwt_expiration_hours(),
        jwt_refresh_expiration_days: default_jwt_refresh_expiration_days(),
    }
}

fn default_jwt_expiration_hours() -> u64 {
    1
}

fn default_jwt_refresh_expiration_days() -> u64 {
    30
}

fn default_cache() -> CacheSettings {
    CacheSettings {
        likes_capacity: default_likes_capacity(),
        likes_ttl_secs: default_likes_ttl_secs(),
    }
}

fn default_likes_capacity() -> usize {
    1024
}

fn default_likes_ttl_secs() -> u64 {
    1800
}

fn default_exports() -> ExportSettings {
    ExportSettings {
        outbox_dir: default_outbox_dir(),
    }
}

fn default_outbox_dir() -> PathBuf {
    PathBuf::from("./data/exports")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            storage: default_storage(),
            auth: default_auth(),
            cache: default_cache(),
            exports: default_exports(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_needs_a_secret() {
        let config = ServerConfig::default();
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("openmusic.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9000\n\n[auth]\njwt_secret = \"from-file\"\n",
        )
        .unwrap();

        let config = ServerConfig::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.likes_ttl_secs, 1800);
        assert_eq!(config.exports.outbox_dir, PathBuf::from("./data/exports"));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.jwt_secret, "from-file");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = ServerConfig::load(Some(Path::new("/nonexistent/openmusic.toml"))).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
