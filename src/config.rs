//! Process configuration.
//!
//! Loaded from the YAML file named by `STATICD_CONFIG` (if set), then
//! overridden by `LISTEN`, `WEBROOT`, `INDEX_FILES` and `LOG_LEVEL`.
//!
//! ```yaml
//! server:
//!   listen_addr: 0.0.0.0:8080
//!   log_level: debug
//! static_files:
//!   webroot: /srv/www
//!   index_files: [index.html]
//!   mime_types:
//!     js: application/javascript
//! auth:
//!   realm: staff
//!   users:
//!     alice: s3cret
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::auth::BasicAuthHandler;
use crate::http::mime::{ContentTypeResolver, MimeGuessLookup, MimeTable, OverlayLookup};
use crate::logger::TracingLogger;
use crate::server::ServerConfig;

pub const CONFIG_PATH_VAR: &str = "STATICD_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("webroot {} does not exist", path.display())]
    WebrootNotFound { path: PathBuf },

    #[error("webroot {} is not a directory", path.display())]
    WebrootNotDirectory { path: PathBuf },

    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub static_files: StaticFilesConfig,
    pub auth: Option<AuthConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub listen_addr: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    pub webroot: PathBuf,
    pub index_files: Vec<String>,
    /// Answer 404 for any request path with a `..` segment
    pub reject_parent_segments: bool,
    /// Extension overrides consulted before the built-in MIME database
    pub mime_types: HashMap<String, String>,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            webroot: PathBuf::from("."),
            index_files: crate::server::default_index_files(),
            reject_parent_segments: false,
            mime_types: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub realm: String,
    #[serde(default)]
    pub users: HashMap<String, String>,
}

impl Config {
    /// Reads the file named by `STATICD_CONFIG` if present, then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = match std::env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Applies `LISTEN`, `WEBROOT`, `INDEX_FILES` (comma separated) and
    /// `LOG_LEVEL` as returned by `var`.
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = var("LISTEN") {
            self.server.listen_addr = addr;
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.server.log_level = level;
        }
        if let Some(webroot) = var("WEBROOT") {
            self.static_files.webroot = PathBuf::from(webroot);
        }
        if let Some(index) = var("INDEX_FILES") {
            self.static_files.index_files = index
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    /// Builds the dispatcher configuration, validating the webroot.
    pub fn server_config(&self) -> Result<ServerConfig, ConfigError> {
        let files = &self.static_files;

        let mut server = ServerConfig::new(&files.webroot)?
            .with_index_files(files.index_files.clone())
            .with_reject_parent_segments(files.reject_parent_segments)
            .with_logger(Arc::new(TracingLogger));

        if !files.mime_types.is_empty() {
            let overrides: MimeTable = files.mime_types.clone().into_iter().collect();
            let lookup = OverlayLookup::new(overrides, Arc::new(MimeGuessLookup));
            server = server.with_content_types(ContentTypeResolver::new(Arc::new(lookup)));
        }

        if let Some(auth) = &self.auth {
            let handler = BasicAuthHandler::with_users(auth.realm.clone(), auth.users.clone());
            server = server.with_auth_handler(Arc::new(handler));
        }

        Ok(server)
    }
}
