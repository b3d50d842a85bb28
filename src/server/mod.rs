//! Request handling core and the TCP listener that feeds it.

pub mod dispatcher;
pub mod listener;
pub mod resolver;

pub use dispatcher::RequestDispatcher;
pub use resolver::PathResolver;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::auth::AuthenticationHandler;
use crate::config::ConfigError;
use crate::http::mime::ContentTypeResolver;
use crate::logger::Logger;

pub fn default_index_files() -> Vec<String> {
    vec!["index.htm".to_string(), "index.html".to_string()]
}

/// Immutable dispatcher configuration.
///
/// Changing any setting produces a new value; build a new
/// `RequestDispatcher` from it to apply the change. A config shared with a
/// running dispatcher is never mutated in place.
#[derive(Clone)]
pub struct ServerConfig {
    webroot: PathBuf,
    index_files: Vec<String>,
    auth_handler: Option<Arc<dyn AuthenticationHandler>>,
    logger: Option<Arc<dyn Logger>>,
    content_types: ContentTypeResolver,
    reject_parent_segments: bool,
}

impl ServerConfig {
    /// Fails with `ConfigError` unless `webroot` is an existing directory.
    pub fn new(webroot: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            webroot: validate_webroot(webroot.as_ref())?,
            index_files: default_index_files(),
            auth_handler: None,
            logger: None,
            content_types: ContentTypeResolver::default(),
            reject_parent_segments: false,
        })
    }

    pub fn with_webroot(self, webroot: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self {
            webroot: validate_webroot(webroot.as_ref())?,
            ..self
        })
    }

    pub fn with_index_files(self, index_files: Vec<String>) -> Self {
        Self { index_files, ..self }
    }

    pub fn with_auth_handler(self, handler: Arc<dyn AuthenticationHandler>) -> Self {
        Self {
            auth_handler: Some(handler),
            ..self
        }
    }

    pub fn with_logger(self, logger: Arc<dyn Logger>) -> Self {
        Self {
            logger: Some(logger),
            ..self
        }
    }

    pub fn with_content_types(self, content_types: ContentTypeResolver) -> Self {
        Self {
            content_types,
            ..self
        }
    }

    /// Opt-in hardening: treat request paths with a `..` segment as not
    /// found instead of handing them to the filesystem.
    pub fn with_reject_parent_segments(self, reject: bool) -> Self {
        Self {
            reject_parent_segments: reject,
            ..self
        }
    }

    pub fn webroot(&self) -> &Path {
        &self.webroot
    }

    pub fn index_files(&self) -> &[String] {
        &self.index_files
    }

    pub fn auth_handler(&self) -> Option<&dyn AuthenticationHandler> {
        self.auth_handler.as_deref()
    }

    pub fn logger(&self) -> Option<&dyn Logger> {
        self.logger.as_deref()
    }

    pub fn content_types(&self) -> &ContentTypeResolver {
        &self.content_types
    }

    pub fn rejects_parent_segments(&self) -> bool {
        self.reject_parent_segments
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("webroot", &self.webroot)
            .field("index_files", &self.index_files)
            .field("auth", &self.auth_handler.is_some())
            .field("logger", &self.logger.is_some())
            .field("reject_parent_segments", &self.reject_parent_segments)
            .finish()
    }
}

fn validate_webroot(path: &Path) -> Result<PathBuf, ConfigError> {
    let metadata = std::fs::metadata(path).map_err(|_| ConfigError::WebrootNotFound {
        path: path.to_path_buf(),
    })?;

    if !metadata.is_dir() {
        return Err(ConfigError::WebrootNotDirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(path.to_path_buf())
}
