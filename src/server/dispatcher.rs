use std::collections::HashMap;
use std::path::Path;

use bytes::Bytes;

use crate::config::ConfigError;
use crate::http::request::Request;
use crate::http::response::{ResponseSink, StatusCode};
use crate::server::{PathResolver, ServerConfig};

const NOT_FOUND_BODY: &str = "Not found\n";
const FORBIDDEN_BODY: &str = "Forbidden\n";

/// Serves one request at a time against a fixed `ServerConfig`.
///
/// File access is blocking `std::fs`. It runs inside the connection task,
/// so a large file stalls that task for the duration of the read.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    config: ServerConfig,
}

impl RequestDispatcher {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Builds a new dispatcher from a modified copy of this one's config.
    /// `self` keeps serving with the old settings.
    pub fn reconfigure<F>(&self, change: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(ServerConfig) -> Result<ServerConfig, ConfigError>,
    {
        Ok(Self::new(change(self.config.clone())?))
    }

    /// Answers `request` through `response`: 200 with the file, 401 via the
    /// authentication handler, 403 when the file cannot be read, or 404.
    ///
    /// Writes exactly one head and one end; never fails.
    pub fn handle_request(&self, request: &Request, response: &mut dyn ResponseSink) {
        let logger = self.config.logger();
        let request_path = request.path.as_str();

        let file_path = if self.config.rejects_parent_segments()
            && PathResolver::has_parent_segment(request_path)
        {
            None
        } else {
            PathResolver::resolve(
                request_path,
                self.config.webroot(),
                self.config.index_files(),
            )
        };

        let resolved = file_path
            .as_deref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();

        if let Some(logger) = logger {
            logger.debug(
                "Got HTTP request (request path: {requestPath}, resolved path: {resolvedPath})",
                &[("requestPath", request_path), ("resolvedPath", resolved.as_str())],
            );
        }

        if let Some(handler) = self.config.auth_handler() {
            if !handler.handle(request) {
                if let Some(logger) = logger {
                    logger.warning("Client failed authentication", &[]);
                }
                handler.require_authentication(response);
                return;
            }
        }

        match file_path.as_deref().filter(|p| p.exists()) {
            Some(path) => self.serve_file(path, &resolved, response),
            None => {
                if let Some(logger) = logger {
                    logger.error(
                        "HTTP request failed, file not found ({filePath})",
                        &[("filePath", resolved.as_str())],
                    );
                }
                write_text(response, StatusCode::NotFound, NOT_FOUND_BODY);
            }
        }
    }

    fn serve_file(&self, path: &Path, shown: &str, response: &mut dyn ResponseSink) {
        match std::fs::read(path) {
            Ok(contents) => {
                let content_type = self.config.content_types().resolve(path);
                response.write_head(
                    StatusCode::Ok,
                    HashMap::from([("Content-Type".to_string(), content_type)]),
                );
                response.end(Some(Bytes::from(contents)));
            }
            Err(e) => {
                tracing::trace!(path = shown, error = %e, "File read failed");
                if let Some(logger) = self.config.logger() {
                    logger.error(
                        "HTTP request failed, file unreadable ({filePath})",
                        &[("filePath", shown)],
                    );
                }
                write_text(response, StatusCode::Forbidden, FORBIDDEN_BODY);
            }
        }
    }
}

fn write_text(response: &mut dyn ResponseSink, status: StatusCode, body: &'static str) {
    response.write_head(
        status,
        HashMap::from([("Content-Type".to_string(), "text/plain".to_string())]),
    );
    response.end(Some(Bytes::from_static(body.as_bytes())));
}
