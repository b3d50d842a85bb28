//! Content-type inference from file extensions.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Content type used when the extension is missing or unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// Extension to MIME type lookup.
///
/// Extensions are passed without the leading dot and exactly as they appear
/// in the file name; implementations decide whether to fold case.
pub trait MimeLookup: Send + Sync {
    fn lookup(&self, extension: &str) -> Option<String>;
}

/// Lookup backed by the `mime_guess` database.
#[derive(Debug, Default, Clone, Copy)]
pub struct MimeGuessLookup;

impl MimeLookup for MimeGuessLookup {
    fn lookup(&self, extension: &str) -> Option<String> {
        if extension.is_empty() {
            return None;
        }
        mime_guess::from_ext(extension)
            .first_raw()
            .map(str::to_string)
    }
}

/// Explicit extension table. Keys are matched case-sensitively.
#[derive(Debug, Default, Clone)]
pub struct MimeTable {
    types: HashMap<String, String>,
}

impl<K, V> FromIterator<(K, V)> for MimeTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            types: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl MimeLookup for MimeTable {
    fn lookup(&self, extension: &str) -> Option<String> {
        self.types.get(extension).cloned()
    }
}

/// Consults `overrides` first, then `fallback`.
pub struct OverlayLookup {
    overrides: MimeTable,
    fallback: Arc<dyn MimeLookup>,
}

impl OverlayLookup {
    pub fn new(overrides: MimeTable, fallback: Arc<dyn MimeLookup>) -> Self {
        Self { overrides, fallback }
    }
}

impl MimeLookup for OverlayLookup {
    fn lookup(&self, extension: &str) -> Option<String> {
        self.overrides
            .lookup(extension)
            .or_else(|| self.fallback.lookup(extension))
    }
}

/// Maps a file path to the `Content-Type` it is served with.
#[derive(Clone)]
pub struct ContentTypeResolver {
    lookup: Arc<dyn MimeLookup>,
}

impl Default for ContentTypeResolver {
    fn default() -> Self {
        Self::new(Arc::new(MimeGuessLookup))
    }
}

impl ContentTypeResolver {
    pub fn new(lookup: Arc<dyn MimeLookup>) -> Self {
        Self { lookup }
    }

    /// Returns the MIME type for `path`, or `text/plain` when the extension
    /// is absent or not in the table.
    pub fn resolve(&self, path: &Path) -> String {
        self.lookup
            .lookup(extension_of(path))
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string())
    }
}

/// Text after the last `.` of the final path segment, or `""`.
///
/// Unlike `Path::extension`, a leading dot counts: `.htaccess` has the
/// extension `htaccess`.
pub fn extension_of(path: &Path) -> &str {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_uses_final_segment_only() {
        assert_eq!(extension_of(Path::new("/srv/www.d/noextension")), "");
        assert_eq!(extension_of(Path::new("/srv/archive.tar.gz")), "gz");
        assert_eq!(extension_of(Path::new("/srv/.htaccess")), "htaccess");
        assert_eq!(extension_of(Path::new("/srv/trailing.")), "");
    }

    #[test]
    fn mime_guess_lookup_knows_common_types() {
        assert_eq!(MimeGuessLookup.lookup("html").as_deref(), Some("text/html"));
        assert_eq!(MimeGuessLookup.lookup("css").as_deref(), Some("text/css"));
        assert_eq!(MimeGuessLookup.lookup(""), None);
    }

    #[test]
    fn overlay_prefers_overrides() {
        let overrides: MimeTable = [("js", "application/javascript")].into_iter().collect();
        let lookup = OverlayLookup::new(overrides, Arc::new(MimeGuessLookup));

        assert_eq!(
            lookup.lookup("js").as_deref(),
            Some("application/javascript")
        );
        assert_eq!(lookup.lookup("css").as_deref(), Some("text/css"));
    }
}
