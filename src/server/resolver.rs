//! Request path to filesystem path mapping.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub struct PathResolver;

impl PathResolver {
    /// Maps `request_path` onto `webroot`.
    ///
    /// `/` resolves to the first entry of `index_files` that exists, or
    /// `None` when none do. Every other path is appended to the webroot as
    /// text, without an existence check and without removing `..`
    /// segments; the dispatcher checks existence afterwards.
    pub fn resolve(request_path: &str, webroot: &Path, index_files: &[String]) -> Option<PathBuf> {
        let file_path = concat(webroot, request_path);

        if request_path != "/" {
            return Some(file_path);
        }

        index_files
            .iter()
            .map(|index| concat(&file_path, index))
            .find(|candidate| candidate.exists())
    }

    /// Whether any `/`-separated segment of `request_path` is `..`.
    pub fn has_parent_segment(request_path: &str) -> bool {
        request_path.split('/').any(|segment| segment == "..")
    }
}

// `Path::join` would replace the webroot when the suffix is absolute, so
// the two are concatenated as plain strings.
fn concat(base: &Path, suffix: &str) -> PathBuf {
    let mut joined = OsString::from(base.as_os_str());
    joined.push(suffix);
    PathBuf::from(joined)
}
