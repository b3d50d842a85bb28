//! Logger capability injected into the dispatcher.
//!
//! Messages are templates with `{key}` placeholders filled from the context
//! pairs. The dispatcher only logs when a logger is configured.

use std::fmt::{self, Write};

pub type LogContext<'a> = &'a [(&'a str, &'a str)];

pub trait Logger: Send + Sync {
    fn debug(&self, message: &str, context: LogContext<'_>);

    fn warning(&self, message: &str, context: LogContext<'_>);

    fn error(&self, message: &str, context: LogContext<'_>);
}

/// Forwards to `tracing` under the `staticd::access` target. The context
/// pairs are recorded as the `context` field as well as interpolated into
/// the message.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str, context: LogContext<'_>) {
        tracing::debug!(
            target: "staticd::access",
            context = ?Fields(context),
            "{}",
            interpolate(message, context)
        );
    }

    fn warning(&self, message: &str, context: LogContext<'_>) {
        tracing::warn!(
            target: "staticd::access",
            context = ?Fields(context),
            "{}",
            interpolate(message, context)
        );
    }

    fn error(&self, message: &str, context: LogContext<'_>) {
        tracing::error!(
            target: "staticd::access",
            context = ?Fields(context),
            "{}",
            interpolate(message, context)
        );
    }
}

/// Context pairs formatted as a map, e.g. `{"filePath": "/srv/x"}`.
struct Fields<'a>(LogContext<'a>);

impl fmt::Debug for Fields<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

/// Replaces every `{key}` in `message` with its value from `context`.
/// Placeholders without a matching key are left as written.
pub fn interpolate(message: &str, context: LogContext<'_>) -> String {
    let mut out = String::with_capacity(message.len());
    let mut rest = message;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find('}') {
            Some(close) => {
                let key = &after[..close];
                match context.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        let _ = write!(out, "{{{}}}", key);
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_known_keys() {
        let msg = interpolate(
            "HTTP request failed, file not found ({filePath})",
            &[("filePath", "/srv/missing")],
        );
        assert_eq!(msg, "HTTP request failed, file not found (/srv/missing)");
    }

    #[test]
    fn leaves_unknown_and_unterminated_placeholders() {
        assert_eq!(interpolate("a {b} c", &[]), "a {b} c");
        assert_eq!(interpolate("open {brace", &[("brace", "x")]), "open {brace");
    }

    #[test]
    fn fields_render_as_map() {
        let context: LogContext<'_> = &[("requestPath", "/"), ("resolvedPath", "")];
        assert_eq!(
            format!("{:?}", Fields(context)),
            r#"{"requestPath": "/", "resolvedPath": ""}"#
        );
        assert_eq!(format!("{:?}", Fields(&[])), "{}");
    }
}
