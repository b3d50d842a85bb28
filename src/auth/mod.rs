//! Pluggable request authentication.
//!
//! The dispatcher asks the configured handler whether a request is
//! authenticated and, if not, lets the same handler write the challenge.
//! New schemes are new `AuthenticationHandler` implementations; the
//! dispatcher never changes.

pub mod basic;

pub use basic::BasicAuthHandler;

use crate::http::request::Request;
use crate::http::response::ResponseSink;

pub trait AuthenticationHandler: Send + Sync {
    /// Whether `request` carries acceptable credentials.
    ///
    /// Malformed credentials are reported as `false`, never as a panic.
    fn handle(&self, request: &Request) -> bool;

    /// Writes the challenge head and ends the response. The dispatcher
    /// does not touch `response` afterwards.
    fn require_authentication(&self, response: &mut dyn ResponseSink);
}
