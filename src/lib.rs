//! staticd - static file server
//!
//! Core library: path resolution, content-type inference, pluggable
//! authentication and the request dispatcher, plus the HTTP/1.1 transport
//! that drives them.

pub mod auth;
pub mod config;
pub mod http;
pub mod logger;
pub mod server;
