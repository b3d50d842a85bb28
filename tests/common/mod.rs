#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use bytes::Bytes;
use staticd::http::request::{Method, Request, RequestBuilder};
use staticd::http::response::{ResponseSink, StatusCode};
use staticd::logger::{LogContext, Logger};

pub fn webroot() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/resources/webroot")
}

pub fn get(path: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .build()
        .unwrap()
}

pub fn get_with_auth(path: &str, authorization: &str) -> Request {
    RequestBuilder::new()
        .method(Method::GET)
        .path(path)
        .header("Authorization", authorization)
        .build()
        .unwrap()
}

/// Sink that records every call, including out-of-order ones.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub heads: Vec<(StatusCode, HashMap<String, String>)>,
    pub ends: Vec<Option<Bytes>>,
}

impl RecordingSink {
    pub fn status(&self) -> StatusCode {
        assert_eq!(self.heads.len(), 1, "expected exactly one head");
        self.heads[0].0
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.heads[0].1.get(name).map(String::as_str)
    }

    pub fn body(&self) -> Bytes {
        assert_eq!(self.ends.len(), 1, "expected exactly one end");
        self.ends[0].clone().unwrap_or_default()
    }
}

impl ResponseSink for RecordingSink {
    fn write_head(&mut self, status: StatusCode, headers: HashMap<String, String>) {
        assert!(self.ends.is_empty(), "head written after end");
        self.heads.push((status, headers));
    }

    fn end(&mut self, body: Option<Bytes>) {
        assert!(!self.heads.is_empty(), "end before head");
        self.ends.push(body);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Level {
    Debug,
    Warning,
    Error,
}

#[derive(Debug, Default)]
pub struct RecordingLogger {
    pub entries: Mutex<Vec<(Level, String, Vec<(String, String)>)>>,
}

impl RecordingLogger {
    fn push(&self, level: Level, message: &str, context: LogContext<'_>) {
        let context = context
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string(), context));
    }

    pub fn levels(&self) -> Vec<Level> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|(level, _, _)| level.clone())
            .collect()
    }

    pub fn context_of(&self, index: usize, key: &str) -> Option<String> {
        self.entries.lock().unwrap()[index]
            .2
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str, context: LogContext<'_>) {
        self.push(Level::Debug, message, context);
    }

    fn warning(&self, message: &str, context: LogContext<'_>) {
        self.push(Level::Warning, message, context);
    }

    fn error(&self, message: &str, context: LogContext<'_>) {
        self.push(Level::Error, message, context);
    }
}
