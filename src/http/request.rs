use std::collections::HashMap;

/// HTTP request methods.
///
/// The file server never routes on the method: `GET`, `HEAD` and `POST`
/// all resolve and serve identically. Unknown methods are rejected by the
/// parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    OPTIONS,
    PATCH,
}

impl Method {
    /// Parses an HTTP method from its request-line token.
    ///
    /// Matching is case-sensitive, as request-line methods are.
    ///
    /// ```
    /// # use staticd::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            "PUT" => Some(Method::PUT),
            "DELETE" => Some(Method::DELETE),
            "HEAD" => Some(Method::HEAD),
            "OPTIONS" => Some(Method::OPTIONS),
            "PATCH" => Some(Method::PATCH),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
            Method::HEAD => "HEAD",
            Method::OPTIONS => "OPTIONS",
            Method::PATCH => "PATCH",
        }
    }
}

/// An incoming HTTP request as delivered to the dispatcher.
///
/// Handlers only ever see `&Request`; nothing downstream of the parser
/// mutates it.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Request path without the query string, e.g. `/bar/baz.css`
    pub path: String,
    /// Raw query string (without the leading `?`), if any
    pub query: Option<String>,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Header names exactly as received
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Builder for constructing requests, mostly useful in tests and tools.
///
/// ```
/// # use staticd::http::request::{Method, RequestBuilder};
/// let req = RequestBuilder::new()
///     .method(Method::GET)
///     .path("/index.htm")
///     .header("Authorization", "Basic dXNlcjpwYXNz")
///     .build()
///     .unwrap();
/// assert_eq!(req.header("Authorization"), Some("Basic dXNlcjpwYXNz"));
/// ```
#[derive(Default)]
pub struct RequestBuilder {
    method: Option<Method>,
    path: Option<String>,
    query: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path: self.path.ok_or("path missing")?,
            query: self.query,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            body: self.body,
        })
    }
}

impl Request {
    /// Looks up a header by its exact name.
    ///
    /// The lookup is case-sensitive: `header("Authorization")` does not
    /// match a header received as `authorization`.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key).map(|v| v.as_str())
    }

    /// Looks up a header by name ignoring ASCII case. Only for framing
    /// headers such as `Connection`; credentials go through `header`.
    pub fn framing_header(&self, key: &str) -> Option<&str> {
        find_ignore_case(&self.headers, key)
    }

    /// Whether the connection should stay open after this response.
    ///
    /// HTTP/1.1 defaults to keep-alive unless `Connection: close` is sent;
    /// HTTP/1.0 only keeps the connection open on an explicit `keep-alive`.
    pub fn keep_alive(&self) -> bool {
        match self.framing_header("Connection") {
            Some(v) if v.eq_ignore_ascii_case("close") => false,
            Some(v) if v.eq_ignore_ascii_case("keep-alive") => true,
            _ => self.version != "HTTP/1.0",
        }
    }
}

pub(crate) fn find_ignore_case<'a>(headers: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key))
        .map(|(_, value)| value.as_str())
}
