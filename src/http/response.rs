use bytes::Bytes;
use std::collections::HashMap;

/// HTTP status codes produced by the server.
///
/// The dispatcher itself only ever emits `Ok`, `Unauthorized`, `Forbidden`
/// and `NotFound`; the others belong to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 400 Bad Request
    BadRequest,
    /// 401 Unauthorized
    Unauthorized,
    /// 403 Forbidden
    Forbidden,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// ```
    /// # use staticd::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Unauthorized.as_u16(), 401);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard reason phrase for the status line.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A complete HTTP response ready to be serialized onto the wire.
#[derive(Debug)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// ```
/// # use staticd::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::NotFound)
///     .header("Content-Type", "text/plain")
///     .body("Not found\n")
///     .build();
/// assert_eq!(response.headers["Content-Length"], "10");
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl ResponseBuilder {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Adds or replaces a header.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response, filling in `Content-Length` from the body
    /// unless one was set explicitly.
    pub fn build(mut self) -> Response {
        self.headers
            .entry("Content-Length".to_string())
            .or_insert_with(|| self.body.len().to_string());

        Response {
            status: self.status,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Plain-text response with the given status and body.
    pub fn text(status: StatusCode, body: &'static str) -> Self {
        ResponseBuilder::new(status)
            .header("Content-Type", "text/plain")
            .body(body)
            .build()
    }

    pub fn bad_request() -> Self {
        Self::text(StatusCode::BadRequest, "Bad request\n")
    }

    pub fn internal_error() -> Self {
        Self::text(StatusCode::InternalServerError, "Internal server error\n")
    }
}

/// Write-once response interface handed to the dispatcher and to
/// authentication handlers.
///
/// Callers must write the head exactly once, then end exactly once.
pub trait ResponseSink {
    fn write_head(&mut self, status: StatusCode, headers: HashMap<String, String>);

    fn end(&mut self, body: Option<Bytes>);
}

#[derive(Debug, Default)]
enum SinkState {
    #[default]
    Pending,
    HeadWritten(StatusCode, HashMap<String, String>),
    Ended(Response),
}

/// In-memory `ResponseSink` used by the connection.
///
/// Calls made out of order (end before head, a second head, anything after
/// end) are dropped and logged instead of corrupting the response.
#[derive(Debug, Default)]
pub struct BufferedResponse {
    state: SinkState,
}

impl BufferedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, SinkState::Ended(_))
    }

    /// The finished response, or `None` if `end` was never reached.
    pub fn into_response(self) -> Option<Response> {
        match self.state {
            SinkState::Ended(response) => Some(response),
            _ => None,
        }
    }
}

impl ResponseSink for BufferedResponse {
    fn write_head(&mut self, status: StatusCode, headers: HashMap<String, String>) {
        if matches!(self.state, SinkState::Pending) {
            self.state = SinkState::HeadWritten(status, headers);
        } else {
            tracing::warn!(
                status = status.as_u16(),
                "Ignoring response head written twice"
            );
        }
    }

    fn end(&mut self, body: Option<Bytes>) {
        match std::mem::take(&mut self.state) {
            SinkState::HeadWritten(status, headers) => {
                let response = ResponseBuilder::new(status)
                    .headers(headers)
                    .body(body.unwrap_or_default())
                    .build();
                self.state = SinkState::Ended(response);
            }
            other => {
                tracing::warn!("Ignoring response end without a pending head");
                self.state = other;
            }
        }
    }
}
