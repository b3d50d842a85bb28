use bytes::Bytes;
use staticd::http::response::{
    BufferedResponse, Response, ResponseBuilder, ResponseSink, StatusCode,
};
use staticd::http::writer::serialize_response;
use std::collections::HashMap;

fn text_plain() -> HashMap<String, String> {
    HashMap::from([("Content-Type".to_string(), "text/plain".to_string())])
}

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::Unauthorized.as_u16(), 401);
    assert_eq!(StatusCode::Forbidden.as_u16(), 403);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::Unauthorized.reason_phrase(), "Unauthorized");
    assert_eq!(StatusCode::Forbidden.reason_phrase(), "Forbidden");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
}

#[test]
fn test_response_builder_auto_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .body("This is the body")
        .build();

    assert_eq!(response.headers.get("Content-Length").unwrap(), "16");
}

#[test]
fn test_response_builder_preserves_custom_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body("test")
        .build();

    assert_eq!(response.headers.get("Content-Length").unwrap(), "999");
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::Unauthorized).build();

    assert!(response.body.is_empty());
    assert_eq!(response.headers.get("Content-Length").unwrap(), "0");
}

#[test]
fn test_response_text_helpers() {
    let response = Response::bad_request();
    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");

    let response = Response::internal_error();
    assert_eq!(response.status, StatusCode::InternalServerError);
}

#[test]
fn test_buffered_response_collects_head_and_body() {
    let mut sink = BufferedResponse::new();
    sink.write_head(StatusCode::NotFound, text_plain());
    sink.end(Some(Bytes::from_static(b"Not found\n")));

    assert!(sink.is_ended());
    let response = sink.into_response().unwrap();
    assert_eq!(response.status, StatusCode::NotFound);
    assert_eq!(response.headers.get("Content-Type").unwrap(), "text/plain");
    assert_eq!(response.headers.get("Content-Length").unwrap(), "10");
    assert_eq!(response.body, Bytes::from_static(b"Not found\n"));
}

#[test]
fn test_buffered_response_end_without_body() {
    let mut sink = BufferedResponse::new();
    sink.write_head(StatusCode::Unauthorized, HashMap::new());
    sink.end(None);

    let response = sink.into_response().unwrap();
    assert!(response.body.is_empty());
}

#[test]
fn test_buffered_response_ignores_second_head() {
    let mut sink = BufferedResponse::new();
    sink.write_head(StatusCode::Ok, text_plain());
    sink.write_head(StatusCode::NotFound, text_plain());
    sink.end(None);

    assert_eq!(sink.into_response().unwrap().status, StatusCode::Ok);
}

#[test]
fn test_buffered_response_ignores_end_before_head() {
    let mut sink = BufferedResponse::new();
    sink.end(Some(Bytes::from_static(b"early")));

    assert!(!sink.is_ended());
    assert!(sink.into_response().is_none());
}

#[test]
fn test_buffered_response_ignores_writes_after_end() {
    let mut sink = BufferedResponse::new();
    sink.write_head(StatusCode::Ok, text_plain());
    sink.end(Some(Bytes::from_static(b"first")));
    sink.write_head(StatusCode::Forbidden, text_plain());
    sink.end(Some(Bytes::from_static(b"second")));

    let response = sink.into_response().unwrap();
    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, Bytes::from_static(b"first"));
}

#[test]
fn test_unfinished_buffered_response() {
    let mut sink = BufferedResponse::new();
    sink.write_head(StatusCode::Ok, text_plain());

    assert!(sink.into_response().is_none());
}

#[test]
fn test_serialize_challenge() {
    let response = ResponseBuilder::new(StatusCode::Unauthorized)
        .header("WWW-Authenticate", "Basic realm=\"realm\"")
        .build();
    let wire = String::from_utf8(serialize_response(&response)).unwrap();

    assert!(wire.starts_with("HTTP/1.1 401 Unauthorized\r\n"));
    assert!(wire.contains("WWW-Authenticate: Basic realm=\"realm\"\r\n"));
    assert!(wire.contains("Content-Length: 0\r\n"));
    assert!(wire.ends_with("\r\n\r\n"));
}

#[test]
fn test_serialize_forbidden_with_body() {
    let response = Response::text(StatusCode::Forbidden, "Forbidden\n");
    let wire = String::from_utf8(serialize_response(&response)).unwrap();

    assert!(wire.starts_with("HTTP/1.1 403 Forbidden\r\n"));
    assert!(wire.ends_with("\r\n\r\nForbidden\n"));
}
