use minihttpd::http::response::{Response, ResponseBuilder, StatusCode};
use minihttpd::http::writer::serialize_response;

#[test]
fn test_status_code_as_u16() {
    assert_eq!(StatusCode::Ok.as_u16(), 200);
    assert_eq!(StatusCode::BadRequest.as_u16(), 400);
    assert_eq!(StatusCode::NotFound.as_u16(), 404);
    assert_eq!(StatusCode::MethodNotAllowed.as_u16(), 405);
    assert_eq!(StatusCode::PayloadTooLarge.as_u16(), 413);
    assert_eq!(StatusCode::InternalServerError.as_u16(), 500);
}

#[test]
fn test_status_code_reason_phrase() {
    assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    assert_eq!(StatusCode::BadRequest.reason_phrase(), "Bad Request");
    assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    assert_eq!(
        StatusCode::MethodNotAllowed.reason_phrase(),
        "Method Not Allowed"
    );
    assert_eq!(StatusCode::PayloadTooLarge.reason_phrase(), "Payload Too Large");
}

#[test]
fn test_response_builder_with_headers() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .header("X-Custom", "value")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers["Content-Type"], "text/plain");
    assert_eq!(response.headers["X-Custom"], "value");
    assert_eq!(response.headers["Connection"], "close");
}

#[test]
fn test_response_builder_auto_content_length() {
    let body = b"This is the body".to_vec();
    let response = ResponseBuilder::new(StatusCode::Ok).body(body.clone()).build();

    assert_eq!(response.headers["Content-Length"], body.len().to_string());
}

#[test]
fn test_response_builder_overrides_wrong_content_length() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Length", "999")
        .body(b"test".to_vec())
        .build();

    assert_eq!(response.headers["Content-Length"], "4");
}

#[test]
fn test_response_builder_empty_body() {
    let response = ResponseBuilder::new(StatusCode::NotFound).build();

    assert!(response.body.is_empty());
    assert_eq!(response.headers["Content-Length"], "0");
}

#[test]
fn test_response_not_found_has_empty_body() {
    let response = Response::not_found();

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(response.body.is_empty());
}

#[test]
fn test_response_method_not_allowed_advertises_get() {
    let response = Response::method_not_allowed();

    assert_eq!(response.status, StatusCode::MethodNotAllowed);
    assert_eq!(response.header("allow"), Some("GET"));
    assert!(response.body.is_empty());
}

#[test]
fn test_response_bad_request_carries_reason() {
    let response = Response::bad_request("bad status line");

    assert_eq!(response.status, StatusCode::BadRequest);
    assert_eq!(response.body, b"400 Bad Request: bad status line\n");
}

#[test]
fn test_serialize_full_response() {
    let response = ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(b"hi".to_vec())
        .build();

    let bytes = serialize_response(&response);

    assert_eq!(
        bytes,
        b"HTTP/1.1 200 OK\r\n\
          Connection: close\r\n\
          Content-Length: 2\r\n\
          Content-Type: text/plain; charset=utf-8\r\n\
          \r\n\
          hi"
        .to_vec()
    );
}

#[test]
fn test_serialize_keeps_binary_body() {
    let body = vec![0xff, 0x00, 0xfe, b'\r', b'\n'];
    let bytes = serialize_response(&Response::ok(body.clone()));

    assert!(bytes.ends_with(&body));
}
