use minihttpd::content::MemoryDocument;
use minihttpd::http::handler::{ECHO_PREFIX, respond};
use minihttpd::http::request::{Method, Request, RequestBuilder};
use minihttpd::http::response::StatusCode;

const PAGE: &[u8] = b"<html><body>hello</body></html>";

fn page() -> MemoryDocument {
    MemoryDocument::new(PAGE, "text/html; charset=utf-8")
}

fn request(method: Method, path: &str, body: &[u8]) -> Request {
    RequestBuilder::new()
        .method(method)
        .path(path)
        .body(body.to_vec())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_root_serves_document() {
    let response = respond(&request(Method::GET, "/", b""), &page()).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.body, PAGE);
    assert_eq!(response.header("Content-Type"), Some("text/html; charset=utf-8"));
    assert_eq!(response.header("Content-Length"), Some(PAGE.len().to_string().as_str()));
}

#[tokio::test]
async fn test_get_root_missing_document() {
    let response = respond(&request(Method::GET, "/", b""), &MemoryDocument::missing()).await;

    assert_eq!(response.status, StatusCode::NotFound);
    assert!(response.body.is_empty());
}

#[tokio::test]
async fn test_post_root_echoes_body() {
    let body = b"name=ferris&lang=rust\x00\xff";
    let response = respond(&request(Method::POST, "/", body), &page()).await;

    assert_eq!(response.status, StatusCode::Ok);
    assert_eq!(response.header("Content-Type"), Some("text/plain; charset=utf-8"));

    let mut expected = ECHO_PREFIX.as_bytes().to_vec();
    expected.extend_from_slice(body);
    assert_eq!(response.body, expected);
}

#[tokio::test]
async fn test_other_combinations_are_not_allowed() {
    let cases = [
        (Method::GET, "/index.html"),
        (Method::POST, "/submit"),
        (Method::PUT, "/"),
        (Method::DELETE, "/"),
        (Method::HEAD, "/"),
        (Method::Other("BREW".to_string()), "/"),
    ];

    for (method, path) in cases {
        let response = respond(&request(method, path, b""), &page()).await;
        assert_eq!(response.status, StatusCode::MethodNotAllowed);
        assert_eq!(response.header("Allow"), Some("GET"));
        assert!(response.body.is_empty());
    }
}

#[tokio::test]
async fn test_repeated_get_is_identical() {
    let store = page();
    let first = respond(&request(Method::GET, "/", b""), &store).await;
    let second = respond(&request(Method::GET, "/", b""), &store).await;

    assert_eq!(first, second);
}
