use crate::content::DocumentStore;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Prefix placed before the echoed body of a `POST /`.
pub const ECHO_PREFIX: &str = "POST data received:\n";

/// Maps a request to one of the three fixed behaviors:
///
/// | method | path | response |
/// |--------|------|----------|
/// | GET    | `/`  | the root document (200), or 404 when it is missing |
/// | POST   | `/`  | 200 echoing the body after [`ECHO_PREFIX`] |
/// | other  |      | 405 with `Allow: GET` |
pub async fn respond<D: DocumentStore>(req: &Request, documents: &D) -> Response {
    match (&req.method, req.path.as_str()) {
        (Method::GET, "/") => serve_document(documents).await,
        (Method::POST, "/") => echo(&req.body),
        _ => Response::method_not_allowed(),
    }
}

async fn serve_document<D: DocumentStore>(documents: &D) -> Response {
    match documents.load().await {
        Ok(Some(doc)) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", doc.content_type)
            .body(doc.bytes)
            .build(),
        Ok(None) => Response::not_found(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load document");
            Response::internal_error()
        }
    }
}

fn echo(body: &[u8]) -> Response {
    let mut out = Vec::with_capacity(ECHO_PREFIX.len() + body.len());
    out.extend_from_slice(ECHO_PREFIX.as_bytes());
    out.extend_from_slice(body);

    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(out)
        .build()
}
