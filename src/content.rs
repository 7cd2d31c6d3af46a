//! Source of the document served for `GET /`.

use std::future::Future;
use std::io;
use std::path::PathBuf;

use crate::http::mime;

/// A loaded document and the content type it should be served with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Loads the root document.
///
/// `Ok(None)` means the document does not exist; any other failure is an
/// `Err`.
pub trait DocumentStore: Send + Sync + 'static {
    fn load(&self) -> impl Future<Output = io::Result<Option<Document>>> + Send;
}

/// Reads a file from disk on every request.
#[derive(Debug, Clone)]
pub struct FileDocument {
    path: PathBuf,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl DocumentStore for FileDocument {
    async fn load(&self) -> io::Result<Option<Document>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(Document {
                bytes,
                content_type: mime::from_path(&self.path),
            })),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// A fixed document held in memory, or none at all.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    document: Option<Document>,
}

impl MemoryDocument {
    pub fn new(bytes: impl Into<Vec<u8>>, content_type: &'static str) -> Self {
        Self {
            document: Some(Document {
                bytes: bytes.into(),
                content_type,
            }),
        }
    }

    pub fn missing() -> Self {
        Self { document: None }
    }
}

impl DocumentStore for MemoryDocument {
    async fn load(&self) -> io::Result<Option<Document>> {
        Ok(self.document.clone())
    }
}
