use std::io;
use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::content::DocumentStore;
use crate::http::frame::{self, FrameError};
use crate::http::handler;
use crate::http::parser::{ParseOutcome, parse_head};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Bounds applied to a single connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub max_head_size: usize,
    pub max_body_size: usize,
    /// Deadline for receiving the head, and separately for the body.
    pub read_timeout: Duration,
    pub write_timeout: Duration,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            max_head_size: 8 * 1024,
            max_body_size: 1024 * 1024,
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(30),
        }
    }
}

/// Ways a connection can end without a response having been written.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to read request head: {0}")]
    Head(#[source] FrameError),

    #[error("failed to read request body: {0}")]
    Body(#[source] FrameError),

    #[error("timed out {0}")]
    TimedOut(&'static str),

    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),
}

pub enum ConnectionState {
    ReadingHead,
    ReadingBody(Request, BytesMut),
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// Drives one request/response exchange over `stream`.
///
/// The stream is owned by the connection and dropped, which closes it, on
/// every path out of [`Connection::run`].
pub struct Connection<S, D> {
    stream: S,
    documents: Arc<D>,
    limits: ConnectionLimits,
    state: ConnectionState,
    status: Option<StatusCode>,
}

impl<S, D> Connection<S, D>
where
    S: AsyncRead + AsyncWrite + Unpin,
    D: DocumentStore,
{
    pub fn new(stream: S, documents: Arc<D>, limits: ConnectionLimits) -> Self {
        Self {
            stream,
            documents,
            limits,
            state: ConnectionState::ReadingHead,
            status: None,
        }
    }

    /// Runs the exchange to completion and returns the status that was sent.
    pub async fn run(mut self) -> Result<StatusCode, ConnectionError> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::ReadingHead => {
                    self.state = self.read_head().await?;
                }

                ConnectionState::ReadingBody(mut req, rest) => {
                    let declared = req.content_length();
                    let body = timeout(
                        self.limits.read_timeout,
                        frame::read_body(&mut self.stream, rest, declared),
                    )
                    .await
                    .map_err(|_| ConnectionError::TimedOut("reading request body"))?
                    .map_err(ConnectionError::Body)?;

                    req.body = body.to_vec();
                    self.state = ConnectionState::Processing(req);
                }

                ConnectionState::Processing(req) => {
                    let response = handler::respond(&req, self.documents.as_ref()).await;
                    tracing::info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        "Request handled"
                    );
                    self.state = self.respond_with(response);
                }

                ConnectionState::Writing(mut writer) => {
                    timeout(
                        self.limits.write_timeout,
                        writer.write_to_stream(&mut self.stream),
                    )
                    .await
                    .map_err(|_| ConnectionError::TimedOut("writing response"))?
                    .map_err(ConnectionError::Write)?;

                    if let Err(e) = self.stream.shutdown().await {
                        tracing::debug!(error = %e, "Shutdown after response failed");
                    }
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        // Only the Writing state leads to Closed with a status recorded.
        self.status
            .ok_or(ConnectionError::Write(io::ErrorKind::NotConnected.into()))
    }

    async fn read_head(&mut self) -> Result<ConnectionState, ConnectionError> {
        let frame = timeout(
            self.limits.read_timeout,
            frame::read_head(&mut self.stream, self.limits.max_head_size),
        )
        .await
        .map_err(|_| ConnectionError::TimedOut("reading request head"))?
        .map_err(ConnectionError::Head)?;

        let req = match parse_head(&frame.head) {
            ParseOutcome::Complete(req) => req,
            ParseOutcome::Malformed(reason) => {
                tracing::warn!(%reason, "Malformed request");
                return Ok(self.respond_with(Response::bad_request(reason)));
            }
            ParseOutcome::Incomplete => {
                return Ok(self.respond_with(Response::bad_request("incomplete request head")));
            }
        };

        tracing::debug!(method = %req.method, path = %req.path, version = %req.version, "Parsed request head");

        // Only POST bodies are read; a length declared on other methods is ignored.
        if req.method != Method::POST || req.header("Content-Length").is_none() {
            return Ok(ConnectionState::Processing(req));
        }

        let declared = req.content_length();
        if declared > self.limits.max_body_size {
            tracing::warn!(declared, limit = self.limits.max_body_size, "Request body too large");
            return Ok(self.respond_with(Response::payload_too_large()));
        }

        Ok(ConnectionState::ReadingBody(req, frame.rest))
    }

    fn respond_with(&mut self, response: Response) -> ConnectionState {
        self.status = Some(response.status);
        ConnectionState::Writing(ResponseWriter::new(&response))
    }
}
