//! Framing of a request out of a raw byte stream.
//!
//! The head is read in fixed-size chunks until a blank line shows up. Bytes
//! read past the blank line already belong to the body and are handed back
//! to the caller so that [`read_body`] can start from them.

use std::io;

use bytes::{Bytes, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::parser::find_head_end;

/// Size of a single read from the connection.
pub const READ_CHUNK_SIZE: usize = 1500;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("request head exceeds {limit} bytes")]
    HeadTooLarge { limit: usize },

    #[error("connection closed after {received} bytes")]
    ConnectionClosed { received: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

/// A framed request head plus whatever was read beyond it.
#[derive(Debug)]
pub struct Frame {
    /// Everything up to and including the terminating blank line.
    pub head: Bytes,
    /// Bytes already received after the head.
    pub rest: BytesMut,
}

/// Reads until the head terminator is seen.
///
/// Fails with [`FrameError::HeadTooLarge`] once more than `max_head_size`
/// bytes have arrived without a terminator, and with
/// [`FrameError::ConnectionClosed`] if the peer hangs up first. For a peer
/// that closes before sending anything, `received` is 0.
pub async fn read_head<S>(stream: &mut S, max_head_size: usize) -> Result<Frame, FrameError>
where
    S: AsyncRead + Unpin,
{
    let mut buffer = BytesMut::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        if let Some(end) = find_head_end(&buffer) {
            if end > max_head_size {
                return Err(FrameError::HeadTooLarge { limit: max_head_size });
            }
            let head = buffer.split_to(end).freeze();
            return Ok(Frame { head, rest: buffer });
        }

        if buffer.len() > max_head_size {
            return Err(FrameError::HeadTooLarge { limit: max_head_size });
        }

        let n = stream.read(&mut chunk).await?;

        if n == 0 {
            return Err(FrameError::ConnectionClosed {
                received: buffer.len(),
            });
        }

        buffer.extend_from_slice(&chunk[..n]);
    }
}

/// Completes a body of `declared_length` bytes, starting from the bytes
/// that were already read along with the head. Surplus bytes are dropped.
pub async fn read_body<S>(
    stream: &mut S,
    already_read: BytesMut,
    declared_length: usize,
) -> Result<Bytes, FrameError>
where
    S: AsyncRead + Unpin,
{
    let mut body = already_read;

    if body.len() >= declared_length {
        body.truncate(declared_length);
        return Ok(body.freeze());
    }

    body.reserve(declared_length - body.len());
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    while body.len() < declared_length {
        let wanted = (declared_length - body.len()).min(READ_CHUNK_SIZE);
        let n = stream.read(&mut chunk[..wanted]).await?;

        if n == 0 {
            return Err(FrameError::ConnectionClosed {
                received: body.len(),
            });
        }

        body.extend_from_slice(&chunk[..n]);
    }

    Ok(body.freeze())
}
