use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

/// Why a framed head could not be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("bad status line")]
    BadStatusLine,
    #[error("bad header line")]
    BadHeaderLine,
    #[error("bad content-length")]
    BadContentLength,
    #[error("head is not valid utf-8")]
    InvalidEncoding,
}

/// Result of parsing a request head.
#[derive(Debug)]
pub enum ParseOutcome {
    Complete(Request),
    /// No blank line terminates the head yet.
    Incomplete,
    Malformed(MalformedReason),
}

/// Parses a request head (status line and headers, up to and including the
/// blank line). The returned request has an empty body.
///
/// Lines may end in `\r\n` or a bare `\n`.
pub fn parse_head(buf: &[u8]) -> ParseOutcome {
    let Some(head_end) = find_head_end(buf) else {
        return ParseOutcome::Incomplete;
    };

    let Ok(head) = std::str::from_utf8(&buf[..head_end]) else {
        return ParseOutcome::Malformed(MalformedReason::InvalidEncoding);
    };

    let mut lines = head
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line));

    // Request line
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();

    let (Some(method), Some(path), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return ParseOutcome::Malformed(MalformedReason::BadStatusLine);
    };

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            return ParseOutcome::Malformed(MalformedReason::BadHeaderLine);
        };

        headers.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    if let Some(value) = headers.get("content-length") {
        if value.parse::<usize>().is_err() {
            return ParseOutcome::Malformed(MalformedReason::BadContentLength);
        }
    }

    ParseOutcome::Complete(Request {
        method: Method::parse(method),
        path: path.to_string(),
        version: version.to_string(),
        headers,
        body: Vec::new(),
    })
}

/// Returns the offset just past the first blank line, accepting `\r\n\r\n`,
/// `\n\n` and `\n\r\n`.
pub fn find_head_end(buf: &[u8]) -> Option<usize> {
    buf.iter().enumerate().find_map(|(i, &b)| {
        if b != b'\n' {
            return None;
        }
        match &buf[i + 1..] {
            [b'\n', ..] => Some(i + 2),
            [b'\r', b'\n', ..] => Some(i + 3),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let ParseOutcome::Complete(parsed) = parse_head(req) else {
            panic!("expected a complete request");
        };

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.header("host"), Some("example.com"));
    }

    #[test]
    fn head_end_variants() {
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n\r\nbody"), Some(18));
        assert_eq!(find_head_end(b"GET / HTTP/1.1\n\nbody"), Some(16));
        assert_eq!(find_head_end(b"GET / HTTP/1.1\n\r\n"), Some(17));
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n"), None);
        assert_eq!(find_head_end(b""), None);
    }
}
