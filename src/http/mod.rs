//! HTTP protocol implementation.
//!
//! A deliberately small subset of HTTP/1.1: one request per connection, bodies
//! framed by `Content-Length` only.
//!
//! # Architecture
//!
//! - **`frame`**: Reads the request head, then the declared body, from a byte stream
//! - **`parser`**: Turns a framed head into a [`request::Request`]
//! - **`request`**: HTTP request representation
//! - **`handler`**: Picks one of the fixed behaviors for a request
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`connection`**: Drives one exchange and contains its failures
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │ ReadingHead │ ← Wait for the blank line ending the head
//!        └──────┬──────┘
//!               │ POST with Content-Length     (malformed → Writing 400)
//!               ▼
//!        ┌─────────────┐
//!        │ ReadingBody │ ← Read until the declared length is met
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │ Processing  │ ← Generate response
//!        └──────┬──────┘
//!               ▼
//!        ┌─────────────┐
//!        │   Writing   │ ← Send response to client
//!        └──────┬──────┘
//!               ▼
//!             Closed
//! ```
//!
//! Framing and transport failures end the connection without a response.

pub mod connection;
pub mod frame;
pub mod handler;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
