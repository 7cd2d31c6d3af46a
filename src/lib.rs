//! minihttpd - a minimal HTTP/1.1 server
//!
//! Serves a single document on `GET /`, echoes `POST /` bodies and rejects
//! everything else with 405. One request per connection.

pub mod config;
pub mod content;
pub mod http;
pub mod server;
