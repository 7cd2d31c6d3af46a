use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::connection::ConnectionLimits;

/// Environment variable naming an optional YAML config file.
pub const CONFIG_ENV: &str = "MINIHTTPD_CONFIG";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticConfig,
}

/// Listening socket and per-connection limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Length of the kernel's pending-connection queue.
    pub backlog: u32,
    pub max_head_size: usize,
    pub max_body_size: usize,
    pub read_timeout_ms: u64,
    pub write_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Document served for `GET /`.
    pub index: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let limits = ConnectionLimits::default();
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            backlog: 5,
            max_head_size: limits.max_head_size,
            max_body_size: limits.max_body_size,
            read_timeout_ms: limits.read_timeout.as_millis() as u64,
            write_timeout_ms: limits.write_timeout.as_millis() as u64,
        }
    }
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            index: PathBuf::from("index.html"),
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .with_context(|| format!("invalid listen address {addr:?}"))
    }

    pub fn limits(&self) -> ConnectionLimits {
        ConnectionLimits {
            max_head_size: self.max_head_size,
            max_body_size: self.max_body_size,
            read_timeout: Duration::from_millis(self.read_timeout_ms),
            write_timeout: Duration::from_millis(self.write_timeout_ms),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Defaults, then the YAML file named by [`CONFIG_ENV`], then the
    /// `HOST`, `PORT`, `BACKLOG` and `INDEX_FILE` overrides.
    pub fn load_from(env: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut cfg = match env(CONFIG_ENV) {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config file {path}"))?;
                Self::from_yaml(&text).with_context(|| format!("invalid config file {path}"))?
            }
            None => Self::default(),
        };

        if let Some(host) = env("HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = env("PORT") {
            cfg.server.port = port
                .parse()
                .with_context(|| format!("invalid PORT {port:?}"))?;
        }
        if let Some(backlog) = env("BACKLOG") {
            cfg.server.backlog = backlog
                .parse()
                .with_context(|| format!("invalid BACKLOG {backlog:?}"))?;
        }
        if let Some(index) = env("INDEX_FILE") {
            cfg.static_files.index = PathBuf::from(index);
        }

        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
