use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::{TcpListener, TcpSocket};
use tracing::{Instrument, info, info_span, warn};

use crate::config::ServerConfig;
use crate::content::DocumentStore;
use crate::http::connection::{Connection, ConnectionLimits};

/// A bound, listening socket together with what each connection needs.
///
/// Nothing here changes after [`Server::bind`]; the accept loop only reads.
pub struct Server<D> {
    listener: TcpListener,
    documents: Arc<D>,
    limits: ConnectionLimits,
}

impl<D: DocumentStore> Server<D> {
    /// Binds with address reuse enabled and the configured backlog.
    pub async fn bind(cfg: &ServerConfig, documents: D) -> anyhow::Result<Self> {
        let addr = cfg.listen_addr()?;
        let listener = listen(addr, cfg.backlog)
            .with_context(|| format!("failed to listen on {addr}"))?;

        Ok(Self {
            listener,
            documents: Arc::new(documents),
            limits: cfg.limits(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts forever, one task per connection.
    pub async fn run(self) -> anyhow::Result<()> {
        info!("Listening on {}", self.local_addr()?);

        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    warn!(error = %e, "Failed to accept connection");
                    continue;
                }
            };
            info!("Accepted connection from {}", peer);

            let documents = Arc::clone(&self.documents);
            let limits = self.limits;
            tokio::spawn(
                async move {
                    let conn = Connection::new(socket, documents, limits);
                    if let Err(e) = conn.run().await {
                        warn!(error = %e, "Connection closed without a response");
                    }
                }
                .instrument(info_span!("conn", %peer)),
            );
        }
    }
}

fn listen(addr: SocketAddr, backlog: u32) -> io::Result<TcpListener> {
    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()?
    } else {
        TcpSocket::new_v6()?
    };
    socket.set_reuseaddr(true)?;
    socket.bind(addr)?;
    socket.listen(backlog)
}
