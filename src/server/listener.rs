use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::config::{Config, SiteConfig};
use crate::http::connection::Connection;

/// Binds the configured address and serves until the task is dropped.
/// Failing to bind is the only fatal error.
pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    info!(
        "Listening on {}, serving {}",
        cfg.server.listen_addr,
        cfg.site.document_root.display()
    );

    serve(listener, Arc::new(cfg.site.clone())).await
}

/// Accepts connections one at a time and hands each to its own task.
pub async fn serve(listener: TcpListener, site: Arc<SiteConfig>) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!("Accept failed: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let site = site.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, site);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
