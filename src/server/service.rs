// src/server/service.rs

use anyhow::Result;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::server::facade::ConfigService;
use crate::server::proto::{Request, Response, StatusCode};

/// Accepts connections on `addr` and serves the configuration service until
/// ctrl-c. One task per connection; requests within a connection are
/// answered in order.
pub async fn serve(addr: &str, service: Arc<ConfigService>) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!(
        "Configuration service listening on {}",
        listener.local_addr()?
    );

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                log::debug!("Accepted connection from {}", peer);
                let service = Arc::clone(&service);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, service).await {
                        log::warn!("Connection from {} failed: {}", peer, e);
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutdown requested, stopping listener.");
                return Ok(());
            }
        }
    }
}

async fn handle_connection(stream: TcpStream, service: Arc<ConfigService>) -> Result<()> {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let service = Arc::clone(&service);
                // The store does blocking filesystem I/O while holding the
                // lock; keep that off the async workers.
                tokio::task::spawn_blocking(move || service.handle(request)).await?
            }
            Err(e) => Response::error(
                StatusCode::InvalidArgument,
                format!("malformed request: {}", e),
            ),
        };

        let mut encoded = serde_json::to_string(&response)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
    }

    Ok(())
}
