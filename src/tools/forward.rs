use std::future::Future;
use std::io;
use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::error::ConfigError;

const CHUNK: usize = 64 * 1024;

/// Loopback TCP forwarder: every accepted connection is piped to the target.
pub struct Forwarder {
    listener: TcpListener,
    target_host: String,
    target_port: u16,
}

impl Forwarder {
    /// Bind the listening socket. Port `0` picks a free port.
    pub async fn bind(
        listen_host: &str,
        listen_port: u16,
        target_host: impl Into<String>,
        target_port: u16,
    ) -> Result<Self, ConfigError> {
        let listener = TcpListener::bind((listen_host, listen_port))
            .await
            .map_err(|e| ConfigError::RuntimeError {
                message: format!("failed to bind {}:{}: {}", listen_host, listen_port, e),
                hint: None,
                code: Some(600),
            })?;

        Ok(Self {
            listener,
            target_host: target_host.into(),
            target_port,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept and forward connections until `shutdown` resolves.
    pub async fn run_until<F>(self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            listen = ?self.listener.local_addr().ok(),
            target = %format!("{}:{}", self.target_host, self.target_port),
            "forwarding"
        );

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                accepted = self.listener.accept() => match accepted {
                    Ok((client, peer)) => {
                        debug!(%peer, "accepted connection");
                        tokio::spawn(handle_client(
                            client,
                            self.target_host.clone(),
                            self.target_port,
                        ));
                    }
                    Err(e) => warn!(error = %e, "accept failed"),
                },
            }
        }
        info!("forwarder stopped");
    }
}

async fn handle_client(client: TcpStream, target_host: String, target_port: u16) {
    let upstream = match TcpStream::connect((target_host.as_str(), target_port)).await {
        Ok(stream) => stream,
        Err(e) => {
            warn!(error = %e, target = %target_host, port = target_port, "upstream connect failed");
            return;
        }
    };

    // Each direction half-closes on its own; the sockets are dropped once
    // both pumps have finished.
    let (client_read, client_write) = client.into_split();
    let (upstream_read, upstream_write) = upstream.into_split();
    tokio::join!(
        pipe(client_read, upstream_write),
        pipe(upstream_read, client_write),
    );
}

/// Copy bytes until EOF or an error, then send FIN on the write side.
///
/// The opposite direction keeps running, so a client that half-closes after
/// its request still receives the full response.
async fn pipe(mut reader: OwnedReadHalf, mut writer: OwnedWriteHalf) {
    let mut buf = vec![0u8; CHUNK];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if writer.write_all(&buf[..n]).await.is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
    // The peer may already be gone; nothing left to report.
    let _ = writer.shutdown().await;
}

/// Resolves on Ctrl-C or, on unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
