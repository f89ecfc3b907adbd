// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Embedded HTTP server for the FastPrint API.
//
// One Tokio task accepts connections; each connection gets its own task,
// reads a single request, answers it and closes.  A print request holds its
// connection open for the whole batch.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use fastprint_core::error::{FastPrintError, Result};

use crate::http::{HttpResponse, read_request, send_response};
use crate::routes::dispatch;
use crate::services::app_services::AppServices;

/// The HTTP API server.
pub struct HttpServer {
    services: AppServices,
    /// Signalled to stop the accept loop.
    shutdown_signal: Arc<Notify>,
    task_handle: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
}

impl HttpServer {
    pub fn new(services: AppServices) -> Self {
        Self {
            services,
            shutdown_signal: Arc::new(Notify::new()),
            task_handle: None,
            local_addr: None,
        }
    }

    /// Bind `addr` and start accepting connections in the background.
    ///
    /// # Errors
    ///
    /// `Server` if the address is invalid or cannot be bound.
    pub async fn start(&mut self, addr: &str) -> Result<SocketAddr> {
        if let Some(bound) = self.local_addr {
            debug!(addr = %bound, "HTTP server already running");
            return Ok(bound);
        }

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| FastPrintError::Server(format!("bind {addr}: {e}")))?;
        let bound = listener
            .local_addr()
            .map_err(|e| FastPrintError::Server(format!("local address: {e}")))?;
        info!(addr = %bound, "HTTP server listening");

        let shutdown = Arc::clone(&self.shutdown_signal);
        let services = self.services.clone();
        self.task_handle = Some(tokio::spawn(async move {
            Self::accept_loop(listener, shutdown, services).await;
        }));
        self.local_addr = Some(bound);
        Ok(bound)
    }

    /// Stop accepting connections and wait for the accept loop to exit.
    /// Connections already being served run to completion.
    pub async fn stop(&mut self) -> Result<()> {
        let Some(handle) = self.task_handle.take() else {
            return Ok(());
        };
        info!("stopping HTTP server");
        self.shutdown_signal.notify_one();
        handle
            .await
            .map_err(|e| FastPrintError::Server(format!("task join: {e}")))?;
        self.local_addr = None;
        info!("HTTP server stopped");
        Ok(())
    }

    async fn accept_loop(listener: TcpListener, shutdown: Arc<Notify>, services: AppServices) {
        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    debug!("accept loop received shutdown signal");
                    break;
                }

                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, peer)) => {
                            let services = services.clone();
                            tokio::spawn(async move {
                                if let Err(e) = Self::handle_connection(stream, peer, services).await {
                                    warn!(peer = %peer, error = %e, "connection handler error");
                                }
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "failed to accept connection");
                        }
                    }
                }
            }
        }
    }

    async fn handle_connection(
        mut stream: TcpStream,
        peer: SocketAddr,
        services: AppServices,
    ) -> Result<()> {
        let request = match read_request(&mut stream).await {
            Ok(Some(request)) => request,
            Ok(None) => {
                debug!(peer = %peer, "empty request -- closing connection");
                return Ok(());
            }
            Err(FastPrintError::Validation(msg)) => {
                warn!(peer = %peer, error = %msg, "malformed HTTP request");
                return send_response(&mut stream, &HttpResponse::detail(400, &msg)).await;
            }
            Err(e) => return Err(e),
        };

        let response = dispatch(&services, &request).await;
        send_response(&mut stream, &response).await?;

        info!(
            peer = %peer,
            method = %request.method,
            path = %request.path,
            status = response.status,
            "request served"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use fastprint_core::AppConfig;

    use super::*;

    async fn roundtrip(addr: SocketAddr, raw: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(raw.as_bytes()).await.unwrap();
        let mut out = String::new();
        stream.read_to_string(&mut out).await.unwrap();
        out
    }

    fn services(dir: &tempfile::TempDir) -> AppServices {
        AppServices::init(AppConfig {
            catalog_roots: vec![dir.path().to_path_buf()],
            audit_db_path: dir.path().join("audit.db"),
            ..AppConfig::default()
        })
    }

    #[tokio::test]
    async fn serves_requests_until_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = HttpServer::new(services(&dir));
        let addr = server.start("127.0.0.1:0").await.unwrap();

        let reply = roundtrip(addr, "GET /api/search?query=ab HTTP/1.1\r\nHost: t\r\n\r\n").await;
        assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"), "{reply}");
        assert!(reply.contains("\"success\":false"));

        let reply = roundtrip(addr, "NONSENSE\r\n\r\n").await;
        assert!(reply.starts_with("HTTP/1.1 400 Bad Request\r\n"), "{reply}");

        server.stop().await.unwrap();
        assert!(server.local_addr.is_none());
        assert!(TcpStream::connect(addr).await.is_err());
    }

    #[tokio::test]
    async fn stop_without_start_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut server = HttpServer::new(services(&dir));
        server.stop().await.unwrap();
    }
}
