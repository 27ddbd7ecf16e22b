//! Registry HTTP server
//!
//! HTTP/1 over hyper, one task per connection.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use super::router::RegistryRouter;

/// Pause after a failed accept, e.g. when out of file descriptors
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

pub struct RegistryServer {
    listener: TcpListener,
    router: RegistryRouter,
}

impl RegistryServer {
    /// Bind the listening socket. Port 0 picks a free port.
    pub async fn bind(addr: SocketAddr, router: RegistryRouter) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener, router })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until the process exits
    pub async fn run(self) {
        self.run_until(std::future::pending()).await
    }

    /// Serve until `shutdown` resolves. In-flight connections finish on
    /// their own tasks.
    pub async fn run_until(self, shutdown: impl Future<Output = ()>) {
        match self.listener.local_addr() {
            Ok(addr) => info!("Registry listening on http://{}", addr),
            Err(e) => error!("Registry listener has no local address: {}", e),
        }
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Registry shutting down");
                    break;
                }
                accepted = self.listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        debug!("New registry connection from {}", peer);
                        let router = self.router.clone();
                        tokio::spawn(async move {
                            let io = TokioIo::new(stream);
                            let service = service_fn(move |req| {
                                let router = router.clone();
                                async move { Ok::<_, Infallible>(router.handle(req).await) }
                            });
                            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                                debug!("Registry connection error: {}", e);
                            }
                        });
                    }
                    Err(e) => back_off_after_accept_error(&e).await,
                },
            }
        }
    }
}

async fn back_off_after_accept_error(e: &std::io::Error) {
    error!("Failed to accept registry connection: {}", e);
    tokio::time::sleep(ACCEPT_BACKOFF).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn accept_errors_wait_before_retrying() {
        let start = tokio::time::Instant::now();
        back_off_after_accept_error(&std::io::Error::from_raw_os_error(24)).await;
        assert!(start.elapsed() >= ACCEPT_BACKOFF);
    }
}
