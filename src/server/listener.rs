//! Accept Loop
//!
//! Accepts TCP connections and serves each one on its own task.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::kv::CacheProxy;
use crate::server::handler::handle_connection;
use crate::tasks::Shutdown;

/// Accepts connections until the shutdown signal fires.
///
/// A failed accept is logged and the loop keeps going. Connections already
/// being served are left to finish on their own.
pub async fn serve(
    listener: TcpListener,
    proxy: Arc<CacheProxy>,
    read_timeout: Duration,
    mut shutdown: Shutdown,
) {
    if let Ok(addr) = listener.local_addr() {
        info!("Accepting connections on {}", addr);
    }

    loop {
        if *shutdown.borrow() {
            break;
        }

        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(conn) => conn,
                Err(e) => {
                    error!("Failed to accept connection: {}", e);
                    continue;
                }
            },
            _ = shutdown.changed() => break,
        };

        let proxy = Arc::clone(&proxy);
        tokio::spawn(async move {
            match handle_connection(stream, &proxy, read_timeout).await {
                Ok(served) => debug!(%peer, served, "connection closed"),
                Err(e) => warn!(%peer, "dropping connection: {}", e),
            }
        });
    }

    info!("Listener stopped accepting connections");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::Store;
    use crate::models::{Request, Response};
    use crate::server::codec::{read_message, write_message};
    use crate::tasks::shutdown_channel;
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_serve_answers_and_stops() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let proxy = Arc::new(CacheProxy::new(Arc::new(Store::new())));
        let (tx, rx) = shutdown_channel();
        let server = tokio::spawn(serve(listener, proxy.clone(), Duration::from_secs(1), rx));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        write_message(&mut stream, &Request::set("k", "v")).await.unwrap();
        let resp: Option<Response> = read_message(&mut stream).await.unwrap();
        assert_eq!(resp, Some(Response::set(true)));
        assert_eq!(proxy.store().get("k").await.as_deref(), Some("v"));

        tx.send(true).unwrap();
        let stopped = tokio::time::timeout(Duration::from_secs(1), server).await;
        assert!(stopped.is_ok(), "Listener should stop after shutdown");
    }
}
