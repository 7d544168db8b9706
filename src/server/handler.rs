//! Request Handler
//!
//! Decodes requests from a connection, dispatches them to the
//! [`CacheProxy`], and writes the responses back. No lock is held while the
//! connection is read or written.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{KvError, Result};
use crate::kv::CacheProxy;
use crate::models::{Action, Request, Response, INVALID_KEY, UNKNOWN_ACTION, VALUE_TOO_LARGE};
use crate::server::codec::{encoded_len, read_message, write_message, MAX_FRAME_LEN};

/// True when a GET response carrying `value` fits in one frame.
///
/// Responses do not echo the key, so the check depends only on the escaped
/// value and the fixed envelope around it.
pub fn fits_in_response(value: &str) -> bool {
    let envelope = encoded_len(&Response::get(Some(String::new())));
    match (envelope, encoded_len(value)) {
        // Both counts include the two quotes of the value string
        (Ok(envelope), Ok(quoted)) => envelope - 2 + quoted <= MAX_FRAME_LEN,
        _ => false,
    }
}

/// Applies one request to the proxy and builds its response.
///
/// Unknown actions, empty keys, and values too large to be read back get an
/// explicit error response.
pub async fn dispatch(proxy: &CacheProxy, request: Request) -> Response {
    let action = match request.parsed_action() {
        Ok(action) => action,
        Err(e) => {
            warn!("Rejecting request: {}", e);
            return Response::error(UNKNOWN_ACTION);
        }
    };
    if let Some(reason) = request.validate() {
        warn!("Rejecting {} request: {}", action, reason);
        return Response::error(INVALID_KEY);
    }
    if matches!(action, Action::Set | Action::Update) && !fits_in_response(&request.value) {
        warn!(
            "Rejecting {} request: {} byte value cannot be read back",
            action,
            request.value.len()
        );
        return Response::error(VALUE_TOO_LARGE);
    }

    debug!(action = %action, key = %request.key, "dispatching request");

    match action {
        Action::Get => Response::get(proxy.get(&request.key).await),
        Action::Set => Response::set(proxy.set(&request.key, request.value).await),
        Action::Update => Response::outcome(proxy.update(&request.key, request.value).await),
        Action::Delete => Response::outcome(proxy.delete(&request.key).await),
    }
}

/// Serves requests on `stream` until the peer closes it.
///
/// Each frame read and each response write is bounded by `io_timeout`, so a
/// client that stops reading cannot park the task. A frame that cannot be decoded
/// ends the connection without a response. Returns the number of requests
/// served.
pub async fn handle_connection<S>(
    mut stream: S,
    proxy: &CacheProxy,
    io_timeout: Duration,
) -> Result<usize>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut served = 0;

    loop {
        let request: Request = match timeout(io_timeout, read_message(&mut stream)).await {
            Ok(Ok(Some(request))) => request,
            Ok(Ok(None)) => return Ok(served),
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(KvError::Timeout(io_timeout)),
        };

        let response = dispatch(proxy, request).await;
        timeout(io_timeout, write_message(&mut stream, &response))
            .await
            .map_err(|_| KvError::Timeout(io_timeout))??;
        served += 1;
    }
}
