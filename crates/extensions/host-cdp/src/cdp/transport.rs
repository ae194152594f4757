//! Request/response multiplexing over the browser WebSocket.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{CdpRequest, CdpResponse};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;
type Pending = Arc<Mutex<HashMap<u64, oneshot::Sender<Result<Value, CdpError>>>>>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One browser connection shared by the client and every page session.
pub(crate) struct Transport {
    ws_tx: tokio::sync::Mutex<WsSink>,
    request_id: AtomicU64,
    pending: Pending,
    recv_task: tokio::task::JoinHandle<()>,
}

impl Transport {
    pub(crate) async fn connect(ws_url: &str) -> Result<Arc<Self>, CdpError> {
        let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url)
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket: {}", e)))?;

        let (ws_sink, ws_source) = ws_stream.split();
        let pending: Pending = Arc::new(Mutex::new(HashMap::new()));

        let recv_task = {
            let pending = pending.clone();
            tokio::spawn(async move {
                Self::receive_loop(ws_source, pending).await;
            })
        };

        Ok(Arc::new(Self {
            ws_tx: tokio::sync::Mutex::new(ws_sink),
            request_id: AtomicU64::new(1),
            pending,
            recv_task,
        }))
    }

    async fn receive_loop(mut ws_source: WsSource, pending: Pending) {
        while let Some(msg) = ws_source.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    trace!("CDP recv: {}", text);
                    match serde_json::from_str::<CdpResponse>(&text) {
                        // Events carry no id and are not consumed.
                        Ok(CdpResponse { id: Some(id), result, error, .. }) => {
                            let waiter = pending.lock().remove(&id);
                            if let Some(tx) = waiter {
                                let outcome = match error {
                                    Some(error) => Err(CdpError::Protocol {
                                        code: error.code,
                                        message: error.message,
                                    }),
                                    None => Ok(result.unwrap_or(Value::Null)),
                                };
                                let _ = tx.send(outcome);
                            }
                        }
                        Ok(_) => {}
                        Err(e) => warn!("Failed to parse CDP message: {}", e),
                    }
                }
                Ok(Message::Close(_)) => {
                    debug!("WebSocket closed");
                    break;
                }
                Err(e) => {
                    error!("WebSocket error: {}", e);
                    break;
                }
                _ => {}
            }
        }

        // Dropping the senders wakes every waiter with SessionClosed.
        pending.lock().clear();
    }

    /// Send a CDP command and wait for its response.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = CdpRequest {
            id,
            method: method.to_string(),
            params,
            session_id: session_id.map(str::to_string),
        };

        let json = serde_json::to_string(&request)?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        let sent = {
            let mut ws = self.ws_tx.lock().await;
            ws.send(Message::Text(json.into())).await
        };
        if let Err(e) = sent {
            self.pending.lock().remove(&id);
            return Err(e.into());
        }

        match tokio::time::timeout(REQUEST_TIMEOUT, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }
}

impl Drop for Transport {
    fn drop(&mut self) {
        self.recv_task.abort();
    }
}
