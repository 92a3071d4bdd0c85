use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use mingle_types::events::GatewayEvent;

/// Metadata kept for one registered live connection.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connected_at: DateTime<Utc>,
}

/// Owns the set of live connections and fans events out to all of them.
///
/// There is no per-recipient routing: every registered connection receives
/// every event. Connections register on WebSocket accept and must be
/// deregistered when their socket loop exits, so the registry tracks only
/// live handles.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<DispatcherInner>,
}

struct DispatcherInner {
    broadcast_tx: broadcast::Sender<GatewayEvent>,
    connections: RwLock<HashMap<Uuid, ConnectionInfo>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        let (broadcast_tx, _) = broadcast::channel(1024);
        Self {
            inner: Arc::new(DispatcherInner {
                broadcast_tx,
                connections: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Register a new live connection. Returns its id and the event receiver
    /// carrying everything published after this call.
    pub async fn register(&self) -> (Uuid, broadcast::Receiver<GatewayEvent>) {
        let conn_id = Uuid::new_v4();
        let rx = self.inner.broadcast_tx.subscribe();
        self.inner.connections.write().await.insert(
            conn_id,
            ConnectionInfo {
                connected_at: Utc::now(),
            },
        );
        (conn_id, rx)
    }

    /// Remove a connection from the registry. Dropping its receiver is what
    /// stops delivery; this keeps the registry from growing without bound.
    pub async fn deregister(&self, conn_id: Uuid) {
        self.inner.connections.write().await.remove(&conn_id);
    }

    /// Subscribe to events without registering a connection (tests, taps).
    pub fn subscribe(&self) -> broadcast::Receiver<GatewayEvent> {
        self.inner.broadcast_tx.subscribe()
    }

    /// Push an event to every currently-registered connection. A send with
    /// no live receivers is not an error.
    pub fn broadcast(&self, event: GatewayEvent) {
        let _ = self.inner.broadcast_tx.send(event);
    }

    pub async fn connection_count(&self) -> usize {
        self.inner.connections.read().await.len()
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
