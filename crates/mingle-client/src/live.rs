use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

use mingle_types::events::GatewayEvent;

use crate::error::ClientError;

/// One live broadcast subscription.
///
/// The channel is global: this feed receives every event published by the
/// server, not just the open conversation's. Filtering, if any, happens in
/// the consumer. Closing the feed only stops future deliveries.
pub struct LiveFeed {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl LiveFeed {
    pub async fn connect(url: &str) -> Result<Self, ClientError> {
        let (ws, _) = connect_async(url).await?;
        Ok(Self { ws })
    }

    /// Next decoded event; `None` once the server closes the channel.
    /// Heartbeat pings are answered by the transport and skipped here.
    pub async fn next_event(&mut self) -> Result<Option<GatewayEvent>, ClientError> {
        while let Some(frame) = self.ws.next().await {
            match frame? {
                Message::Text(text) => return Ok(Some(serde_json::from_str(text.as_str())?)),
                Message::Close(_) => return Ok(None),
                _ => {}
            }
        }
        Ok(None)
    }
}
