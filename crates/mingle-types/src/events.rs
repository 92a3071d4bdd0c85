use serde::{Deserialize, Serialize};

use crate::api::MessageRecord;

/// Events pushed over the live WebSocket channel.
///
/// Every connected subscriber receives every event; there is no per-recipient
/// routing. The envelope carries the full persisted record so clients can
/// dedup on `message_id` and style sent vs received without a second fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum GatewayEvent {
    /// A new message was accepted and persisted.
    MessageCreated {
        message_id: i64,
        sender_id: i64,
        recipient_id: i64,
        message_content: String,
        timestamp: String,
    },
}

impl GatewayEvent {
    pub fn message_created(record: &MessageRecord) -> Self {
        Self::MessageCreated {
            message_id: record.message_id,
            sender_id: record.sender_id,
            recipient_id: record.recipient_id,
            message_content: record.message_content.clone(),
            timestamp: record.timestamp.clone(),
        }
    }

    /// The persisted record this event describes.
    pub fn into_record(self) -> MessageRecord {
        match self {
            Self::MessageCreated {
                message_id,
                sender_id,
                recipient_id,
                message_content,
                timestamp,
            } => MessageRecord {
                message_id,
                sender_id,
                recipient_id,
                message_content,
                timestamp,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_envelope_shape() {
        let event = GatewayEvent::MessageCreated {
            message_id: 7,
            sender_id: 1,
            recipient_id: 2,
            message_content: "hello".into(),
            timestamp: "2026-08-06T10:00:00Z".into(),
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(json["type"], "MessageCreated");
        assert_eq!(json["data"]["message_id"], 7);
        assert_eq!(json["data"]["message_content"], "hello");
    }
}
