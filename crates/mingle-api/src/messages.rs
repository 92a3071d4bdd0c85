use axum::Json;
use axum::extract::{Query, State};

use mingle_types::api::{
    ConversationQuery, CreateMessageRequest, CreateMessageResponse, MessageRecord,
};
use mingle_types::events::GatewayEvent;

use crate::AppState;
use crate::error::ApiError;

/// Ingest a new outbound message: validate presence of every field, persist,
/// then publish to the live channel. The timestamp is taken from the caller
/// as-is; the store assigns only the id.
pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<CreateMessageRequest>,
) -> Result<Json<CreateMessageResponse>, ApiError> {
    let sender_id = req.sender_id.ok_or_else(|| ApiError::missing_field("sender_id"))?;
    let recipient_id = req
        .recipient_id
        .ok_or_else(|| ApiError::missing_field("recipient_id"))?;
    let message_content = req
        .message_content
        .ok_or_else(|| ApiError::missing_field("message_content"))?;
    let timestamp = req.timestamp.ok_or_else(|| ApiError::missing_field("timestamp"))?;

    // Run blocking DB insert off the async runtime
    let db = state.clone();
    let content = message_content.clone();
    let ts = timestamp.clone();
    let message_id = tokio::task::spawn_blocking(move || {
        db.db.insert_message(sender_id, recipient_id, &content, &ts)
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    // Broadcast to all live subscribers; no per-recipient routing
    state.dispatcher.broadcast(GatewayEvent::MessageCreated {
        message_id,
        sender_id,
        recipient_id,
        message_content,
        timestamp,
    });

    Ok(Json(CreateMessageResponse { id: message_id }))
}

/// Return every message between the two participants, both directions, in
/// storage insertion order. Unfiltered and unpaginated.
pub async fn list_messages(
    State(state): State<AppState>,
    Query(query): Query<ConversationQuery>,
) -> Result<Json<Vec<MessageRecord>>, ApiError> {
    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || {
        db.db.conversation(query.sender_id, query.recipient_id)
    })
    .await
    .map_err(|e| anyhow::anyhow!("spawn_blocking join error: {}", e))??;

    let messages = rows
        .into_iter()
        .map(|row| MessageRecord {
            message_id: row.id,
            sender_id: row.sender_id,
            recipient_id: row.recipient_id,
            message_content: row.content,
            timestamp: row.timestamp,
        })
        .collect();

    Ok(Json(messages))
}
