use serde::{Deserialize, Serialize};

// -- Messages --

/// Body of `POST /messages`. Fields are optional so that a missing field
/// surfaces as a validation error with a `{error}` body instead of a serde
/// rejection; presence is the only server-side check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateMessageRequest {
    pub sender_id: Option<i64>,
    pub recipient_id: Option<i64>,
    pub message_content: Option<String>,
    pub timestamp: Option<String>,
}

impl CreateMessageRequest {
    pub fn new(sender_id: i64, recipient_id: i64, content: &str, timestamp: &str) -> Self {
        Self {
            sender_id: Some(sender_id),
            recipient_id: Some(recipient_id),
            message_content: Some(content.to_string()),
            timestamp: Some(timestamp.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMessageResponse {
    pub id: i64,
}

/// One persisted message as it travels over the wire. The timestamp is the
/// client-supplied ISO-8601 string, stored and returned verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub message_id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub message_content: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationQuery {
    pub sender_id: i64,
    pub recipient_id: i64,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub surname: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub uid: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id: i64,
    pub uid: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub img: Option<String>,
}

// -- Users --

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub img: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub first_name: String,
    pub last_name: String,
}

// -- Friends --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddFriendRequest {
    pub friend_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriendEntry {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FriendListResponse {
    pub friend_list: Vec<FriendEntry>,
}

// -- Uploads --

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file_name: String,
}
