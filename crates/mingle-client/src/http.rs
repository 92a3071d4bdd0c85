use mingle_types::api::{
    CreateMessageRequest, CreateMessageResponse, MessageRecord, UserProfile,
};

use crate::error::ClientError;

/// Thin typed wrapper over the backend's request/response surface.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Full conversation between two users, both directions, in storage
    /// insertion order.
    pub async fn conversation(
        &self,
        sender_id: i64,
        recipient_id: i64,
    ) -> Result<Vec<MessageRecord>, ClientError> {
        let response = self
            .http
            .get(format!("{}/messages", self.base_url))
            .query(&[("sender_id", sender_id), ("recipient_id", recipient_id)])
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Submit one outbound message; returns the store-assigned id.
    pub async fn send_message(&self, request: &CreateMessageRequest) -> Result<i64, ClientError> {
        let response = self
            .http
            .post(format!("{}/messages", self.base_url))
            .json(request)
            .send()
            .await?;
        let created: CreateMessageResponse = Self::check(response).await?.json().await?;
        Ok(created.id)
    }

    /// Conversation-partner identity for the transcript header.
    pub async fn get_user(&self, id: i64) -> Result<UserProfile, ClientError> {
        let response = self
            .http
            .get(format!("{}/user/{}", self.base_url, id))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// Surface the server's `{error}` body on failure statuses.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body["error"].as_str().map(String::from))
            .unwrap_or_else(|| status.to_string());
        Err(ClientError::Server(message))
    }
}
