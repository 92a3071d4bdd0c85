use chrono::{SecondsFormat, Utc};
use tracing::warn;

use mingle_types::api::{CreateMessageRequest, UserProfile};
use mingle_types::events::GatewayEvent;

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::transcript::Transcript;

/// Drives one open conversation: bulk fetch on open, live pushes merged in,
/// and the submit → persist → re-fetch → scroll cycle.
pub struct ChatSession {
    api: ApiClient,
    transcript: Transcript,
    scroll_to_newest: bool,
}

impl ChatSession {
    /// Fetch the conversation history and build the transcript around it.
    pub async fn open(api: ApiClient, self_id: i64, peer_id: i64) -> Result<Self, ClientError> {
        let mut transcript = Transcript::new(self_id, peer_id);
        let history = api.conversation(self_id, peer_id).await?;
        transcript.load(history);
        Ok(Self {
            api,
            transcript,
            scroll_to_newest: true,
        })
    }

    /// Mark the live subscription as attached. The feed itself is driven by
    /// the caller, which hands events to [`ChatSession::apply_live_event`].
    pub fn attach_live(&mut self) {
        self.transcript.attach_live();
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Merge one live-pushed event into the view. Every event on the
    /// channel arrives here regardless of conversation; duplicates are
    /// absorbed by the transcript's id set.
    pub fn apply_live_event(&mut self, event: GatewayEvent) {
        if self.transcript.push(event.into_record()) {
            self.scroll_to_newest = true;
        }
    }

    /// Submit a message. Empty input is dropped client-side. On success the
    /// whole conversation is re-fetched and the view pinned to the newest
    /// entry. On failure the fault is logged and the input stays
    /// uncommitted; returns whether the message was committed.
    pub async fn send(&mut self, content: &str) -> bool {
        if content.is_empty() {
            return false;
        }

        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        let request = CreateMessageRequest::new(
            self.transcript.self_id(),
            self.transcript.peer_id(),
            content,
            &timestamp,
        );

        if let Err(e) = self.api.send_message(&request).await {
            warn!("failed to send message: {}", e);
            return false;
        }

        match self
            .api
            .conversation(self.transcript.self_id(), self.transcript.peer_id())
            .await
        {
            Ok(history) => self.transcript.load(history),
            Err(e) => warn!("failed to refresh conversation after send: {}", e),
        }

        self.scroll_to_newest = true;
        true
    }

    /// Conversation-partner identity for the header.
    pub async fn peer_profile(&self) -> Result<UserProfile, ClientError> {
        self.api.get_user(self.transcript.peer_id()).await
    }

    /// Whether the view should scroll to the newest entry, cleared on read.
    pub fn take_scroll_to_newest(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_newest)
    }
}
