use std::collections::HashSet;

use chrono::{DateTime, Utc};

use mingle_types::api::MessageRecord;

use crate::timefmt;

/// Lifecycle of the local conversation view. `Live` is entered once the
/// broadcast subscription is attached and is never left while mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptState {
    Empty,
    Loaded,
    Live,
}

/// Which side of the conversation a message belongs to, for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Sent,
    Received,
}

/// One rendered transcript entry.
#[derive(Debug)]
pub struct TranscriptLine<'a> {
    pub message: &'a MessageRecord,
    pub direction: Direction,
    pub label: Option<String>,
}

/// The ordered, client-held view of one conversation.
///
/// Messages are kept in arrival order: the bulk fetch supplies storage
/// insertion order, and live pushes append at the end. Duplicate delivery
/// (a live push racing a re-fetch) is absorbed by the seen-id set.
pub struct Transcript {
    self_id: i64,
    peer_id: i64,
    state: TranscriptState,
    messages: Vec<MessageRecord>,
    seen: HashSet<i64>,
}

impl Transcript {
    pub fn new(self_id: i64, peer_id: i64) -> Self {
        Self {
            self_id,
            peer_id,
            state: TranscriptState::Empty,
            messages: Vec::new(),
            seen: HashSet::new(),
        }
    }

    pub fn state(&self) -> TranscriptState {
        self.state
    }

    pub fn self_id(&self) -> i64 {
        self.self_id
    }

    pub fn peer_id(&self) -> i64 {
        self.peer_id
    }

    /// Replace the whole view with a fresh conversation fetch. Live stays
    /// live; the post-send re-fetch goes through here too.
    pub fn load(&mut self, messages: Vec<MessageRecord>) {
        self.seen = messages.iter().map(|m| m.message_id).collect();
        self.messages = messages;
        if self.state == TranscriptState::Empty {
            self.state = TranscriptState::Loaded;
        }
    }

    /// Mark the live subscription as attached.
    pub fn attach_live(&mut self) {
        self.state = TranscriptState::Live;
    }

    /// Append a live-pushed message. Returns false when the id was already
    /// present and the push was dropped.
    pub fn push(&mut self, message: MessageRecord) -> bool {
        if !self.seen.insert(message.message_id) {
            return false;
        }
        self.messages.push(message);
        true
    }

    pub fn messages(&self) -> &[MessageRecord] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Index the view scrolls to after a send or a live push.
    pub fn newest_index(&self) -> Option<usize> {
        self.messages.len().checked_sub(1)
    }

    /// The full render: every message with its direction and its collapsed
    /// timestamp label.
    pub fn lines(&self, now: DateTime<Utc>) -> Vec<TranscriptLine<'_>> {
        let labels = timefmt::transcript_labels(&self.messages, now);
        self.messages
            .iter()
            .zip(labels)
            .map(|(message, label)| TranscriptLine {
                direction: if message.sender_id == self.self_id {
                    Direction::Sent
                } else {
                    Direction::Received
                },
                message,
                label,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: i64, sender_id: i64, content: &str) -> MessageRecord {
        MessageRecord {
            message_id: id,
            sender_id,
            recipient_id: if sender_id == 1 { 2 } else { 1 },
            message_content: content.into(),
            timestamp: "2026-08-06T10:00:00Z".into(),
        }
    }

    #[test]
    fn starts_empty_then_loads_then_goes_live() {
        let mut transcript = Transcript::new(1, 2);
        assert_eq!(transcript.state(), TranscriptState::Empty);

        transcript.load(vec![record(1, 1, "hi")]);
        assert_eq!(transcript.state(), TranscriptState::Loaded);

        transcript.attach_live();
        assert_eq!(transcript.state(), TranscriptState::Live);

        // A re-fetch while live does not regress the state
        transcript.load(vec![record(1, 1, "hi")]);
        assert_eq!(transcript.state(), TranscriptState::Live);
    }

    #[test]
    fn duplicate_push_is_absorbed() {
        let mut transcript = Transcript::new(1, 2);
        transcript.load(vec![record(1, 1, "hello")]);

        // The same record arrives over the live channel after the fetch
        assert!(!transcript.push(record(1, 1, "hello")));
        assert_eq!(transcript.len(), 1);

        assert!(transcript.push(record(2, 2, "hey")));
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn live_pushes_append_in_arrival_order() {
        let mut transcript = Transcript::new(1, 2);
        transcript.load(vec![record(1, 1, "first")]);
        transcript.push(record(3, 2, "third"));
        transcript.push(record(2, 1, "second, late"));

        let ids: Vec<i64> = transcript.messages().iter().map(|m| m.message_id).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(transcript.newest_index(), Some(2));
    }

    #[test]
    fn lines_carry_direction_for_styling() {
        let mut transcript = Transcript::new(1, 2);
        transcript.load(vec![record(1, 1, "mine"), record(2, 2, "theirs")]);

        let now = Utc.with_ymd_and_hms(2026, 8, 6, 15, 0, 0).unwrap();
        let lines = transcript.lines(now);
        assert_eq!(lines[0].direction, Direction::Sent);
        assert_eq!(lines[1].direction, Direction::Received);
        assert!(lines[0].label.is_some());
        assert_eq!(lines[1].label, None); // same minute collapses
    }
}
