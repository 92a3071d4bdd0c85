//! Client-side plumbing for one two-party conversation: the transcript
//! state machine, timestamp label formatting, and the HTTP/WebSocket
//! transport it is fed from.

pub mod error;
pub mod http;
pub mod live;
pub mod session;
pub mod timefmt;
pub mod transcript;

pub use error::ClientError;
pub use http::ApiClient;
pub use live::LiveFeed;
pub use session::ChatSession;
pub use transcript::{Direction, Transcript, TranscriptState};
