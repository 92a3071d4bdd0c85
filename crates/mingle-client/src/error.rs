use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an `{error}` body.
    #[error("server error: {0}")]
    Server(String),

    #[error("live channel error: {0}")]
    Live(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}
