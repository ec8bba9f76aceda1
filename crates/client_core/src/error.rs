use thiserror::Error;

/// Typed error constructed at the transport boundary. Downstream code asks
/// for [`ClientError::human_message`] instead of probing response shapes.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Transport failure: no response from the server (DNS, refused
    /// connection, timeout).
    #[error("network error: {0}")]
    Network(String),
    /// The server answered with a non-2xx status. `message` carries the
    /// body's `message` field verbatim when present, otherwise it is empty.
    #[error("server responded {status}: {message}")]
    Server { status: u16, message: String },
    /// The request was superseded by a newer one. Internal only; never
    /// shown to the user.
    #[error("request superseded")]
    Cancelled,
}

impl ClientError {
    /// Message to display: the server's own text when it sent one, the
    /// caller's fallback otherwise.
    pub fn human_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ClientError::Cancelled)
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Network(err.to_string())
    }
}
