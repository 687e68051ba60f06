use thiserror::Error;

/// Classified failure of a Discord REST operation.
///
/// The planner reacts differently to each class: `NotFound` clears the dangling
/// configuration reference, `Forbidden` is skipped until the next tick, and `Other` is
/// logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The channel, message, role or member no longer exists.
    #[error("Discord resource not found")]
    NotFound,

    /// The bot lacks the permissions for the operation.
    #[error("Missing permissions for Discord operation")]
    Forbidden,

    /// Any other failure (network, rate limit exhaustion, malformed response).
    #[error("Discord request failed: {0}")]
    Other(String),
}

impl From<serenity::Error> for TransportError {
    fn from(err: serenity::Error) -> Self {
        use serenity::http::HttpError;

        if let serenity::Error::Http(HttpError::UnsuccessfulRequest(response)) = &err {
            match response.status_code.as_u16() {
                404 => return TransportError::NotFound,
                403 => return TransportError::Forbidden,
                _ => {}
            }
        }

        TransportError::Other(err.to_string())
    }
}
