use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered 401. The stored access token has been cleared.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other non-success response, carrying the server's `message`.
    #[error("API error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("invalid base url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
