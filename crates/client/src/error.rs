//! Remote-call error taxonomy.

/// Errors raised by the resource clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure: connection refused, timeout, TLS, DNS.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The 2xx body did not decode as the expected wire model.
    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
