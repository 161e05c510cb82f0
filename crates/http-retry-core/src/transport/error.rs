//! Error type for the bundled curl transport.

/// Failure of a single transport attempt.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// URL did not parse.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// URL parsed but is not http/https.
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    /// Curl reported an error (timeout, connection, DNS, etc.).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: u32, body: Vec<u8> },
    /// 2xx response whose body did not decode into the requested type.
    #[error("decode response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The blocking transfer task panicked or was cancelled.
    #[error("transfer task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl TransportError {
    /// HTTP status when the failure was a non-2xx response.
    pub fn status(&self) -> Option<u32> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for curl timeouts and connection-level failures.
    pub fn is_connection(&self) -> bool {
        match self {
            TransportError::Curl(e) => {
                e.is_operation_timedout()
                    || e.is_couldnt_connect()
                    || e.is_couldnt_resolve_host()
                    || e.is_couldnt_resolve_proxy()
                    || e.is_read_error()
                    || e.is_recv_error()
                    || e.is_send_error()
                    || e.is_got_nothing()
            }
            _ => false,
        }
    }
}
