/// Errors raised while talking to the remote literature database
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },

    #[error("{endpoint} responded with HTTP status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Unexpected response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },
}

/// Remote source of article identifiers and article detail documents
pub trait PaperSource {
    /// Search for articles matching `query`, returning their identifiers (possibly none)
    fn search(&self, query: &str) -> Result<Vec<String>, NetworkError>;

    /// Fetch the raw structured document batch for the given identifiers
    fn fetch_details(&self, ids: &[String]) -> Result<String, NetworkError>;
}
