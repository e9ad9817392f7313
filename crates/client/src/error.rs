/// Error type for scoring operations.
#[derive(Debug)]
pub enum ScoreError {
    /// No credential configured
    MissingApiKey,
    /// The source grid produced no records to score
    EmptyInput,
    /// Reading from or writing to the tabular host failed
    Host(String),
    /// Transport-level failure (not a timeout, not an HTTP status)
    Network(String),
    /// HTTP error with status code and response body/status text
    Http(u16, String),
    /// Deadline exceeded — the in-flight request was cancelled
    Timeout(String),
    /// Response body was not parseable JSON
    Parse(String),
    /// Normalized response was not a non-empty record sequence
    InvalidResponse(String),
}

impl std::fmt::Display for ScoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreError::MissingApiKey => {
                write!(f, "No API key configured — set one with `rgrid config set --api-key`")
            }
            ScoreError::EmptyInput => write!(f, "Nothing to score: the source grid has no data rows"),
            ScoreError::Host(msg) => write!(f, "Spreadsheet error: {}", msg),
            ScoreError::Network(msg) => write!(
                f,
                "Network error: {}. Likely causes: the endpoint blocks cross-origin \
                 requests (configure a proxy), the URL is incorrect, you are offline, \
                 or the server is down.",
                msg
            ),
            ScoreError::Http(code, msg) => write!(f, "Scoring API returned HTTP {}: {}", code, msg),
            ScoreError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            ScoreError::Parse(msg) => write!(f, "Could not parse scoring response: {}", msg),
            ScoreError::InvalidResponse(msg) => {
                write!(f, "Invalid or empty scoring response: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScoreError {}
