/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum PumpFunError {
    /// Network-level failure from `reqwest`, surfaced after retries were
    /// exhausted.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Every attempt exceeded the per-request timeout.
    #[error("request timed out after {attempts} attempts")]
    Timeout {
        /// Total number of attempts made, including the first.
        attempts: usize,
    },
    /// Response body was not valid JSON. Never retried.
    #[error("malformed response body: {snippet}")]
    Malformed {
        /// First 200 characters of the raw body, for diagnosis.
        snippet: String,
    },
    /// HTTP 429 after retries were exhausted.
    #[error("rate limit exceeded after {attempts} attempts")]
    RateLimited {
        /// Server-suggested wait from the `Retry-After` header, if sent.
        retry_after_secs: Option<u64>,
        /// Total number of attempts made, including the first.
        attempts: usize,
    },
    /// Non-success HTTP status other than 429. Never retried.
    #[error("api error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, parsed as JSON when possible, raw text otherwise.
        body: serde_json::Value,
        /// Response headers as name/value pairs.
        headers: Vec<(String, String)>,
    },
}
