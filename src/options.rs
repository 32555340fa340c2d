/// Configures HTTP timeout, retry and diagnostics behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum number of retries after the initial attempt.
    pub max_retries: usize,
    /// Base retry delay in milliseconds (exponential strategy for transport
    /// failures, flat fallback for 429 without `Retry-After`).
    pub retry_delay_ms: u64,
    /// Emits a diagnostic log line per attempt when the `tracing` feature is
    /// enabled. Never affects control flow.
    pub debug: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_retries: 3,
            retry_delay_ms: 1_000,
            debug: false,
        }
    }
}
