use std::fmt;
use std::time::Duration;

use reqwest::{header, StatusCode};
use serde_json::{Map, Value};
use tokio::time::sleep;

use crate::{
    decode::{extract_items, LIST_KEYS},
    paginate::collect_pages,
    query::Query,
    ClientOptions, PumpFunError, Result,
};

/// Default Pump.fun frontend API host.
pub const DEFAULT_BASE_URL: &str = "https://frontend-api-v3.pump.fun";

const USER_AGENT: &str = concat!("pumpfun-http/", env!("CARGO_PKG_VERSION"));

/// Ceiling for exponential transport backoff, in milliseconds.
const MAX_BACKOFF_MS: u64 = 30_000;

/// How much of an unparseable body is kept for diagnostics.
const SNIPPET_LEN: usize = 200;

#[derive(Clone)]
/// HTTP client for the Pump.fun token/trade/wallet REST API.
///
/// All endpoint methods are thin GET wrappers over [`PumpFunClient::get`],
/// which handles timeouts, retries with exponential backoff, rate-limit
/// waits and JSON parsing. Response shapes are owned by the remote API and
/// returned as raw [`serde_json::Value`].
pub struct PumpFunClient {
    http: reqwest::Client,
    base_url: String,
    authorization: Option<String>,
    options: ClientOptions,
}

impl fmt::Debug for PumpFunClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PumpFunClient")
            .field("base_url", &self.base_url)
            .field(
                "authorization",
                &self.authorization.as_ref().map(|_| "<redacted>"),
            )
            .field("options", &self.options)
            .finish()
    }
}

impl Default for PumpFunClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for [`PumpFunClient::search_coins`], with the documented
/// endpoint defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOptions {
    /// Number of results to return (API maximum is 100).
    pub limit: u32,
    /// Pagination offset.
    pub offset: u32,
    /// Field to sort by.
    pub sort: String,
    /// Sort order, `ASC` or `DESC`.
    pub order: String,
    /// Whether NSFW tokens are included.
    pub include_nsfw: bool,
    /// Match mode, `exact` or `fuzzy`.
    pub search_type: String,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            sort: "market_cap".to_owned(),
            order: "DESC".to_owned(),
            include_nsfw: false,
            search_type: "exact".to_owned(),
        }
    }
}

impl PumpFunClient {
    /// Creates an anonymous client against the default API host.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            authorization: None,
            options: ClientOptions::default(),
        }
    }

    /// Creates a client from the process environment.
    ///
    /// Reads `PUMPFUN_API_KEY` for the bearer token; when unset or empty the
    /// client stays anonymous, which the public endpoints accept.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use pumpfun_http::PumpFunClient;
    ///
    /// let api = PumpFunClient::from_env();
    /// ```
    pub fn from_env() -> Self {
        let client = Self::new();
        match std::env::var("PUMPFUN_API_KEY") {
            Ok(key) if !key.trim().is_empty() => client.with_api_key(key),
            _ => client,
        }
    }

    /// Sets the bearer token sent as `Authorization: Bearer <key>`.
    ///
    /// If the key already carries the `Bearer ` prefix it is kept as-is.
    pub fn with_api_key(mut self, key: impl AsRef<str>) -> Self {
        self.authorization = Some(normalize_bearer_authorization(key.as_ref()));
        self
    }

    /// Overrides the API host, e.g. for a proxy or a test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Searches for tokens via `/coins/search`.
    ///
    /// The endpoint expects the camel-cased `searchTerm` parameter; the
    /// snake-cased `search_term` seen in some older scripts is ignored by
    /// the API.
    pub async fn search_coins(&self, term: &str, opts: &SearchOptions) -> Result<Value> {
        let query = Query::new()
            .push("searchTerm", term)
            .push("limit", opts.limit)
            .push("offset", opts.offset)
            .push("sort", opts.sort.as_str())
            .push("order", opts.order.as_str())
            .push("includeNsfw", opts.include_nsfw)
            .push("type", opts.search_type.as_str());
        self.get("/coins/search", &query).await
    }

    /// Returns the latest trades across all tokens.
    pub async fn latest_trades(&self, limit: u32) -> Result<Value> {
        let query = Query::new().push("limit", limit);
        self.get("/trades/latest", &query).await
    }

    /// Returns the most recently created tokens, newest first.
    pub async fn latest_coins(&self, limit: u32, offset: u32, include_nsfw: bool) -> Result<Value> {
        let query = Query::new()
            .push("limit", limit)
            .push("offset", offset)
            .push("includeNsfw", include_nsfw)
            .push("sort", "created_timestamp")
            .push("order", "desc");
        self.get("/coins/latest", &query).await
    }

    /// Returns token holdings for a wallet.
    ///
    /// `min_balance` of `-1` disables the balance floor, matching the API
    /// default.
    pub async fn wallet_holdings(
        &self,
        wallet: &str,
        limit: u32,
        offset: u32,
        min_balance: i64,
    ) -> Result<Value> {
        let query = Query::new()
            .push("limit", limit)
            .push("offset", offset)
            .push("minBalance", min_balance);
        self.get(&format!("/balances/{wallet}"), &query).await
    }

    /// Returns tokens created by a wallet, newest first.
    pub async fn wallet_created_coins(
        &self,
        wallet: &str,
        limit: u32,
        offset: u32,
        include_nsfw: bool,
    ) -> Result<Value> {
        let query = Query::new()
            .push("offset", offset)
            .push("limit", limit)
            .push("includeNsfw", include_nsfw)
            .push("sort", "created_timestamp")
            .push("order", "desc");
        self.get(&format!("/coins/user-created-coins/{wallet}"), &query)
            .await
    }

    /// Returns one page of trades for a token.
    ///
    /// `minimum_size` filters out trades below the given lamport size; the
    /// API default is 50_000_000.
    pub async fn token_trades(
        &self,
        mint: &str,
        limit: u32,
        offset: u32,
        minimum_size: u64,
    ) -> Result<Value> {
        let query = Query::new()
            .push("limit", limit)
            .push("offset", offset)
            .push("minimumSize", minimum_size as i64);
        self.get(&format!("/trades/all/{mint}"), &query).await
    }

    /// Returns comments for a token.
    pub async fn token_comments(&self, mint: &str, limit: u32, offset: u32) -> Result<Value> {
        let query = Query::new().push("limit", limit).push("offset", offset);
        self.get(&format!("/replies/{mint}"), &query).await
    }

    /// Drains all trades for a token, paging automatically.
    ///
    /// Fetches `batch_size` trades per request until the API returns an
    /// empty page or `max_trades` items have been accumulated. A fixed
    /// courtesy delay separates consecutive full pages. Any page failure
    /// aborts the drain; no partial result is returned.
    pub async fn all_token_trades(
        &self,
        mint: &str,
        batch_size: usize,
        max_trades: Option<usize>,
        minimum_size: u64,
    ) -> Result<Vec<Value>> {
        collect_pages(batch_size, max_trades, |offset, limit| {
            let client = self.clone();
            let mint = mint.to_owned();
            async move {
                let page = client
                    .token_trades(&mint, limit as u32, offset as u32, minimum_size)
                    .await?;
                Ok(extract_items(page, LIST_KEYS))
            }
        })
        .await
    }

    /// Issues one logical GET request with retry, rate-limit and timeout
    /// handling, returning the parsed JSON body.
    ///
    /// Attempts are strictly sequential; at most `max_retries` retries are
    /// made after the initial attempt. HTTP 429 waits for the server's
    /// `Retry-After` seconds when present, otherwise the configured base
    /// delay. Transport failures (connect, DNS, reset, timeout) back off
    /// exponentially with a 30 s ceiling. Other non-success statuses and
    /// unparseable bodies fail immediately.
    pub async fn get(&self, path: &str, query: &Query) -> Result<Value> {
        let url = join_url(&self.base_url, path);
        let mut attempt = 0usize;

        loop {
            match self.attempt(&url, query).await {
                Ok((status, headers, body)) => {
                    self.trace_attempt(attempt, &url, Some(status), &headers);

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after_secs = parse_retry_after(&headers);
                        if attempt < self.options.max_retries {
                            let delay_ms = retry_after_secs
                                .map(|secs| secs.saturating_mul(1_000))
                                .unwrap_or(self.options.retry_delay_ms);
                            sleep(Duration::from_millis(delay_ms)).await;
                            attempt += 1;
                            continue;
                        }
                        return Err(PumpFunError::RateLimited {
                            retry_after_secs,
                            attempts: attempt + 1,
                        });
                    }

                    if !status.is_success() {
                        return Err(PumpFunError::Api {
                            status: status.as_u16(),
                            body: parse_body_lenient(&body),
                            headers,
                        });
                    }

                    if body.trim().is_empty() {
                        return Ok(Value::Object(Map::new()));
                    }

                    return serde_json::from_str::<Value>(&body).map_err(|_| {
                        PumpFunError::Malformed {
                            snippet: body.chars().take(SNIPPET_LEN).collect(),
                        }
                    });
                }
                Err(err) => {
                    self.trace_attempt(attempt, &url, None, &[]);

                    if should_retry_transport(&err) && attempt < self.options.max_retries {
                        let delay_ms = backoff_delay_ms(self.options.retry_delay_ms, attempt);
                        sleep(Duration::from_millis(delay_ms)).await;
                        attempt += 1;
                        continue;
                    }
                    if err.is_timeout() {
                        return Err(PumpFunError::Timeout {
                            attempts: attempt + 1,
                        });
                    }
                    return Err(PumpFunError::Transport(err));
                }
            }
        }
    }

    /// One physical attempt: send plus full body read. A failure in either
    /// half counts as a transport failure for retry purposes.
    async fn attempt(
        &self,
        url: &str,
        query: &Query,
    ) -> std::result::Result<(StatusCode, Vec<(String, String)>, String), reqwest::Error> {
        let mut request = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::USER_AGENT, USER_AGENT)
            .timeout(Duration::from_millis(self.options.timeout_ms));

        if !query.is_empty() {
            request = request.query(&query.to_pairs());
        }
        if let Some(authorization) = &self.authorization {
            request = request.header(header::AUTHORIZATION, authorization);
        }

        let response = request.send().await?;
        let status = response.status();
        let headers = header_pairs(response.headers());
        let body = response.text().await?;
        Ok((status, headers, body))
    }

    #[allow(unused_variables)]
    fn trace_attempt(
        &self,
        attempt: usize,
        url: &str,
        status: Option<StatusCode>,
        headers: &[(String, String)],
    ) {
        #[cfg(feature = "tracing")]
        if self.options.debug {
            match status {
                Some(status) => tracing::debug!(
                    attempt,
                    method = "GET",
                    url,
                    status = status.as_u16(),
                    ?headers,
                    "request attempt completed"
                ),
                None => tracing::debug!(attempt, method = "GET", url, "request attempt failed"),
            }
        }
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Transient transport failures worth retrying: timeouts, connect and DNS
/// errors, mid-request and body-read failures. Builder and redirect errors
/// are permanent.
fn should_retry_transport(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
}

/// Exponential backoff delay for transport retries: `base * 2^attempt`,
/// capped at [`MAX_BACKOFF_MS`].
fn backoff_delay_ms(base_ms: u64, attempt: usize) -> u64 {
    let exp = attempt.min(16) as u32;
    let multiplier = 1u64 << exp;
    base_ms.saturating_mul(multiplier).min(MAX_BACKOFF_MS)
}

fn header_pairs(headers: &header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                value.to_str().unwrap_or_default().to_owned(),
            )
        })
        .collect()
}

/// Reads the `Retry-After` response header as whole seconds. HTTP-date
/// variants are ignored, the caller falls back to the configured delay.
fn parse_retry_after(headers: &[(String, String)]) -> Option<u64> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("retry-after"))
        .and_then(|(_, value)| value.trim().parse::<u64>().ok())
}

/// Error bodies are kept as parsed JSON when possible, raw text otherwise.
fn parse_body_lenient(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}

fn normalize_bearer_authorization(key: &str) -> String {
    let trimmed = key.trim();
    let prefix = trimmed.get(..7);
    if prefix.is_some_and(|value| value.eq_ignore_ascii_case("bearer ")) {
        trimmed.to_owned()
    } else {
        format!("Bearer {trimmed}")
    }
}
