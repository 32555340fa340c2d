//! `pumpfun-http` is an async HTTP client for the Pump.fun REST API.
//!
//! The crate wraps the token/trade/wallet endpoints with ergonomic methods:
//! - [`PumpFunClient::search_coins`]
//! - [`PumpFunClient::latest_trades`] / [`PumpFunClient::latest_coins`]
//! - [`PumpFunClient::token_trades`] / [`PumpFunClient::all_token_trades`]
//! - [`PumpFunClient::wallet_holdings`] / [`PumpFunClient::wallet_created_coins`]
//!
//! Every call goes through one resilient request core with per-attempt
//! timeouts, exponential backoff on transport failures and `Retry-After`
//! aware waits on HTTP 429.

mod client;
mod decode;
mod error;
mod options;
mod paginate;
mod query;

pub use client::{PumpFunClient, SearchOptions, DEFAULT_BASE_URL};
pub use decode::{extract_items, LIST_KEYS};
pub use error::PumpFunError;
pub use options::ClientOptions;
pub use paginate::{collect_pages, PAGE_DELAY_MS};
pub use query::{Query, Scalar};

pub type Result<T> = std::result::Result<T, PumpFunError>;
