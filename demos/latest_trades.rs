//! Prints the most recent trades across all Pump.fun tokens.
//!
//! Run with: `cargo run --example latest_trades`
//!
//! Reads `PUMPFUN_API_KEY` when set; the endpoint also works anonymously.

use anyhow::Context;
use pumpfun_http::{extract_items, PumpFunClient, LIST_KEYS};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let api = PumpFunClient::from_env();

    let body = api
        .latest_trades(5)
        .await
        .context("latest trades request failed")?;

    for trade in extract_items(body, LIST_KEYS) {
        let symbol = trade["symbol"].as_str().unwrap_or("?");
        let sol = trade["sol_amount"].as_i64().unwrap_or(0);
        println!("{symbol}: {sol} lamports");
    }
    Ok(())
}
