//! Offset-based pagination draining.

use std::future::Future;
use std::time::Duration;

use serde_json::Value;
use tokio::time::sleep;

use crate::Result;

/// Courtesy delay between full pages, so a drain does not hammer the API.
pub const PAGE_DELAY_MS: u64 = 500;

/// Drains a paginated endpoint into one materialized vec.
///
/// `fetch(offset, limit)` returns one page of items. Paging stops on an
/// empty page, on a short page (the server ran out of data mid-page), or
/// once `max_items` is reached; the offset advances by the number of items
/// actually returned, not the requested size. After each full-size page a
/// fixed [`PAGE_DELAY_MS`] sleep is inserted before the next fetch.
///
/// No retrying happens at this level; the first fetch error aborts the whole
/// drain and propagates, discarding accumulated items.
pub async fn collect_pages<F, Fut>(
    page_size: usize,
    max_items: Option<usize>,
    mut fetch: F,
) -> Result<Vec<Value>>
where
    F: FnMut(usize, usize) -> Fut,
    Fut: Future<Output = Result<Vec<Value>>>,
{
    let mut items: Vec<Value> = Vec::new();
    let mut offset = 0usize;

    loop {
        let limit = match max_items {
            Some(cap) => page_size.min(cap.saturating_sub(items.len())),
            None => page_size,
        };
        if limit == 0 {
            break;
        }

        let page = fetch(offset, limit).await?;
        if page.is_empty() {
            break;
        }

        let returned = page.len();
        offset += returned;
        items.extend(page);

        if let Some(cap) = max_items {
            if items.len() >= cap {
                items.truncate(cap);
                break;
            }
        }

        // A short page already signals the end of data; only a full page
        // warrants another fetch, throttled to be polite to the API.
        if returned < limit {
            break;
        }
        sleep(Duration::from_millis(PAGE_DELAY_MS)).await;
    }

    Ok(items)
}
