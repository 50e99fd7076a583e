//! Cursor-driven page draining
//!
//! Paginated endpoints answer `{"<items key>": [...], "paginationToken": ...}`. The
//! next page is the same endpoint with the cursor added to the query. There is no
//! page cap: the loop ends only when the API stops returning a cursor.

use crate::error::GeoError;
use crate::transport::Transport;
use geoguessr_models::convert::to_str;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

const CURSOR_KEY: &str = "paginationToken";

/// Concatenate the items of `first_page` and of every page after it, in order
///
/// `next_url` builds the URL of the page following a cursor. A cursor that is
/// null, absent or empty marks the last page; a page without `items_key` counts as
/// empty.
///
/// # Errors
///
/// Fails on the first follow-up page that cannot be fetched, answers a non-2xx
/// status or is not JSON.
pub async fn drain_pages<T, F>(
    transport: &T,
    first_page: Value,
    items_key: &str,
    mut next_url: F,
) -> Result<Vec<Value>, GeoError>
where
    T: Transport + ?Sized,
    F: FnMut(&str) -> Result<Url, GeoError>,
{
    let mut items = Vec::new();
    let mut page = first_page;
    let mut pages = 1usize;

    loop {
        take_items(&mut page, items_key, &mut items);
        let Some(cursor) = next_cursor(&page) else {
            break;
        };

        let url = next_url(&cursor)?;
        debug!(page = pages + 1, items = items.len(), "fetching next page");
        page = transport.get(url).await?.error_for_status()?.json()?;
        pages += 1;
    }

    debug!(pages, items = items.len(), "pagination finished");
    Ok(items)
}

fn take_items(page: &mut Value, items_key: &str, into: &mut Vec<Value>) {
    if let Some(Value::Array(page_items)) = page.get_mut(items_key) {
        into.append(page_items);
    }
}

fn next_cursor(page: &Value) -> Option<String> {
    to_str(&page[CURSOR_KEY]).filter(|cursor| !cursor.is_empty())
}
