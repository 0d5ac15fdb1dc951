//! Recent Activity Feed
//!
//! Merges the independently-fetched lost and found streams into one
//! bounded, time-ordered feed. Both inputs are small; this is a wholesale
//! sort, not a k-way merge of pre-sorted streams.

use log::warn;

use crate::domain::{DomainResult, Item, ItemFilter, KindFilter};
use crate::repository::ItemQuery;

/// How many entries the recent-activity view shows
pub const RECENT_FEED_CAP: usize = 6;

/// Combine two item collections into one ranked feed.
///
/// Pure: sorts descending by `created_at`, breaks ties by `id` ascending,
/// truncates to `cap`. Source order never affects the output.
pub fn merge_recent(lost: Vec<Item>, found: Vec<Item>, cap: usize) -> Vec<Item> {
    let mut merged = lost;
    merged.extend(found);
    merged.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
    merged.truncate(cap);
    merged
}

/// Fetch both streams concurrently and merge them.
///
/// One failing stream does not abort the feed; the survivor renders alone.
/// Only when both fetches fail does the caller see an error.
pub async fn recent_feed<Q: ItemQuery + ?Sized>(repo: &Q, cap: usize) -> DomainResult<Vec<Item>> {
    let lost_filter = ItemFilter::for_kind(KindFilter::Lost);
    let found_filter = ItemFilter::for_kind(KindFilter::Found);
    let (lost, found) = tokio::join!(repo.query(&lost_filter), repo.query(&found_filter));

    match (lost, found) {
        (Ok(lost), Ok(found)) => Ok(merge_recent(lost.items, found.items, cap)),
        (Ok(lost), Err(e)) => {
            warn!("found stream failed, feeding lost only: {}", e);
            Ok(merge_recent(lost.items, Vec::new(), cap))
        }
        (Err(e), Ok(found)) => {
            warn!("lost stream failed, feeding found only: {}", e);
            Ok(merge_recent(Vec::new(), found.items, cap))
        }
        (Err(e), Err(_)) => Err(e),
    }
}
