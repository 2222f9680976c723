//! Recording and reading chapter consumption.

use uuid::Uuid;

use super::{HistoryEntry, HistoryRepository};
use crate::catalog::{require_user, CatalogRepository, ChapterKey, UserLookup};
use crate::error::ProgressError;
use crate::resolver::resolve_chapter;

/// Appends an open entry for the chapter at `order` in `course_id`.
///
/// Nothing is deduplicated: every call is a visit and appends its own entry.
#[tracing::instrument(skip(store))]
pub async fn record_seen(
    store: &(impl CatalogRepository + HistoryRepository),
    user: &UserLookup,
    course_id: Uuid,
    order: i32,
) -> Result<HistoryEntry, ProgressError> {
    let user = require_user(store, user).await?;
    let chapter = resolve_chapter(store, ChapterKey::new(course_id, order)).await?;

    let entry = HistoryEntry::open(user.user_id, chapter.key);
    store.append_entry(&entry).await?;
    tracing::debug!(entry_id = %entry.entry_id, user_id = %user.user_id, "Chapter recorded as seen.");

    Ok(entry)
}

/// Every entry of a user, oldest first.
#[tracing::instrument(skip(store))]
pub async fn user_history(
    store: &(impl CatalogRepository + HistoryRepository),
    user_id: Uuid,
) -> Result<Vec<HistoryEntry>, ProgressError> {
    require_user(store, &UserLookup::ById(user_id)).await?;

    let mut entries = store.list_entries(&user_id).await?;
    entries.sort_by_key(|e| (e.started_at, e.entry_id));
    Ok(entries)
}
