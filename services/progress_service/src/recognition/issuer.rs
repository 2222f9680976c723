//! Issuance of completion recognitions.
//!
//! A recognition is issued at most once per user and course. The store rejects a second insert
//! for the same pair, and a caller that loses that race re-reads and returns the winner's row.
//! Recognitions are materialised lazily: [`list_all`] backfills them for every course the user has
//! history in, so nothing has to be written when the last chapter is recorded.

use std::collections::BTreeSet;

use uuid::Uuid;

use super::{CreateRecognitionError, Recognition, RecognitionsRepository};
use crate::catalog::{require_user, CatalogRepository, UserLookup};
use crate::completion;
use crate::datastore::{DatastoreError, ReadConsistency};
use crate::error::ProgressError;
use crate::history::HistoryRepository;

/// Returns the recognition of `user_id` for `course_id`, creating it if the course is complete.
#[tracing::instrument(skip(store))]
pub async fn get_or_create(
    store: &(impl CatalogRepository + HistoryRepository + RecognitionsRepository),
    user_id: Uuid,
    course_id: Uuid,
) -> Result<Recognition, ProgressError> {
    require_user(store, &UserLookup::ById(user_id)).await?;
    if store.find_course(&course_id).await?.is_none() {
        return Err(ProgressError::CourseNotFound(course_id));
    }

    issue_for_known(store, user_id, course_id).await
}

/// Stored recognitions of the user, plus one for every course with history that is now complete.
#[tracing::instrument(skip(store))]
pub async fn list_all(
    store: &(impl CatalogRepository + HistoryRepository + RecognitionsRepository),
    user_id: Uuid,
) -> Result<Vec<Recognition>, ProgressError> {
    require_user(store, &UserLookup::ById(user_id)).await?;

    let mut recognitions = store.list_recognitions(&user_id).await?;
    let recognized: BTreeSet<Uuid> = recognitions.iter().map(|r| r.course_id).collect();
    let with_history: BTreeSet<Uuid> = store
        .list_entries(&user_id)
        .await?
        .iter()
        .map(|e| e.chapter.course_id)
        .collect();

    for course_id in with_history.difference(&recognized) {
        match issue_for_known(store, user_id, *course_id).await {
            Ok(recognition) => recognitions.push(recognition),
            Err(ProgressError::CourseNotCompleted { .. }) => {
                tracing::debug!(%course_id, "Course with history not completed yet.");
            }
            Err(err) => return Err(err),
        }
    }

    recognitions.sort_by_key(|r| (r.created_at, r.course_id));
    Ok(recognitions)
}

/// Steps after the existence checks. The user is known to exist; the course may have been
/// deleted since its entries were written, in which case it has no chapters and is incomplete.
async fn issue_for_known(
    store: &(impl CatalogRepository + HistoryRepository + RecognitionsRepository),
    user_id: Uuid,
    course_id: Uuid,
) -> Result<Recognition, ProgressError> {
    if let Some(existing) = store
        .find_recognition(&user_id, &course_id, ReadConsistency::Eventual)
        .await?
    {
        return Ok(existing);
    }

    if !completion::is_complete(store, &user_id, &course_id).await? {
        return Err(ProgressError::CourseNotCompleted { user_id, course_id });
    }

    let recognition = Recognition::issue(user_id, course_id);
    match store.create_recognition(&recognition).await {
        Ok(()) => {
            tracing::info!(recognition_id = %recognition.recognition_id, "Recognition issued.");
            Ok(recognition)
        }
        Err(CreateRecognitionError::DuplicateRecognition) => {
            tracing::debug!("Recognition created concurrently, reading the stored one.");
            store
                .find_recognition(&user_id, &course_id, ReadConsistency::Strong)
                .await?
                .ok_or_else(|| {
                    ProgressError::from(DatastoreError::Inconsistent(format!(
                        "recognition for user {} and course {} rejected as duplicate but not found",
                        user_id, course_id
                    )))
                })
        }
        Err(CreateRecognitionError::Datastore(err)) => Err(err.into()),
    }
}
