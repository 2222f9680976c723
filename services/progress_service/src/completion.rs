//! Course completion, derived from the history ledger.
//!
//! A course is complete for a user when every chapter currently in the course has at least one
//! history entry from that user. Repeated entries for one chapter count once, entries for chapters
//! no longer in the course are ignored, and a course without chapters is never complete.

use std::collections::{BTreeSet, HashSet};

use uuid::Uuid;

use crate::catalog::CatalogRepository;
use crate::datastore::DatastoreError;
use crate::history::{HistoryEntry, HistoryRepository};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CourseProgress {
    pub total_chapters: usize,
    /// Chapters of the course with at least one entry.
    pub seen_chapters: usize,
}

impl CourseProgress {
    pub fn of(chapter_orders: impl IntoIterator<Item = i32>, entries: &[HistoryEntry]) -> Self {
        let chapters: BTreeSet<i32> = chapter_orders.into_iter().collect();
        let seen: HashSet<i32> = entries.iter().map(|e| e.chapter.order).collect();

        CourseProgress {
            total_chapters: chapters.len(),
            seen_chapters: chapters.iter().filter(|order| seen.contains(order)).count(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total_chapters > 0 && self.seen_chapters >= self.total_chapters
    }
}

/// Reads the chapters of the course and the user's entries for it. No snapshot spans both reads,
/// so an entry appended concurrently may or may not be observed.
pub async fn evaluate(
    store: &(impl CatalogRepository + HistoryRepository),
    user_id: &Uuid,
    course_id: &Uuid,
) -> Result<CourseProgress, DatastoreError> {
    let chapters = store.list_chapters(course_id).await?;
    let entries = store.list_course_entries(user_id, course_id).await?;

    Ok(CourseProgress::of(chapters.iter().map(|c| c.key.order), &entries))
}

pub async fn is_complete(
    store: &(impl CatalogRepository + HistoryRepository),
    user_id: &Uuid,
    course_id: &Uuid,
) -> Result<bool, DatastoreError> {
    Ok(evaluate(store, user_id, course_id).await?.is_complete())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::catalog::ChapterKey;
    use crate::history::ledger::record_seen;
    use crate::testing::Fixture;

    fn entries(course_id: Uuid, orders: &[i32]) -> Vec<HistoryEntry> {
        orders
            .iter()
            .map(|order| HistoryEntry::open(Uuid::nil(), ChapterKey::new(course_id, *order)))
            .collect()
    }

    #[rstest]
    #[case(&[], &[], false)]
    #[case(&[], &[1, 2], false)]
    #[case(&[1, 2, 3], &[1, 2], false)]
    #[case(&[1, 2, 3], &[3, 1, 2], true)]
    #[case(&[1, 2, 3], &[1, 1, 1], false)]
    #[case(&[1, 2, 3], &[1, 1, 2, 3, 3], true)]
    #[case(&[1, 2], &[1, 9], false)]
    #[case(&[1, 2], &[1, 2, 9], true)]
    fn completion_covers_the_exact_chapter_set(
        #[case] chapters: &[i32],
        #[case] seen: &[i32],
        #[case] complete: bool,
    ) {
        let progress = CourseProgress::of(chapters.iter().copied(), &entries(Uuid::nil(), seen));

        assert_eq!(progress.is_complete(), complete);
    }

    #[test]
    fn counts_distinct_chapters_of_the_course() {
        let progress = CourseProgress::of([1, 2, 3, 4], &entries(Uuid::nil(), &[2, 2, 4, 7]));

        assert_eq!(
            progress,
            CourseProgress {
                total_chapters: 4,
                seen_chapters: 2
            }
        );
    }

    #[tokio::test]
    async fn empty_course_is_never_complete() {
        let fixture = Fixture::with_course_of(0).await;
        let user_id = fixture.learner.user_id;
        let course_id = fixture.course.course_id;
        for entry in entries(course_id, &[1, 2]) {
            let entry = HistoryEntry { user_id, ..entry };
            fixture.store.append_entry(&entry).await.unwrap();
        }

        assert!(!is_complete(&fixture.store, &user_id, &course_id).await.unwrap());
    }

    #[tokio::test]
    async fn last_chapter_completes_the_course() {
        let fixture = Fixture::with_course_of(4).await;
        let learner = fixture.learner_lookup();
        let user_id = fixture.learner.user_id;
        let course_id = fixture.course.course_id;

        for order in [1, 2, 3] {
            record_seen(&fixture.store, &learner, course_id, order).await.unwrap();
        }
        record_seen(&fixture.store, &learner, course_id, 3).await.unwrap();
        assert!(!is_complete(&fixture.store, &user_id, &course_id).await.unwrap());

        record_seen(&fixture.store, &learner, course_id, 4).await.unwrap();
        assert!(is_complete(&fixture.store, &user_id, &course_id).await.unwrap());

        record_seen(&fixture.store, &learner, course_id, 4).await.unwrap();
        assert!(is_complete(&fixture.store, &user_id, &course_id).await.unwrap());
    }

    #[tokio::test]
    async fn progress_in_one_course_does_not_count_for_another() {
        let fixture = Fixture::with_course_of(2).await;
        let other = fixture.add_course(2).await;
        let learner = fixture.learner_lookup();

        for order in [1, 2] {
            record_seen(&fixture.store, &learner, other.course_id, order).await.unwrap();
        }

        let progress = evaluate(&fixture.store, &fixture.learner.user_id, &fixture.course.course_id)
            .await
            .unwrap();
        assert_eq!(progress.seen_chapters, 0);
        assert!(is_complete(&fixture.store, &fixture.learner.user_id, &other.course_id)
            .await
            .unwrap());
    }
}
