//! Resolution of chapters by their course-scoped identity.

use crate::catalog::{CatalogRepository, Chapter, ChapterKey};
use crate::error::ProgressError;

/// Finds the chapter stored under `key`.
///
/// A missing course yields [`ProgressError::CourseNotFound`]; a missing chapter within an existing
/// course yields [`ProgressError::ChapterNotFound`].
pub async fn resolve_chapter(catalog: &impl CatalogRepository, key: ChapterKey) -> Result<Chapter, ProgressError> {
    if let Some(chapter) = catalog.find_chapter(&key).await? {
        return Ok(chapter);
    }

    match catalog.find_course(&key.course_id).await? {
        None => Err(ProgressError::CourseNotFound(key.course_id)),
        Some(_) => Err(ProgressError::ChapterNotFound(key)),
    }
}
