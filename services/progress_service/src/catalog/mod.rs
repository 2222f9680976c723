pub mod ddb_repository;
pub mod repository;
pub mod types;

pub use repository::CatalogRepository;
pub use types::{Chapter, ChapterKey, Course, Material, MaterialType, Module, Role, User, UserLookup};

use crate::error::ProgressError;

pub async fn require_user(catalog: &impl CatalogRepository, lookup: &UserLookup) -> Result<User, ProgressError> {
    catalog
        .find_user(lookup)
        .await?
        .ok_or_else(|| ProgressError::UserNotFound(lookup.clone()))
}

/// Stores a chapter under its course. A chapter cannot exist without the course owning it.
pub async fn add_chapter(catalog: &impl CatalogRepository, chapter: &Chapter) -> Result<(), ProgressError> {
    let course_id = chapter.key.course_id;
    if catalog.find_course(&course_id).await?.is_none() {
        return Err(ProgressError::CourseNotFound(course_id));
    }

    catalog.put_chapter(chapter).await?;
    Ok(())
}
