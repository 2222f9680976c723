use async_trait::async_trait;
use uuid::Uuid;

use super::types::{Chapter, ChapterKey, Course, Material, Module, User, UserLookup};
use crate::datastore::DatastoreError;

/// Courses, chapters, materials, modules and users.
///
/// Lookups return `Ok(None)` when the record does not exist, so callers decide which not-found
/// error applies. Writes overwrite any record stored under the same key.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn find_course(&self, course_id: &Uuid) -> Result<Option<Course>, DatastoreError>;

    async fn find_chapter(&self, key: &ChapterKey) -> Result<Option<Chapter>, DatastoreError>;

    /// All chapters of a course, ordered by chapter order.
    async fn list_chapters(&self, course_id: &Uuid) -> Result<Vec<Chapter>, DatastoreError>;

    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>, DatastoreError>;

    async fn find_material(&self, material_id: &Uuid) -> Result<Option<Material>, DatastoreError>;

    async fn find_module(&self, module_id: &Uuid) -> Result<Option<Module>, DatastoreError>;

    async fn put_course(&self, course: &Course) -> Result<(), DatastoreError>;

    /// Prefer [`add_chapter`](super::add_chapter), which refuses chapters of unknown courses.
    async fn put_chapter(&self, chapter: &Chapter) -> Result<(), DatastoreError>;

    async fn put_user(&self, user: &User) -> Result<(), DatastoreError>;

    async fn put_material(&self, material: &Material) -> Result<(), DatastoreError>;

    async fn put_module(&self, module: &Module) -> Result<(), DatastoreError>;
}
