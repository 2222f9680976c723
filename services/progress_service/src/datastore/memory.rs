//! Process-local datastore, used for development runs and tests.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DatastoreError, ReadConsistency};
use crate::catalog::{CatalogRepository, Chapter, ChapterKey, Course, Material, Module, User, UserLookup};
use crate::history::{HistoryEntry, HistoryRepository};
use crate::recognition::{CreateRecognitionError, Recognition, RecognitionsRepository};

/// Every read is strongly consistent, so [`ReadConsistency`] is accepted and ignored.
#[derive(Debug, Default)]
pub struct MemoryDatastore {
    courses: RwLock<HashMap<Uuid, Course>>,
    chapters: RwLock<BTreeMap<ChapterKey, Chapter>>,
    users: RwLock<HashMap<Uuid, User>>,
    materials: RwLock<HashMap<Uuid, Material>>,
    modules: RwLock<HashMap<Uuid, Module>>,
    history: RwLock<Vec<HistoryEntry>>,
    recognitions: RwLock<HashMap<(Uuid, Uuid), Recognition>>,
}

impl MemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for MemoryDatastore {
    async fn find_course(&self, course_id: &Uuid) -> Result<Option<Course>, DatastoreError> {
        Ok(self.courses.read().await.get(course_id).cloned())
    }

    async fn find_chapter(&self, key: &ChapterKey) -> Result<Option<Chapter>, DatastoreError> {
        Ok(self.chapters.read().await.get(key).cloned())
    }

    async fn list_chapters(&self, course_id: &Uuid) -> Result<Vec<Chapter>, DatastoreError> {
        let chapters = self.chapters.read().await;
        let range = ChapterKey::new(*course_id, i32::MIN)..=ChapterKey::new(*course_id, i32::MAX);

        Ok(chapters.range(range).map(|(_, chapter)| chapter.clone()).collect())
    }

    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>, DatastoreError> {
        let users = self.users.read().await;
        let user = match lookup {
            UserLookup::ById(user_id) => users.get(user_id),
            UserLookup::ByEmail(email) => users.values().find(|u| &u.email == email),
        };

        Ok(user.cloned())
    }

    async fn find_material(&self, material_id: &Uuid) -> Result<Option<Material>, DatastoreError> {
        Ok(self.materials.read().await.get(material_id).cloned())
    }

    async fn find_module(&self, module_id: &Uuid) -> Result<Option<Module>, DatastoreError> {
        Ok(self.modules.read().await.get(module_id).cloned())
    }

    async fn put_course(&self, course: &Course) -> Result<(), DatastoreError> {
        self.courses.write().await.insert(course.course_id, course.clone());
        Ok(())
    }

    async fn put_chapter(&self, chapter: &Chapter) -> Result<(), DatastoreError> {
        self.chapters.write().await.insert(chapter.key, chapter.clone());
        Ok(())
    }

    async fn put_user(&self, user: &User) -> Result<(), DatastoreError> {
        self.users.write().await.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn put_material(&self, material: &Material) -> Result<(), DatastoreError> {
        self.materials.write().await.insert(material.material_id, material.clone());
        Ok(())
    }

    async fn put_module(&self, module: &Module) -> Result<(), DatastoreError> {
        self.modules.write().await.insert(module.module_id, module.clone());
        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for MemoryDatastore {
    async fn append_entry(&self, entry: &HistoryEntry) -> Result<(), DatastoreError> {
        self.history.write().await.push(entry.clone());
        Ok(())
    }

    async fn list_entries(&self, user_id: &Uuid) -> Result<Vec<HistoryEntry>, DatastoreError> {
        let history = self.history.read().await;

        Ok(history.iter().filter(|e| &e.user_id == user_id).cloned().collect())
    }

    async fn list_course_entries(&self, user_id: &Uuid, course_id: &Uuid) -> Result<Vec<HistoryEntry>, DatastoreError> {
        let history = self.history.read().await;

        Ok(history
            .iter()
            .filter(|e| &e.user_id == user_id && &e.chapter.course_id == course_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RecognitionsRepository for MemoryDatastore {
    async fn find_recognition(
        &self,
        user_id: &Uuid,
        course_id: &Uuid,
        _consistency: ReadConsistency,
    ) -> Result<Option<Recognition>, DatastoreError> {
        Ok(self.recognitions.read().await.get(&(*user_id, *course_id)).cloned())
    }

    async fn create_recognition(&self, recognition: &Recognition) -> Result<(), CreateRecognitionError> {
        // The check and the insert happen under one write guard.
        let mut recognitions = self.recognitions.write().await;
        let key = (recognition.user_id, recognition.course_id);
        if recognitions.contains_key(&key) {
            return Err(CreateRecognitionError::DuplicateRecognition);
        }

        recognitions.insert(key, recognition.clone());
        Ok(())
    }

    async fn list_recognitions(&self, user_id: &Uuid) -> Result<Vec<Recognition>, DatastoreError> {
        let recognitions = self.recognitions.read().await;

        Ok(recognitions
            .values()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(course_id: Uuid, order: i32) -> Chapter {
        Chapter::builder()
            .key(ChapterKey::new(course_id, order))
            .name(format!("Chapter {}", order))
            .creator_id(Uuid::nil())
            .build()
    }

    #[tokio::test]
    async fn lists_only_the_chapters_of_the_course_in_order() {
        let store = MemoryDatastore::new();
        let course_id = Uuid::from_u128(2);
        for (course, order) in [(course_id, 3), (Uuid::from_u128(1), 1), (course_id, -1), (Uuid::from_u128(3), 2), (course_id, 2)] {
            store.put_chapter(&chapter(course, order)).await.unwrap();
        }

        let orders: Vec<i32> = store
            .list_chapters(&course_id)
            .await
            .unwrap()
            .iter()
            .map(|c| c.key.order)
            .collect();

        assert_eq!(orders, vec![-1, 2, 3]);
    }

    #[tokio::test]
    async fn finds_users_by_id_and_email() {
        let store = MemoryDatastore::new();
        let user = User::builder().email("ada@example.com").name("Ada").build();
        store.put_user(&user).await.unwrap();

        let by_id = store.find_user(&UserLookup::ById(user.user_id)).await.unwrap();
        let by_email = store
            .find_user(&UserLookup::ByEmail("ada@example.com".to_string()))
            .await
            .unwrap();
        let missing = store
            .find_user(&UserLookup::ByEmail("bob@example.com".to_string()))
            .await
            .unwrap();

        assert_eq!(by_id.as_ref(), Some(&user));
        assert_eq!(by_email.as_ref(), Some(&user));
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn second_recognition_for_the_same_pair_is_rejected() {
        let store = MemoryDatastore::new();
        let first = Recognition::issue(Uuid::from_u128(1), Uuid::from_u128(2));
        let second = Recognition::issue(Uuid::from_u128(1), Uuid::from_u128(2));

        store.create_recognition(&first).await.unwrap();
        let err = store.create_recognition(&second).await.unwrap_err();

        assert!(matches!(err, CreateRecognitionError::DuplicateRecognition));
        let stored = store
            .find_recognition(&first.user_id, &first.course_id, ReadConsistency::Eventual)
            .await
            .unwrap();
        assert_eq!(stored, Some(first));
    }
}
