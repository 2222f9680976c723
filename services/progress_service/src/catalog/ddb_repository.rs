use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::model::AttributeValue;
use common_macros::hash_map;
use service_core::ddb::item::from_item;
use service_core::ddb::query::QueryInput;
use service_core::simple_err_map;
use uuid::Uuid;

use super::repository::CatalogRepository;
use super::types::{Chapter, ChapterKey, Course, Material, Module, User, UserLookup};
use crate::datastore::ddb::{uuid_attr, DdbDatastore, ThreadSafeDdbClient, PAGE_SIZE};
use crate::datastore::{DatastoreError, ReadConsistency};

const EMAIL_INDEX: &str = "EmailIndex";

fn id_key(attr: &str, id: &Uuid) -> HashMap<String, AttributeValue> {
    hash_map! {
        attr.to_string() => uuid_attr(id),
    }
}

fn chapter_key(key: &ChapterKey) -> HashMap<String, AttributeValue> {
    hash_map! {
        "CourseId".to_string() => uuid_attr(&key.course_id),
        "ChapterOrder".to_string() => AttributeValue::N(key.order.to_string()),
    }
}

impl<T: ThreadSafeDdbClient> DdbDatastore<T> {
    /// Users are keyed by id; the email lookup goes through the `EmailIndex` global secondary
    /// index, which projects every attribute.
    async fn user_by_email(&self, email: &str) -> Result<Option<User>, DatastoreError> {
        let query_input = QueryInput::builder()
            .table_name(self.tables.users.as_str())
            .index_name(EMAIL_INDEX)
            .key_condition_expression("Email = :email")
            .expression_attribute_values(Some(hash_map! {
                ":email".to_string() => AttributeValue::S(email.to_owned()),
            }))
            .limit(1)
            .build();
        let output = self
            .ddb
            .query(query_input)
            .await
            .map_err(simple_err_map!(DatastoreError::request, "Querying users by email failed."))?;

        match output.items.and_then(|mut items| items.pop()) {
            None => Ok(None),
            Some(item) => Ok(Some(from_item(item)?)),
        }
    }
}

#[async_trait]
impl<T: ThreadSafeDdbClient> CatalogRepository for DdbDatastore<T> {
    async fn find_course(&self, course_id: &Uuid) -> Result<Option<Course>, DatastoreError> {
        self.get(&self.tables.courses, id_key("CourseId", course_id), ReadConsistency::Eventual)
            .await
    }

    async fn find_chapter(&self, key: &ChapterKey) -> Result<Option<Chapter>, DatastoreError> {
        self.get(&self.tables.chapters, chapter_key(key), ReadConsistency::Eventual)
            .await
    }

    async fn list_chapters(&self, course_id: &Uuid) -> Result<Vec<Chapter>, DatastoreError> {
        let query_input = QueryInput::builder()
            .table_name(self.tables.chapters.as_str())
            .key_condition_expression("CourseId = :course")
            .expression_attribute_values(Some(hash_map! {
                ":course".to_string() => uuid_attr(course_id),
            }))
            .limit(PAGE_SIZE)
            .build();

        // The range key keeps chapters sorted by order.
        self.query(query_input).await
    }

    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>, DatastoreError> {
        match lookup {
            UserLookup::ById(user_id) => {
                self.get(&self.tables.users, id_key("UserId", user_id), ReadConsistency::Eventual)
                    .await
            }
            UserLookup::ByEmail(email) => self.user_by_email(email).await,
        }
    }

    async fn find_material(&self, material_id: &Uuid) -> Result<Option<Material>, DatastoreError> {
        self.get(&self.tables.materials, id_key("MaterialId", material_id), ReadConsistency::Eventual)
            .await
    }

    async fn find_module(&self, module_id: &Uuid) -> Result<Option<Module>, DatastoreError> {
        self.get(&self.tables.modules, id_key("ModuleId", module_id), ReadConsistency::Eventual)
            .await
    }

    async fn put_course(&self, course: &Course) -> Result<(), DatastoreError> {
        self.put(&self.tables.courses, course).await
    }

    async fn put_chapter(&self, chapter: &Chapter) -> Result<(), DatastoreError> {
        self.put(&self.tables.chapters, chapter).await
    }

    async fn put_user(&self, user: &User) -> Result<(), DatastoreError> {
        self.put(&self.tables.users, user).await
    }

    async fn put_material(&self, material: &Material) -> Result<(), DatastoreError> {
        self.put(&self.tables.materials, material).await
    }

    async fn put_module(&self, module: &Module) -> Result<(), DatastoreError> {
        self.put(&self.tables.modules, module).await
    }
}
