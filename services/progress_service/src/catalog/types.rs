use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use uuid::Uuid;

/// Identity of a chapter. The order is only unique within its course, so the two halves are never
/// used apart.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "PascalCase")]
pub struct ChapterKey {
    pub course_id: Uuid,
    #[serde(rename = "ChapterOrder")]
    pub order: i32,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, TypedBuilder)]
#[serde(rename_all = "PascalCase")]
pub struct Course {
    #[builder(default = Uuid::new_v4())]
    pub course_id: Uuid,

    #[builder(setter(into))]
    pub name: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub description: String,

    #[builder(default)]
    pub duration_minutes: u32,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub external_url: String,

    pub creator_id: Uuid,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, TypedBuilder)]
#[serde(rename_all = "PascalCase")]
pub struct Chapter {
    #[serde(flatten)]
    pub key: ChapterKey,

    #[builder(setter(into))]
    pub name: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub description: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub content: String,

    pub creator_id: Uuid,

    #[serde(default)]
    #[builder(default)]
    pub material_ids: BTreeSet<Uuid>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialType {
    Video,
    Document,
    Test,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, TypedBuilder)]
#[serde(rename_all = "PascalCase")]
pub struct Material {
    #[builder(default = Uuid::new_v4())]
    pub material_id: Uuid,

    #[builder(setter(into))]
    pub name: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub description: String,

    pub material_type: MaterialType,

    #[builder(setter(into))]
    pub url: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, TypedBuilder)]
#[serde(rename_all = "PascalCase")]
pub struct Module {
    #[builder(default = Uuid::new_v4())]
    pub module_id: Uuid,

    #[builder(setter(into))]
    pub name: String,

    #[serde(default)]
    #[builder(default, setter(into))]
    pub description: String,

    pub creator_id: Uuid,

    #[serde(default)]
    #[builder(default)]
    pub course_ids: BTreeSet<Uuid>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Admin,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, TypedBuilder)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    #[builder(default = Uuid::new_v4())]
    pub user_id: Uuid,

    /// Login identity, unique across users.
    #[builder(setter(into))]
    pub email: String,

    #[builder(setter(into))]
    pub name: String,

    #[builder(default = Role::User)]
    pub role: Role,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserLookup {
    ById(Uuid),
    ByEmail(String),
}

impl ChapterKey {
    pub fn new(course_id: Uuid, order: i32) -> Self {
        ChapterKey { course_id, order }
    }
}

impl Display for ChapterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.course_id, self.order)
    }
}

impl Display for UserLookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            UserLookup::ById(id) => write!(f, "{}", id),
            UserLookup::ByEmail(email) => write!(f, "<{}>", email),
        }
    }
}
