use uuid::Uuid;

use crate::catalog::{add_chapter, CatalogRepository, Chapter, ChapterKey, Course, Role, User, UserLookup};
use crate::datastore::MemoryDatastore;

/// An in-memory store holding an admin, a learner and one course.
pub struct Fixture {
    pub store: MemoryDatastore,
    pub admin: User,
    pub learner: User,
    pub course: Course,
}

impl Fixture {
    /// The course gets `chapters` chapters, ordered from 1.
    pub async fn with_course_of(chapters: i32) -> Self {
        let store = MemoryDatastore::new();
        let admin = User::builder()
            .email("admin@example.com")
            .name("Admin")
            .role(Role::Admin)
            .build();
        let learner = User::builder().email("learner@example.com").name("Learner").build();
        store.put_user(&admin).await.unwrap();
        store.put_user(&learner).await.unwrap();

        let course = create_course(&store, admin.user_id, chapters).await;

        Fixture {
            store,
            admin,
            learner,
            course,
        }
    }

    pub async fn add_course(&self, chapters: i32) -> Course {
        create_course(&self.store, self.admin.user_id, chapters).await
    }

    pub fn learner_lookup(&self) -> UserLookup {
        UserLookup::ById(self.learner.user_id)
    }
}

async fn create_course(store: &MemoryDatastore, creator_id: Uuid, chapters: i32) -> Course {
    let course = Course::builder()
        .name("Rust for services")
        .duration_minutes(90)
        .creator_id(creator_id)
        .build();
    store.put_course(&course).await.unwrap();

    for order in 1..=chapters {
        let chapter = Chapter::builder()
            .key(ChapterKey::new(course.course_id, order))
            .name(format!("Chapter {}", order))
            .creator_id(creator_id)
            .build();
        add_chapter(store, &chapter).await.unwrap();
    }

    course
}
