//! Fixed catalog for local runs, written once at startup when `DEMO_DATA` is set.

use std::collections::BTreeSet;

use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::catalog::{
    add_chapter, CatalogRepository, Chapter, ChapterKey, Course, Material, MaterialType, Module, Role, User,
};
use crate::error::ProgressError;

#[derive(Clone, Debug, PartialEq)]
pub struct DemoCatalog {
    pub admin: User,
    pub learner: User,
    pub materials: Vec<Material>,
    pub courses: Vec<Course>,
    pub chapters: Vec<Chapter>,
    pub modules: Vec<Module>,
}

/// Seeds a datastore at most once. The latch belongs to the seeder, so separate seeders seed
/// independently.
#[derive(Debug, Default)]
pub struct DemoSeeder {
    seeded: OnceCell<DemoCatalog>,
}

impl DemoSeeder {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed_once(&self, catalog: &impl CatalogRepository) -> Result<&DemoCatalog, ProgressError> {
        self.seeded
            .get_or_try_init(|| async {
                let demo = DemoCatalog::build();
                demo.write_to(catalog).await?;
                tracing::info!(
                    materials = demo.materials.len(),
                    courses = demo.courses.len(),
                    chapters = demo.chapters.len(),
                    modules = demo.modules.len(),
                    "Demo data written."
                );
                Ok::<_, ProgressError>(demo)
            })
            .await
    }
}

/// Ids are fixed so that seeding a persistent store twice overwrites instead of duplicating.
fn demo_id(n: u128) -> Uuid {
    Uuid::from_u128(0xde30_0000_0000_4000_8000_0000_0000_0000 | n)
}

impl DemoCatalog {
    fn build() -> Self {
        let admin = User::builder()
            .user_id(demo_id(1))
            .email("admin@example.com")
            .name("Demo Admin")
            .role(Role::Admin)
            .build();
        let learner = User::builder()
            .user_id(demo_id(2))
            .email("learner@example.com")
            .name("Demo Learner")
            .build();

        let material = |n: u128, name: &str, description: &str, material_type: MaterialType, url: &str| {
            Material::builder()
                .material_id(demo_id(0x100 + n))
                .name(name)
                .description(description)
                .material_type(material_type)
                .url(url)
                .build()
        };
        let materials = vec![
            material(1, "Intro to web services", "Introductory video on the service framework", MaterialType::Video, "https://www.youtube.com/watch?v=web-services-intro"),
            material(2, "Securing services", "Walkthrough of authentication and authorization", MaterialType::Video, "https://www.youtube.com/watch?v=securing-services"),
            material(3, "Data access guide", "Reference document on repositories and persistence", MaterialType::Document, "https://example.com/docs/data-access"),
            material(4, "Language best practices", "Good practices for everyday code", MaterialType::Document, "https://example.com/best-practices.pdf"),
            material(5, "Final exam", "Final assessment of the services course", MaterialType::Test, "https://example.com/test/services-final"),
            material(6, "Midterm quiz", "Intermediate knowledge check", MaterialType::Test, "https://example.com/test/midterm-quiz"),
        ];
        let material_ids = |picked: &[usize]| -> BTreeSet<Uuid> {
            picked.iter().map(|i| materials[*i].material_id).collect()
        };

        let course = |n: u128, name: &str, description: &str, duration_minutes: u32, url: &str| {
            Course::builder()
                .course_id(demo_id(0x200 + n))
                .name(name)
                .description(description)
                .duration_minutes(duration_minutes)
                .external_url(url)
                .creator_id(admin.user_id)
                .build()
        };
        let courses = vec![
            course(1, "Building web services", "Complete course on developing web services", 120, "https://example.com/courses/web-services"),
            course(2, "Microservice architecture", "Designing and building systems out of microservices", 180, "https://example.com/courses/microservices"),
            course(3, "Advanced programming", "Advanced language concepts", 150, "https://example.com/courses/advanced"),
        ];

        let chapter = |course: &Course, order: i32, name: &str, description: &str, materials: BTreeSet<Uuid>| {
            Chapter::builder()
                .key(ChapterKey::new(course.course_id, order))
                .name(name)
                .description(description)
                .content(format!("# {}\n\n{}.", name, description))
                .creator_id(admin.user_id)
                .material_ids(materials)
                .build()
        };
        let chapters = vec![
            chapter(&courses[0], 1, "Introduction", "Basic concepts of the framework", material_ids(&[0, 2])),
            chapter(&courses[0], 2, "Configuration", "Configuring a service project", material_ids(&[2])),
            chapter(&courses[0], 3, "Security", "Adding security to a service", material_ids(&[1])),
            chapter(&courses[0], 4, "Final assessment", "Final exam of the course", material_ids(&[4])),
            chapter(&courses[1], 1, "Microservice fundamentals", "Basics of microservice architecture", material_ids(&[3])),
            chapter(&courses[1], 2, "Service communication", "Communication patterns between services", material_ids(&[5])),
            chapter(&courses[2], 1, "Functional programming", "Introduction to functional programming", material_ids(&[3, 0])),
        ];

        let module = |n: u128, name: &str, description: &str, picked: [usize; 2]| {
            Module::builder()
                .module_id(demo_id(0x300 + n))
                .name(name)
                .description(description)
                .creator_id(admin.user_id)
                .course_ids(picked.iter().map(|i| courses[*i].course_id).collect())
                .build()
        };
        let modules = vec![
            module(1, "Backend fundamentals", "Backend development from the ground up", [0, 1]),
            module(2, "Professional programming", "Mastering the language professionally", [0, 2]),
            module(3, "Software architecture", "Architecture and system design", [1, 2]),
        ];

        DemoCatalog {
            admin,
            learner,
            materials,
            courses,
            chapters,
            modules,
        }
    }

    async fn write_to(&self, catalog: &impl CatalogRepository) -> Result<(), ProgressError> {
        catalog.put_user(&self.admin).await?;
        catalog.put_user(&self.learner).await?;
        for material in &self.materials {
            catalog.put_material(material).await?;
        }
        for course in &self.courses {
            catalog.put_course(course).await?;
        }
        for chapter in &self.chapters {
            add_chapter(catalog, chapter).await?;
        }
        for module in &self.modules {
            catalog.put_module(module).await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UserLookup;
    use crate::datastore::MemoryDatastore;

    #[tokio::test]
    async fn seeds_the_whole_catalog() {
        let store = MemoryDatastore::new();
        let seeder = DemoSeeder::new();

        let demo = seeder.seed_once(&store).await.unwrap();

        assert_eq!(demo.materials.len(), 6);
        assert_eq!(demo.chapters.len(), 7);
        let learner = store
            .find_user(&UserLookup::ByEmail("learner@example.com".to_string()))
            .await
            .unwrap();
        assert_eq!(learner.as_ref(), Some(&demo.learner));
        let first_course = store.list_chapters(&demo.courses[0].course_id).await.unwrap();
        assert_eq!(first_course.iter().map(|c| c.key.order).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
        for module in &demo.modules {
            assert_eq!(store.find_module(&module.module_id).await.unwrap().as_ref(), Some(module));
        }
        let chapter_materials: BTreeSet<Uuid> = demo
            .chapters
            .iter()
            .flat_map(|c| c.material_ids.iter().copied())
            .collect();
        assert_eq!(chapter_materials.len(), 6);
    }

    #[tokio::test]
    async fn second_call_returns_the_seeded_catalog_without_writing() {
        let seeder = DemoSeeder::new();
        let store = MemoryDatastore::new();
        let first = seeder.seed_once(&store).await.unwrap().clone();

        let renamed = User {
            name: "Renamed".to_string(),
            ..first.learner.clone()
        };
        store.put_user(&renamed).await.unwrap();
        let second = seeder.seed_once(&store).await.unwrap();

        assert_eq!(&first, second);
        let learner = store.find_user(&UserLookup::ById(first.learner.user_id)).await.unwrap();
        assert_eq!(learner, Some(renamed));
    }

    #[tokio::test]
    async fn ids_are_stable_across_seeders() {
        let first = DemoSeeder::new().seed_once(&MemoryDatastore::new()).await.unwrap().clone();
        let second = DemoSeeder::new().seed_once(&MemoryDatastore::new()).await.unwrap().clone();

        assert_eq!(first, second);
    }
}
