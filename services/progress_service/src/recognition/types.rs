use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion credential. At most one exists per user and course, and it is never modified once
/// stored.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct Recognition {
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub recognition_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Recognition {
    pub fn issue(user_id: Uuid, course_id: Uuid) -> Self {
        Recognition {
            user_id,
            course_id,
            recognition_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }
    }
}
