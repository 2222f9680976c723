use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::ChapterKey;

/// One consumption of a chapter by a user. Entries are appended and never rewritten; a user may
/// hold any number of entries for the same chapter.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryEntry {
    pub user_id: Uuid,

    pub entry_id: Uuid,

    #[serde(flatten)]
    pub chapter: ChapterKey,

    pub started_at: DateTime<Utc>,

    /// `None` while the entry is open, which is how every entry starts.
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

impl HistoryEntry {
    pub fn open(user_id: Uuid, chapter: ChapterKey) -> Self {
        HistoryEntry {
            user_id,
            entry_id: Uuid::new_v4(),
            chapter,
            started_at: Utc::now(),
            ended_at: None,
        }
    }
}
