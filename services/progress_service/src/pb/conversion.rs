use chrono::{DateTime, SecondsFormat, Utc};

use super::{HistoryEntry, RecognitionDetails, RecognitionSummary};
use crate::history;
use crate::recognition::Recognition;

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<history::HistoryEntry> for HistoryEntry {
    fn from(entry: history::HistoryEntry) -> Self {
        HistoryEntry {
            entry_id: entry.entry_id.to_string(),
            user_id: entry.user_id.to_string(),
            course_id: entry.chapter.course_id.to_string(),
            order: entry.chapter.order,
            started_at: timestamp(&entry.started_at),
            ended_at: entry.ended_at.as_ref().map(timestamp).unwrap_or_default(),
        }
    }
}

impl RecognitionSummary {
    pub fn new(recognition: &Recognition, course_name: impl Into<String>) -> Self {
        RecognitionSummary {
            recognition_id: recognition.recognition_id.to_string(),
            course_id: recognition.course_id.to_string(),
            course_name: course_name.into(),
            created_at: timestamp(&recognition.created_at),
        }
    }
}

impl RecognitionDetails {
    pub fn new(recognition: &Recognition, course_name: impl Into<String>) -> Self {
        RecognitionDetails {
            recognition_id: recognition.recognition_id.to_string(),
            course_id: recognition.course_id.to_string(),
            course_name: course_name.into(),
            user_id: recognition.user_id.to_string(),
            created_at: timestamp(&recognition.created_at),
        }
    }
}
