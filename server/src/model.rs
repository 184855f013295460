//! The `Todo` record as stored and as served over HTTP.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single task item.
///
/// Timestamps are server-local wall-clock times without an offset, serialized
/// as ISO-8601. `date_completed` and `is_complete` are carried through storage
/// and JSON but no operation sets them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    pub date_created: NaiveDateTime,
    pub date_completed: Option<NaiveDateTime>,
    #[serde(default)]
    pub is_complete: bool,
}

impl Todo {
    /// Builds a fresh, incomplete record. Identity and creation time come from
    /// the caller so the create path stays deterministic under test.
    pub fn new(id: impl Into<String>, title: impl Into<String>, created_at: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            date_created: created_at,
            date_completed: None,
            is_complete: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn new_todo_is_incomplete() {
        let todo = Todo::new("abc", "Buy milk", noon());
        assert_eq!(todo.id, "abc");
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.date_created, noon());
        assert!(todo.date_completed.is_none());
        assert!(!todo.is_complete);
    }

    #[test]
    fn todo_serializes_with_camel_case_fields() {
        let todo = Todo::new("abc", "Test", noon());
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["dateCreated"], "2024-03-01T12:00:00");
        assert!(json["dateCompleted"].is_null());
        assert_eq!(json["isComplete"], false);
    }

    #[test]
    fn todo_deserializes_without_is_complete() {
        let todo: Todo = serde_json::from_str(
            r#"{"id":"x","title":"t","dateCreated":"2024-03-01T12:00:00","dateCompleted":null}"#,
        )
        .unwrap();
        assert!(!todo.is_complete);
        assert_eq!(todo.date_created, noon());
    }
}
