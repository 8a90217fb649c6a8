use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored todo row. Serializes with the wire field names the REST
/// surface exposes (`isDone`, not `is_done`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: i64,
    pub title: String,
    pub details: String,
    pub date: Option<DateTime<Utc>>,
    pub is_done: bool,
}

/// Creation payload; the database assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    pub details: String,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_todo_done_flag_defaults_to_false() {
        let todo: NewTodo =
            serde_json::from_str(r#"{"title":"Plan","details":"Scope","date":null}"#).unwrap();
        assert!(!todo.is_done);
    }

    #[test]
    fn test_record_serializes_wire_field_names() {
        let record = TodoRecord {
            id: 1,
            title: "Plan".to_string(),
            details: "Scope".to_string(),
            date: None,
            is_done: true,
        };

        let wire = serde_json::to_value(&record).unwrap();
        assert_eq!(wire["isDone"], true);
        assert!(wire.get("is_done").is_none());
    }
}
