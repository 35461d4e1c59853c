//! Domain types for the todo service.
//!
//! # Design
//! `TodoId` is generated by the service, independent of whatever key the
//! persistence backend uses internally. `Title` can only be constructed from a
//! non-empty string, so a persisted `Todo` never carries an empty title.
//! Field names on the wire are camelCase (`createdAt`, `updatedAt`) and must
//! not change; clients depend on them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TodoError;

/// Unique identifier of a todo item, serialized as a hyphenated UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(Uuid);

impl TodoId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TodoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A non-empty todo title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title(String);

impl Title {
    /// Whitespace-only input counts as empty.
    pub fn new(value: impl Into<String>) -> Result<Self, TodoError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TodoError::Validation("title must not be empty".to_string()));
        }
        Ok(Self(value))
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// A single todo item as persisted and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub done: bool,
}

impl Todo {
    /// Build a new, not-done item stamped with `now`.
    pub fn new(id: TodoId, title: Title, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into_string(),
            created_at: now,
            updated_at: now,
            done: false,
        }
    }
}

/// Parse a create/update body, `{"title": "..."}`, into a validated `Title`.
///
/// Anything other than a JSON object with a non-empty string `title` is a
/// validation error; callers never learn which part was wrong. Other fields
/// are ignored.
pub fn parse_title_body(body: &[u8]) -> Result<Title, TodoError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| TodoError::Validation(format!("malformed body: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| TodoError::Validation("body must be a JSON object".to_string()))?;
    match object.get("title") {
        Some(serde_json::Value::String(title)) => Title::new(title.as_str()),
        Some(serde_json::Value::Null) | None => {
            Err(TodoError::Validation("title is required".to_string()))
        }
        Some(_) => Err(TodoError::Validation("title must be a string".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn todo_serializes_with_camel_case_fields() {
        let todo = Todo::new(
            Uuid::nil().to_string().parse().unwrap(),
            Title::new("Test").unwrap(),
            fixed_time(),
        );
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["done"], false);
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(json["updatedAt"], "2024-05-01T12:00:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TodoId::new(), TodoId::new());
    }

    #[test]
    fn todo_id_parses_from_display() {
        let id = TodoId::new();
        let parsed: TodoId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn default_todo_id_is_fresh() {
        assert_ne!(TodoId::default(), TodoId::default());
    }

    #[test]
    fn todo_id_rejects_non_uuid() {
        assert!("not-a-uuid".parse::<TodoId>().is_err());
    }

    #[test]
    fn title_rejects_empty_and_blank() {
        assert!(Title::new("").is_err());
        assert!(Title::new("   ").is_err());
        assert_eq!(Title::new("buy milk").unwrap().into_string(), "buy milk");
    }

    #[test]
    fn parse_title_body_accepts_object_with_title() {
        let title = parse_title_body(br#"{"title":"buy milk"}"#).unwrap();
        assert_eq!(title.into_string(), "buy milk");
    }

    #[test]
    fn parse_title_body_ignores_extra_fields() {
        let title = parse_title_body(br#"{"title":"x","done":true}"#).unwrap();
        assert_eq!(title.into_string(), "x");
    }

    #[test]
    fn parse_title_body_rejects_bad_input() {
        let bodies: [&[u8]; 7] = [
            b"",
            b"not json",
            b"[1,2]",
            b"{}",
            br#"{"title":""}"#,
            br#"{"title":42}"#,
            br#"{"title":null}"#,
        ];
        for body in bodies {
            let err = parse_title_body(body).unwrap_err();
            assert!(matches!(err, TodoError::Validation(_)), "{body:?}");
        }
    }
}
