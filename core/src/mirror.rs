//! Append-only, in-process copy of every item created since startup.
//!
//! # Design
//! The mirror is not authoritative. It serves `GET /todos` without a store
//! round trip, and so it never sees updates or deletes and is empty again
//! after a restart. Entries are appended in the order creates complete.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::Todo;

#[derive(Debug, Clone, Default)]
pub struct CreatedMirror {
    items: Arc<RwLock<Vec<Todo>>>,
}

impl CreatedMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, todo: Todo) {
        self.items.write().await.push(todo);
    }

    /// Snapshot of every created item, oldest first.
    pub async fn snapshot(&self) -> Vec<Todo> {
        self.items.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{Title, TodoId};

    fn todo(title: &str) -> Todo {
        Todo::new(TodoId::new(), Title::new(title).unwrap(), Utc::now())
    }

    #[tokio::test]
    async fn snapshot_preserves_append_order() {
        let mirror = CreatedMirror::new();
        assert!(mirror.snapshot().await.is_empty());

        mirror.append(todo("first")).await;
        mirror.append(todo("second")).await;

        let items = mirror.snapshot().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "first");
        assert_eq!(items[1].title, "second");
    }

    #[tokio::test]
    async fn clones_share_the_same_list() {
        let mirror = CreatedMirror::new();
        let other = mirror.clone();

        other.append(todo("shared")).await;

        assert_eq!(mirror.snapshot().await.len(), 1);
    }
}
