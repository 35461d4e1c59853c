//! The seven todo operations, one per route.
//!
//! # Design
//! `TodoService` is cheap to clone and is shared by every request. It owns
//! the store handle, the created-items mirror and the clock. Validation and
//! not-found are returned as `TodoError` variants so the server can map them
//! to status codes in one place.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::error::TodoError;
use crate::mirror::CreatedMirror;
use crate::page::{PageQuery, PageRequest};
use crate::store::TodoStore;
use crate::types::{Title, Todo, TodoId};

#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
    mirror: CreatedMirror,
    clock: Arc<dyn Clock>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn TodoStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            mirror: CreatedMirror::new(),
            clock,
        }
    }

    /// Generate an id, persist the item, then record it in the mirror.
    pub async fn create_item(&self, title: Title) -> Result<Todo, TodoError> {
        let todo = Todo::new(TodoId::new(), title, self.clock.now());
        let saved = self.store.insert(todo).await?;
        self.mirror.append(saved.clone()).await;
        tracing::debug!(id = %saved.id, "created todo");
        Ok(saved)
    }

    /// Every item created by this process, in creation order.
    pub async fn list_all(&self) -> Vec<Todo> {
        self.mirror.snapshot().await
    }

    pub async fn list_page(&self, query: PageQuery) -> Result<(PageRequest, Vec<Todo>), TodoError> {
        let request = PageRequest::try_from(query)?;
        let todos = self.store.find_page(&request).await?;
        Ok((request, todos))
    }

    pub async fn update_title(&self, id: &TodoId, title: Title) -> Result<Todo, TodoError> {
        self.store
            .update_title(id, title, self.clock.now())
            .await?
            .ok_or_else(|| TodoError::not_found(id))
    }

    pub async fn delete_by_id(&self, id: &TodoId) -> Result<Todo, TodoError> {
        self.store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| TodoError::not_found(id))
    }

    /// Clears the store only; the mirror keeps every created item.
    pub async fn delete_all(&self) -> Result<u64, TodoError> {
        let removed = self.store.delete_all().await?;
        tracing::info!(removed, "deleted all todos");
        Ok(removed)
    }

    pub async fn count(&self) -> Result<u64, TodoError> {
        Ok(self.store.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn service() -> TodoService {
        TodoService::with_clock(
            Arc::new(MemoryStore::new()),
            Arc::new(FixedClock::new(t0())),
        )
    }

    fn title(s: &str) -> Title {
        Title::new(s).unwrap()
    }

    #[tokio::test]
    async fn create_item_persists_and_mirrors() {
        let svc = service();

        let created = svc.create_item(title("buy milk")).await.unwrap();

        assert_eq!(created.title, "buy milk");
        assert!(!created.done);
        assert_eq!(created.created_at, t0());
        assert_eq!(created.updated_at, t0());
        assert_eq!(svc.count().await.unwrap(), 1);
        assert_eq!(svc.list_all().await, vec![created]);
    }

    #[tokio::test]
    async fn mirror_ignores_updates_and_deletes() {
        let svc = service();
        let a = svc.create_item(title("a")).await.unwrap();
        let b = svc.create_item(title("b")).await.unwrap();

        svc.update_title(&a.id, title("a2")).await.unwrap();
        svc.delete_by_id(&b.id).await.unwrap();
        svc.delete_all().await.unwrap();

        let mirrored = svc.list_all().await;
        assert_eq!(mirrored, vec![a, b]);
        assert_eq!(svc.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_title_refreshes_updated_at() {
        let store = Arc::new(MemoryStore::new());
        let early = TodoService::with_clock(store.clone(), Arc::new(FixedClock::new(t0())));
        let created = early.create_item(title("x")).await.unwrap();

        let later_time = t0() + chrono::Duration::minutes(5);
        let later = TodoService::with_clock(store, Arc::new(FixedClock::new(later_time)));
        let updated = later.update_title(&created.id, title("y")).await.unwrap();

        assert_eq!(updated.created_at, t0());
        assert_eq!(updated.updated_at, later_time);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let svc = service();
        let id = TodoId::new();

        let update = svc.update_title(&id, title("x")).await.unwrap_err();
        let delete = svc.delete_by_id(&id).await.unwrap_err();

        assert!(matches!(update, TodoError::NotFound(_)));
        assert!(matches!(delete, TodoError::NotFound(_)));
    }

    #[tokio::test]
    async fn list_page_rejects_unknown_sort_column() {
        let svc = service();
        let query = PageQuery {
            order_by_column: Some("$where".to_string()),
            order_by_asc: Some("true".to_string()),
            ..PageQuery::default()
        };

        let err = svc.list_page(query).await.unwrap_err();

        assert!(matches!(err, TodoError::Validation(_)));
    }
}
