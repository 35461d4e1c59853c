//! Persistence for todo items.
//!
//! # Design
//! `TodoStore` is the seam between the service and the backend; the service
//! only ever sees `Result<_, StoreError>`, with "no such id" expressed as
//! `Ok(None)`.
//!
//! [`mongo::MongoStore`] is the production backend. `MemoryStore` keeps the
//! collection as an ordered list in the process; it backs the tests and is
//! the fallback when no database is configured. Insertion order is the
//! natural order returned by unsorted page queries in both.

pub mod mongo;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::page::PageRequest;
use crate::types::{Title, Todo, TodoId};

/// Fixed database name appended to the `DATABASE` connection prefix.
pub const DATABASE_NAME: &str = "todolist-kata";

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Persist a new item and return the saved record.
    async fn insert(&self, todo: Todo) -> Result<Todo, StoreError>;

    /// Return one page of records, optionally sorted.
    async fn find_page(&self, request: &PageRequest) -> Result<Vec<Todo>, StoreError>;

    /// Replace the title of `id`, stamping `updated_at`.
    async fn update_title(
        &self,
        id: &TodoId,
        title: Title,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Todo>, StoreError>;

    /// Remove `id`, returning the removed record.
    async fn delete_by_id(&self, id: &TodoId) -> Result<Option<Todo>, StoreError>;

    /// Remove every record, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

/// In-process collection, lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<Todo>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryStore {
    #[tracing::instrument(skip_all, level = "debug", fields(id = %todo.id))]
    async fn insert(&self, todo: Todo) -> Result<Todo, StoreError> {
        self.docs.write().await.push(todo.clone());
        Ok(todo)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(page = request.page, limit = request.limit))]
    async fn find_page(&self, request: &PageRequest) -> Result<Vec<Todo>, StoreError> {
        let docs = self.docs.read().await;
        let mut view: Vec<&Todo> = docs.iter().collect();
        if let Some(sort) = request.sort {
            // sort_by is stable, so ties keep insertion order across pages.
            view.sort_by(|a, b| sort.compare(a, b));
        }
        let skip = usize::try_from(request.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit).unwrap_or(usize::MAX);
        Ok(view.into_iter().skip(skip).take(limit).cloned().collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn update_title(
        &self,
        id: &TodoId,
        title: Title,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Todo>, StoreError> {
        let mut docs = self.docs.write().await;
        Ok(docs.iter_mut().find(|t| t.id == *id).map(|todo| {
            todo.title = title.into_string();
            todo.updated_at = updated_at;
            todo.clone()
        }))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn delete_by_id(&self, id: &TodoId) -> Result<Option<Todo>, StoreError> {
        let mut docs = self.docs.write().await;
        let Some(index) = docs.iter().position(|t| t.id == *id) else {
            return Ok(None);
        };
        Ok(Some(docs.remove(index)))
    }

    #[tracing::instrument(skip_all, level = "debug")]
    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut docs = self.docs.write().await;
        let removed = docs.len() as u64;
        docs.clear();
        Ok(removed)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.docs.read().await.len() as u64)
    }
}
