//! Domain and persistence core for the todo service.
//!
//! # Overview
//! Everything the HTTP layer needs to serve `/todos` without knowing how
//! items are stored: the `Todo` model, page-query validation, the
//! `TodoStore` persistence seam with its MongoDB and in-memory backends, the
//! created-items mirror, and `TodoService`, which ties them together.
//!
//! # Design
//! - Operations return `Result<_, TodoError>`; the caller decides status codes.
//! - The mirror and the store are deliberately not kept consistent. The
//!   mirror only ever grows.
//! - Time comes from a `Clock` so timestamps are deterministic in tests.

pub mod clock;
pub mod error;
pub mod mirror;
pub mod page;
pub mod service;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{StoreError, TodoError};
pub use mirror::CreatedMirror;
pub use page::{PageQuery, PageRequest, Sort, SortField};
pub use service::TodoService;
pub use store::mongo::{connection_string, MongoStore};
pub use store::{MemoryStore, TodoStore, DATABASE_NAME};
pub use types::{parse_title_body, Title, Todo, TodoId};
