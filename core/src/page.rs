//! Page query parsing for `GET /todos?page=P&limit=L&orderByColumn=C&orderByAsc=A`.
//!
//! # Design
//! Query values arrive as raw strings and are validated here rather than by
//! the extractor, so every malformed value maps to the same validation error.
//! Sort columns come from a fixed allow-list; an unknown column is rejected
//! instead of being passed to the store verbatim.

use std::cmp::Ordering;

use serde::Deserialize;

use crate::error::TodoError;
use crate::types::Todo;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Query string as sent by the client. Every field is optional text.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub order_by_column: Option<String>,
    pub order_by_asc: Option<String>,
}

/// Fields a page may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    CreatedAt,
    UpdatedAt,
    Done,
}

impl SortField {
    /// Resolve a wire column name. Names match the JSON field names.
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "id" => Some(Self::Id),
            "title" => Some(Self::Title),
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Wire and document field name.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
            Self::Done => "done",
        }
    }

    fn compare(self, a: &Todo, b: &Todo) -> Ordering {
        match self {
            Self::Id => a.id.as_uuid().cmp(b.id.as_uuid()),
            Self::Title => a.title.cmp(&b.title),
            Self::CreatedAt => a.created_at.cmp(&b.created_at),
            Self::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            Self::Done => a.done.cmp(&b.done),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub ascending: bool,
}

impl Sort {
    pub fn compare(&self, a: &Todo, b: &Todo) -> Ordering {
        let ordering = self.field.compare(a, b);
        if self.ascending {
            ordering
        } else {
            ordering.reverse()
        }
    }
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// Number of records to skip before the page starts.
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl TryFrom<PageQuery> for PageRequest {
    type Error = TodoError;

    fn try_from(query: PageQuery) -> Result<Self, Self::Error> {
        let page = parse_bounded("page", query.page.as_deref(), DEFAULT_PAGE, 1, u64::MAX)?;
        let limit = parse_bounded("limit", query.limit.as_deref(), DEFAULT_LIMIT, 1, MAX_LIMIT)?;

        let field = match query.order_by_column.as_deref() {
            Some(column) => Some(SortField::from_column(column).ok_or_else(|| {
                TodoError::Validation(format!("cannot sort by {column:?}"))
            })?),
            None => None,
        };

        // Direction without a column (or the reverse) leaves natural order.
        let sort = match (field, query.order_by_asc.as_deref()) {
            (Some(field), Some(asc)) => Some(Sort {
                field,
                ascending: asc == "true",
            }),
            _ => None,
        };

        Ok(Self { page, limit, sort })
    }
}

fn parse_bounded(
    name: &str,
    raw: Option<&str>,
    default: u64,
    min: u64,
    max: u64,
) -> Result<u64, TodoError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let value: u64 = raw
        .trim()
        .parse()
        .map_err(|_| TodoError::Validation(format!("{name} must be an integer, got {raw:?}")))?;
    if !(min..=max).contains(&value) {
        return Err(TodoError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(value)
}
