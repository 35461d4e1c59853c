//! Route handlers for `/todos`.
//!
//! Bodies are taken as raw bytes and parsed here, so malformed JSON gets the
//! same 400 envelope as a missing title instead of a framework rejection.
//! Extractor rejections are caught the same way: an unreadable or oversized
//! body is a 400 and an undecodable path id is a 404.

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, Query, State,
    },
    http::Uri,
};
use todo_core::{parse_title_body, PageQuery, Title, Todo, TodoError, TodoId, TodoService};

use crate::envelope::Envelope;
use crate::error::{ApiError, Operation};

/// A path id that does not decode to a UUID cannot name a stored item.
fn parse_id(
    op: Operation,
    path: Result<Path<String>, PathRejection>,
) -> Result<TodoId, ApiError> {
    let Path(raw) =
        path.map_err(|rejection| op.error(TodoError::NotFound(rejection.body_text())))?;
    raw.parse()
        .map_err(|_| op.error(TodoError::NotFound(raw.clone())))
}

fn parse_title(op: Operation, body: Result<Bytes, BytesRejection>) -> Result<Title, ApiError> {
    let body = body.map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;
    parse_title_body(&body).map_err(|e| op.error(e))
}

/// `GET /todos` serves the mirror; with a query string it pages the store.
pub async fn list_todos(
    State(svc): State<TodoService>,
    uri: Uri,
) -> Result<Envelope<Vec<Todo>>, ApiError> {
    if uri.query().map_or(true, str::is_empty) {
        return Ok(Envelope::success("fetched todo list", svc.list_all().await));
    }

    let Query(query) = Query::<PageQuery>::try_from_uri(&uri)
        .map_err(|rejection| ApiError::InvalidInput(rejection.body_text()))?;
    let (request, todos) = svc
        .list_page(query)
        .await
        .map_err(|e| Operation::ListPage.error(e))?;
    Ok(Envelope::success(
        format!("fetched page {} of todos", request.page),
        todos,
    ))
}

pub async fn create_todo(
    State(svc): State<TodoService>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Envelope<Todo>, ApiError> {
    let op = Operation::Create;
    let title = parse_title(op, body)?;
    let todo = svc.create_item(title).await.map_err(|e| op.error(e))?;
    Ok(Envelope::success("created a todo", todo))
}

pub async fn update_todo(
    State(svc): State<TodoService>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Envelope<Todo>, ApiError> {
    let op = Operation::Update;
    let title = parse_title(op, body)?;
    let id = parse_id(op, id)?;
    let todo = svc.update_title(&id, title).await.map_err(|e| op.error(e))?;
    Ok(Envelope::success("updated a todo", todo))
}

pub async fn delete_todo(
    State(svc): State<TodoService>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Envelope<Todo>, ApiError> {
    let op = Operation::Delete;
    let id = parse_id(op, id)?;
    let todo = svc.delete_by_id(&id).await.map_err(|e| op.error(e))?;
    Ok(Envelope::success("deleted a todo", todo))
}

/// Reports success whenever the store call returns, even if nothing existed.
pub async fn delete_all_todos(State(svc): State<TodoService>) -> Result<Envelope, ApiError> {
    svc.delete_all()
        .await
        .map_err(|e| Operation::DeleteAll.error(e))?;
    Ok(Envelope::done("deleted all todos"))
}

pub async fn count_todos(State(svc): State<TodoService>) -> Result<Envelope, ApiError> {
    let count = svc.count().await.map_err(|e| Operation::Count.error(e))?;
    Ok(Envelope::counted("fetched todo count", count))
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
