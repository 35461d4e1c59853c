//! HTTP front end for the todo service.
//!
//! # Routes
//! - `GET /todos` - items created since startup (no query string), or one
//!   page of stored items (`?page=&limit=&orderByColumn=&orderByAsc=`)
//! - `POST /todos` - create from `{"title": "..."}`
//! - `DELETE /todos` - delete every stored item
//! - `GET /todos/count` - number of stored items
//! - `PATCH /todos/{id}` - replace the title
//! - `DELETE /todos/{id}` - delete one item
//! - `OPTIONS *` - empty 200 for CORS preflight
//!
//! Anything else, including an unsupported method on a known path, gets the
//! 404 routing envelope. HEAD is one of those methods, even where GET is
//! routed. Every response carries JSON and CORS headers.

pub mod config;
pub mod envelope;
pub mod error;
pub mod handler;

use std::future::Future;

use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Router,
};
use tokio::net::TcpListener;
use todo_core::TodoService;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::handler::{
    count_todos, create_todo, delete_all_todos, delete_todo, list_todos, route_not_found,
    update_todo,
};

pub const CORS_ALLOW_HEADERS: &str = "Content-Type, Authorization, Content-Length, X-Requested-With";
pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET,POST,DELETE,PATCH,OPTIONS";

pub fn app(service: TodoService) -> Router {
    Router::new()
        .route(
            "/todos",
            get(list_todos)
                .post(create_todo)
                .delete(delete_all_todos)
                .fallback(route_not_found),
        )
        .route("/todos/count", get(count_todos).fallback(route_not_found))
        .route(
            "/todos/{id}",
            delete(delete_todo)
                .patch(update_todo)
                .fallback(route_not_found),
        )
        .fallback(route_not_found)
        .layer(middleware::from_fn(preflight))
        .layer(fixed_header(header::CONTENT_TYPE, "application/json"))
        .layer(fixed_header(header::ACCESS_CONTROL_ALLOW_HEADERS, CORS_ALLOW_HEADERS))
        .layer(fixed_header(header::ACCESS_CONTROL_ALLOW_ORIGIN, CORS_ALLOW_ORIGIN))
        .layer(fixed_header(header::ACCESS_CONTROL_ALLOW_METHODS, CORS_ALLOW_METHODS))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// Serve until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, service: TodoService, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown)
        .await
}

fn fixed_header(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

/// OPTIONS on any path is answered here with an empty 200. HEAD is stopped
/// here too, before the router would serve it through a GET handler.
async fn preflight(request: Request, next: Next) -> Response {
    match *request.method() {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::HEAD => ApiError::RouteNotFound.into_response(),
        _ => next.run(request).await,
    }
}
