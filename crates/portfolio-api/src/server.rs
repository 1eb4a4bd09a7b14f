//! HTTP surface for the portfolio site.
//!
//! Routes:
//! - `GET  /api/blog` and `GET /api/projects`: catalog listings
//! - `GET  /api/blog/{slug}` and `GET /api/projects/{slug}`: long-form content
//! - `POST /api/chat`: persona chat proxy
//! - `GET  /health`
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::{Catalog, ListFilter};
use crate::chat::{ChatProxy, ChatReply};
use crate::error::AppError;
use crate::model::{BlogPost, Category, Project};
use crate::resolver::{ContentKind, ContentResolver, ResolvedContent};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub resolver: Arc<ContentResolver>,
    pub chat: Arc<ChatProxy>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/blog", get(list_blog))
        .route("/api/blog/{slug}", get(get_blog))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{slug}", get(get_project))
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    category: Option<String>,
    /// Only the literal `true` selects featured entries.
    featured: Option<String>,
}

impl From<ListQuery> for ListFilter {
    fn from(query: ListQuery) -> Self {
        ListFilter {
            category: query.category,
            featured_only: query.featured.as_deref() == Some("true"),
        }
    }
}

#[derive(Serialize)]
struct BlogListResponse {
    posts: Vec<BlogPost>,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct ProjectListResponse {
    projects: Vec<Project>,
    categories: Vec<Category>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn list_blog(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<BlogListResponse> {
    let filter = ListFilter::from(query);
    Json(BlogListResponse {
        posts: state.catalog.blog_posts(&filter).into_iter().cloned().collect(),
        categories: state.catalog.blog_categories().to_vec(),
    })
}

async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ProjectListResponse> {
    let filter = ListFilter::from(query);
    Json(ProjectListResponse {
        projects: state.catalog.projects(&filter).into_iter().cloned().collect(),
        categories: state.catalog.project_categories().to_vec(),
    })
}

async fn get_blog(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ResolvedContent>, AppError> {
    let content = state.resolver.resolve(ContentKind::Blog, &slug).await?;
    Ok(Json(content))
}

async fn get_project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ResolvedContent>, AppError> {
    let content = state.resolver.resolve(ContentKind::Project, &slug).await?;
    Ok(Json(content))
}

/// Takes the raw body so that malformed JSON gets the same envelope as a
/// missing `message`.
async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Json<ChatReply>, AppError> {
    let payload: Option<Value> = serde_json::from_slice(&body).ok();
    let message = payload
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str);
    let reply = state.chat.chat(message).await?;
    Ok(Json(reply))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
