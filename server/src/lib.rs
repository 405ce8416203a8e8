use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use larder_core::corpus::load_corpus;
use larder_core::{DocId, IndexStats, InvertedIndex, RankOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_ordering")]
    pub ordering: String,
    #[serde(default = "default_count")]
    pub count: usize,
}
fn default_ordering() -> String { "relevance".to_string() }
fn default_count() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub ordering: RankOrder,
    pub took_ms: u128,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f64,
    pub title: String,
    pub rating: f64,
}

#[derive(Clone)]
pub struct AppState {
    pub index: Arc<InvertedIndex>,
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}

/// Load the corpus, build the index once and serve it read-only.
pub fn build_app(corpus_path: String) -> Result<Router> {
    let recipes = load_corpus(&corpus_path)?;
    let index = InvertedIndex::build(recipes);
    Ok(router(Arc::new(index)))
}

/// Any origin is allowed unless `allowed` names at least one valid origin (comma-separated).
pub fn cors_layer(allowed: Option<&str>) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn router(index: Arc<InvertedIndex>) -> Router {
    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .with_state(AppState { index })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let order: RankOrder = match params.ordering.parse() {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!(ordering = %params.ordering, "rejected search");
            return error(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    let start = std::time::Instant::now();
    let mut hits = state.index.rank(&params.q, order);
    let total_hits = hits.len();
    hits.truncate(params.count);
    let results = hits
        .into_iter()
        .map(|h| SearchHit { doc_id: h.doc_id, score: h.score, title: h.recipe.title.clone(), rating: h.recipe.rating })
        .collect();

    let elapsed = start.elapsed();
    Json(SearchResponse { query: params.q, ordering: order, took_ms: elapsed.as_millis(), took_s: elapsed.as_secs_f64(), total_hits, results })
        .into_response()
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Response {
    match state.index.doc(doc_id) {
        Some(recipe) => Json(serde_json::json!({ "doc_id": doc_id, "recipe": recipe })).into_response(),
        None => error(StatusCode::NOT_FOUND, "not found"),
    }
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.index.stats())
}
