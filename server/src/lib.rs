use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use coursematch_core::{ColumnMapping, Recommendation, Recommender, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Default, Deserialize)]
pub struct RecommendParams {
    pub q: Option<String>,
    pub name: Option<String>,
    pub query: Option<String>,
    /// Kept as text so an unparsable value falls back to the default instead
    /// of rejecting the request.
    pub top_n: Option<String>,
}

impl RecommendParams {
    /// First of `q`, `name`, `query` that was supplied, even if empty.
    fn text(&self) -> Option<&str> {
        self.q.as_deref().or(self.name.as_deref()).or(self.query.as_deref())
    }
}

pub fn parse_top_n(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_TOP_N as i64)
        .max(1) as usize
}

#[derive(Serialize)]
pub struct RecommendResponse {
    pub query: String,
    pub results: Vec<Recommendation>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub vocabulary_size: usize,
    pub nnz: usize,
    pub columns: Vec<String>,
    pub mapping: ColumnMapping,
    pub loaded_at: String,
}

#[derive(Debug)]
pub enum ApiError {
    MissingQuery,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MissingQuery => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": "missing query parameter `q` (or `name`/`query`)" }),
            ),
            ApiError::Internal(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": "internal server error", "message": message }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub loaded_at: String,
}

impl AppState {
    pub fn new(recommender: Recommender) -> Self {
        let loaded_at = time::OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
        Self { recommender: Arc::new(recommender), loaded_at }
    }
}

/// Load the catalog at `data`, build the index, and return the router serving
/// it. Fails before any route exists if the catalog cannot be loaded.
pub fn build_app<P: AsRef<Path>>(data: P) -> Result<Router> {
    let recommender = Recommender::from_path(data.as_ref())?;
    let mapping = recommender.mapping();
    tracing::info!(
        path = %data.as_ref().display(),
        rows = recommender.records().len(),
        vocabulary = recommender.index().vocabulary_len(),
        columns = ?recommender.headers(),
        title = ?mapping.title.as_ref().map(|c| &c.name),
        url = ?mapping.url.as_ref().map(|c| &c.name),
        rating = ?mapping.rating.as_ref().map(|c| &c.name),
        description = ?mapping.description.as_ref().map(|c| &c.name),
        "recommender loaded"
    );
    Ok(router(AppState::new(recommender)))
}

pub fn router(state: AppState) -> Router {
    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/recommend", get(recommend_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let query = params.text().ok_or(ApiError::MissingQuery)?.to_string();
    let top_n = parse_top_n(params.top_n.as_deref());

    // scoring walks the whole matrix; keep it off the async workers
    let recommender = Arc::clone(&state.recommender);
    let text = query.clone();
    let results = tokio::task::spawn_blocking(move || recommender.recommend(&text, top_n))
        .await
        .map_err(|err| {
            tracing::error!(error = ?err, %query, top_n, "recommendation failed");
            ApiError::Internal(err.to_string())
        })?;

    tracing::debug!(%query, top_n, hits = results.len(), "recommend");
    Ok(Json(RecommendResponse { query, results }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let reco = &state.recommender;
    Json(StatsResponse {
        num_docs: reco.records().len(),
        vocabulary_size: reco.index().vocabulary_len(),
        nnz: reco.index().nnz(),
        columns: reco.headers().to_vec(),
        mapping: reco.mapping().clone(),
        loaded_at: state.loaded_at.clone(),
    })
}
