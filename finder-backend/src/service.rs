///! HTTP surface for the finder
///!
///! Authentication happens upstream; the proxy passes the user's id in the
///! `x-user-id` header.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Datelike, Local};
use finder_common::{CaptureRecord, Hemisphere, ResolvedEntry, TimeOfDay};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::config::BackendConfig;
use crate::module::availability::{resolve_availability, ResolveError};
use crate::module::catalog::CatalogStore;
use crate::module::storage::{CaptureStore, ProfileStore, StorageError};

pub const USER_HEADER: &str = "x-user-id";

/// Shared handles for request handlers
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub captures: Arc<dyn CaptureStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("no hemisphere chosen yet, set one via /profile/hemisphere")]
    HemisphereUnset,

    #[error("unknown fish '{0}'")]
    UnknownFish(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) | ApiError::Resolve(_) => StatusCode::BAD_REQUEST,
            ApiError::HemisphereUnset => StatusCode::CONFLICT,
            ApiError::UnknownFish(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(e) => {
                error!("Storage failure: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response();
            }
        };
        (status, self.to_string()).into_response()
    }
}

fn user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::Unauthorized)
}

#[derive(Debug, Default, Deserialize)]
pub struct AvailableParams {
    pub month: Option<String>,
    pub time: Option<String>,
    pub hemisphere: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserFish {
    #[serde(default)]
    pub fish_id: String,
    pub caught: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChooseHemisphere {
    pub hemisphere: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub hemisphere: String,
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

/// Basic server information
async fn stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = state.catalog.snapshot().await;
    Json(serde_json::json!({
        "status": "running",
        "service": "finder-backend",
        "version": env!("CARGO_PKG_VERSION"),
        "catalog_size": catalog.len(),
    }))
}

/// Fish catchable right now (or at the given month/time), with caught flags.
///
/// Missing month/time fall back to the server clock, a missing hemisphere to
/// the user's saved choice.
async fn available_fish(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<AvailableParams>,
) -> Result<Json<Vec<ResolvedEntry>>, ApiError> {
    let user_id = user_id(&headers)?;

    let hemisphere = match params.hemisphere {
        Some(hemisphere) => hemisphere,
        None => state
            .profiles
            .hemisphere(&user_id)
            .await?
            .ok_or(ApiError::HemisphereUnset)?
            .as_str()
            .to_string(),
    };

    let now = Local::now();
    let month = match params.month.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ApiError::BadRequest(format!("invalid month '{}'", raw)))?,
        None => now.month() as i64,
    };
    let time = params
        .time
        .unwrap_or_else(|| TimeOfDay::from_timelike(&now).to_string());

    let catalog = state.catalog.snapshot().await;
    let captures = state.captures.caught_snapshot(&user_id).await?;
    let entries = resolve_availability(catalog.creatures(), &hemisphere, month, &time, &captures)?;

    debug!(
        "User {} gets {} available fish ({} month={} time={})",
        user_id,
        entries.len(),
        hemisphere,
        month,
        time
    );
    Ok(Json(entries))
}

/// Everything the user has caught, ordered by fish id
async fn list_user_fish(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<CaptureRecord>>, ApiError> {
    let user_id = user_id(&headers)?;
    Ok(Json(state.captures.records(&user_id).await?))
}

/// Mark a fish caught (`caught: true`) or clear it (`caught: false`).
async fn update_user_fish(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<UpdateUserFish>,
) -> Result<StatusCode, ApiError> {
    let user_id = user_id(&headers)?;
    let fish_id = payload.fish_id.trim();

    if fish_id.is_empty() {
        return Err(ApiError::BadRequest("missing fish_id".to_string()));
    }
    if !state.catalog.snapshot().await.contains(fish_id) {
        return Err(ApiError::UnknownFish(fish_id.to_string()));
    }

    if payload.caught {
        state.captures.mark_caught(&user_id, fish_id).await?;
    } else {
        state.captures.clear_caught(&user_id, fish_id).await?;
    }

    info!("User {} set {} caught={}", user_id, fish_id, payload.caught);
    Ok(StatusCode::OK)
}

async fn get_profile(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user_id = user_id(&headers)?;
    let hemisphere = state
        .profiles
        .hemisphere(&user_id)
        .await?
        .map(|h| h.as_str())
        .unwrap_or("unset")
        .to_string();

    Ok(Json(ProfileResponse {
        user_id,
        hemisphere,
    }))
}

async fn choose_hemisphere(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<ChooseHemisphere>,
) -> Result<StatusCode, ApiError> {
    let user_id = user_id(&headers)?;
    let hemisphere: Hemisphere = payload
        .hemisphere
        .parse()
        .map_err(|e: finder_common::ParseHemisphereError| ApiError::BadRequest(e.to_string()))?;

    state.profiles.set_hemisphere(&user_id, hemisphere).await?;
    info!("User {} chose hemisphere {}", user_id, hemisphere);
    Ok(StatusCode::OK)
}

pub fn build_router(state: Arc<AppState>, config: &BackendConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(stats))
        .route("/fish/available", get(available_fish))
        .route("/fish/userfish", get(list_user_fish).post(update_user_fish))
        .route("/profile", get(get_profile))
        .route("/profile/hemisphere", post(choose_hemisphere))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .with_state(state);

    let router = if config.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}
