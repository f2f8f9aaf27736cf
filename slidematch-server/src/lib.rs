//! HTTP front end for the slider solver.
//!
//! Exposes `POST /getdistance` (JSON in, `{"distance": x}` out) and
//! `GET /healthz`. Every request is solved on the blocking pool; a panic in
//! one solve is contained to that request.

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header, HeaderName, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Bytes, Json, Router};
use serde::{Deserialize, Serialize};
use slidematch::{solve, ImageInput, MatchConfig, SlideMatchError, SlideRequest};
use thiserror::Error;
use tokio::task;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Shared, read-only server settings.
#[derive(Clone, Copy, Debug)]
pub struct AppState {
    pub match_config: MatchConfig,
    pub max_body_bytes: usize,
    /// Largest accepted target area (`width * height`) for either image.
    pub max_pixels: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            match_config: MatchConfig::default(),
            max_body_bytes: 16 * 1024 * 1024,
            max_pixels: 4096 * 4096,
        }
    }
}

/// JSON body of `POST /getdistance`.
#[derive(Debug, Deserialize)]
pub struct DistanceRequest {
    pub bg_base64: String,
    pub bg_width: i64,
    pub bg_height: i64,
    pub block_base64: String,
    pub block_width: i64,
    pub block_height: i64,
}

/// JSON body of a successful `POST /getdistance`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistanceResponse {
    pub distance: usize,
}

/// Errors surfaced to HTTP clients as plain text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request body: {0}")]
    Body(#[from] serde_json::Error),
    #[error("{field} must be a positive integer, got {value}")]
    Dimension { field: &'static str, value: i64 },
    #[error("{image} target {width}x{height} exceeds the limit of {limit} pixels")]
    TooLarge {
        image: &'static str,
        width: usize,
        height: usize,
        limit: usize,
    },
    #[error(transparent)]
    Solve(#[from] SlideMatchError),
    #[error("internal error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        };
        (status, self.to_string()).into_response()
    }
}

fn dimension(field: &'static str, value: i64) -> Result<usize, ApiError> {
    usize::try_from(value)
        .ok()
        .filter(|&v| v > 0)
        .ok_or(ApiError::Dimension { field, value })
}

fn within_budget(
    image: &'static str,
    width: usize,
    height: usize,
    max_pixels: usize,
) -> Result<(), ApiError> {
    match width.checked_mul(height) {
        Some(pixels) if pixels <= max_pixels => Ok(()),
        _ => Err(ApiError::TooLarge {
            image,
            width,
            height,
            limit: max_pixels,
        }),
    }
}

impl DistanceRequest {
    /// Validates sizes against `max_pixels` and converts into the library request.
    pub fn into_slide_request(self, max_pixels: usize) -> Result<SlideRequest<String>, ApiError> {
        let bg_width = dimension("bg_width", self.bg_width)?;
        let bg_height = dimension("bg_height", self.bg_height)?;
        let block_width = dimension("block_width", self.block_width)?;
        let block_height = dimension("block_height", self.block_height)?;
        within_budget("background", bg_width, bg_height, max_pixels)?;
        within_budget("block", block_width, block_height, max_pixels)?;

        Ok(SlideRequest {
            background: ImageInput {
                width: bg_width,
                height: bg_height,
                encoded: self.bg_base64,
            },
            block: ImageInput {
                width: block_width,
                height: block_height,
                encoded: self.block_base64,
            },
        })
    }
}

/// Runs `work` on the blocking pool.
///
/// A panic inside `work` is logged and reported as [`ApiError::Internal`];
/// library errors pass through as [`ApiError::Solve`].
pub async fn run_blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, SlideMatchError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|err| {
            error!("solve task failed: {err}");
            ApiError::Internal
        })?
        .map_err(|err| {
            warn!(kind = ?err.kind(), "solve failed: {err}");
            ApiError::from(err)
        })
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn get_distance(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DistanceResponse>, ApiError> {
    let request: DistanceRequest = serde_json::from_slice(&body).map_err(|err| {
        warn!("rejecting body: {err}");
        ApiError::from(err)
    })?;
    let request = request
        .into_slide_request(state.max_pixels)
        .map_err(|err| {
            warn!("rejecting request: {err}");
            err
        })?;
    info!(
        bg_width = request.background.width,
        bg_height = request.background.height,
        block_width = request.block.width,
        block_height = request.block.height,
        "getdistance"
    );

    let cfg = state.match_config;
    let solution = run_blocking(move || solve(&request, cfg)).await?;

    info!(distance = solution.distance(), "solved");
    Ok(Json(DistanceResponse {
        distance: solution.distance(),
    }))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("accesstoken"),
            HeaderName::from_static("x-csrf-token"),
            HeaderName::from_static("token"),
            HeaderName::from_static("x-token"),
        ])
        .expose_headers([
            header::CONTENT_LENGTH,
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            header::CONTENT_TYPE,
        ])
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/getdistance", post(get_distance))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
