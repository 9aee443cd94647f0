//! JSON HTTP interface exposing the converter actions.

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::formatter::format_markdown;
use crate::location::LocationResult;
use crate::provider::LocationProvider;

/// Application state shared across all requests
#[derive(Clone)]
struct AppState {
    provider: LocationProvider,
}

/// Build the Axum application with routes and middleware
pub fn router(provider: LocationProvider) -> Router {
    let state = AppState { provider };

    Router::new()
        .route("/health", get(health_check))
        .route("/api/format", post(format_text))
        .route("/api/location", get(get_location).post(request_location))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Deserialize)]
struct FormatRequest {
    text: String,
    /// Append the current location when one is available
    #[serde(default = "default_true")]
    include_location: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Serialize)]
struct FormatResponse {
    success: bool,
    markdown: String,
    location: String,
}

/// Format pasted text with the location published so far
async fn format_text(
    State(state): State<AppState>,
    Json(request): Json<FormatRequest>,
) -> Result<Json<FormatResponse>, ApiError> {
    if request.text.trim().is_empty() {
        return Err(ApiError::BadRequest("text cannot be empty".to_string()));
    }

    let location = if request.include_location {
        state.provider.current()
    } else {
        LocationResult::Unset
    };
    let markdown = format_markdown(&request.text, &location);
    tracing::info!(bytes = markdown.len(), location = %location, "Formatted text");

    Ok(Json(FormatResponse {
        success: true,
        markdown,
        location: location.to_string(),
    }))
}

#[derive(Serialize)]
struct LocationResponse {
    success: bool,
    state: String,
    text: Option<String>,
}

impl From<LocationResult> for LocationResponse {
    fn from(result: LocationResult) -> Self {
        Self {
            success: true,
            state: result.to_string(),
            text: result.message().map(str::to_string),
        }
    }
}

async fn get_location(State(state): State<AppState>) -> Json<LocationResponse> {
    Json(state.provider.current().into())
}

/// Start a location request; poll `GET /api/location` for the outcome
async fn request_location(State(state): State<AppState>) -> Json<LocationResponse> {
    state.provider.request_permission_and_start();
    Json(state.provider.current().into())
}

/// API error types
enum ApiError {
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}
