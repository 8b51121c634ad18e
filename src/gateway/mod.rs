//! Gateway module - HTTP front door for the game
//!
//! ```text
//!   browser ──► GET /            embedded page
//!           ──► POST /ask        AgentDispatcher::ask
//!           ──► DELETE /sessions/{id}
//!           ──► GET /health
//! ```

mod types;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::agent::AgentDispatcher;
use crate::error::Error;

pub use types::{AskRequest, AskResponse, ErrorResponse, HealthResponse};

/// Embedded front-end
const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: AgentDispatcher,
}

/// Library error rendered as a JSON response
pub struct AppError(pub Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Error::NoWaypointsFound(_) | Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::NoActiveGame | Error::GameFinished | Error::HintLimitReached { .. } => StatusCode::CONFLICT,
            Error::SessionTimeout { .. } => StatusCode::GONE,
            Error::UpstreamUnavailable(_) | Error::Http(_) | Error::Unauthorized(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
            kind: self.0.kind().to_string(),
        });
        (status, body).into_response()
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        AppError(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(Error::InvalidInput(rejection.body_text()))
    }
}

async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, AppError> {
    let Json(request) = payload?;

    let text = request
        .message()
        .ok_or_else(|| Error::InvalidInput("Either data or location is required".to_string()))?;

    let session_id = request
        .session_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let reply = state.dispatcher.ask(&session_id, &text).await?;

    Ok(Json(AskResponse {
        response: reply.text,
        session_id,
        tool: reply.tool,
    }))
}

async fn end_session(State(state): State<AppState>, Path(id): Path<String>) -> StatusCode {
    if state.dispatcher.sessions().remove(&id).await {
        info!("Session {} ended", id);
    }
    StatusCode::NO_CONTENT
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(serve_index))
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/sessions/{id}", delete(end_session))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
}
