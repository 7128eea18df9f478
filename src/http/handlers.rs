//! Request handlers for the triage API.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::accounts::auth;
use crate::accounts::session::Session;
use crate::geo::Facility;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Disclaimer attached to matched diagnoses.
const DISCLAIMER_MATCHED: &str = "⚠️ Demo only. Consult a doctor.";

/// Disclaimer attached when no pattern contains the query.
const DISCLAIMER_UNMATCHED: &str = "⚠️ Couldn’t match symptoms. Consult a real doctor.";

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of a diagnosis request. Both fields tolerate absence: an absent
/// message behaves like an empty query, an absent location falls back to the
/// configured default city.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub message: String,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub diagnosis: String,
    pub medicine: String,
    pub disclaimer: &'static str,
    pub nearby_hospitals: Vec<Facility>,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

/// POST /register: create an account.
pub async fn register(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Result<impl IntoResponse, ApiError> {
    auth::register(&state.accounts, &credentials.username, &credentials.password)
        .map_err(|e| ApiError::Registration(e.to_string()))?;

    tracing::info!(username = %credentials.username, "Account registered");
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "status": "registered" })),
    ))
}

/// POST /login: verify credentials and establish a session.
pub async fn login(
    State(state): State<AppState>,
    Form(credentials): Form<Credentials>,
) -> Response {
    match auth::login(&state.accounts, &credentials.username, &credentials.password) {
        Ok(()) => {
            let token = state.sessions.create(&credentials.username);
            tracing::info!(username = %credentials.username, "Login succeeded");
            Json(serde_json::json!({ "token": token })).into_response()
        }
        Err(_) => {
            // One generic failure for unknown users and wrong passwords alike.
            tracing::info!(username = %credentials.username, "Login failed");
            (StatusCode::UNAUTHORIZED, "Login failed!").into_response()
        }
    }
}

/// GET /chat: session-gated landing surface.
pub async fn chat(Extension(session): Extension<Session>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "user": session.username }))
}

/// POST /chat_api: the diagnosis pipeline.
///
/// The matcher and resolver have no failure modes that reach the client: an
/// unmatched query and an empty facility list are ordinary outcomes.
pub async fn chat_api(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let location = request
        .location
        .as_deref()
        .unwrap_or(&state.fallback_location);

    let nearby_hospitals = state.resolver.nearby_facilities(location).await;

    let response = match state.catalog.match_symptoms(&request.message) {
        Some(record) => {
            tracing::debug!(condition = %record.condition, "Symptoms matched");
            ChatResponse {
                diagnosis: record.condition,
                medicine: record.medicines,
                disclaimer: DISCLAIMER_MATCHED,
                nearby_hospitals,
            }
        }
        None => ChatResponse {
            diagnosis: "Unknown".to_string(),
            medicine: "Not available".to_string(),
            disclaimer: DISCLAIMER_UNMATCHED,
            nearby_hospitals,
        },
    };

    Json(response)
}

/// GET /status: service liveness and version.
pub async fn status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}
