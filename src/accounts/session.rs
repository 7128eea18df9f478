//! Server-side session tokens.
//!
//! Login issues a random bearer token mapping to the username for the
//! configured TTL. Tokens are random and stored server-side, so there is no
//! cookie signature and no signing secret to manage. Expired entries are
//! dropped on first touch.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use axum::extract::State;
use dashmap::DashMap;
use uuid::Uuid;

/// An established session identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    created: Instant,
}

/// In-memory session table keyed by bearer token.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Issue a fresh token for the username.
    pub fn create(&self, username: &str) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                created: Instant::now(),
            },
        );
        token
    }

    /// Resolve a token to its session, dropping the entry if expired.
    pub fn get(&self, token: &str) -> Option<Session> {
        let expired = match self.sessions.get(token) {
            Some(session) if session.created.elapsed() < self.ttl => {
                return Some(session.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove(token);
        }
        None
    }
}

/// Middleware guarding session-only routes via `Authorization: Bearer`.
///
/// A valid session is attached to the request as an extension.
pub async fn session_auth_middleware(
    State(sessions): State<Arc<SessionStore>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(session) = token.and_then(|t| sessions.get(t)) else {
        return Err(StatusCode::UNAUTHORIZED);
    };

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
