//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (admission control, sessions, tracing, limits)
//! - Seed the condition catalog and build shared state
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::accounts::session::{session_auth_middleware, SessionStore};
use crate::accounts::AccountStore;
use crate::catalog::CatalogStore;
use crate::config::TriageConfig;
use crate::geo::GeoResolver;
use crate::http::handlers;
use crate::observability::metrics;
use crate::security::rate_limit::{rate_limit_middleware, RateLimitScope, RateLimiter};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub accounts: Arc<AccountStore>,
    pub sessions: Arc<SessionStore>,
    pub resolver: Arc<GeoResolver>,
    pub fallback_location: String,
}

/// HTTP server for the triage service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Seeds the demo catalog and builds the geocoder client; the only
    /// failure mode is HTTP client construction.
    pub fn new(config: TriageConfig) -> Result<Self, reqwest::Error> {
        let catalog = Arc::new(CatalogStore::with_demo_data());
        tracing::info!(records = catalog.len(), "Condition catalog seeded");

        let resolver = GeoResolver::from_config(&config.geocoder)?;

        let state = AppState {
            catalog,
            accounts: Arc::new(AccountStore::new()),
            sessions: Arc::new(SessionStore::new(Duration::from_secs(
                config.session.ttl_secs,
            ))),
            resolver: Arc::new(resolver),
            fallback_location: config.geocoder.fallback_location.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &TriageConfig, state: AppState) -> Router {
        let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
        let service_scope = RateLimitScope {
            limiter: limiter.clone(),
            scope: "service",
            limit: config.rate_limit.service_per_window,
        };
        let chat_scope = RateLimitScope {
            limiter,
            scope: "chat",
            limit: config.rate_limit.chat_per_window,
        };

        Router::new()
            .route("/register", post(handlers::register))
            .route("/login", post(handlers::login))
            .route("/status", get(handlers::status))
            .route(
                "/chat",
                get(handlers::chat).layer(middleware::from_fn_with_state(
                    state.sessions.clone(),
                    session_auth_middleware,
                )),
            )
            .route(
                "/chat_api",
                post(handlers::chat_api).layer(middleware::from_fn_with_state(
                    chat_scope,
                    rate_limit_middleware,
                )),
            )
            .with_state(state)
            .layer(middleware::from_fn_with_state(
                service_scope,
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn(track_request_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record method/status/latency for every handled request.
async fn track_request_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
