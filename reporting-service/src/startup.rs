//! Application startup and lifecycle management.

use crate::config::ReportingConfig;
use crate::handlers::{customers, dashboard, health, invoices};
use crate::services::{init_metrics, Database, ReportingQueryService};
use axum::{middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{make_request_span, request_id_middleware};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub reporting: ReportingQueryService,
}

impl AppState {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            reporting: ReportingQueryService::new(db),
        }
    }
}

/// Build the HTTP router: probes, metrics and the read-only reporting API.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/dashboard/revenue", get(dashboard::revenue))
        .route("/dashboard/latest-invoices", get(dashboard::latest_invoices))
        .route("/dashboard/cards", get(dashboard::cards))
        .route("/invoices", get(invoices::list))
        .route("/invoices/pages", get(invoices::page_count))
        .route("/invoices/:id", get(invoices::get))
        .route("/customers", get(customers::list))
        .route("/customers/table", get(customers::table));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/metrics", get(health::metrics_handler))
        .nest("/api", api)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    http_port: u16,
    http_listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ReportingConfig) -> Result<Self, AppError> {
        init_metrics();

        let db = Database::new(&config.database).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        let state = AppState::new(Arc::new(db));

        let http_addr = config.common.http_addr();
        let http_listener = TcpListener::bind(http_addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %http_addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let http_port = http_listener.local_addr()?.port();

        tracing::info!(http_port = http_port, "Reporting service listener bound");

        Ok(Self {
            http_port,
            http_listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn http_port(&self) -> u16 {
        self.http_port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        tracing::info!(
            service = "reporting-service",
            version = env!("CARGO_PKG_VERSION"),
            http_port = self.http_port,
            "Service ready to accept connections"
        );

        axum::serve(self.http_listener, router).await.map_err(|e| {
            tracing::error!(error = %e, "HTTP server error");
            std::io::Error::other(format!("HTTP server error: {}", e))
        })
    }
}
