//! fsc-api — JSON API and router assembly for the dashboard server.
//!
//! Provides the REST handlers and builds the complete application
//! router: API routes under `/api/v1`, the Prometheus exposition at
//! `/metrics`, and the server-rendered dashboard at the root.
//!
//! # API Routes
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/api/v1/charts` | List charts with their accepted controls |
//! | GET | `/api/v1/charts/{id}` | Resolved chart configuration |
//! | GET | `/api/v1/charts/{id}/embed` | Embed snippet for the chart |
//! | GET | `/metrics` | Prometheus exposition |

pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use fsc_core::DashboardConfig;
use fsc_data::DatasetStore;
use fsc_metrics::ViewCounters;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<DatasetStore>,
    pub metrics: Arc<ViewCounters>,
    /// Public base URL embedded into generated snippets.
    pub base_url: String,
}

/// Build the complete application router (REST + dashboard + metrics).
pub fn build_router(
    store: Arc<DatasetStore>,
    metrics: Arc<ViewCounters>,
    config: &DashboardConfig,
) -> Router {
    let api_state = ApiState {
        store: Arc::clone(&store),
        metrics: Arc::clone(&metrics),
        base_url: config.base_url(),
    };

    let dashboard_state = fsc_dashboard::DashboardState {
        store,
        metrics,
        base_url: config.base_url(),
        default_theme: config.default_theme(),
        title: config.title(),
    };

    let api_routes = Router::new()
        .route("/charts", get(handlers::list_charts))
        .route("/charts/{id}", get(handlers::get_chart))
        .route("/charts/{id}/embed", get(handlers::get_embed))
        .with_state(api_state.clone());

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::prometheus_metrics).with_state(api_state))
        .merge(fsc_dashboard::dashboard_router(dashboard_state))
}
