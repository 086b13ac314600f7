//! fsc-dashboard — server-rendered web UI for the ecosystem charts.
//!
//! Provides axum route handlers that render the dashboard pages, the
//! bare embed documents, and the HTML fragments used for in-page
//! control switching. All figures are server-rendered SVG; the only
//! client-side JavaScript is the embed height protocol and small
//! progressive enhancements (fragment swaps, clipboard copy).
//!
//! # Routes
//!
//! | Route | Handler |
//! |---|---|
//! | `/` | Overview with headline stats and one card per chart |
//! | `/charts` | Redirect to the first chart |
//! | `/charts/{id}` | Chart page with controls, table, and embed panel |
//! | `/embed/{id}` | Bare embed document for iframes |
//! | `/partials/chart/{id}` | Chart body fragment for control swaps |
//! | `/static/app.css` | Stylesheet |

pub mod pages;
pub mod partials;
pub mod style;
pub mod views;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use fsc_core::Theme;
use fsc_data::DatasetStore;
use fsc_metrics::ViewCounters;

/// Shared state for dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub store: Arc<DatasetStore>,
    pub metrics: Arc<ViewCounters>,
    /// Public base URL embedded into generated snippets.
    pub base_url: String,
    pub default_theme: Theme,
    /// Site title shown in the navigation and page titles.
    pub title: String,
}

/// Build the dashboard router.
pub fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(pages::overview))
        .route("/charts", get(pages::charts_index))
        .route("/charts/{id}", get(pages::chart_page))
        .route("/embed/{id}", get(pages::embed_page))
        .route("/partials/chart/{id}", get(partials::chart_body))
        .route("/static/app.css", get(pages::stylesheet))
        .fallback(pages::not_found)
        .with_state(state)
}
