//! Fragment endpoints for in-page control switching.
//!
//! These return HTML fragments (not full pages) that the chart page's
//! inline script swaps into the document when a filter or view control
//! is clicked, avoiding a full reload. The fragment is the same markup
//! the full page includes, so navigation and swapping stay in sync.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use tracing::error;

use fsc_charts::query::ChartQuery;
use fsc_charts::registry;
use fsc_metrics::Surface;

use crate::DashboardState;
use crate::views::*;

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl.render().unwrap_or_else(|e| {
        format!("<pre>Template error: {e}</pre>")
    }))
}

#[derive(Template)]
#[template(path = "_partials/chart_body.html")]
struct ChartBodyPartial {
    chart: ChartView,
}

pub async fn chart_body(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    let Some(descriptor) = registry::find(&id) else {
        return (StatusCode::NOT_FOUND, Html(String::new())).into_response();
    };

    // A swap is a fresh chart render, but not a page navigation.
    state.metrics.record_chart_view(descriptor.chart_id, Surface::Page);

    match build_chart_view(&state.store, descriptor, &query, &state.base_url) {
        Ok(chart) => render(ChartBodyPartial { chart }).into_response(),
        Err(e) => {
            error!(chart = %id, error = %e, "chart fragment build failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<pre>Chart error: {e}</pre>")),
            )
                .into_response()
        }
    }
}
