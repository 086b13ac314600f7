//! Dashboard page handlers.
//!
//! Each handler resolves the chart registry against the dataset store,
//! builds view types, and renders an Askama template. Fragment
//! endpoints for in-page control switching are in `partials.rs`.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect};
use tracing::error;

use fsc_charts::query::ChartQuery;
use fsc_charts::registry;
use fsc_metrics::Surface;

use crate::DashboardState;
use crate::style::DASHBOARD_CSS;
use crate::views::*;

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl.render().unwrap_or_else(|e| {
        format!("<pre>Template error: {e}</pre>")
    }))
}

// ── Overview ────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "overview.html")]
struct OverviewTemplate {
    active_page: &'static str,
    site_title: String,
    theme_attr: &'static str,
    stats: Vec<StatCard>,
    cards: Vec<ChartCard>,
}

pub async fn overview(State(state): State<DashboardState>) -> Html<String> {
    state.metrics.record_page_view();

    render(OverviewTemplate {
        active_page: "overview",
        site_title: state.title.clone(),
        theme_attr: state.default_theme.as_str(),
        stats: build_stat_cards(&state.store),
        cards: build_chart_cards(&state.store),
    })
}

/// `/charts` without an id lands on the first chart in display order.
pub async fn charts_index() -> Redirect {
    Redirect::to(&format!("/charts/{}", registry::CHARTS[0].chart_id))
}

// ── Chart Page ──────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "chart.html")]
struct ChartTemplate {
    active_page: &'static str,
    site_title: String,
    theme_attr: &'static str,
    chart: ChartView,
}

pub async fn chart_page(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    let Some(descriptor) = registry::find(&id) else {
        return not_found_page(&state).into_response();
    };

    state.metrics.record_page_view();
    state.metrics.record_chart_view(descriptor.chart_id, Surface::Page);

    match build_chart_view(&state.store, descriptor, &query, &state.base_url) {
        Ok(chart) => render(ChartTemplate {
            active_page: "charts",
            site_title: state.title.clone(),
            theme_attr: state.default_theme.as_str(),
            chart,
        })
        .into_response(),
        Err(e) => {
            error!(chart = %id, error = %e, "chart page build failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<pre>Chart error: {e}</pre>")),
            )
                .into_response()
        }
    }
}

// ── Embed Page ──────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "embed.html")]
struct EmbedTemplate {
    embed: EmbedView,
}

pub async fn embed_page(
    State(state): State<DashboardState>,
    Path(id): Path<String>,
    Query(params): Query<EmbedParams>,
) -> impl IntoResponse {
    let Some(descriptor) = registry::find(&id) else {
        // Embeds get a bare 404; there is no site chrome to return to.
        return (
            StatusCode::NOT_FOUND,
            Html(format!("<pre>Unknown chart: {}</pre>", fsc_core::html_escape(&id))),
        )
            .into_response();
    };

    state.metrics.record_chart_view(descriptor.chart_id, Surface::Embed);

    let options = params.to_options();
    match build_embed_view(&state.store, descriptor, &options, state.default_theme) {
        Ok(embed) => render(EmbedTemplate { embed }).into_response(),
        Err(e) => {
            error!(chart = %id, error = %e, "embed page build failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!("<pre>Chart error: {e}</pre>")),
            )
                .into_response()
        }
    }
}

// ── Static Assets ───────────────────────────────────────────────

pub async fn stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=300"),
        ],
        DASHBOARD_CSS,
    )
}

// ── Not Found ───────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    active_page: &'static str,
    site_title: String,
    theme_attr: &'static str,
}

fn not_found_page(state: &DashboardState) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        render(NotFoundTemplate {
            active_page: "",
            site_title: state.title.clone(),
            theme_attr: state.default_theme.as_str(),
        }),
    )
}

pub async fn not_found(State(state): State<DashboardState>) -> impl IntoResponse {
    not_found_page(&state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use fsc_core::Theme;
    use fsc_data::DatasetStore;
    use fsc_metrics::ViewCounters;

    fn test_state() -> DashboardState {
        DashboardState {
            store: Arc::new(DatasetStore::embedded().unwrap()),
            metrics: Arc::new(ViewCounters::new(&registry::chart_ids())),
            base_url: "http://localhost:8090".to_string(),
            default_theme: Theme::System,
            title: "Test Dashboard".to_string(),
        }
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn overview_renders_all_cards() {
        let state = test_state();
        let resp = overview(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_text(resp).await;
        for id in registry::chart_ids() {
            assert!(body.contains(&format!("/charts/{id}")), "missing card link for {id}");
        }
    }

    #[tokio::test]
    async fn overview_renders_headline_stats() {
        let state = test_state();
        let resp = overview(State(state)).await.into_response();
        let body = body_text(resp).await;

        assert!(body.contains("fsc-stat-value"));
        assert!(body.contains("58 000"));
        assert!(body.contains("Active firms"));
    }

    #[tokio::test]
    async fn charts_index_redirects_to_first_chart() {
        let resp = charts_index().await.into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/charts/revenue"
        );
    }

    #[tokio::test]
    async fn overview_counts_page_view() {
        let state = test_state();
        let metrics = Arc::clone(&state.metrics);
        let _ = overview(State(state)).await;
        assert_eq!(metrics.snapshot().page_views, 1);
    }

    #[tokio::test]
    async fn chart_page_renders_figure_and_embed_panel() {
        let state = test_state();
        let resp = chart_page(
            State(state),
            Path("revenue".to_string()),
            Query(ChartQuery::default()),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_text(resp).await;
        assert!(body.contains("<svg"));
        assert!(body.contains("Embed this chart"));
        assert!(body.contains("fsc-embed-revenue"));
    }

    #[tokio::test]
    async fn chart_page_counts_page_surface() {
        let state = test_state();
        let metrics = Arc::clone(&state.metrics);
        let _ = chart_page(
            State(state),
            Path("revenue".to_string()),
            Query(ChartQuery::default()),
        )
        .await;

        let summary = metrics.snapshot();
        assert_eq!(summary.page_views, 1);
        let revenue = summary
            .charts
            .iter()
            .find(|c| c.chart_id == "revenue")
            .unwrap();
        assert_eq!(revenue.page, 1);
        assert_eq!(revenue.embed, 0);
    }

    #[tokio::test]
    async fn chart_page_unknown_chart_is_404() {
        let state = test_state();
        let resp = chart_page(
            State(state),
            Path("nope".to_string()),
            Query(ChartQuery::default()),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn embed_page_carries_reporter_script() {
        let state = test_state();
        let resp = embed_page(
            State(state),
            Path("workforce-gender".to_string()),
            Query(EmbedParams::default()),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_text(resp).await;
        assert!(body.contains("FSC_CHART_HEIGHT"));
        assert!(body.contains("workforce-gender"));
        assert!(body.contains("data-theme=\"system\""));
    }

    #[tokio::test]
    async fn embed_page_honors_display_options() {
        let state = test_state();
        let params = EmbedParams {
            show_title: Some("0".to_string()),
            theme: Some("dark".to_string()),
            compact: Some("1".to_string()),
            ..EmbedParams::default()
        };
        let resp = embed_page(State(state), Path("unicorns".to_string()), Query(params))
            .await
            .into_response();

        let body = body_text(resp).await;
        assert!(!body.contains("fsc-embed-title"));
        assert!(body.contains("data-theme=\"dark\""));
        assert!(body.contains("fsc-compact"));
    }

    #[tokio::test]
    async fn embed_page_counts_embed_surface() {
        let state = test_state();
        let metrics = Arc::clone(&state.metrics);
        let _ = embed_page(
            State(state),
            Path("sentiment".to_string()),
            Query(EmbedParams::default()),
        )
        .await;

        let summary = metrics.snapshot();
        assert_eq!(summary.page_views, 0);
        let sentiment = summary
            .charts
            .iter()
            .find(|c| c.chart_id == "sentiment")
            .unwrap();
        assert_eq!(sentiment.embed, 1);
    }

    #[tokio::test]
    async fn embed_page_unknown_chart_is_404() {
        let state = test_state();
        let resp = embed_page(
            State(state),
            Path("nope".to_string()),
            Query(EmbedParams::default()),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stylesheet_served_as_css() {
        let resp = stylesheet().await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.contains("text/css"));
    }

    #[tokio::test]
    async fn fallback_renders_404_page() {
        let state = test_state();
        let resp = not_found(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_text(resp).await;
        assert!(body.contains("404"));
    }
}
