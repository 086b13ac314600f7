//! REST API handlers.
//!
//! Each handler resolves the chart registry against the dataset store
//! and returns JSON responses in a uniform envelope.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use fsc_charts::error::ChartError;
use fsc_charts::query::ChartQuery;
use fsc_charts::registry;
use fsc_core::ChartKind;
use fsc_dashboard::views::EmbedParams;
use fsc_embed::SnippetError;
use fsc_metrics::{Surface, render_prometheus};

use crate::ApiState;

/// Response wrapper for consistent API format.
#[derive(serde::Serialize)]
struct ApiResponse<T: serde::Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: serde::Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

fn error_response(msg: &str, status: StatusCode) -> impl IntoResponse {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            error: Some(msg.to_string()),
        }),
    )
}

// ── Chart Listing ──────────────────────────────────────────────

/// Summary entry returned by the chart listing.
#[derive(serde::Serialize)]
pub struct ChartSummary {
    pub chart_id: &'static str,
    pub kind: ChartKind,
    pub title: String,
    pub unit: String,
    /// Accepted filter values, default first; empty when the chart has
    /// no filter control.
    pub filters: &'static [&'static str],
    /// Accepted view modes, default first; empty when none.
    pub views: &'static [&'static str],
    pub as_of: String,
}

/// GET /api/v1/charts
pub async fn list_charts(State(state): State<ApiState>) -> impl IntoResponse {
    let mut charts = Vec::with_capacity(registry::CHARTS.len());
    for descriptor in registry::CHARTS {
        match registry::build(&state.store, descriptor.chart_id, &ChartQuery::default()) {
            Ok(config) => charts.push(ChartSummary {
                chart_id: descriptor.chart_id,
                kind: descriptor.kind,
                title: config.title,
                unit: config.unit,
                filters: descriptor.filters,
                views: descriptor.views,
                as_of: config.as_of,
            }),
            Err(e) => {
                return error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
                    .into_response();
            }
        }
    }
    ApiResponse::ok(charts).into_response()
}

// ── Chart Config ───────────────────────────────────────────────

/// GET /api/v1/charts/{id}
///
/// Returns the fully resolved chart configuration for the requested
/// filter/view selection; unknown selections fall back to the chart's
/// default, the same way the pages do.
pub async fn get_chart(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(query): Query<ChartQuery>,
) -> impl IntoResponse {
    match registry::build(&state.store, &id, &query) {
        Ok(config) => {
            state.metrics.record_chart_view(&id, Surface::Api);
            ApiResponse::ok(config).into_response()
        }
        Err(ChartError::UnknownChart(_)) => {
            error_response("chart not found", StatusCode::NOT_FOUND).into_response()
        }
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

// ── Embed Snippet ──────────────────────────────────────────────

/// Payload returned by the embed snippet endpoint.
#[derive(serde::Serialize)]
pub struct EmbedSnippetPayload {
    pub chart_id: String,
    pub iframe_id: String,
    pub url: String,
    pub html: String,
}

/// GET /api/v1/charts/{id}/embed
pub async fn get_embed(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Query(params): Query<EmbedParams>,
) -> impl IntoResponse {
    let Some(descriptor) = registry::find(&id) else {
        return error_response("chart not found", StatusCode::NOT_FOUND).into_response();
    };

    let options = params.to_options();
    // Build the config so the iframe carries the chart's accessible title.
    let query = ChartQuery::from_options(&options);
    let config = match registry::build(&state.store, descriptor.chart_id, &query) {
        Ok(config) => config,
        Err(e) => {
            return error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
                .into_response();
        }
    };

    match fsc_embed::generate(&state.base_url, &config.chart_id, &config.title, &options) {
        Ok(snippet) => {
            state.metrics.record_snippet(descriptor.chart_id);
            ApiResponse::ok(EmbedSnippetPayload {
                chart_id: descriptor.chart_id.to_string(),
                iframe_id: snippet.binding.iframe_id,
                url: snippet.url,
                html: snippet.html,
            })
            .into_response()
        }
        Err(e @ SnippetError::BadParam { .. }) => {
            error_response(&e.to_string(), StatusCode::BAD_REQUEST).into_response()
        }
        Err(e) => error_response(&e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
    }
}

// ── Metrics ────────────────────────────────────────────────────

/// GET /metrics
pub async fn prometheus_metrics(State(state): State<ApiState>) -> impl IntoResponse {
    let summary = state.metrics.snapshot();
    (
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        render_prometheus(&summary),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::to_bytes;
    use fsc_data::DatasetStore;
    use fsc_metrics::ViewCounters;

    fn test_state() -> ApiState {
        ApiState {
            store: Arc::new(DatasetStore::embedded().unwrap()),
            metrics: Arc::new(ViewCounters::new(&registry::chart_ids())),
            base_url: "http://localhost:8090".to_string(),
        }
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_charts_returns_all_with_controls() {
        let state = test_state();
        let resp = list_charts(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        let charts = json["data"].as_array().unwrap();
        assert_eq!(charts.len(), registry::CHARTS.len());
        assert_eq!(charts[0]["chart_id"], "revenue");
        assert_eq!(charts[0]["kind"], "bar");
        assert_eq!(charts[0]["filters"][0], "all");

        let sentiment = charts.iter().find(|c| c["chart_id"] == "sentiment").unwrap();
        assert_eq!(sentiment["kind"], "area");
        assert_eq!(sentiment["views"], serde_json::json!(["index", "balance"]));
    }

    #[tokio::test]
    async fn get_chart_returns_config() {
        let state = test_state();
        let resp = get_chart(
            State(state),
            Path("revenue".to_string()),
            Query(ChartQuery::default()),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let data = &json["data"];
        assert_eq!(data["chart_id"], "revenue");
        assert_eq!(data["stacked"], true);
        assert_eq!(data["series"].as_array().unwrap().len(), 2);
        assert_eq!(
            data["labels"].as_array().unwrap().len(),
            data["series"][0]["values"].as_array().unwrap().len()
        );
    }

    #[tokio::test]
    async fn get_chart_applies_selection() {
        let state = test_state();
        let resp = get_chart(
            State(state),
            Path("revenue".to_string()),
            Query(ChartQuery::new(Some("startups"), None)),
        )
        .await
        .into_response();

        let json = body_json(resp).await;
        assert_eq!(json["data"]["subtitle"], "Startups only");
        assert_eq!(json["data"]["series"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn get_chart_unknown_is_404_envelope() {
        let state = test_state();
        let resp = get_chart(
            State(state),
            Path("nope".to_string()),
            Query(ChartQuery::default()),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let json = body_json(resp).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "chart not found");
    }

    #[tokio::test]
    async fn get_chart_counts_api_surface() {
        let state = test_state();
        let metrics = Arc::clone(&state.metrics);
        let _ = get_chart(
            State(state),
            Path("firms".to_string()),
            Query(ChartQuery::default()),
        )
        .await;

        let summary = metrics.snapshot();
        let firms = summary.charts.iter().find(|c| c.chart_id == "firms").unwrap();
        assert_eq!(firms.api, 1);
    }

    #[tokio::test]
    async fn get_embed_returns_snippet() {
        let state = test_state();
        let metrics = Arc::clone(&state.metrics);
        let resp = get_embed(
            State(state),
            Path("unicorns".to_string()),
            Query(EmbedParams {
                view: Some("count".to_string()),
                ..EmbedParams::default()
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        let data = &json["data"];
        assert_eq!(data["iframe_id"], "fsc-embed-unicorns");
        assert_eq!(
            data["url"],
            "http://localhost:8090/embed/unicorns?view=count"
        );
        assert!(data["html"].as_str().unwrap().contains("<iframe"));
        assert!(data["html"].as_str().unwrap().contains("FSC_CHART_HEIGHT"));

        let summary = metrics.snapshot();
        let unicorns = summary
            .charts
            .iter()
            .find(|c| c.chart_id == "unicorns")
            .unwrap();
        assert_eq!(unicorns.snippets, 1);
    }

    #[tokio::test]
    async fn get_embed_rejects_malformed_param() {
        let state = test_state();
        let resp = get_embed(
            State(state),
            Path("revenue".to_string()),
            Query(EmbedParams {
                filter: Some("Not Kebab".to_string()),
                ..EmbedParams::default()
            }),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn get_embed_unknown_chart_is_404() {
        let state = test_state();
        let resp = get_embed(
            State(state),
            Path("nope".to_string()),
            Query(EmbedParams::default()),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn prometheus_endpoint_returns_text() {
        let state = test_state();
        let resp = prometheus_metrics(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.contains("text/plain"));

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("# TYPE fsc_chart_views_total counter"));
    }
}
