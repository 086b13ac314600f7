//! Server regression tests.
//!
//! Drives the assembled router the way a browser or embedding page
//! would: dashboard pages, embed documents, the JSON API, and the
//! metrics exposition, all through `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use fsc_api::build_router;
use fsc_charts::registry;
use fsc_core::DashboardConfig;
use fsc_data::DatasetStore;
use fsc_metrics::ViewCounters;

fn test_router() -> axum::Router {
    let store = Arc::new(DatasetStore::embedded().unwrap());
    let metrics = Arc::new(ViewCounters::new(&registry::chart_ids()));
    build_router(store, metrics, &DashboardConfig::default())
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = router.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn overview_lists_every_chart() {
    let (status, body) = get(test_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    for id in registry::chart_ids() {
        assert!(body.contains(&format!("/charts/{id}")), "missing {id}");
    }
}

#[tokio::test]
async fn bare_charts_path_redirects() {
    let router = test_router();
    let req = Request::builder().uri("/charts").body(Body::empty()).unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get("location").unwrap(), "/charts/revenue");
}

#[tokio::test]
async fn chart_page_applies_filter_selection() {
    let (status, body) = get(test_router(), "/charts/revenue?filter=startups").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Startups only"));
    assert!(body.contains("/embed/revenue?filter=startups"));
}

#[tokio::test]
async fn chart_page_unknown_is_404() {
    let (status, _) = get(test_router(), "/charts/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_hits_fallback() {
    let (status, body) = get(test_router(), "/nope/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("404"));
}

#[tokio::test]
async fn embed_page_serves_bare_document() {
    let (status, body) = get(
        test_router(),
        "/embed/workforce-gender?view=female-share&showTitle=0",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<svg"));
    assert!(body.contains("FSC_CHART_HEIGHT"));
    // Title suppressed by the flag.
    assert!(!body.contains("fsc-embed-title"));
    // No dashboard chrome inside an embed.
    assert!(!body.contains("fsc-nav"));
}

#[tokio::test]
async fn partial_returns_fragment() {
    let (status, body) = get(test_router(), "/partials/chart/unicorns?view=count").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<svg"));
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn stylesheet_served() {
    let router = test_router();
    let req = Request::builder()
        .uri("/static/app.css")
        .body(Body::empty())
        .unwrap();
    let resp = router.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/css"));
}

#[tokio::test]
async fn api_lists_charts_in_envelope() {
    let (status, body) = get(test_router(), "/api/v1/charts").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(
        json["data"].as_array().unwrap().len(),
        registry::CHARTS.len()
    );
}

#[tokio::test]
async fn api_chart_config_round_trip() {
    let (status, body) = get(test_router(), "/api/v1/charts/sentiment?view=balance").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"]["chart_id"], "sentiment");
    assert_eq!(json["data"]["value_format"], "integer");
    // The balance view plots a single series with negative readings.
    assert_eq!(json["data"]["series"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn api_unknown_chart_is_404_envelope() {
    let (status, body) = get(test_router(), "/api/v1/charts/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn api_embed_snippet_matches_page_url() {
    let (status, body) = get(
        test_router(),
        "/api/v1/charts/revenue/embed?filter=scaleups",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let url = json["data"]["url"].as_str().unwrap();
    assert!(url.ends_with("/embed/revenue?filter=scaleups"));
    assert!(json["data"]["html"].as_str().unwrap().contains("<iframe"));
}

#[tokio::test]
async fn metrics_reflect_served_traffic() {
    let router = test_router();

    let (status, _) = get(router.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(router.clone(), "/charts/firms").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(router.clone(), "/embed/firms").await;
    assert_eq!(status, StatusCode::OK);

    let (status, text) = get(router, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(text.contains("fsc_page_views_total 2\n"));
    assert!(text.contains("fsc_chart_views_total{chart=\"firms\",surface=\"page\"} 1\n"));
    assert!(text.contains("fsc_chart_views_total{chart=\"firms\",surface=\"embed\"} 1\n"));
}
