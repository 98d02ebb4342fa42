use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use viral_coach::coach::Coach;
use viral_coach::server::build_router;

fn router() -> Router {
    build_router(Arc::new(Coach::default()))
}

async fn post_json(uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let response = router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

#[tokio::test]
async fn health_is_ok() {
    let response = router()
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn score_returns_components() {
    let (status, body) = post_json("/api/score", r#"{"text": ""}"#).await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!((json["score"].as_f64().unwrap() - 0.22).abs() < 1e-6);
    assert_eq!(json["weight_scheme"], "five_term");
    assert_eq!(json["components"]["readability"], 0.4);
}

#[tokio::test]
async fn score_requires_text_field() {
    let (status, body) = post_json("/api/score", "{}").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(body).unwrap(), "text is required");
}

#[tokio::test]
async fn predict_lists_platforms_and_posting_time() {
    let (status, body) = post_json("/api/predict", r#"{"text": "", "base_score": 1.0}"#).await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    let scores = json["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 4);
    for entry in scores {
        assert!((entry["viral_score"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }
    assert_eq!(json["best_platform"], "Twitter");
    assert_eq!(json["posting_time"], "5-8 PM (weekday evenings)");
}

#[tokio::test]
async fn predict_rejects_out_of_range_base() {
    let (status, _) = post_json("/api/predict", r#"{"text": "hi", "base_score": -0.2}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recommend_picks_variant() {
    let (status, body) = post_json(
        "/api/recommend",
        r#"{"text_a": "ok", "text_b": "Buy now! Amazing smart growth automation tool, trending in 2025"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["winning_variant"], "B");
    assert_eq!(json["best_platform"], "Twitter");
    assert!(json["summary"].as_str().unwrap().starts_with("Recommended Variant: B"));
}

#[tokio::test]
async fn batch_and_sentiment_endpoints() {
    let (status, body) = post_json(
        "/api/batch",
        r#"{"cases": [{"a_text": "Start today with smart AI", "b_text": "meh"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["summary"]["a_wins"], 1);
    assert_eq!(json["predictions"].as_array().unwrap().len(), 1);

    let (status, body) = post_json(
        "/api/sentiment",
        r#"{"records": [{"content_type": "comment", "text": "terrible support, awful"}]}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["alerts"][0]["content_type"], "comment");
    assert!(json["digest"].as_str().unwrap().contains("Negative sentiment spike"));
}
