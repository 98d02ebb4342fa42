use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::{
    ApiBatchRequest, ApiBatchResponse, ApiPredictRequest, ApiPredictResponse, ApiRecommendRequest,
    ApiRecommendResponse, ApiScoreRequest, ApiSentimentRequest, ApiSentimentResponse,
};
use crate::coach::Coach;
use crate::scoring::ContentScore;

#[derive(Clone)]
struct AppState {
    coach: Arc<Coach>,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

pub fn build_router(coach: Arc<Coach>) -> Router {
    let state = AppState { coach };

    Router::new()
        .route("/api/health", get(health))
        .route("/api/score", post(score_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/recommend", post(recommend_handler))
        .route("/api/batch", post(batch_handler))
        .route("/api/sentiment", post(sentiment_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(host: &str, port: u16, coach: Coach) -> Result<(), String> {
    let app = build_router(Arc::new(coach));

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn score_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiScoreRequest>,
) -> ApiResult<ContentScore> {
    let text = request.into_text().map_err(bad_request)?;
    Ok(Json(state.coach.score(&text)))
}

async fn predict_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiPredictRequest>,
) -> ApiResult<ApiPredictResponse> {
    let (base_score, text) = request.into_parts().map_err(bad_request)?;
    let prediction = state.coach.predict(base_score, &text);
    let posting_time = state.coach.predictor().posting_time(&prediction.best_platform);
    Ok(Json(ApiPredictResponse {
        prediction,
        posting_time,
    }))
}

async fn recommend_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiRecommendRequest>,
) -> ApiResult<ApiRecommendResponse> {
    let input = request.into_input().map_err(bad_request)?;
    let recommendation = state
        .coach
        .recommend(input.base_a, &input.text_a, input.base_b, &input.text_b);
    Ok(Json(ApiRecommendResponse::from_recommendation(recommendation)))
}

async fn batch_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiBatchRequest>,
) -> ApiResult<ApiBatchResponse> {
    let cases = request.into_cases().map_err(bad_request)?;
    Ok(Json(state.coach.run_batch(&cases)))
}

async fn sentiment_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiSentimentRequest>,
) -> ApiResult<ApiSentimentResponse> {
    let report = state.coach.sentiment_report(&request.records);
    Ok(Json(ApiSentimentResponse::from_report(report)))
}

fn bad_request(err: String) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err)
}
