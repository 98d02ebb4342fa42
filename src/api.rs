use serde::{Deserialize, Serialize};

use crate::coach::{AbTestCase, BatchReport};
use crate::report::{SentimentRecord, SentimentReport};
use crate::scoring::{PlatformPrediction, Recommendation};

#[derive(Debug, Deserialize)]
pub struct ApiScoreRequest {
    pub text: Option<String>,
}

impl ApiScoreRequest {
    /// Blank text is a valid input; only a missing field is rejected.
    pub fn into_text(self) -> Result<String, String> {
        self.text.ok_or_else(|| "text is required".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiPredictRequest {
    pub text: Option<String>,
    pub base_score: Option<f64>,
}

impl ApiPredictRequest {
    pub fn into_parts(self) -> Result<(Option<f64>, String), String> {
        let text = self.text.ok_or_else(|| "text is required".to_string())?;
        let base_score = validate_base("base_score", self.base_score)?;
        Ok((base_score, text))
    }
}

#[derive(Debug, Serialize)]
pub struct ApiPredictResponse {
    #[serde(flatten)]
    pub prediction: PlatformPrediction,
    pub posting_time: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiRecommendRequest {
    pub text_a: Option<String>,
    pub text_b: Option<String>,
    pub base_a: Option<f64>,
    pub base_b: Option<f64>,
}

pub struct RecommendInput {
    pub base_a: Option<f64>,
    pub text_a: String,
    pub base_b: Option<f64>,
    pub text_b: String,
}

impl ApiRecommendRequest {
    pub fn into_input(self) -> Result<RecommendInput, String> {
        Ok(RecommendInput {
            base_a: validate_base("base_a", self.base_a)?,
            text_a: self.text_a.ok_or_else(|| "text_a is required".to_string())?,
            base_b: validate_base("base_b", self.base_b)?,
            text_b: self.text_b.ok_or_else(|| "text_b is required".to_string())?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiRecommendResponse {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub summary: String,
}

impl ApiRecommendResponse {
    pub fn from_recommendation(recommendation: Recommendation) -> Self {
        let summary = recommendation.summary();
        Self {
            recommendation,
            summary,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiBatchRequest {
    #[serde(default)]
    pub cases: Vec<AbTestCase>,
}

impl ApiBatchRequest {
    pub fn into_cases(self) -> Result<Vec<AbTestCase>, String> {
        if self.cases.is_empty() {
            return Err("cases must not be empty".to_string());
        }
        Ok(self.cases)
    }
}

pub type ApiBatchResponse = BatchReport;

#[derive(Debug, Deserialize)]
pub struct ApiSentimentRequest {
    #[serde(default)]
    pub records: Vec<SentimentRecord>,
}

#[derive(Debug, Serialize)]
pub struct ApiSentimentResponse {
    #[serde(flatten)]
    pub report: SentimentReport,
    pub digest: String,
}

impl ApiSentimentResponse {
    pub fn from_report(report: SentimentReport) -> Self {
        let digest = report.digest();
        Self { report, digest }
    }
}

fn validate_base(field: &str, value: Option<f64>) -> Result<Option<f64>, String> {
    match value {
        Some(score) if !(0.0..=1.0).contains(&score) => {
            Err(format!("{} must be between 0 and 1: {}", field, score))
        }
        other => Ok(other),
    }
}
