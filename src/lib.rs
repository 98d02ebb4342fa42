pub mod api;
pub mod coach;
pub mod config;
pub mod metrics;
pub mod report;
pub mod scoring;
pub mod sentiment;
pub mod server;

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::coach::Coach;
use crate::scoring::{PlatformPrediction, Recommendation};

/// One piece of marketing copy plus the context it was written for.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentItem {
    pub text: String,
    #[serde(default)]
    pub product_context: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub tone: String,
}

impl ContentItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

static DEFAULT_COACH: OnceLock<Coach> = OnceLock::new();

fn default_coach() -> &'static Coach {
    DEFAULT_COACH.get_or_init(Coach::default)
}

/// Quality score in [0, 1] using the built-in scorer defaults.
pub fn score_content(text: &str) -> f64 {
    default_coach().scorer().score(text)
}

pub fn predict_platforms(base_score: f64, text: &str) -> PlatformPrediction {
    default_coach().predictor().predict(base_score, text)
}

pub fn recommend(base_a: f64, text_a: &str, base_b: f64, text_b: &str) -> Recommendation {
    default_coach()
        .predictor()
        .recommend(base_a, text_a, base_b, text_b)
}

/// Half-away-from-zero rounding to `digits` decimals.
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
