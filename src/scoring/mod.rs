pub mod content;
pub mod platform;
pub mod recommend;
pub mod viral;

pub use content::{ComponentWeights, ContentScore, ContentScorer, ScoreComponents, ScorerConfig, WeightScheme};
pub use platform::{suggest_posting_time, LengthRule, MarkerRule, Platform, PlatformProfile};
pub use recommend::{Recommendation, Variant};
pub use viral::{PlatformPrediction, PlatformScore, ViralConfig, ViralPredictor};

pub(crate) fn round3(value: f64) -> f64 {
    crate::round_to(value, 3)
}

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
