use serde::{Deserialize, Serialize};

use crate::scoring::platform::{default_profiles, PlatformProfile, ANYTIME};
use crate::scoring::{clamp01, round3, Recommendation};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViralConfig {
    pub base_weight: f64,
    pub modifier_weight: f64,
}

impl Default for ViralConfig {
    fn default() -> Self {
        Self {
            base_weight: 0.7,
            modifier_weight: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformScore {
    pub platform: String,
    pub modifier: f64,
    pub viral_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformPrediction {
    pub base_score: f64,
    pub scores: Vec<PlatformScore>,
    pub best_platform: String,
    pub best_score: f64,
}

impl PlatformPrediction {
    pub fn score_for(&self, platform: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|entry| entry.platform.eq_ignore_ascii_case(platform))
            .map(|entry| entry.viral_score)
    }
}

#[derive(Debug, Clone)]
pub struct ViralPredictor {
    config: ViralConfig,
    profiles: Vec<PlatformProfile>,
}

impl Default for ViralPredictor {
    fn default() -> Self {
        Self::new(ViralConfig::default(), default_profiles())
    }
}

impl ViralPredictor {
    pub fn new(config: ViralConfig, profiles: Vec<PlatformProfile>) -> Self {
        Self { config, profiles }
    }

    pub fn profiles(&self) -> &[PlatformProfile] {
        &self.profiles
    }

    pub fn viral_score(&self, base_score: f64, modifier: f64) -> f64 {
        let base = if base_score.is_nan() { 0.0 } else { base_score };
        let blended = self.config.base_weight * base + self.config.modifier_weight * modifier;
        round3(clamp01(blended))
    }

    pub fn predict(&self, base_score: f64, text: &str) -> PlatformPrediction {
        let scores: Vec<PlatformScore> = self
            .profiles
            .iter()
            .map(|profile| {
                let modifier = profile.modifier(text);
                PlatformScore {
                    platform: profile.name.clone(),
                    modifier,
                    viral_score: self.viral_score(base_score, modifier),
                }
            })
            .collect();

        let mut best: Option<&PlatformScore> = None;
        for entry in &scores {
            if best.map_or(true, |current| entry.viral_score > current.viral_score) {
                best = Some(entry);
            }
        }
        let (best_platform, best_score) = best
            .map(|entry| (entry.platform.clone(), entry.viral_score))
            .unwrap_or_default();

        PlatformPrediction {
            base_score,
            scores,
            best_platform,
            best_score,
        }
    }

    /// Posting window for a platform, honoring a configured override.
    pub fn posting_time(&self, platform: &str) -> String {
        if platform.is_empty() {
            return ANYTIME.to_string();
        }
        self.profiles
            .iter()
            .find(|profile| profile.name.eq_ignore_ascii_case(platform))
            .map(PlatformProfile::posting_time)
            .unwrap_or_else(|| crate::scoring::suggest_posting_time(platform).to_string())
    }

    pub fn recommend(&self, base_a: f64, text_a: &str, base_b: f64, text_b: &str) -> Recommendation {
        let variant_a = self.predict(base_a, text_a);
        let variant_b = self.predict(base_b, text_b);
        Recommendation::from_predictions(variant_a, variant_b, self)
    }
}
