//! Batch A/B testing and platform prediction over scored content.
//!
//! `Coach` bundles the configured scorer and predictor. A batch takes pairs of
//! texts (an original and a challenger), scores both, records the winner, then
//! runs the platform predictor on each pair to produce a posting
//! recommendation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::CoachConfig;
use crate::report::{SentimentRecord, SentimentReport};
use crate::scoring::{ContentScore, ContentScorer, PlatformPrediction, Recommendation, Variant, ViralPredictor};
use crate::sentiment::SentimentConfig;
use crate::ContentItem;

/// One row of an A/B sheet: the original copy (`a_text`) and its challenger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbTestCase {
    #[serde(default)]
    pub test_id: Option<String>,
    #[serde(default)]
    pub product_context: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub a_text: String,
    #[serde(default)]
    pub b_text: String,
}

impl AbTestCase {
    /// Pairs an item with a challenger text, keeping the item's context.
    pub fn from_item(item: ContentItem, b_text: impl Into<String>) -> Self {
        Self {
            test_id: None,
            product_context: item.product_context,
            content_type: item.content_type,
            tone: item.tone,
            a_text: item.text,
            b_text: b_text.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbTestResult {
    pub test_id: String,
    pub product_context: String,
    pub content_type: String,
    pub tone: String,
    pub a_text: String,
    pub b_text: String,
    pub score_a: f64,
    pub score_b: f64,
    pub winner: Variant,
}

impl AbTestResult {
    pub fn winner_label(&self) -> String {
        format!("Variant {}", self.winner.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRow {
    pub test_id: String,
    pub product_context: String,
    pub content_type: String,
    pub tone: String,
    pub score_a: f64,
    pub score_b: f64,
    pub best_platform_a: String,
    pub best_platform_a_score: f64,
    pub best_platform_b: String,
    pub best_platform_b_score: f64,
    pub recommended_variant: Variant,
    pub recommended_platform: String,
    pub recommended_posting_time: String,
    pub recommendation_reason: String,
}

impl PredictionRow {
    fn from_recommendation(result: &AbTestResult, recommendation: &Recommendation) -> Self {
        Self {
            test_id: result.test_id.clone(),
            product_context: result.product_context.clone(),
            content_type: result.content_type.clone(),
            tone: result.tone.clone(),
            score_a: result.score_a,
            score_b: result.score_b,
            best_platform_a: recommendation.variant_a.best_platform.clone(),
            best_platform_a_score: recommendation.variant_a.best_score,
            best_platform_b: recommendation.variant_b.best_platform.clone(),
            best_platform_b_score: recommendation.variant_b.best_score,
            recommended_variant: recommendation.winning_variant,
            recommended_platform: recommendation.best_platform.clone(),
            recommended_posting_time: recommendation.posting_time.clone(),
            recommendation_reason: recommendation.reason.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbTestSummary {
    pub a_wins: usize,
    pub b_wins: usize,
}

impl AbTestSummary {
    pub fn from_results(results: &[AbTestResult]) -> Self {
        let a_wins = results.iter().filter(|result| result.winner == Variant::A).count();
        Self {
            a_wins,
            b_wins: results.len() - a_wins,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<AbTestResult>,
    pub predictions: Vec<PredictionRow>,
    pub summary: AbTestSummary,
}

#[derive(Debug, Clone)]
pub struct Coach {
    scorer: ContentScorer,
    predictor: ViralPredictor,
    sentiment: SentimentConfig,
}

impl Default for Coach {
    fn default() -> Self {
        let config = CoachConfig::default();
        Self::new(
            ContentScorer::new(config.scorer),
            ViralPredictor::new(config.viral, config.platforms),
            config.sentiment,
        )
    }
}

impl Coach {
    pub fn new(scorer: ContentScorer, predictor: ViralPredictor, sentiment: SentimentConfig) -> Self {
        Self {
            scorer,
            predictor,
            sentiment,
        }
    }

    /// Builds a coach from config, loading the sentiment lexicon file if one is set.
    pub fn from_config(config: &CoachConfig) -> Result<Self, String> {
        let analyzer = config.sentiment.analyzer()?;
        info!(
            lexicon_path = ?config.sentiment.lexicon_path,
            "sentiment lexicon ready"
        );
        Ok(Self::new(
            ContentScorer::with_analyzer(config.scorer.clone(), Arc::new(analyzer)),
            ViralPredictor::new(config.viral.clone(), config.platforms.clone()),
            config.sentiment.clone(),
        ))
    }

    pub fn scorer(&self) -> &ContentScorer {
        &self.scorer
    }

    pub fn predictor(&self) -> &ViralPredictor {
        &self.predictor
    }

    pub fn score(&self, text: &str) -> ContentScore {
        self.scorer.score_detailed(text)
    }

    /// Platform prediction; the base score is computed from `text` when absent.
    pub fn predict(&self, base_score: Option<f64>, text: &str) -> PlatformPrediction {
        let base = base_score.unwrap_or_else(|| self.scorer.score(text));
        self.predictor.predict(base, text)
    }

    pub fn recommend(
        &self,
        base_a: Option<f64>,
        text_a: &str,
        base_b: Option<f64>,
        text_b: &str,
    ) -> Recommendation {
        let base_a = base_a.unwrap_or_else(|| self.scorer.score(text_a));
        let base_b = base_b.unwrap_or_else(|| self.scorer.score(text_b));
        self.predictor.recommend(base_a, text_a, base_b, text_b)
    }

    pub fn run_ab_test(&self, cases: &[AbTestCase]) -> Vec<AbTestResult> {
        info!(cases = cases.len(), "running A/B tests");
        let mut results = Vec::with_capacity(cases.len());

        for (idx, case) in cases.iter().enumerate() {
            let original = case.a_text.trim();
            let variant = case.b_text.trim();
            if original.is_empty() || variant.is_empty() {
                warn!(index = idx, "skipping A/B case with missing text");
                continue;
            }

            let score_a = self.scorer.score(original);
            let score_b = self.scorer.score(variant);
            let winner = if score_a >= score_b { Variant::A } else { Variant::B };
            let test_id = case
                .test_id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| derive_test_id(original, variant, idx));
            debug!(test_id = %test_id, score_a, score_b, winner = winner.label(), "scored A/B case");

            results.push(AbTestResult {
                test_id,
                product_context: case.product_context.clone(),
                content_type: case.content_type.clone(),
                tone: case.tone.clone(),
                a_text: original.to_string(),
                b_text: variant.to_string(),
                score_a,
                score_b,
                winner,
            });
        }

        results
    }

    pub fn predict_results(&self, results: &[AbTestResult]) -> Vec<PredictionRow> {
        results
            .iter()
            .map(|result| {
                let recommendation =
                    self.predictor
                        .recommend(result.score_a, &result.a_text, result.score_b, &result.b_text);
                debug!(
                    test_id = %result.test_id,
                    variant = recommendation.winning_variant.label(),
                    platform = %recommendation.best_platform,
                    "prediction ready"
                );
                PredictionRow::from_recommendation(result, &recommendation)
            })
            .collect()
    }

    pub fn run_batch(&self, cases: &[AbTestCase]) -> BatchReport {
        let results = self.run_ab_test(cases);
        let predictions = self.predict_results(&results);
        let summary = AbTestSummary::from_results(&results);
        info!(
            tests = results.len(),
            a_wins = summary.a_wins,
            b_wins = summary.b_wins,
            "A/B batch complete"
        );
        BatchReport {
            results,
            predictions,
            summary,
        }
    }

    pub fn sentiment_report(&self, records: &[SentimentRecord]) -> SentimentReport {
        SentimentReport::build(self.scorer.analyzer().as_ref(), &self.sentiment, records)
    }
}

fn derive_test_id(text_a: &str, text_b: &str, idx: usize) -> String {
    let payload = format!("{}\u{1f}{}", text_a, text_b);
    format!("T{:x}-{}", stable_hash64(&payload), idx)
}

fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
