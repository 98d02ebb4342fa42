use serde::{Deserialize, Serialize};

use crate::scoring::{PlatformPrediction, ViralPredictor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub fn label(self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub winning_variant: Variant,
    pub best_platform: String,
    pub viral_score: f64,
    pub posting_time: String,
    pub reason: String,
    pub variant_a: PlatformPrediction,
    pub variant_b: PlatformPrediction,
}

impl Recommendation {
    /// Picks the variant with the higher best-platform score. Ties go to A.
    pub fn from_predictions(
        variant_a: PlatformPrediction,
        variant_b: PlatformPrediction,
        predictor: &ViralPredictor,
    ) -> Self {
        let winning_variant = if variant_a.best_score >= variant_b.best_score {
            Variant::A
        } else {
            Variant::B
        };
        let winner = match winning_variant {
            Variant::A => &variant_a,
            Variant::B => &variant_b,
        };
        let best_platform = winner.best_platform.clone();
        let viral_score = winner.best_score;
        let posting_time = predictor.posting_time(&best_platform);
        let reason = format!(
            "Variant {} wins (A={:?}, B={:?}) on {}",
            winning_variant.label(),
            variant_a.best_score,
            variant_b.best_score,
            best_platform
        );

        Self {
            winning_variant,
            best_platform,
            viral_score,
            posting_time,
            reason,
            variant_a,
            variant_b,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Recommended Variant: {}\nPlatform: {}\nPosting Time: {}\nReason: {}",
            self.winning_variant.label(),
            self.best_platform,
            self.posting_time,
            self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_reports_both_scores() {
        let predictor = ViralPredictor::default();
        let recommendation = predictor.recommend(0.2, "meh", 0.9, "Learn more about our data strategy");
        assert_eq!(recommendation.winning_variant, Variant::B);
        assert_eq!(
            recommendation.reason,
            format!(
                "Variant B wins (A={:?}, B={:?}) on {}",
                recommendation.variant_a.best_score,
                recommendation.variant_b.best_score,
                recommendation.best_platform
            )
        );
        assert_eq!(recommendation.viral_score, recommendation.variant_b.best_score);
    }

    #[test]
    fn reason_keeps_a_decimal_on_whole_scores() {
        let predictor = ViralPredictor::default();
        let recommendation = predictor.recommend(1.0, "", 0.0, "");
        assert_eq!(recommendation.reason, "Variant A wins (A=0.7, B=0.0) on Twitter");
    }

    #[test]
    fn equal_scores_favor_a() {
        let predictor = ViralPredictor::default();
        let recommendation = predictor.recommend(0.5, "same copy", 0.5, "same copy");
        assert_eq!(recommendation.winning_variant, Variant::A);
        assert_eq!(recommendation.posting_time, "5-8 PM (weekday evenings)");
    }

    #[test]
    fn summary_lists_fields() {
        let predictor = ViralPredictor::default();
        let summary = predictor.recommend(0.5, "hello there", 0.1, "").summary();
        assert!(summary.starts_with("Recommended Variant: A\nPlatform: Twitter"));
    }
}
