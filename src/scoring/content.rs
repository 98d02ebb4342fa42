use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::scoring::{clamp01, round3, word_count};
use crate::sentiment::{LexiconAnalyzer, SentimentAnalyzer};

const SHORT_COPY_WORDS: usize = 8;
const LONG_COPY_WORDS: usize = 60;

/// Which weighted sum turns the sub-scores into a quality score.
///
/// `FiveTerm` includes trend alignment and is the default; `FourTerm` drops the
/// trend term and weighs the call-to-action heavier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightScheme {
    #[default]
    FiveTerm,
    FourTerm,
}

impl WeightScheme {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "five_term" | "five" | "5" => Some(WeightScheme::FiveTerm),
            "four_term" | "four" | "4" => Some(WeightScheme::FourTerm),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeightScheme::FiveTerm => "five_term",
            WeightScheme::FourTerm => "four_term",
        }
    }

    pub fn weights(self) -> ComponentWeights {
        match self {
            WeightScheme::FiveTerm => ComponentWeights {
                sentiment: 0.30,
                keyword_density: 0.20,
                readability: 0.20,
                trend_alignment: 0.20,
                cta_strength: 0.10,
            },
            WeightScheme::FourTerm => ComponentWeights {
                sentiment: 0.30,
                keyword_density: 0.20,
                readability: 0.20,
                trend_alignment: 0.0,
                cta_strength: 0.30,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentWeights {
    pub sentiment: f64,
    pub keyword_density: f64,
    pub readability: f64,
    pub trend_alignment: f64,
    pub cta_strength: f64,
}

impl ComponentWeights {
    pub fn total(&self) -> f64 {
        self.sentiment + self.keyword_density + self.readability + self.trend_alignment + self.cta_strength
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub sentiment: f64,
    pub keyword_density: f64,
    pub readability: f64,
    pub cta_strength: f64,
    pub trend_alignment: f64,
}

impl ScoreComponents {
    pub fn weighted(&self, weights: &ComponentWeights) -> f64 {
        let mut score = 0.0;

        score += self.sentiment * weights.sentiment;
        score += self.keyword_density * weights.keyword_density;
        score += self.readability * weights.readability;
        score += self.trend_alignment * weights.trend_alignment;
        score += self.cta_strength * weights.cta_strength;

        score
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    pub weight_scheme: WeightScheme,
    pub keywords: Vec<String>,
    /// Keyword hits needed for a full density score.
    pub keyword_saturation: f64,
    pub cta_phrases: Vec<String>,
    pub trend_terms: Vec<String>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            weight_scheme: WeightScheme::FiveTerm,
            keywords: to_strings(&["smart", "innovative", "boost", "growth", "ai", "automation"]),
            keyword_saturation: 5.0,
            cta_phrases: to_strings(&[
                "buy now",
                "start today",
                "learn more",
                "explore",
                "try now",
                "link in bio",
            ]),
            trend_terms: to_strings(&["2025", "trending", "modern", "automation", "ai"]),
        }
    }
}

/// Final score for one text together with the parts it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentScore {
    pub score: f64,
    pub word_count: usize,
    pub weight_scheme: WeightScheme,
    pub components: ScoreComponents,
}

#[derive(Debug, Clone)]
pub struct ContentScorer {
    config: ScorerConfig,
    analyzer: Arc<dyn SentimentAnalyzer>,
}

impl Default for ContentScorer {
    fn default() -> Self {
        Self::new(ScorerConfig::default())
    }
}

impl ContentScorer {
    pub fn new(config: ScorerConfig) -> Self {
        Self::with_analyzer(config, Arc::new(LexiconAnalyzer::default()))
    }

    pub fn with_analyzer(config: ScorerConfig, analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        Self { config, analyzer }
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn analyzer(&self) -> &Arc<dyn SentimentAnalyzer> {
        &self.analyzer
    }

    pub fn components(&self, text: &str) -> ScoreComponents {
        ScoreComponents {
            sentiment: self.analyzer.compound(text).max(-1.0).min(1.0),
            keyword_density: keyword_density(text, &self.config.keywords, self.config.keyword_saturation),
            readability: readability(text),
            cta_strength: cta_strength(text, &self.config.cta_phrases),
            trend_alignment: trend_alignment(text, &self.config.trend_terms),
        }
    }

    /// Quality score in [0, 1], rounded to 3 decimals.
    pub fn score(&self, text: &str) -> f64 {
        self.score_detailed(text).score
    }

    pub fn score_detailed(&self, text: &str) -> ContentScore {
        let components = self.components(text);
        let weights = self.config.weight_scheme.weights();
        let score = round3(clamp01(components.weighted(&weights)));

        ContentScore {
            score,
            word_count: word_count(text),
            weight_scheme: self.config.weight_scheme,
            components,
        }
    }
}

/// Share of buzzword tokens, saturating at `saturation` hits.
pub fn keyword_density(text: &str, keywords: &[String], saturation: f64) -> f64 {
    if saturation <= 0.0 {
        return 0.0;
    }
    let lowered = text.to_lowercase();
    let hits = lowered
        .split_whitespace()
        .filter(|token| keywords.iter().any(|keyword| keyword.eq_ignore_ascii_case(token)))
        .count();
    (hits as f64 / saturation).min(1.0)
}

/// Short copy is penalized harder than long copy.
pub fn readability(text: &str) -> f64 {
    let words = word_count(text);
    if words < SHORT_COPY_WORDS {
        0.4
    } else if words > LONG_COPY_WORDS {
        0.5
    } else {
        1.0
    }
}

pub fn cta_strength(text: &str, phrases: &[String]) -> f64 {
    if contains_any(text, phrases) {
        1.0
    } else {
        0.4
    }
}

pub fn trend_alignment(text: &str, terms: &[String]) -> f64 {
    if contains_any(text, terms) {
        1.0
    } else {
        0.5
    }
}

fn contains_any(text: &str, needles: &[String]) -> bool {
    let lowered = text.to_lowercase();
    needles
        .iter()
        .filter(|needle| !needle.is_empty())
        .any(|needle| lowered.contains(&needle.to_lowercase()))
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    #[test]
    fn schemes_sum_to_one() {
        assert!((WeightScheme::FiveTerm.weights().total() - 1.0).abs() < 1e-9);
        assert!((WeightScheme::FourTerm.weights().total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn readability_tiers() {
        assert_eq!(readability(&words(5)), 0.4);
        assert_eq!(readability(&words(7)), 0.4);
        assert_eq!(readability(&words(8)), 1.0);
        assert_eq!(readability(&words(30)), 1.0);
        assert_eq!(readability(&words(60)), 1.0);
        assert_eq!(readability(&words(61)), 0.5);
        assert_eq!(readability(&words(75)), 0.5);
        assert_eq!(readability(""), 0.4);
    }

    #[test]
    fn keyword_density_counts_exact_tokens() {
        let keywords = ScorerConfig::default().keywords;
        assert_eq!(keyword_density("Smart growth", &keywords, 5.0), 0.4);
        assert_eq!(keyword_density("smartest growth!", &keywords, 5.0), 0.0);
        assert_eq!(keyword_density("AI ai Ai", &keywords, 5.0), 0.6);
        assert_eq!(keyword_density("anything", &keywords, 0.0), 0.0);
    }

    #[test]
    fn cta_and_trend_are_substring_matches() {
        let config = ScorerConfig::default();
        assert_eq!(cta_strength("LEARN MORE at our site", &config.cta_phrases), 1.0);
        assert_eq!(cta_strength("Check it out", &config.cta_phrases), 0.4);
        assert_eq!(trend_alignment("modernize your stack", &config.trend_terms), 1.0);
        assert_eq!(trend_alignment("classic style", &config.trend_terms), 0.5);
    }

    #[test]
    fn four_term_scheme_ignores_trend() {
        let config = ScorerConfig {
            weight_scheme: WeightScheme::FourTerm,
            ..ScorerConfig::default()
        };
        let scorer = ContentScorer::new(config);
        assert!((scorer.score("") - 0.2).abs() < 1e-9);
        assert!((scorer.score("trending modern 2025") - 0.2).abs() < 1e-9);
    }

    #[test]
    fn scheme_parsing() {
        assert_eq!(WeightScheme::from_str("Four-Term"), Some(WeightScheme::FourTerm));
        assert_eq!(WeightScheme::from_str("5"), Some(WeightScheme::FiveTerm));
        assert_eq!(WeightScheme::from_str("seven"), None);
    }
}
