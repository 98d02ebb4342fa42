use serde::{Deserialize, Serialize};

use crate::scoring::{round3, word_count};

pub const ANYTIME: &str = "Anytime";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    Twitter,
    Instagram,
    LinkedIn,
    YouTube,
}

impl Platform {
    /// Fixed iteration order; earlier platforms win ties.
    pub const ALL: [Platform; 4] = [
        Platform::Twitter,
        Platform::Instagram,
        Platform::LinkedIn,
        Platform::YouTube,
    ];

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "twitter" | "x" => Some(Platform::Twitter),
            "instagram" | "ig" => Some(Platform::Instagram),
            "linkedin" => Some(Platform::LinkedIn),
            "youtube" | "yt" => Some(Platform::YouTube),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Platform::Twitter => "Twitter",
            Platform::Instagram => "Instagram",
            Platform::LinkedIn => "LinkedIn",
            Platform::YouTube => "YouTube",
        }
    }

    pub fn posting_time(self) -> &'static str {
        match self {
            Platform::Twitter => "5-8 PM (weekday evenings)",
            Platform::Instagram => "6-9 PM (weekday evenings)",
            Platform::LinkedIn => "8-10 AM (weekday mornings)",
            Platform::YouTube => "5-8 PM (weekend evenings)",
        }
    }

    pub fn default_profile(self) -> PlatformProfile {
        let (length_rules, marker_rules) = match self {
            Platform::Twitter => (
                vec![LengthRule::at_most(30, 0.08), LengthRule::at_least(51, -0.05)],
                vec![
                    MarkerRule::new(&["#", "trending"], 0.05),
                    MarkerRule::new(&["!"], 0.02),
                ],
            ),
            Platform::Instagram => (
                vec![LengthRule::between(8, 60, 0.07)],
                vec![
                    MarkerRule::new(&["#"], 0.07),
                    MarkerRule::new(&["amazing", "fun", "love", "cute"], 0.04),
                ],
            ),
            Platform::LinkedIn => (
                vec![LengthRule::at_least(20, 0.08), LengthRule::at_most(9, -0.03)],
                vec![MarkerRule::new(
                    &["insight", "data", "strategy", "growth", "productivity"],
                    0.06,
                )],
            ),
            Platform::YouTube => (
                vec![LengthRule::at_least(40, 0.07)],
                vec![MarkerRule::new(&["how to", "tutorial", "guide", "watch"], 0.05)],
            ),
        };

        PlatformProfile {
            name: self.label().to_string(),
            posting_time: None,
            length_rules,
            marker_rules,
        }
    }
}

/// Canned posting window for a platform name; unknown names get "Anytime".
pub fn suggest_posting_time(platform: &str) -> &'static str {
    Platform::from_str(platform)
        .map(Platform::posting_time)
        .unwrap_or(ANYTIME)
}

pub fn default_profiles() -> Vec<PlatformProfile> {
    Platform::ALL.iter().map(|platform| platform.default_profile()).collect()
}

/// Fires when the whitespace word count falls inside `[min_words, max_words]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthRule {
    #[serde(default)]
    pub min_words: Option<usize>,
    #[serde(default)]
    pub max_words: Option<usize>,
    pub delta: f64,
}

impl LengthRule {
    pub fn at_most(max_words: usize, delta: f64) -> Self {
        Self {
            min_words: None,
            max_words: Some(max_words),
            delta,
        }
    }

    pub fn at_least(min_words: usize, delta: f64) -> Self {
        Self {
            min_words: Some(min_words),
            max_words: None,
            delta,
        }
    }

    pub fn between(min_words: usize, max_words: usize, delta: f64) -> Self {
        Self {
            min_words: Some(min_words),
            max_words: Some(max_words),
            delta,
        }
    }

    pub fn matches(&self, words: usize) -> bool {
        self.min_words.map_or(true, |min| words >= min) && self.max_words.map_or(true, |max| words <= max)
    }
}

/// Fires once when any marker is a substring of the lowercased text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRule {
    pub any_of: Vec<String>,
    pub delta: f64,
}

impl MarkerRule {
    pub fn new(markers: &[&str], delta: f64) -> Self {
        Self {
            any_of: markers.iter().map(|marker| marker.to_string()).collect(),
            delta,
        }
    }

    pub fn matches(&self, lowered: &str) -> bool {
        self.any_of
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| lowered.contains(&marker.to_lowercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformProfile {
    pub name: String,
    #[serde(default)]
    pub posting_time: Option<String>,
    #[serde(default)]
    pub length_rules: Vec<LengthRule>,
    #[serde(default)]
    pub marker_rules: Vec<MarkerRule>,
}

impl PlatformProfile {
    /// Additive platform fit, rounded to 3 decimals. May be negative.
    ///
    /// Blank text has no features to judge, so no rule fires for it.
    pub fn modifier(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let words = word_count(&lowered);
        if words == 0 {
            return 0.0;
        }
        let mut modifier = 0.0;

        for rule in &self.length_rules {
            if rule.matches(words) {
                modifier += rule.delta;
            }
        }
        for rule in &self.marker_rules {
            if rule.matches(&lowered) {
                modifier += rule.delta;
            }
        }

        round3(modifier)
    }

    pub fn posting_time(&self) -> String {
        self.posting_time
            .clone()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| suggest_posting_time(&self.name).to_string())
    }
}
