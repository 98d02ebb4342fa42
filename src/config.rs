use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::scoring::platform::default_profiles;
use crate::scoring::{PlatformProfile, ScorerConfig, ViralConfig, WeightScheme};
use crate::sentiment::SentimentConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    pub scorer: ScorerConfig,
    pub viral: ViralConfig,
    pub sentiment: SentimentConfig,
    /// Evaluated in order; the first platform wins ties.
    pub platforms: Vec<PlatformProfile>,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerConfig::default(),
            viral: ViralConfig::default(),
            sentiment: SentimentConfig::default(),
            platforms: default_profiles(),
        }
    }
}

impl CoachConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                Self::from_toml(&contents)?
            } else {
                CoachConfig::default()
            }
        } else {
            CoachConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("failed to parse config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload)
            .map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.platforms.is_empty() {
            return Err("config must list at least one platform".to_string());
        }
        if let Some(profile) = self.platforms.iter().find(|profile| profile.name.trim().is_empty()) {
            return Err(format!("platform profile has an empty name: {:?}", profile));
        }
        if self.scorer.keyword_saturation <= 0.0 {
            return Err(format!(
                "keyword_saturation must be positive: {}",
                self.scorer.keyword_saturation
            ));
        }
        let blend = self.viral.base_weight + self.viral.modifier_weight;
        if (blend - 1.0).abs() > 1e-6 {
            return Err(format!("viral weights must sum to 1.0, got {}", blend));
        }
        if self.sentiment.negative_threshold > self.sentiment.positive_threshold {
            return Err("negative_threshold must not exceed positive_threshold".to_string());
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(scheme) = env::var("COACH_WEIGHT_SCHEME") {
            match WeightScheme::from_str(&scheme) {
                Some(value) => self.scorer.weight_scheme = value,
                None => tracing::warn!(scheme = %scheme, "ignoring unknown COACH_WEIGHT_SCHEME"),
            }
        }
        if let Ok(share) = env::var("COACH_NEGATIVE_ALERT_SHARE") {
            if let Ok(value) = share.parse::<f64>() {
                self.sentiment.negative_alert_share = value;
            }
        }
        if let Ok(path) = env::var("COACH_LEXICON_PATH") {
            if !path.trim().is_empty() {
                self.sentiment.lexicon_path = Some(PathBuf::from(path));
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("COACH_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/coach.toml")))
}
