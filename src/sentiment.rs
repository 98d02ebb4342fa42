//! Lexicon-based sentiment analysis.
//!
//! `LexiconAnalyzer` follows the VADER approach: every token found in a valence
//! lexicon contributes its rating (on a -4..4 scale), adjusted by preceding
//! boosters, negations, ALL-CAPS emphasis and a "but" contrast rule. The summed
//! valence is squashed into a compound score in [-1, 1].
//!
//! The built-in lexicon covers common marketing and review vocabulary. The full
//! VADER lexicon (`vader_lexicon.txt`) can be loaded on top of it through
//! `sentiment.lexicon_path`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

use crate::round_to;

const BOOST_INCREMENT: f64 = 0.293;
const BOOST_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;
const EXCLAMATION_WEIGHT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const BOOSTER_DAMPING: [f64; 3] = [1.0, 0.95, 0.9];

const LEXICON: &[(&str, f64)] = &[
    ("accomplish", 1.8),
    ("achieve", 1.6),
    ("admire", 2.1),
    ("adorable", 2.2),
    ("advantage", 1.0),
    ("affordable", 1.3),
    ("agree", 1.5),
    ("amazed", 2.2),
    ("amazing", 2.8),
    ("amused", 1.6),
    ("angry", -2.3),
    ("annoy", -1.9),
    ("annoyed", -1.6),
    ("annoying", -1.7),
    ("anxious", -1.0),
    ("appreciate", 1.7),
    ("appreciated", 2.3),
    ("ashamed", -2.1),
    ("attractive", 1.9),
    ("awesome", 3.1),
    ("awful", -2.0),
    ("bad", -2.5),
    ("bargain", 0.8),
    ("beautiful", 2.9),
    ("benefit", 1.5),
    ("best", 3.2),
    ("better", 1.9),
    ("bless", 1.8),
    ("bonus", 2.5),
    ("boost", 1.7),
    ("bored", -1.1),
    ("boring", -1.3),
    ("bright", 1.9),
    ("brilliant", 2.8),
    ("broke", -1.8),
    ("broken", -2.1),
    ("bug", -1.2),
    ("calm", 1.3),
    ("care", 2.2),
    ("celebrate", 2.7),
    ("charming", 2.4),
    ("cheap", -0.2),
    ("cheer", 2.3),
    ("cheerful", 2.5),
    ("clever", 2.0),
    ("comfortable", 2.0),
    ("complain", -1.5),
    ("confident", 2.2),
    ("confused", -1.3),
    ("confusing", -1.4),
    ("convenient", 1.8),
    ("cool", 1.3),
    ("crap", -1.6),
    ("crash", -1.7),
    ("crashes", -1.7),
    ("creative", 1.9),
    ("cry", -2.1),
    ("cute", 2.0),
    ("damage", -2.2),
    ("danger", -2.4),
    ("dead", -3.3),
    ("delay", -1.3),
    ("delicious", 2.7),
    ("delight", 2.9),
    ("delighted", 3.0),
    ("depressed", -2.3),
    ("difficult", -1.5),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disaster", -3.1),
    ("dislike", -1.6),
    ("dumb", -2.3),
    ("eager", 1.5),
    ("easy", 1.9),
    ("effective", 2.1),
    ("efficient", 1.8),
    ("elegant", 2.1),
    ("empower", 1.8),
    ("enjoy", 2.2),
    ("enjoyable", 1.9),
    ("enjoyed", 2.3),
    ("error", -1.7),
    ("excellent", 2.7),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fabulous", 2.4),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failing", -2.3),
    ("fails", -1.8),
    ("failure", -2.3),
    ("fake", -2.1),
    ("fantastic", 2.6),
    ("fast", 0.9),
    ("fault", -2.1),
    ("favorite", 2.0),
    ("fear", -2.2),
    ("fine", 0.8),
    ("fix", 1.0),
    ("flawless", 2.3),
    ("fraud", -2.8),
    ("free", 2.3),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("frustrated", -2.0),
    ("frustrating", -1.9),
    ("fun", 2.3),
    ("funny", 1.9),
    ("genius", 1.9),
    ("gift", 1.9),
    ("glad", 2.0),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("great", 3.1),
    ("greatest", 3.2),
    ("growth", 1.6),
    ("guarantee", 1.0),
    ("haha", 2.0),
    ("happy", 2.7),
    ("hate", -2.7),
    ("hated", -3.2),
    ("hates", -1.9),
    ("helpful", 1.8),
    ("hero", 2.6),
    ("hilarious", 1.7),
    ("honest", 2.3),
    ("hope", 1.9),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("ideal", 2.4),
    ("impressive", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 1.6),
    ("incredible", 3.4),
    ("innovative", 1.9),
    ("inspired", 2.2),
    ("inspiring", 2.4),
    ("interesting", 1.7),
    ("issue", -0.9),
    ("joy", 2.8),
    ("kind", 2.4),
    ("lame", -1.8),
    ("like", 2.0),
    ("liked", 1.8),
    ("likes", 1.8),
    ("lol", 1.8),
    ("lose", -1.7),
    ("loss", -1.3),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loves", 2.7),
    ("loving", 2.9),
    ("lucky", 1.8),
    ("masterpiece", 3.1),
    ("mess", -1.5),
    ("miserable", -2.2),
    ("miss", -0.6),
    ("nasty", -2.6),
    ("nice", 1.8),
    ("ok", 1.2),
    ("okay", 0.9),
    ("opportunity", 1.8),
    ("outstanding", 3.0),
    ("pain", -2.3),
    ("painful", -1.9),
    ("pathetic", -2.7),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("pleasure", 2.7),
    ("poor", -2.1),
    ("popular", 1.8),
    ("powerful", 1.8),
    ("problem", -1.7),
    ("problems", -1.7),
    ("profit", 1.9),
    ("proud", 2.1),
    ("quality", 1.1),
    ("recommend", 1.5),
    ("regret", -1.8),
    ("relax", 1.9),
    ("reliable", 1.8),
    ("relief", 2.1),
    ("reward", 2.0),
    ("rewarding", 2.4),
    ("risk", -1.1),
    ("ruin", -2.8),
    ("sad", -2.1),
    ("safe", 1.9),
    ("satisfied", 1.8),
    ("save", 2.2),
    ("scam", -2.7),
    ("scared", -1.9),
    ("secure", 1.4),
    ("shame", -2.1),
    ("simple", 0.7),
    ("slow", -0.8),
    ("smart", 1.7),
    ("smile", 1.5),
    ("smooth", 1.2),
    ("solid", 1.3),
    ("solve", 0.8),
    ("sorry", -0.3),
    ("special", 1.7),
    ("stress", -1.8),
    ("stressful", -2.3),
    ("strong", 2.3),
    ("stuck", -1.0),
    ("stunning", 2.8),
    ("stupid", -2.4),
    ("success", 2.7),
    ("successful", 2.8),
    ("suck", -1.5),
    ("sucks", -1.5),
    ("super", 2.9),
    ("superb", 3.1),
    ("support", 1.7),
    ("sure", 1.3),
    ("surprise", 1.1),
    ("sweet", 2.0),
    ("terrible", -2.1),
    ("thank", 1.5),
    ("thankful", 2.7),
    ("thanks", 1.9),
    ("thrilled", 1.9),
    ("toxic", -2.4),
    ("trouble", -1.7),
    ("trust", 2.3),
    ("ugly", -2.3),
    ("unfair", -2.1),
    ("unhappy", -1.8),
    ("upset", -1.6),
    ("useful", 1.9),
    ("useless", -1.8),
    ("valuable", 2.1),
    ("victory", 2.8),
    ("waste", -1.8),
    ("weak", -1.9),
    ("win", 2.8),
    ("winner", 2.8),
    ("winning", 2.4),
    ("wise", 1.8),
    ("wonderful", 2.7),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worth", 0.9),
    ("wow", 2.8),
    ("wrong", -2.1),
    ("wtf", -2.8),
    ("yay", 2.4),
];

const BOOSTERS_UP: &[&str] = &[
    "absolutely",
    "completely",
    "deeply",
    "enormously",
    "especially",
    "exceptionally",
    "extremely",
    "highly",
    "hugely",
    "incredibly",
    "most",
    "particularly",
    "purely",
    "really",
    "remarkably",
    "so",
    "substantially",
    "thoroughly",
    "totally",
    "tremendously",
    "truly",
    "unbelievably",
    "very",
];

const BOOSTERS_DOWN: &[&str] = &[
    "almost",
    "barely",
    "hardly",
    "less",
    "little",
    "marginally",
    "occasionally",
    "partly",
    "scarcely",
    "slightly",
    "somewhat",
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no", "nobody", "none",
    "nope", "nor", "not", "nothing", "nowhere", "shant", "shouldnt", "wasnt", "werent", "without",
    "wont", "wouldnt",
];

/// VADER-style polarity breakdown for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl PolarityScores {
    pub fn neutral() -> Self {
        Self {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound: 0.0,
        }
    }
}

pub trait SentimentAnalyzer: Debug + Send + Sync {
    fn polarity(&self, text: &str) -> PolarityScores;

    /// Compound polarity in [-1, 1].
    fn compound(&self, text: &str) -> f64 {
        self.polarity(text).compound
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn label(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Negative => "negative",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "positive" | "pos" => Some(SentimentLabel::Positive),
            "neutral" | "neu" => Some(SentimentLabel::Neutral),
            "negative" | "neg" => Some(SentimentLabel::Negative),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentConfig {
    pub positive_threshold: f64,
    pub negative_threshold: f64,
    /// Share of negative items in a content type above which an alert fires.
    pub negative_alert_share: f64,
    /// VADER-format lexicon merged over the built-in one.
    pub lexicon_path: Option<PathBuf>,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            positive_threshold: 0.05,
            negative_threshold: -0.05,
            negative_alert_share: 0.30,
            lexicon_path: None,
        }
    }
}

impl SentimentConfig {
    pub fn analyzer(&self) -> Result<LexiconAnalyzer, String> {
        match self.lexicon_path.as_deref() {
            Some(path) => LexiconAnalyzer::from_vader_file(path),
            None => Ok(LexiconAnalyzer::default()),
        }
    }

    pub fn label(&self, compound: f64) -> SentimentLabel {
        if compound >= self.positive_threshold {
            SentimentLabel::Positive
        } else if compound <= self.negative_threshold {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    lexicon: HashMap<String, f64>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        let lexicon = LEXICON
            .iter()
            .map(|(word, valence)| (word.to_string(), *valence))
            .collect();
        Self { lexicon }
    }
}

impl LexiconAnalyzer {
    /// Adds or replaces lexicon entries. Words are matched lowercase.
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        for (word, valence) in entries {
            self.lexicon.insert(word.into().to_lowercase(), valence);
        }
        self
    }

    pub fn from_vader_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|err| format!("failed to read lexicon {}: {}", path.display(), err))?;
        Self::default().with_vader_lexicon(&contents)
    }

    /// Merges `word<TAB>mean<TAB>...` lines; only the first two columns are used.
    pub fn with_vader_lexicon(mut self, contents: &str) -> Result<Self, String> {
        for (idx, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let word = fields.next().map(str::trim).unwrap_or_default();
            let valence = fields
                .next()
                .ok_or_else(|| format!("failed to parse lexicon line {}: missing valence", idx + 1))?
                .trim()
                .parse::<f64>()
                .map_err(|err| format!("failed to parse lexicon line {}: {}", idx + 1, err))?;
            if word.is_empty() {
                continue;
            }
            self.lexicon.insert(word.to_lowercase(), valence);
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.lexicon.get(&word.to_lowercase()).copied()
    }

    fn token_valences(&self, tokens: &[Token]) -> Vec<f64> {
        let caps_differential = has_caps_differential(tokens);
        let mut sentiments = Vec::with_capacity(tokens.len());

        for (idx, token) in tokens.iter().enumerate() {
            if booster_scalar(&token.lower).is_some() {
                sentiments.push(0.0);
                continue;
            }
            let Some(mut valence) = self.lexicon.get(&token.lower).copied() else {
                sentiments.push(0.0);
                continue;
            };

            if caps_differential && token.is_upper {
                valence += CAPS_INCREMENT.copysign(valence);
            }

            for (back, damping) in BOOSTER_DAMPING.iter().enumerate() {
                let Some(prev_idx) = idx.checked_sub(back + 1) else {
                    break;
                };
                let prev = &tokens[prev_idx];
                if let Some(mut scalar) = booster_scalar(&prev.lower) {
                    if caps_differential && prev.is_upper {
                        scalar += CAPS_INCREMENT.copysign(scalar);
                    }
                    if valence < 0.0 {
                        scalar = -scalar;
                    }
                    valence += scalar * damping;
                }
            }

            let window = &tokens[idx.saturating_sub(3)..idx];
            if window.iter().any(is_negation) {
                valence *= NEGATION_SCALAR;
            }

            sentiments.push(valence);
        }

        if let Some(but_idx) = tokens.iter().position(|token| token.lower == "but") {
            for (idx, sentiment) in sentiments.iter_mut().enumerate() {
                if idx < but_idx {
                    *sentiment *= 0.5;
                } else if idx > but_idx {
                    *sentiment *= 1.5;
                }
            }
        }

        sentiments
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn polarity(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::neutral();
        }

        let sentiments = self.token_valences(&tokens);
        let sum: f64 = sentiments.iter().sum();
        let emphasis = punctuation_emphasis(text);

        let compound = if sum > 0.0 {
            normalize(sum + emphasis)
        } else if sum < 0.0 {
            normalize(sum - emphasis)
        } else {
            0.0
        };

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for sentiment in &sentiments {
            if *sentiment > 0.0 {
                pos_sum += sentiment + 1.0;
            } else if *sentiment < 0.0 {
                neg_sum += sentiment - 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        if total <= 0.0 {
            return PolarityScores::neutral();
        }

        PolarityScores {
            neg: round_to((neg_sum / total).abs(), 3),
            neu: round_to(neu_count / total, 3),
            pos: round_to((pos_sum / total).abs(), 3),
            compound: round_to(compound, 4),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    lower: String,
    is_upper: bool,
}

fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .filter_map(|raw| {
            let word = raw.trim_matches(|c: char| !c.is_alphanumeric());
            if word.chars().count() <= 1 {
                return None;
            }
            let has_letters = word.chars().any(|c| c.is_alphabetic());
            let is_upper = has_letters && !word.chars().any(|c| c.is_lowercase());
            let lower: String = word
                .to_lowercase()
                .chars()
                .filter(|c| *c != '\'' && *c != '\u{2019}')
                .collect();
            Some(Token { lower, is_upper })
        })
        .collect()
}

fn has_caps_differential(tokens: &[Token]) -> bool {
    let upper = tokens.iter().filter(|token| token.is_upper).count();
    upper > 0 && upper < tokens.len()
}

fn booster_scalar(word: &str) -> Option<f64> {
    if BOOSTERS_UP.contains(&word) {
        Some(BOOST_INCREMENT)
    } else if BOOSTERS_DOWN.contains(&word) {
        Some(BOOST_DECREMENT)
    } else {
        None
    }
}

fn is_negation(token: &Token) -> bool {
    NEGATIONS.contains(&token.lower.as_str())
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.chars().filter(|c| *c == '!').count().min(MAX_EXCLAMATIONS);
    let questions = text.chars().filter(|c| *c == '?').count();
    let question_emphasis = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * 0.18,
        _ => 0.96,
    };
    exclamations as f64 * EXCLAMATION_WEIGHT + question_emphasis
}

fn normalize(score: f64) -> f64 {
    let normalized = score / (score * score + NORMALIZE_ALPHA).sqrt();
    normalized.clamp(-1.0, 1.0)
}
