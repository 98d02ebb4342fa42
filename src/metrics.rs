use serde::{Deserialize, Serialize};

use crate::round_to;
use crate::sentiment::SentimentLabel;

const NO_DATA: &str = "No Data";
const NO_VALID_DATA: &str = "No Valid Data";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStats {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub views: f64,
    #[serde(default)]
    pub likes: f64,
    #[serde(default)]
    pub comments: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussionStats {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "score")]
    pub upvotes: f64,
    #[serde(default)]
    pub comments: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentStat {
    pub compound: f64,
    #[serde(default)]
    pub label: Option<SentimentLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementSummary {
    pub avg_engagement: f64,
    pub top_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentMetrics {
    pub avg_sentiment: f64,
    pub pos_pct: f64,
    pub neg_pct: f64,
    pub neu_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub video: EngagementSummary,
    pub discussion: EngagementSummary,
    pub sentiment: SentimentMetrics,
}

/// File layout accepted by the `metrics` command.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsInput {
    pub videos: Vec<VideoStats>,
    pub discussions: Vec<DiscussionStats>,
    pub sentiment: Vec<SentimentStat>,
}

impl PerformanceMetrics {
    pub fn from_input(input: &MetricsInput) -> Self {
        Self::compute(&input.videos, &input.discussions, &input.sentiment)
    }

    pub fn compute(videos: &[VideoStats], discussions: &[DiscussionStats], sentiment: &[SentimentStat]) -> Self {
        Self {
            video: video_engagement(videos),
            discussion: discussion_engagement(discussions),
            sentiment: sentiment_metrics(sentiment),
        }
    }
}

/// Average (likes + comments) / views as a percentage, over rows with views.
pub fn video_engagement(videos: &[VideoStats]) -> EngagementSummary {
    if videos.is_empty() {
        return empty_summary(NO_DATA);
    }
    let valid: Vec<&VideoStats> = videos.iter().filter(|video| video.views > 0.0).collect();
    if valid.is_empty() {
        return empty_summary(NO_VALID_DATA);
    }

    let total: f64 = valid
        .iter()
        .map(|video| (video.likes + video.comments) / video.views * 100.0)
        .sum();
    let top = first_max_by(&valid, |video| video.views)
        .map(|video| format!("{} ({} views)", title_or_unknown(&video.title), video.views as u64))
        .unwrap_or_else(|| NO_VALID_DATA.to_string());

    EngagementSummary {
        avg_engagement: round_to(total / valid.len() as f64, 2),
        top_content: top,
    }
}

/// Average upvotes + comments over rows with at least one upvote.
pub fn discussion_engagement(posts: &[DiscussionStats]) -> EngagementSummary {
    if posts.is_empty() {
        return empty_summary(NO_DATA);
    }
    let valid: Vec<&DiscussionStats> = posts.iter().filter(|post| post.upvotes > 0.0).collect();
    if valid.is_empty() {
        return empty_summary(NO_VALID_DATA);
    }

    let total: f64 = valid.iter().map(|post| post.upvotes + post.comments).sum();
    let top = first_max_by(&valid, |post| post.upvotes)
        .map(|post| format!("{} ({} upvotes)", title_or_unknown(&post.title), post.upvotes as u64))
        .unwrap_or_else(|| NO_VALID_DATA.to_string());

    EngagementSummary {
        avg_engagement: round_to(total / valid.len() as f64, 2),
        top_content: top,
    }
}

pub fn sentiment_metrics(stats: &[SentimentStat]) -> SentimentMetrics {
    if stats.is_empty() {
        return SentimentMetrics {
            avg_sentiment: 0.0,
            pos_pct: 0.0,
            neg_pct: 0.0,
            neu_pct: 0.0,
        };
    }

    let count = stats.len() as f64;
    let avg = stats
        .iter()
        .map(|stat| if stat.compound.is_nan() { 0.0 } else { stat.compound })
        .sum::<f64>()
        / count;
    let pct = |label: SentimentLabel| {
        let hits = stats.iter().filter(|stat| stat.label == Some(label)).count() as f64;
        round_to(hits / count * 100.0, 1)
    };

    SentimentMetrics {
        avg_sentiment: round_to(avg, 3),
        pos_pct: pct(SentimentLabel::Positive),
        neg_pct: pct(SentimentLabel::Negative),
        neu_pct: pct(SentimentLabel::Neutral),
    }
}

/// Highest row by `key`; the earliest row wins ties.
fn first_max_by<'a, T>(rows: &[&'a T], key: impl Fn(&T) -> f64) -> Option<&'a T> {
    rows.iter().copied().reduce(|best, row| if key(row) > key(best) { row } else { best })
}

fn empty_summary(reason: &str) -> EngagementSummary {
    EngagementSummary {
        avg_engagement: 0.0,
        top_content: reason.to_string(),
    }
}

fn title_or_unknown(title: &str) -> &str {
    if title.trim().is_empty() {
        "Unknown"
    } else {
        title
    }
}
