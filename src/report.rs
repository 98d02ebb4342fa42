use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::round_to;
use crate::sentiment::{PolarityScores, SentimentAnalyzer, SentimentConfig, SentimentLabel};

/// One scraped item (video, post, comment, article) to run sentiment over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentRecord {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedRecord {
    #[serde(flatten)]
    pub record: SentimentRecord,
    #[serde(flatten)]
    pub scores: PolarityScores,
    pub label: SentimentLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeSummary {
    pub content_type: String,
    pub posts: usize,
    pub avg_compound: f64,
    pub avg_positive: f64,
    pub avg_negative: f64,
    pub pct_positive: f64,
    pub pct_neutral: f64,
    pub pct_negative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegativeAlert {
    pub content_type: String,
    pub pct_negative: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentReport {
    pub records: Vec<AnalyzedRecord>,
    pub summaries: Vec<ContentTypeSummary>,
    pub alerts: Vec<NegativeAlert>,
}

impl SentimentReport {
    pub fn build(
        analyzer: &dyn SentimentAnalyzer,
        config: &SentimentConfig,
        records: &[SentimentRecord],
    ) -> Self {
        let records = analyze(analyzer, config, records);
        let summaries = summarize(&records);
        let alerts = negative_alerts(&summaries, config.negative_alert_share);
        if !alerts.is_empty() {
            tracing::warn!(alerts = alerts.len(), "negative sentiment spike detected");
        }
        Self {
            records,
            summaries,
            alerts,
        }
    }

    /// Plain-text digest, one block per content type.
    pub fn digest(&self) -> String {
        let mut lines = vec!["Sentiment Summary".to_string()];
        for summary in &self.summaries {
            lines.push(format!("- {}", summary.content_type));
            lines.push(format!("   Posts: {}", summary.posts));
            lines.push(format!("   Avg Sentiment: {:.2}", summary.avg_compound));
            lines.push(format!("   Positive: {:.0}%", summary.pct_positive));
            lines.push(format!("   Negative: {:.0}%", summary.pct_negative));
        }
        for alert in &self.alerts {
            lines.push(format!(
                "Negative sentiment spike: {} at {:.1}% negative",
                alert.content_type, alert.pct_negative
            ));
        }
        lines.join("\n")
    }
}

pub fn analyze(
    analyzer: &dyn SentimentAnalyzer,
    config: &SentimentConfig,
    records: &[SentimentRecord],
) -> Vec<AnalyzedRecord> {
    records
        .iter()
        .map(|record| {
            let scores = if record.text.trim().is_empty() {
                PolarityScores::neutral()
            } else {
                analyzer.polarity(&record.text)
            };
            AnalyzedRecord {
                record: record.clone(),
                scores,
                label: config.label(scores.compound),
            }
        })
        .collect()
}

/// Per content type averages and label shares, sorted by content type.
pub fn summarize(records: &[AnalyzedRecord]) -> Vec<ContentTypeSummary> {
    let mut groups: BTreeMap<&str, Vec<&AnalyzedRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.record.content_type.as_str())
            .or_default()
            .push(record);
    }

    groups
        .into_iter()
        .map(|(content_type, group)| {
            let posts = group.len() as f64;
            let share = |label: SentimentLabel| {
                let count = group.iter().filter(|r| r.label == label).count() as f64;
                round_to(count / posts * 100.0, 1)
            };

            ContentTypeSummary {
                content_type: content_type.to_string(),
                posts: group.len(),
                avg_compound: round_to(mean(&group, |r| r.scores.compound), 3),
                avg_positive: round_to(mean(&group, |r| r.scores.pos), 3),
                avg_negative: round_to(mean(&group, |r| r.scores.neg), 3),
                pct_positive: share(SentimentLabel::Positive),
                pct_neutral: share(SentimentLabel::Neutral),
                pct_negative: share(SentimentLabel::Negative),
            }
        })
        .collect()
}

fn mean(group: &[&AnalyzedRecord], value: impl Fn(&AnalyzedRecord) -> f64) -> f64 {
    group.iter().map(|record| value(record)).sum::<f64>() / group.len() as f64
}

/// Content types whose negative share is strictly above `share` (a fraction).
pub fn negative_alerts(summaries: &[ContentTypeSummary], share: f64) -> Vec<NegativeAlert> {
    summaries
        .iter()
        .filter(|summary| summary.pct_negative / 100.0 > share)
        .map(|summary| NegativeAlert {
            content_type: summary.content_type.clone(),
            pct_negative: summary.pct_negative,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::LexiconAnalyzer;

    fn record(content_type: &str, text: &str) -> SentimentRecord {
        SentimentRecord {
            source: "test".to_string(),
            content_type: content_type.to_string(),
            text: text.to_string(),
            url: None,
            topic: None,
        }
    }

    fn build(records: &[SentimentRecord]) -> SentimentReport {
        SentimentReport::build(&LexiconAnalyzer::default(), &SentimentConfig::default(), records)
    }

    #[test]
    fn groups_are_sorted_and_counted() {
        let report = build(&[
            record("video", "I love this channel"),
            record("comment", "terrible advice, total waste"),
            record("video", "plain upload schedule"),
            record("comment", "great tips"),
        ]);
        let types: Vec<&str> = report.summaries.iter().map(|s| s.content_type.as_str()).collect();
        assert_eq!(types, vec!["comment", "video"]);

        let video = &report.summaries[1];
        assert_eq!(video.posts, 2);
        assert_eq!(video.pct_positive, 50.0);
        assert_eq!(video.pct_neutral, 50.0);
        assert_eq!(video.pct_negative, 0.0);
    }

    #[test]
    fn blank_text_is_neutral() {
        let report = build(&[record("post", "   ")]);
        assert_eq!(report.records[0].label, SentimentLabel::Neutral);
        assert_eq!(report.records[0].scores, PolarityScores::neutral());
    }

    #[test]
    fn alerts_fire_above_share() {
        let report = build(&[
            record("comment", "awful product"),
            record("comment", "bad support"),
            record("comment", "nice colors"),
            record("article", "great launch"),
        ]);
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].content_type, "comment");
        assert!((report.alerts[0].pct_negative - 66.7).abs() < 1e-9);
        assert!(report.digest().contains("Negative sentiment spike: comment"));
    }

    #[test]
    fn alert_threshold_is_strict() {
        let summaries = vec![ContentTypeSummary {
            content_type: "post".to_string(),
            posts: 10,
            avg_compound: 0.0,
            avg_positive: 0.0,
            avg_negative: 0.0,
            pct_positive: 70.0,
            pct_neutral: 0.0,
            pct_negative: 30.0,
        }];
        assert!(negative_alerts(&summaries, 0.30).is_empty());
        assert_eq!(negative_alerts(&summaries, 0.25).len(), 1);
    }
}
