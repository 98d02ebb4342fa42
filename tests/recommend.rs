use viral_coach::coach::{AbTestCase, Coach};
use viral_coach::metrics::{MetricsInput, PerformanceMetrics};
use viral_coach::report::SentimentRecord;
use viral_coach::scoring::Variant;
use viral_coach::{predict_platforms, recommend, score_content, ContentItem};

const STRONG: &str = "Buy now! Amazing smart growth automation tool, trending in 2025";

#[test]
fn strong_copy_wins_on_every_platform() {
    let base_a = score_content(STRONG);
    let base_b = score_content("ok");
    let prediction_a = predict_platforms(base_a, STRONG);
    let prediction_b = predict_platforms(base_b, "ok");

    for (a, b) in prediction_a.scores.iter().zip(&prediction_b.scores) {
        assert_eq!(a.platform, b.platform);
        assert!(a.viral_score > b.viral_score, "{} lost on {}", STRONG, a.platform);
    }

    let recommendation = recommend(base_a, STRONG, base_b, "ok");
    assert_eq!(recommendation.winning_variant, Variant::A);
    assert_eq!(recommendation.best_platform, "Twitter");
    assert_eq!(recommendation.posting_time, "5-8 PM (weekday evenings)");
    assert!((recommendation.viral_score - prediction_a.best_score).abs() < 1e-6);
}

#[test]
fn equal_best_scores_go_to_variant_a() {
    let recommendation = recommend(0.4, "identical copy", 0.4, "identical copy");
    assert_eq!(recommendation.winning_variant, Variant::A);
    assert!(recommendation.summary().starts_with("Recommended Variant: A"));
}

#[test]
fn lower_base_can_still_win_on_platform_fit() {
    let long_form = vec!["Watch this tutorial on data strategy"; 8].join(" ");
    let recommendation = recommend(0.5, "nice", 0.48, &long_form);
    assert_eq!(recommendation.winning_variant, Variant::B);
    assert_eq!(recommendation.best_platform, "LinkedIn");
    assert_eq!(recommendation.posting_time, "8-10 AM (weekday mornings)");
}

#[test]
fn batch_runs_tests_and_predictions() {
    let coach = Coach::default();
    let cases = vec![
        AbTestCase {
            test_id: Some("T1".to_string()),
            ..AbTestCase::from_item(
                ContentItem {
                    text: STRONG.to_string(),
                    product_context: "Automation suite".to_string(),
                    content_type: "Post".to_string(),
                    tone: "Bold".to_string(),
                },
                "ok",
            )
        },
        AbTestCase::from_item(ContentItem::new(""), "skipped"),
    ];

    let report = coach.run_batch(&cases);
    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].test_id, "T1");
    assert_eq!(report.results[0].winner, Variant::A);
    assert_eq!(report.summary.a_wins, 1);
    assert_eq!(report.predictions[0].recommended_platform, "Twitter");
    assert_eq!(report.predictions[0].product_context, "Automation suite");
}

#[test]
fn sentiment_report_flags_negative_content_types() {
    let coach = Coach::default();
    let records: Vec<SentimentRecord> = serde_json::from_str(
        r#"[
            {"source": "reddit", "content_type": "post", "text": "This update is awful"},
            {"source": "reddit", "content_type": "post", "text": "I hate the new layout"},
            {"source": "youtube", "content_type": "video", "text": "Great walkthrough, thanks"}
        ]"#,
    )
    .unwrap();

    let report = coach.sentiment_report(&records);
    assert_eq!(report.summaries.len(), 2);
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].content_type, "post");
    assert!((report.summaries[1].pct_positive - 100.0).abs() < 1e-6);
}

#[test]
fn performance_metrics_from_json() {
    let input: MetricsInput = serde_json::from_str(
        r#"{
            "videos": [{"title": "Demo", "views": 400, "likes": 30, "comments": 10}],
            "discussions": [{"title": "Launch thread", "score": 12, "comments": 3}]
        }"#,
    )
    .unwrap();

    let metrics = PerformanceMetrics::from_input(&input);
    assert!((metrics.video.avg_engagement - 10.0).abs() < 1e-6);
    assert_eq!(metrics.video.top_content, "Demo (400 views)");
    assert!((metrics.discussion.avg_engagement - 15.0).abs() < 1e-6);
    assert_eq!(metrics.discussion.top_content, "Launch thread (12 upvotes)");
    assert_eq!(metrics.sentiment.avg_sentiment, 0.0);
}
