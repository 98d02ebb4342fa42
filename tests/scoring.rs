use viral_coach::config::CoachConfig;
use viral_coach::scoring::content::{keyword_density, readability};
use viral_coach::scoring::{ContentScorer, ScorerConfig, WeightScheme};
use viral_coach::{predict_platforms, score_content};

fn words(count: usize) -> String {
    vec!["lorem"; count].join(" ")
}

#[test]
fn scores_stay_in_unit_interval() {
    let samples = [
        "",
        "ok",
        "This is the worst, most terrible, awful product. Never again!!!",
        "Buy now! Amazing smart growth automation tool, trending in 2025",
        &words(120),
    ];
    for text in samples {
        let score = score_content(text);
        assert!((0.0..=1.0).contains(&score), "{} out of range for {:?}", score, text);
    }
}

#[test]
fn empty_text_scores_fixed_floor() {
    assert!((score_content("") - 0.22).abs() < 1e-6);
    assert!((score_content("   ") - 0.22).abs() < 1e-6);

    let four_term = ContentScorer::new(ScorerConfig {
        weight_scheme: WeightScheme::FourTerm,
        ..ScorerConfig::default()
    });
    assert!((four_term.score("") - 0.20).abs() < 1e-6);
}

#[test]
fn readability_tiers_by_word_count() {
    assert!((readability(&words(5)) - 0.4).abs() < 1e-6);
    assert!((readability(&words(30)) - 1.0).abs() < 1e-6);
    assert!((readability(&words(75)) - 0.5).abs() < 1e-6);
}

#[test]
fn keyword_density_saturates() {
    let keywords = ScorerConfig::default().keywords;
    let repeated = vec!["growth"; 10].join(" ");
    assert!((keyword_density(&repeated, &keywords, 5.0) - 1.0).abs() < 1e-6);
}

#[test]
fn stronger_copy_outscores_weak_copy() {
    let strong = score_content("Buy now! Amazing smart growth automation tool, trending in 2025");
    let weak = score_content("ok");
    assert!(strong >= 0.62, "strong copy scored {}", strong);
    assert!(weak <= 0.31, "weak copy scored {}", weak);
}

#[test]
fn detailed_score_matches_plain_score() {
    let scorer = ContentScorer::default();
    let text = "Learn more about our innovative AI planner";
    let detailed = scorer.score_detailed(text);
    assert!((detailed.score - scorer.score(text)).abs() < 1e-6);
    assert_eq!(detailed.word_count, 7);
    assert!((detailed.components.cta_strength - 1.0).abs() < 1e-6);
    assert!((detailed.components.trend_alignment - 1.0).abs() < 1e-6);
}

#[test]
fn four_platforms_in_order_and_bounded() {
    let prediction = predict_platforms(0.5, "Watch this guide to boost growth #marketing");
    assert_eq!(prediction.scores.len(), 4);
    let names: Vec<&str> = prediction.scores.iter().map(|s| s.platform.as_str()).collect();
    assert_eq!(names, vec!["Twitter", "Instagram", "LinkedIn", "YouTube"]);
    for entry in &prediction.scores {
        assert!((0.0..=1.0).contains(&entry.viral_score));
    }
}

#[test]
fn full_base_with_empty_text_is_point_seven_everywhere() {
    let prediction = predict_platforms(1.0, "");
    for entry in &prediction.scores {
        assert!((entry.viral_score - 0.7).abs() < 1e-6, "{:?}", entry);
    }
    assert_eq!(prediction.best_platform, "Twitter");
}

#[test]
fn twitter_modifier_counts_each_marker_group_once() {
    let prediction = predict_platforms(0.0, "Great deal! #trending");
    let twitter = &prediction.scores[0];
    assert_eq!(twitter.platform, "Twitter");
    assert!((twitter.modifier - 0.15).abs() < 1e-6);
    assert!((twitter.viral_score - 0.045).abs() < 1e-6);
}

#[test]
fn configured_scheme_changes_scores() {
    let config = CoachConfig::from_toml("[scorer]\nweight_scheme = \"four_term\"\n").unwrap();
    let scorer = ContentScorer::new(config.scorer);
    let text = "trending modern 2025";
    assert!((scorer.score(text) - 0.2).abs() < 1e-6);
    assert!((score_content(text) - 0.32).abs() < 1e-6);
}
