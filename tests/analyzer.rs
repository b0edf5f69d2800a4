mod common;

use common::{boring_story, premium_story};
use threadjuice_quality::{
    analyze_content, should_allow_extended_length, tier_for_score, ContentAnalysisInput,
    Priority, QualityTier, RecommendedAction, SocialMetrics, SuggestionCategory,
    PREMIUM_THRESHOLD, PUBLISHING_THRESHOLD, WEIGHTS,
};

fn analyze_story(story: &threadjuice_quality::Story) -> threadjuice_quality::ContentQualityMetrics {
    analyze_content(&ContentAnalysisInput::from_story(story))
}

#[test]
fn weights_sum_to_one() {
    let total = WEIGHTS.readability
        + WEIGHTS.engagement
        + WEIGHTS.narrative
        + WEIGHTS.originality
        + WEIGHTS.social_proof;
    assert!((total - 1.0).abs() < 1e-9, "Weights should sum to 1, got {total}");
}

#[test]
fn boring_update_is_basic() {
    let metrics = analyze_story(&boring_story());
    assert_eq!(metrics.quality_tier, QualityTier::Basic);
    assert!(!metrics.passes_publishing_threshold);
    assert!(
        metrics.overall_quality < 0.2,
        "Boring update should score under 0.2, got {}",
        metrics.overall_quality
    );
    assert!(!metrics.improvement_suggestions.is_empty());
    assert_eq!(metrics.recommended_action, RecommendedAction::Standard);
}

#[test]
fn boring_update_suggestions_cover_every_weak_area() {
    let metrics = analyze_story(&boring_story());
    let issues: Vec<&str> = metrics
        .improvement_suggestions
        .iter()
        .map(|s| s.issue.as_str())
        .collect();

    assert_eq!(
        issues,
        vec![
            "Poor sentence structure and flow",
            "Low viral potential and emotional hooks",
            "Missing dramatic quotes or key moments",
            "Insufficient Terry personality markers",
            "Overall quality too low (13%) for publishing",
            "Missing social proof and reactions",
            "Needs deeper analysis section",
            "Needs stronger unique perspective",
            "Limited audience signals",
        ]
    );

    let last = metrics.improvement_suggestions.last().unwrap();
    assert_eq!(last.category, SuggestionCategory::SocialProof);
    assert_eq!(last.priority, Priority::Low);

    let overall = metrics
        .improvement_suggestions
        .iter()
        .find(|s| s.issue.starts_with("Overall quality"))
        .unwrap();
    assert_eq!(overall.category, SuggestionCategory::Originality);
    assert_eq!(overall.target_score, PUBLISHING_THRESHOLD);
}

#[test]
fn suggestions_sorted_by_priority() {
    let metrics = analyze_story(&boring_story());
    let ranks: Vec<u8> = metrics
        .improvement_suggestions
        .iter()
        .map(|s| s.priority.rank())
        .collect();
    assert!(
        ranks.windows(2).all(|w| w[0] >= w[1]),
        "Suggestions should be ordered high to low, got {ranks:?}"
    );
}

#[test]
fn premium_story_scores_premium() {
    let metrics = analyze_story(&premium_story());
    assert!(
        metrics.overall_quality >= PREMIUM_THRESHOLD,
        "Premium story should reach {PREMIUM_THRESHOLD}, got {}",
        metrics.overall_quality
    );
    assert_eq!(metrics.quality_tier, QualityTier::Premium);
    assert!(metrics.passes_publishing_threshold);
    assert!(
        metrics.improvement_suggestions.is_empty(),
        "Premium story should need no fixes, got {:?}",
        metrics.improvement_suggestions
    );
    assert!((metrics.narrative_structure - 1.0).abs() < 1e-9);
    assert!((metrics.social_proof_score - 1.0).abs() < 1e-9);
}

#[test]
fn analysis_is_deterministic() {
    let story = premium_story();
    assert_eq!(analyze_story(&story), analyze_story(&story));
    let story = boring_story();
    assert_eq!(analyze_story(&story), analyze_story(&story));
}

#[test]
fn absent_metrics_score_neutral_but_zero_metrics_score_nothing() {
    let mut story = boring_story();
    story.social_metrics = None;
    let absent = analyze_story(&story);
    assert!((absent.social_proof_score - 0.3).abs() < 1e-9);

    story.social_metrics = Some(SocialMetrics::default());
    let zero = analyze_story(&story);
    assert_eq!(zero.social_proof_score, 0.0);
}

#[test]
fn empty_content_stays_finite() {
    let input = ContentAnalysisInput::default();
    let metrics = analyze_content(&input);
    for score in [
        metrics.readability_score,
        metrics.engagement_potential,
        metrics.narrative_structure,
        metrics.originality_score,
        metrics.social_proof_score,
        metrics.overall_quality,
    ] {
        assert!(score.is_finite(), "Score should be finite, got {score}");
        assert!((0.0..=1.0).contains(&score), "Score out of range: {score}");
    }
    assert_eq!(metrics.readability_score, 0.0);
    assert_eq!(metrics.narrative_structure, 0.0);
    assert!(metrics
        .improvement_suggestions
        .iter()
        .any(|s| s.issue == "Poor story structure"));
}

#[test]
fn tier_boundaries() {
    assert_eq!(tier_for_score(PREMIUM_THRESHOLD), QualityTier::Premium);
    assert_eq!(tier_for_score(0.8499), QualityTier::Standard);
    assert_eq!(tier_for_score(PUBLISHING_THRESHOLD), QualityTier::Standard);
    assert_eq!(tier_for_score(0.6999), QualityTier::Basic);
    assert_eq!(tier_for_score(0.0), QualityTier::Basic);
}

#[test]
fn long_weak_story_should_be_shortened() {
    let mut story = boring_story();
    story.content.sections[0].content = "Nothing happened today. ".repeat(100);
    let metrics = analyze_story(&story);
    assert_eq!(metrics.quality_tier, QualityTier::Basic);
    assert_eq!(metrics.recommended_action, RecommendedAction::Shorten);
}

#[test]
fn extended_length_follows_tier() {
    assert!(should_allow_extended_length(
        &ContentAnalysisInput::from_story(&premium_story())
    ));
    assert!(!should_allow_extended_length(
        &ContentAnalysisInput::from_story(&boring_story())
    ));
}

#[test]
fn bare_input_without_sections_or_metrics_is_basic() {
    let input = ContentAnalysisInput {
        title: "Boring Update".to_string(),
        content: "The team met. Notes were taken. Nothing changed.".to_string(),
        ..ContentAnalysisInput::default()
    };
    let metrics = analyze_content(&input);
    assert_eq!(metrics.quality_tier, QualityTier::Basic);
    assert!(!metrics.passes_publishing_threshold);
    assert!(!metrics.improvement_suggestions.is_empty());
    assert!((metrics.social_proof_score - 0.3).abs() < 1e-9);
}

#[test]
fn huge_metric_counts_do_not_overflow() {
    let mut story = boring_story();
    story.social_metrics = Some(SocialMetrics {
        view_count: 10,
        upvote_count: u64::MAX,
        comment_count: u64::MAX,
        share_count: u64::MAX,
        bookmark_count: u64::MAX,
    });
    let metrics = analyze_story(&story);
    assert!(
        (0.0..=1.0).contains(&metrics.social_proof_score),
        "Social proof should stay in range, got {}",
        metrics.social_proof_score
    );
    assert!((metrics.social_proof_score - 0.7).abs() < 1e-9);
}
