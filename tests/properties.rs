use proptest::prelude::*;
use threadjuice_quality::optimizer::optimize_section_order;
use threadjuice_quality::{
    analyze_content, tier_for_score, ContentAnalysisInput, QualityTier, Section, SocialMetrics,
    PREMIUM_THRESHOLD, PUBLISHING_THRESHOLD, WEIGHTS,
};

const SECTION_TYPES: &[&str] = &[
    "describe-1",
    "describe-2",
    "image",
    "quotes",
    "twitter-quote",
    "comments-1",
    "comments-2",
    "discussion",
    "outro",
    "poll",
];

fn section_strategy() -> impl Strategy<Value = Section> {
    (prop::sample::select(SECTION_TYPES), "[a-zA-Z .,!?'\n]{0,120}")
        .prop_map(|(kind, body)| Section::new(kind, body))
}

fn metrics_strategy() -> impl Strategy<Value = Option<SocialMetrics>> {
    prop::option::of(
        (0u64..50_000, 0u64..5_000, 0u64..5_000, 0u64..5_000, 0u64..5_000).prop_map(
            |(view_count, upvote_count, comment_count, share_count, bookmark_count)| {
                SocialMetrics {
                    view_count,
                    upvote_count,
                    comment_count,
                    share_count,
                    bookmark_count,
                }
            },
        ),
    )
}

proptest! {
    #[test]
    fn scores_stay_in_unit_range(
        title in "[a-zA-Z ]{0,80}",
        sections in prop::collection::vec(section_strategy(), 0..8),
        social_metrics in metrics_strategy(),
        source in prop::option::of(prop::sample::select(vec!["twitter_drama", "reddit", "blog"])),
    ) {
        let content = sections
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let input = ContentAnalysisInput {
            title,
            content,
            sections: Some(sections),
            social_metrics,
            source: source.map(String::from),
            category: Some("Food Wars".to_string()),
        };
        let m = analyze_content(&input);

        for score in [
            m.readability_score,
            m.engagement_potential,
            m.narrative_structure,
            m.originality_score,
            m.social_proof_score,
            m.overall_quality,
        ] {
            prop_assert!((0.0..=1.0).contains(&score), "score out of range: {}", score);
        }
        let blended = m.readability_score * WEIGHTS.readability
            + m.engagement_potential * WEIGHTS.engagement
            + m.narrative_structure * WEIGHTS.narrative
            + m.originality_score * WEIGHTS.originality
            + m.social_proof_score * WEIGHTS.social_proof;
        prop_assert!((blended - m.overall_quality).abs() < 1e-9);
        prop_assert_eq!(m.quality_tier, tier_for_score(m.overall_quality));
        prop_assert_eq!(m.passes_publishing_threshold, m.overall_quality >= PUBLISHING_THRESHOLD);
    }

    #[test]
    fn tier_matches_thresholds(score in 0.0f64..=1.0) {
        let expected = if score >= PREMIUM_THRESHOLD {
            QualityTier::Premium
        } else if score >= PUBLISHING_THRESHOLD {
            QualityTier::Standard
        } else {
            QualityTier::Basic
        };
        prop_assert_eq!(tier_for_score(score), expected);
    }

    #[test]
    fn section_order_is_a_permutation(
        sections in prop::collection::vec(section_strategy(), 0..12),
    ) {
        let ordered = optimize_section_order(&sections);
        prop_assert_eq!(ordered.len(), sections.len());

        let key = |s: &Section| (s.section_type.clone(), s.content.clone());
        let mut before: Vec<_> = sections.iter().map(key).collect();
        let mut after: Vec<_> = ordered.iter().map(key).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);

        prop_assert_eq!(optimize_section_order(&ordered), ordered);
    }
}
