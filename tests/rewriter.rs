mod common;

use common::{boring_story, premium_story, section_types, story};
use threadjuice_quality::rewriter::NarrativeGaps;
use threadjuice_quality::{
    ImprovementSuggestion, Priority, RewriteError, RewriteRequest, RewriteState, RewriterConfig,
    Story, StoryRewriter, SuggestionCategory, Transform,
};

const ALL_GAPS: NarrativeGaps = NarrativeGaps {
    quotes: true,
    comments: true,
    discussion: true,
};

fn messy_story() -> Story {
    let mut s = story(
        "Reply all storm",
        "Workplace Drama",
        &[
            (
                "describe-1",
                "This is the moment it went wrong. The new manager was surprised by the reply all storm. this is where the behavior of the people involved got very strange, and every single person on the thread decided that the only sensible response to a calendar invite was to reply to everyone with a longer and angrier essay.",
            ),
            (
                "describe-2",
                "By lunch the thread had two hundred replies.\n\nIt calmed down once the server ran out of space.",
            ),
            (
                "discussion",
                "The situation says a lot about people. Honestly this is what happens when every inbox is a stage.",
            ),
            ("outro", "Nobody has used reply all since."),
        ],
    );
    s.excerpt = Some("The whole saga explained in one thread.".to_string());
    s
}

#[test]
fn passing_story_converges_without_attempts() {
    let original = premium_story();
    let result = StoryRewriter::default().rewrite_story(&original);

    assert!(result.success);
    assert_eq!(result.state, RewriteState::Converged);
    assert_eq!(result.attempts_used, 0);
    assert_eq!(result.improved_story, Some(original));
    assert!(result.improvements.is_empty());
    assert!(result.errors.is_empty());
}

#[test]
fn rewrite_stays_within_attempt_budget() {
    let rewriter = StoryRewriter::default();
    let result = rewriter.rewrite_story(&boring_story());

    assert!(
        result.attempts_used <= rewriter.config().max_attempts,
        "Used {} attempts, budget {}",
        result.attempts_used,
        rewriter.config().max_attempts
    );
    if result.success {
        assert_eq!(result.state, RewriteState::Converged);
        assert!(result.final_quality_score >= rewriter.config().target_score);
        assert!(result.improved_story.is_some());
    } else {
        assert_eq!(result.state, RewriteState::Exhausted);
        assert!(result.improved_story.is_none());
    }
    assert!(!result.improvements.is_empty());
}

#[test]
fn failing_transforms_are_recorded_and_loop_exhausts() {
    let empty = story("Update", "", &[]);
    let result = StoryRewriter::default().rewrite_story(&empty);

    assert!(!result.success);
    assert_eq!(result.state, RewriteState::Exhausted);
    assert_eq!(result.attempts_used, 3);
    assert!(result.improved_story.is_none());
    assert_eq!(result.improvements.len(), 9);
    assert!(result.improvements[0].starts_with("readability: "));

    for expected in [
        "Attempt 1: readability transform found no sections to rewrite",
        "Attempt 1: narrative transform needs a story category to frame the discussion",
        "Attempt 1: No quality improvement despite changes",
        "Attempt 3: No quality improvement despite changes",
    ] {
        assert!(
            result.errors.iter().any(|e| e == expected),
            "Missing error {expected:?} in {:?}",
            result.errors
        );
    }
}

#[test]
fn request_attempt_limit_overrides_config() {
    let empty = story("Update", "", &[]);
    let request = RewriteRequest::new(empty).with_max_attempts(1);
    assert_eq!(request.attempt, 1);

    let result = StoryRewriter::new(RewriterConfig {
        max_attempts: 5,
        ..RewriterConfig::default()
    })
    .rewrite(request);
    assert_eq!(result.attempts_used, 1);
    assert_eq!(result.state, RewriteState::Exhausted);
}

#[test]
fn should_rewrite_gates_on_publishing_threshold() {
    let rewriter = StoryRewriter::default();
    assert!(rewriter.should_rewrite(&boring_story()).should_rewrite);

    let check = rewriter.should_rewrite(&premium_story());
    assert!(!check.should_rewrite);
    assert!(check.quality_metrics.passes_publishing_threshold);
}

#[test]
fn every_transform_is_idempotent() {
    for transform in [
        Transform::Readability,
        Transform::Engagement,
        Transform::Narrative(ALL_GAPS),
        Transform::TerryVoice,
        Transform::Originality,
    ] {
        let original = messy_story();
        let mut once = original.clone();
        transform.apply(&mut once).unwrap();
        assert_ne!(once, original, "{transform:?} should change the messy story");

        let mut twice = once.clone();
        transform.apply(&mut twice).unwrap();
        assert_eq!(twice, once, "{transform:?} changed its own output");
    }
}

#[test]
fn readability_splits_long_sentences_without_stacking_transitions() {
    let mut s = messy_story();
    Transform::Readability.apply(&mut s).unwrap();
    Transform::Readability.apply(&mut s).unwrap();

    let opening = &s.content.sections[0].content;
    assert!(!opening.contains("However, However,"), "Stacked transitions: {opening}");
    for sentence in opening.split(". ") {
        let words = sentence.split_whitespace().count();
        assert!(words <= 26, "Sentence still too long ({words} words): {sentence}");
    }

    let second = &s.content.sections[1].content;
    assert!(
        second.contains("\n\nMeanwhile, It calmed down"),
        "Later paragraphs should open with a transition: {second}"
    );
}

#[test]
fn engagement_adds_category_hook_once() {
    let mut s = messy_story();
    Transform::Engagement.apply(&mut s).unwrap();
    assert_eq!(s.title, "Absolutely Mental: Reply all storm");
    assert!(s.content.sections[0]
        .content
        .contains("was absolutely devastated"));

    let mut tech = story("Startup pivots again", "Tech Drama", &[]);
    Transform::Engagement.apply(&mut tech).unwrap();
    assert_eq!(tech.title, "Peak Internet Behavior: Startup pivots again");

    let mut hooked = story("Genius intern fixes the printer", "Workplace Drama", &[]);
    Transform::Engagement.apply(&mut hooked).unwrap();
    assert_eq!(hooked.title, "Genius intern fixes the printer");

    let long_title = "A".repeat(80);
    let mut long = story(&long_title, "Workplace Drama", &[]);
    Transform::Engagement.apply(&mut long).unwrap();
    assert_eq!(long.title, long_title);
}

#[test]
fn engagement_rejects_empty_title() {
    let mut s = story("  ", "Workplace Drama", &[("describe-1", "Text.")]);
    assert_eq!(
        Transform::Engagement.apply(&mut s),
        Err(RewriteError::EmptyTitle {
            category: SuggestionCategory::Engagement
        })
    );
}

#[test]
fn narrative_inserts_missing_sections_in_place() {
    let mut s = story(
        "Reply all storm",
        "Workplace Drama",
        &[
            ("describe-1", "It began."),
            ("describe-2", "It grew."),
            ("outro", "It ended."),
        ],
    );
    Transform::Narrative(ALL_GAPS).apply(&mut s).unwrap();

    assert_eq!(
        section_types(&s),
        vec!["describe-1", "quotes", "describe-2", "comments-1", "discussion", "outro"]
    );
    let discussion = &s.content.sections[4];
    assert_eq!(discussion.title.as_deref(), Some("The Bigger Picture"));
    assert!(discussion.content.contains("This isn't just about workplace"));
    let comments = &s.content.sections[3];
    assert_eq!(comments.title.as_deref(), Some("The Internet Reacts"));
    assert!(comments.metadata.is_some());
}

#[test]
fn narrative_quote_leads_when_there_is_no_opening() {
    let mut s = story("Reply all storm", "Workplace Drama", &[("discussion", "Why.")]);
    Transform::Narrative(NarrativeGaps {
        quotes: true,
        ..NarrativeGaps::default()
    })
    .apply(&mut s)
    .unwrap();
    assert_eq!(section_types(&s), vec!["quotes", "discussion"]);
}

#[test]
fn narrative_discussion_needs_a_category() {
    let mut s = story("Reply all storm", "", &[("describe-1", "It began.")]);
    let before = s.clone();
    assert_eq!(
        Transform::Narrative(ALL_GAPS).apply(&mut s),
        Err(RewriteError::MissingCategory {
            category: SuggestionCategory::Narrative
        })
    );
    assert_eq!(s, before);
}

#[test]
fn voice_and_originality_mark_the_discussion() {
    let mut s = messy_story();
    Transform::TerryVoice.apply(&mut s).unwrap();
    Transform::Originality.apply(&mut s).unwrap();

    let opening = &s.content.sections[0].content;
    assert!(opening.contains("properly mental"));
    assert!(opening.contains("peak internet behavior"));
    assert!(opening.contains("artificial people"));

    let discussion = &s.content.sections[2].content;
    assert!(discussion.contains("The dystopian situation"));
    assert!(discussion.contains("The Terry observes"));
    assert!(discussion.contains("hidden power dynamics"));
    assert_eq!(
        s.excerpt.as_deref(),
        Some("A perfect case study in how trust becomes vulnerability in the digital age.")
    );
}

#[test]
fn social_proof_has_no_transform() {
    let suggestion = ImprovementSuggestion {
        category: SuggestionCategory::SocialProof,
        issue: "Limited audience signals".to_string(),
        suggestion: "Promote it.".to_string(),
        priority: Priority::Low,
        target_score: 0.8,
    };
    assert_eq!(Transform::for_suggestion(&suggestion), None);

    let narrative = ImprovementSuggestion {
        category: SuggestionCategory::Narrative,
        issue: "Missing social proof and reactions".to_string(),
        ..suggestion
    };
    assert_eq!(
        Transform::for_suggestion(&narrative),
        Some(Transform::Narrative(NarrativeGaps {
            comments: true,
            ..NarrativeGaps::default()
        }))
    );
}

#[test]
fn appended_paragraphs_survive_readability() {
    let mut s = story(
        "Reply all storm",
        "Workplace Drama",
        &[("discussion", "The thread said a lot about inboxes.")],
    );
    Transform::Originality.apply(&mut s).unwrap();
    Transform::TerryVoice.apply(&mut s).unwrap();
    Transform::Readability.apply(&mut s).unwrap();
    Transform::Originality.apply(&mut s).unwrap();
    Transform::TerryVoice.apply(&mut s).unwrap();

    let discussion = &s.content.sections[0].content;
    for marker in ["hidden power dynamics", "The Terry observes"] {
        assert_eq!(
            discussion.matches(marker).count(),
            1,
            "{marker:?} should appear once in {discussion}"
        );
    }
}

#[test]
fn only_high_priority_suggestions_drive_rewrites() {
    let mut s = premium_story();
    s.social_metrics = None;
    let rewriter = StoryRewriter::new(RewriterConfig {
        target_score: 0.99,
        ..RewriterConfig::default()
    });

    let check = rewriter.should_rewrite(&s);
    assert!(check
        .quality_metrics
        .improvement_suggestions
        .iter()
        .all(|sg| sg.priority != Priority::High));

    let result = rewriter.rewrite_story(&s);
    assert_eq!(result.state, RewriteState::Exhausted);
    assert_eq!(result.attempts_used, 0);
    assert!(
        result.improvements.is_empty(),
        "Low-priority advice should not be applied, got {:?}",
        result.improvements
    );
}
