#![allow(dead_code)]

use threadjuice_quality::{Section, SocialMetrics, Story, StoryContent};

pub fn story(title: &str, category: &str, sections: &[(&str, &str)]) -> Story {
    Story {
        title: title.to_string(),
        content: StoryContent {
            sections: sections
                .iter()
                .map(|(kind, body)| Section::new(*kind, *body))
                .collect(),
        },
        category: category.to_string(),
        ..Story::default()
    }
}

/// One-paragraph status update with nothing going for it.
pub fn boring_story() -> Story {
    story(
        "Update",
        "Office Life",
        &[("describe-1", "Nothing happened today.")],
    )
}

/// Six-section drama with strong metrics; scores well above the premium bar.
pub fn premium_story() -> Story {
    let mut s = story(
        "Shocking office meltdown turns into an epic fridge war",
        "Workplace Drama",
        &[
            (
                "describe-1",
                "It started when someone in accounting labeled every shelf of the shared office fridge with their own name. Nobody complained at first, because the labels looked oddly professional and nobody wanted to start a fight over yogurt.",
            ),
            (
                "quotes",
                "If your lunch is on my shelf, it belongs to the company now and you can file a formal complaint.",
            ),
            (
                "describe-2",
                "However, the marketing team answered with a laminated counter policy that claimed the whole bottom drawer for snacks. Meanwhile, the battle spread to the office group chat, where every message turned into another small scandal about missing oat milk.",
            ),
            (
                "comments-1",
                "Readers piled into the replies with their own stories about office kitchen drama and passive aggressive sticky notes on the coffee machine.",
            ),
            (
                "discussion",
                "The Terry notes this is properly mental and peak internet behavior in its purest form, all about territory. Ultimately the bigger picture is that a fridge became the only place where these people felt any control over the workday.",
            ),
            (
                "outro",
                "The fridge was cleaned out on Friday, the labels went into the bin, and the whole floor quietly agreed never to speak of it again.",
            ),
        ],
    );
    s.source = Some("twitter_drama".to_string());
    s.social_metrics = Some(SocialMetrics {
        view_count: 10_000,
        upvote_count: 800,
        comment_count: 400,
        share_count: 400,
        bookmark_count: 200,
    });
    s
}

pub fn section_types(story: &Story) -> Vec<&str> {
    story
        .content
        .sections
        .iter()
        .map(|s| s.section_type.as_str())
        .collect()
}
