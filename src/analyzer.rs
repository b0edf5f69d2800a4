use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::model::{
    ContentAnalysisInput, ContentQualityMetrics, ImprovementSuggestion, Priority,
    QualityTier, RecommendedAction, SocialMetrics, SuggestionCategory,
};

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

/// Blend of the five sub-scores into `overall_quality`. Sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub readability: f64,
    pub engagement: f64,
    pub narrative: f64,
    pub originality: f64,
    pub social_proof: f64,
}

pub const WEIGHTS: ScoreWeights = ScoreWeights {
    readability: 0.25,
    engagement: 0.30,
    narrative: 0.20,
    originality: 0.15,
    social_proof: 0.10,
};

pub const PUBLISHING_THRESHOLD: f64 = 0.70;
pub const PREMIUM_THRESHOLD: f64 = 0.85;

struct Hyperparameters {
    suggestion_threshold: f64,
    severe_threshold: f64,
    suggestion_target: f64,
    sentence_words_best: (f64, f64),
    sentence_words_ok: (f64, f64),
    sentence_best_bonus: f64,
    sentence_ok_bonus: f64,
    sentence_fallback_bonus: f64,
    paragraph_chars_best: (f64, f64),
    paragraph_chars_ok: (f64, f64),
    paragraph_best_bonus: f64,
    paragraph_ok_bonus: f64,
    title_words_best: (usize, usize),
    title_words_ok: (usize, usize),
    title_best_bonus: f64,
    title_ok_bonus: f64,
    transition_many_min: usize,
    transition_many_bonus: f64,
    transition_some_bonus: f64,
    emotional_step: f64,
    emotional_cap: f64,
    controversy_step: f64,
    controversy_cap: f64,
    drama_source_bonus: f64,
    drama_category_bonus: f64,
    shareable_chars: (usize, usize),
    shareable_bonus: f64,
    variety_many_min: usize,
    variety_many_bonus: f64,
    variety_some_min: usize,
    variety_some_bonus: f64,
    quotes_bonus: f64,
    comments_bonus: f64,
    discussion_bonus: f64,
    outro_bonus: f64,
    describe_range: (usize, usize),
    describe_bonus: f64,
    originality_base: f64,
    commentary_step: f64,
    commentary_cap: f64,
    perspective_bonus: f64,
    voice_marker_min: usize,
    social_proof_absent: f64,
    views_tiers: [(u64, f64); 3],
    engagement_rate_tiers: [(f64, f64); 3],
    share_ratio_tiers: [(f64, f64); 2],
    comment_rate_tiers: [(f64, f64); 2],
    expand_min_quality: f64,
    expand_max_sections: usize,
    shorten_max_quality: f64,
    shorten_min_chars: usize,
}

static HP: Hyperparameters = Hyperparameters {
    suggestion_threshold: 0.75,
    severe_threshold: 0.5,
    suggestion_target: 0.8,
    sentence_words_best: (15.0, 20.0),
    sentence_words_ok: (10.0, 25.0),
    sentence_best_bonus: 0.3,
    sentence_ok_bonus: 0.2,
    sentence_fallback_bonus: 0.1,
    paragraph_chars_best: (100.0, 300.0),
    paragraph_chars_ok: (50.0, 400.0),
    paragraph_best_bonus: 0.25,
    paragraph_ok_bonus: 0.15,
    title_words_best: (6, 12),
    title_words_ok: (4, 15),
    title_best_bonus: 0.2,
    title_ok_bonus: 0.1,
    transition_many_min: 3,
    transition_many_bonus: 0.25,
    transition_some_bonus: 0.15,
    emotional_step: 0.15,
    emotional_cap: 0.3,
    controversy_step: 0.1,
    controversy_cap: 0.25,
    drama_source_bonus: 0.2,
    drama_category_bonus: 0.15,
    shareable_chars: (1500, 4000),
    shareable_bonus: 0.1,
    variety_many_min: 4,
    variety_many_bonus: 0.3,
    variety_some_min: 3,
    variety_some_bonus: 0.2,
    quotes_bonus: 0.15,
    comments_bonus: 0.15,
    discussion_bonus: 0.1,
    outro_bonus: 0.1,
    describe_range: (2, 4),
    describe_bonus: 0.2,
    originality_base: 0.5,
    commentary_step: 0.1,
    commentary_cap: 0.3,
    perspective_bonus: 0.2,
    voice_marker_min: 3,
    social_proof_absent: 0.3,
    views_tiers: [(5000, 0.3), (1000, 0.2), (500, 0.1)],
    engagement_rate_tiers: [(0.1, 0.3), (0.05, 0.2), (0.02, 0.1)],
    share_ratio_tiers: [(0.05, 0.2), (0.02, 0.1)],
    comment_rate_tiers: [(0.03, 0.2), (0.01, 0.1)],
    expand_min_quality: 0.8,
    expand_max_sections: 6,
    shorten_max_quality: 0.5,
    shorten_min_chars: 2000,
};

// ---------------------------------------------------------------------------
// Keyword tables
// ---------------------------------------------------------------------------

pub(crate) const TRANSITION_WORDS: &[&str] = &[
    "however",
    "meanwhile",
    "furthermore",
    "additionally",
    "consequently",
    "therefore",
    "nevertheless",
    "ultimately",
    "initially",
    "subsequently",
];

const EMOTIONAL_KEYWORDS: &[&str] = &[
    "shocking",
    "unbelievable",
    "hilarious",
    "devastating",
    "outrageous",
    "genius",
    "epic",
    "disaster",
    "perfect",
    "insane",
    "brilliant",
    "discovers",
    "mandatory",
    "literally",
    "artisanal",
    "spends",
];

const CONTROVERSY_KEYWORDS: &[&str] = &[
    "drama",
    "controversy",
    "war",
    "battle",
    "fight",
    "clash",
    "debate",
    "outrage",
    "backlash",
    "scandal",
    "meltdown",
    "chaos",
];

const DRAMA_SOURCES: &[&str] = &["twitter_drama", "reddit"];

const HIGH_ENGAGEMENT_CATEGORIES: &[&str] = &[
    "Food Wars",
    "Relationship Drama",
    "Workplace Drama",
    "Family Drama",
    "Internet Drama",
    "Celebrity Drama",
    "Tech Drama",
];

const COMMENTARY_MARKERS: &[&str] = &[
    "The Terry",
    "notes",
    "observes",
    "analysis",
    "fascinating",
    "properly",
    "brilliant",
    "mental",
    "peak internet",
    "honestly",
    "literally",
    "exactly",
    "perfect",
    "dystopian",
    "absurd",
    "artificial",
    "reveals",
    "phenomenon",
    "suggests",
    "fundamentally",
    "accidentally",
    "metaphor",
    "camaraderie",
];

const PERSPECTIVE_PHRASES: &[&str] = &[
    "what really happened",
    "the real story",
    "here's what actually",
    "the thing is",
    "plot twist",
    "turns out",
    "the bigger picture",
    "reveals something deeper",
    "isn't just",
    "that's not just",
];

const VOICE_MARKERS: &[&str] = &[
    "The Terry",
    "properly",
    "mental",
    "peak internet",
    "dystopian",
    "artificial",
];

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

static SENTENCE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

fn case_insensitive_all(phrases: &[&str]) -> Vec<Regex> {
    phrases
        .iter()
        .map(|p| Regex::new(&format!("(?i){}", regex::escape(p))).unwrap())
        .collect()
}

static COMMENTARY_RES: Lazy<Vec<Regex>> = Lazy::new(|| case_insensitive_all(COMMENTARY_MARKERS));

static VOICE_MARKER_RES: Lazy<Vec<Regex>> = Lazy::new(|| case_insensitive_all(VOICE_MARKERS));

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn char_count(text: &str) -> usize {
    text.chars().count()
}

fn in_range<T: PartialOrd>(value: T, (lo, hi): (T, T)) -> bool {
    value >= lo && value <= hi
}

fn count_matches(patterns: &[Regex], text: &str) -> usize {
    patterns.iter().map(|re| re.find_iter(text).count()).sum()
}

fn tiered<T: PartialOrd + Copy>(value: T, tiers: &[(T, f64)]) -> f64 {
    tiers
        .iter()
        .find(|(floor, _)| value > *floor)
        .map(|&(_, bonus)| bonus)
        .unwrap_or(0.0)
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

// ---------------------------------------------------------------------------
// Sub-scores
// ---------------------------------------------------------------------------

fn assess_readability(content: &str, title: &str) -> f64 {
    let mut score = 0.0;

    let sentences: Vec<&str> = SENTENCE_SPLIT_RE
        .split(content)
        .filter(|s| !s.trim().is_empty())
        .collect();
    if !sentences.is_empty() {
        let total: usize = sentences.iter().map(|s| word_count(s)).sum();
        let avg = total as f64 / sentences.len() as f64;
        score += if in_range(avg, HP.sentence_words_best) {
            HP.sentence_best_bonus
        } else if in_range(avg, HP.sentence_words_ok) {
            HP.sentence_ok_bonus
        } else {
            HP.sentence_fallback_bonus
        };
    }

    let paragraphs: Vec<&str> = content
        .split("\n\n")
        .filter(|p| !p.trim().is_empty())
        .collect();
    if !paragraphs.is_empty() {
        let total: usize = paragraphs.iter().map(|p| char_count(p)).sum();
        let avg = total as f64 / paragraphs.len() as f64;
        if in_range(avg, HP.paragraph_chars_best) {
            score += HP.paragraph_best_bonus;
        } else if in_range(avg, HP.paragraph_chars_ok) {
            score += HP.paragraph_ok_bonus;
        }
    }

    let title_words = word_count(title);
    if in_range(title_words, HP.title_words_best) {
        score += HP.title_best_bonus;
    } else if in_range(title_words, HP.title_words_ok) {
        score += HP.title_ok_bonus;
    }

    let lower = content.to_lowercase();
    let transitions: usize = TRANSITION_WORDS
        .iter()
        .map(|w| lower.matches(w).count())
        .sum();
    if transitions >= HP.transition_many_min {
        score += HP.transition_many_bonus;
    } else if transitions >= 1 {
        score += HP.transition_some_bonus;
    }

    f64::min(score, 1.0)
}

fn assess_engagement_potential(input: &ContentAnalysisInput) -> f64 {
    let mut score = 0.0;
    let title_lower = input.title.to_lowercase();
    let content_lower = input.content.to_lowercase();

    let emotional = EMOTIONAL_KEYWORDS
        .iter()
        .filter(|w| title_lower.contains(*w))
        .count();
    score += f64::min(emotional as f64 * HP.emotional_step, HP.emotional_cap);

    let controversy = CONTROVERSY_KEYWORDS
        .iter()
        .filter(|w| title_lower.contains(*w) || content_lower.contains(*w))
        .count();
    score += f64::min(controversy as f64 * HP.controversy_step, HP.controversy_cap);

    if let Some(source) = input.source.as_deref() {
        if DRAMA_SOURCES.contains(&source) {
            score += HP.drama_source_bonus;
        }
    }

    if let Some(category) = input.category.as_deref() {
        if HIGH_ENGAGEMENT_CATEGORIES.contains(&category) {
            score += HP.drama_category_bonus;
        }
    }

    if in_range(char_count(&input.content), HP.shareable_chars) {
        score += HP.shareable_bonus;
    }

    f64::min(score, 1.0)
}

fn assess_narrative_structure(input: &ContentAnalysisInput) -> f64 {
    let sections = input.sections();
    if sections.is_empty() {
        return 0.0;
    }

    let mut score = 0.0;
    let mut distinct: Vec<&str> = sections.iter().map(|s| s.section_type.as_str()).collect();
    distinct.sort_unstable();
    distinct.dedup();
    let has = |t: &str| distinct.contains(&t);

    if distinct.len() >= HP.variety_many_min {
        score += HP.variety_many_bonus;
    } else if distinct.len() >= HP.variety_some_min {
        score += HP.variety_some_bonus;
    }

    if has("quotes") || has("twitter-quote") {
        score += HP.quotes_bonus;
    }
    if has("comments-1") || has("comments-2") {
        score += HP.comments_bonus;
    }
    if has("discussion") {
        score += HP.discussion_bonus;
    }
    if has("outro") {
        score += HP.outro_bonus;
    }

    let descriptions = sections.iter().filter(|s| s.is_description()).count();
    if in_range(descriptions, HP.describe_range) {
        score += HP.describe_bonus;
    }

    f64::min(score, 1.0)
}

fn assess_originality(input: &ContentAnalysisInput) -> f64 {
    let mut score = HP.originality_base;

    let commentary = count_matches(&COMMENTARY_RES, &input.content);
    score += f64::min(commentary as f64 * HP.commentary_step, HP.commentary_cap);

    let lower = input.content.to_lowercase();
    if PERSPECTIVE_PHRASES.iter().any(|p| lower.contains(p)) {
        score += HP.perspective_bonus;
    }

    f64::min(score, 1.0)
}

fn assess_social_proof(metrics: Option<&SocialMetrics>) -> f64 {
    let Some(m) = metrics else {
        return HP.social_proof_absent;
    };

    let views = m.view_count;
    let saves = m.share_count.saturating_add(m.bookmark_count);
    let engagement = m
        .upvote_count
        .saturating_add(m.comment_count)
        .saturating_add(saves);

    let score = tiered(views, &HP.views_tiers)
        + tiered(ratio(engagement, views), &HP.engagement_rate_tiers)
        + tiered(ratio(saves, views), &HP.share_ratio_tiers)
        + tiered(ratio(m.comment_count, views), &HP.comment_rate_tiers);

    f64::min(score, 1.0)
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

pub fn tier_for_score(overall_quality: f64) -> QualityTier {
    if overall_quality >= PREMIUM_THRESHOLD {
        QualityTier::Premium
    } else if overall_quality >= PUBLISHING_THRESHOLD {
        QualityTier::Standard
    } else {
        QualityTier::Basic
    }
}

fn recommended_action(quality: f64, content_chars: usize, sections: usize) -> RecommendedAction {
    if quality >= HP.expand_min_quality && sections < HP.expand_max_sections {
        RecommendedAction::Expand
    } else if quality < HP.shorten_max_quality && content_chars > HP.shorten_min_chars {
        RecommendedAction::Shorten
    } else {
        RecommendedAction::Standard
    }
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

struct SubScores {
    readability: f64,
    engagement: f64,
    narrative: f64,
    originality: f64,
    social_proof: f64,
    overall: f64,
}

fn suggestion(
    category: SuggestionCategory,
    issue: &str,
    text: &str,
    priority: Priority,
) -> ImprovementSuggestion {
    ImprovementSuggestion {
        category,
        issue: issue.to_string(),
        suggestion: text.to_string(),
        priority,
        target_score: HP.suggestion_target,
    }
}

fn severity(score: f64) -> Priority {
    if score < HP.severe_threshold {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn generate_suggestions(
    scores: &SubScores,
    input: &ContentAnalysisInput,
) -> Vec<ImprovementSuggestion> {
    use SuggestionCategory::*;

    let mut out = Vec::new();

    if scores.readability < HP.suggestion_threshold {
        out.push(match severity(scores.readability) {
            Priority::High => suggestion(
                Readability,
                "Poor sentence structure and flow",
                "Rewrite with shorter, punchier sentences (15-20 words). Add transition words like \"meanwhile,\" \"however,\" \"ultimately\" to improve flow. Break up long paragraphs.",
                Priority::High,
            ),
            _ => suggestion(
                Readability,
                "Text flow could be smoother",
                "Add more transition words between paragraphs. Vary sentence length for better rhythm. Aim for 100-300 character paragraphs.",
                Priority::Medium,
            ),
        });
    }

    if scores.engagement < HP.suggestion_threshold {
        out.push(match severity(scores.engagement) {
            Priority::High => suggestion(
                Engagement,
                "Low viral potential and emotional hooks",
                "Add emotional keywords like \"shocking,\" \"unbelievable,\" \"genius,\" \"disaster.\" Include more controversy and drama. Build tension around character flaws and social dynamics.",
                Priority::High,
            ),
            _ => suggestion(
                Engagement,
                "Needs stronger emotional hooks",
                "Amplify the drama and stakes. Add more specific details that reveal character motivations. Include social media context or broader cultural implications.",
                Priority::Medium,
            ),
        });
    }

    if scores.narrative < HP.suggestion_threshold {
        let sections = input.sections();
        if sections.is_empty() {
            out.push(suggestion(
                Narrative,
                "Poor story structure",
                "Restructure with clear sections: Setup \u{2192} Drama Unfolds \u{2192} Peak Moment (with quotes) \u{2192} Social Reactions \u{2192} Bigger Picture \u{2192} Resolution.",
                Priority::High,
            ));
        } else {
            if !sections.iter().any(|s| s.is_quote()) {
                out.push(suggestion(
                    Narrative,
                    "Missing dramatic quotes or key moments",
                    "Add a powerful quote section that captures the peak moment of drama. Use quotation marks around the most shocking or revealing statement.",
                    Priority::High,
                ));
            }
            if !sections.iter().any(|s| s.is_comments()) {
                out.push(suggestion(
                    Narrative,
                    "Missing social proof and reactions",
                    "Add a comments or Twitter conversation section showing how people reacted. Include mix of outrage, support, and witty observations.",
                    Priority::Medium,
                ));
            }
            if !sections.iter().any(|s| s.section_type == "discussion") {
                out.push(suggestion(
                    Narrative,
                    "Needs deeper analysis section",
                    "Add a \"bigger picture\" discussion section that explores what this story reveals about society, human nature, or modern life.",
                    Priority::Medium,
                ));
            }
        }
    }

    if scores.originality < HP.suggestion_threshold {
        out.push(match severity(scores.originality) {
            Priority::High => suggestion(
                TerryVoice,
                "Missing Terry's signature cynical commentary",
                "Add more Terry-style observations: \"properly mental,\" \"peak internet behavior,\" \"dystopian,\" \"artificial.\" Include sardonic takes on modern life and social dynamics.",
                Priority::High,
            ),
            _ => suggestion(
                TerryVoice,
                "Needs stronger unique perspective",
                "Amplify Terry's voice with more specific observations about the absurdity. Add metaphors comparing the situation to broader social phenomena.",
                Priority::Medium,
            ),
        });

        if count_matches(&VOICE_MARKER_RES, &input.content) < HP.voice_marker_min {
            out.push(suggestion(
                TerryVoice,
                "Insufficient Terry personality markers",
                "Include more Terry-specific phrases: \"properly mental,\" \"peak [something],\" references to \"artificial\" behavior, \"dystopian\" elements. Make observations about social hierarchy and human absurdity.",
                Priority::High,
            ));
        }
    }

    if scores.social_proof < HP.suggestion_threshold {
        out.push(suggestion(
            SocialProof,
            "Limited audience signals",
            "Promote the story where it can collect views, comments and shares before leaning on it as a flagship piece.",
            Priority::Low,
        ));
    }

    if scores.overall < PUBLISHING_THRESHOLD {
        out.push(ImprovementSuggestion {
            category: Originality,
            issue: format!(
                "Overall quality too low ({}%) for publishing",
                (scores.overall * 100.0).round()
            ),
            suggestion: "Focus on the highest priority improvements above. Consider adding a dramatic revelation or plot twist. Ensure the story has clear stakes and consequences.".to_string(),
            priority: Priority::High,
            target_score: PUBLISHING_THRESHOLD,
        });
    }

    // Stable: ties keep insertion order.
    out.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    out
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn analyze_content(input: &ContentAnalysisInput) -> ContentQualityMetrics {
    let readability = assess_readability(&input.content, &input.title);
    let engagement = assess_engagement_potential(input);
    let narrative = assess_narrative_structure(input);
    let originality = assess_originality(input);
    let social_proof = assess_social_proof(input.social_metrics.as_ref());

    let overall = readability * WEIGHTS.readability
        + engagement * WEIGHTS.engagement
        + narrative * WEIGHTS.narrative
        + originality * WEIGHTS.originality
        + social_proof * WEIGHTS.social_proof;

    debug!(
        readability,
        engagement, narrative, originality, social_proof, overall, "scored content"
    );

    let scores = SubScores {
        readability,
        engagement,
        narrative,
        originality,
        social_proof,
        overall,
    };
    let improvement_suggestions = generate_suggestions(&scores, input);

    ContentQualityMetrics {
        readability_score: readability,
        engagement_potential: engagement,
        narrative_structure: narrative,
        originality_score: originality,
        social_proof_score: social_proof,
        overall_quality: overall,
        recommended_action: recommended_action(
            overall,
            char_count(&input.content),
            input.section_count(),
        ),
        quality_tier: tier_for_score(overall),
        improvement_suggestions,
        passes_publishing_threshold: overall >= PUBLISHING_THRESHOLD,
    }
}

/// Premium stories, and standard ones above 0.65, may run long.
pub fn should_allow_extended_length(input: &ContentAnalysisInput) -> bool {
    let quality = analyze_content(input);
    match quality.quality_tier {
        QualityTier::Premium => true,
        QualityTier::Standard => quality.overall_quality > 0.65,
        QualityTier::Basic => false,
    }
}
