use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::analyzer::{analyze_content, PUBLISHING_THRESHOLD, TRANSITION_WORDS};
use crate::error::RewriteError;
use crate::model::{
    ContentAnalysisInput, ContentQualityMetrics, ImprovementSuggestion, Priority, Section,
    Story, SuggestionCategory,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriterConfig {
    pub max_attempts: u32,
    pub target_score: f64,
    pub suggestions_per_pass: usize,
}

impl Default for RewriterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            target_score: PUBLISHING_THRESHOLD,
            suggestions_per_pass: 3,
        }
    }
}

const MAX_SENTENCE_WORDS: usize = 25;
const MAX_HOOKED_TITLE_CHARS: usize = 80;
const IMPROVEMENT_NOTE_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Requests and results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRequest {
    pub original_story: Story,
    pub quality_metrics: ContentQualityMetrics,
    /// First attempt number, normally 1.
    pub attempt: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_attempts: Option<u32>,
}

impl RewriteRequest {
    pub fn new(story: Story) -> Self {
        let quality_metrics = analyze_content(&ContentAnalysisInput::from_story(&story));
        Self {
            original_story: story,
            quality_metrics,
            attempt: 1,
            max_attempts: None,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewriteState {
    Scoring,
    Rewriting,
    Converged,
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResult {
    pub success: bool,
    pub state: RewriteState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improved_story: Option<Story>,
    pub final_quality_score: f64,
    pub attempts_used: u32,
    pub improvements: Vec<String>,
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteCheck {
    pub should_rewrite: bool,
    pub quality_metrics: ContentQualityMetrics,
}

// ---------------------------------------------------------------------------
// Transforms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NarrativeGaps {
    pub quotes: bool,
    pub comments: bool,
    pub discussion: bool,
}

/// One text transform per suggestion category. Every transform is
/// idempotent: applying it to its own output changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Readability,
    Engagement,
    Narrative(NarrativeGaps),
    TerryVoice,
    Originality,
}

impl Transform {
    pub fn for_suggestion(suggestion: &ImprovementSuggestion) -> Option<Self> {
        match suggestion.category {
            SuggestionCategory::Readability => Some(Transform::Readability),
            SuggestionCategory::Engagement => Some(Transform::Engagement),
            SuggestionCategory::Narrative => {
                Some(Transform::Narrative(narrative_gaps(&suggestion.issue)))
            }
            SuggestionCategory::TerryVoice => Some(Transform::TerryVoice),
            SuggestionCategory::Originality => Some(Transform::Originality),
            SuggestionCategory::SocialProof => None,
        }
    }

    pub fn category(self) -> SuggestionCategory {
        match self {
            Transform::Readability => SuggestionCategory::Readability,
            Transform::Engagement => SuggestionCategory::Engagement,
            Transform::Narrative(_) => SuggestionCategory::Narrative,
            Transform::TerryVoice => SuggestionCategory::TerryVoice,
            Transform::Originality => SuggestionCategory::Originality,
        }
    }

    pub fn apply(self, story: &mut Story) -> Result<(), RewriteError> {
        match self {
            Transform::Readability => improve_readability(story),
            Transform::Engagement => improve_engagement(story),
            Transform::Narrative(gaps) => improve_narrative(story, gaps),
            Transform::TerryVoice => improve_voice(story),
            Transform::Originality => {
                improve_originality(story);
                Ok(())
            }
        }
    }
}

fn narrative_gaps(issue: &str) -> NarrativeGaps {
    let issue = issue.to_lowercase();
    if issue.contains("structure") {
        return NarrativeGaps {
            quotes: true,
            comments: true,
            discussion: true,
        };
    }
    NarrativeGaps {
        quotes: issue.contains("quotes"),
        comments: issue.contains("comments") || issue.contains("reactions"),
        discussion: issue.contains("discussion")
            || issue.contains("analysis")
            || issue.contains("bigger picture"),
    }
}

// ---------------------------------------------------------------------------
// Readability
// ---------------------------------------------------------------------------

const PROSE_SECTIONS: &[&str] = &["describe-1", "describe-2", "discussion"];

fn is_prose(section: &Section) -> bool {
    PROSE_SECTIONS.contains(&section.section_type.as_str())
}

fn prose_sections_mut(story: &mut Story) -> impl Iterator<Item = &mut Section> {
    story.content.sections.iter_mut().filter(|s| is_prose(s))
}

fn starts_with_transition(text: &str) -> bool {
    text.split_whitespace()
        .next()
        .map(|w| {
            let w = w
                .trim_end_matches(|c: char| c == ',' || c == ';' || c == ':')
                .to_lowercase();
            TRANSITION_WORDS.contains(&w.as_str())
        })
        .unwrap_or(false)
}

/// Words in a sentence, not counting a leading transition.
fn sentence_words(sentence: &str) -> usize {
    let n = sentence.split_whitespace().count();
    if starts_with_transition(sentence) {
        n - 1
    } else {
        n
    }
}

fn split_long_sentence(sentence: &str, out: &mut Vec<String>) {
    if sentence_words(sentence) <= MAX_SENTENCE_WORDS {
        out.push(sentence.to_string());
        return;
    }
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() < 2 {
        out.push(sentence.to_string());
        return;
    }
    let mid = words.len() / 2;
    split_long_sentence(&words[..mid].join(" "), out);
    split_long_sentence(&words[mid..].join(" "), out);
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

fn rewrite_paragraph(paragraph: &str, lead_in: bool) -> String {
    let mut sentences = Vec::new();
    for sentence in paragraph.split(". ") {
        split_long_sentence(sentence, &mut sentences);
    }

    for (i, sentence) in sentences.iter_mut().enumerate() {
        if starts_with_transition(sentence) {
            continue;
        }
        if i == 0 {
            if lead_in && !sentence.trim().is_empty() {
                sentence.insert_str(0, "Meanwhile, ");
            }
        } else if starts_uppercase(sentence) {
            sentence.insert_str(0, "However, ");
        }
    }

    sentences.join(". ")
}

/// Paragraphs appended verbatim by other transforms. Left untouched so their
/// append-once checks keep matching.
const FIXED_PARAGRAPHS: &[&str] = &[VOICE_CLOSING, UNIQUE_ANGLE];

pub(crate) fn improve_readability_text(content: &str) -> String {
    content
        .split("\n\n")
        .enumerate()
        .map(|(i, paragraph)| {
            if FIXED_PARAGRAPHS.contains(&paragraph) {
                paragraph.to_string()
            } else {
                rewrite_paragraph(paragraph, i > 0)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn improve_readability(story: &mut Story) -> Result<(), RewriteError> {
    if story.content.sections.is_empty() {
        return Err(RewriteError::NoSections {
            category: SuggestionCategory::Readability,
        });
    }
    for section in prose_sections_mut(story) {
        section.content = improve_readability_text(&section.content);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Engagement
// ---------------------------------------------------------------------------

const HOOK_WORDS: &[&str] = &["shocking", "unbelievable", "genius", "disaster", "epic", "insane"];

const WORKPLACE_HOOK: &str = "Absolutely Mental: ";
const TECH_HOOK: &str = "Peak Internet Behavior: ";
const DEFAULT_HOOK: &str = "Properly Dystopian: ";

const INTENSIFIERS: &[(&str, &str)] = &[
    ("was surprised", "was absolutely devastated"),
    ("was confused", "was completely baffled"),
    ("was angry", "was absolutely furious"),
    ("didn't know", "had absolutely no idea"),
    ("was difficult", "was a complete nightmare"),
];

fn hook_for(category: &str) -> &'static str {
    match category {
        "Workplace Drama" => WORKPLACE_HOOK,
        "Tech Drama" => TECH_HOOK,
        _ => DEFAULT_HOOK,
    }
}

fn improve_engagement(story: &mut Story) -> Result<(), RewriteError> {
    if story.title.trim().is_empty() {
        return Err(RewriteError::EmptyTitle {
            category: SuggestionCategory::Engagement,
        });
    }

    let title_lower = story.title.to_lowercase();
    let has_hook = HOOK_WORDS.iter().any(|w| title_lower.contains(w));
    let already_hooked = [WORKPLACE_HOOK, TECH_HOOK, DEFAULT_HOOK]
        .iter()
        .any(|h| story.title.starts_with(h));
    if !has_hook && !already_hooked && story.title.chars().count() < MAX_HOOKED_TITLE_CHARS {
        story.title = format!("{}{}", hook_for(&story.category), story.title);
        debug!(title = %story.title, "added emotional hook");
    }

    for section in story
        .content
        .sections
        .iter_mut()
        .filter(|s| s.section_type == "describe-1" || s.section_type == "describe-2")
    {
        for (mild, intense) in INTENSIFIERS {
            if section.content.contains(mild) {
                section.content = section.content.replace(mild, intense);
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

fn quote_section() -> Section {
    Section::new(
        "quotes",
        "The audacity of some people never ceases to amaze me.",
    )
    .with_metadata(json!({
        "attribution": "The moment everything clicked",
        "context": "When reality hit",
    }))
}

fn comments_section() -> Section {
    Section::new(
        "comments-1",
        "As expected, the internet had thoughts. Many, many thoughts.",
    )
    .with_title("The Internet Reacts")
    .with_metadata(json!({
        "comments": [
            { "author": "RealityCheck", "content": "This is peak internet behavior honestly", "score": 847 },
            { "author": "DramaDetector", "content": "The plot thickens... and I'm here for it", "score": 1240 },
            { "author": "ModernProblems", "content": "This is why I love the internet tbh", "score": 1580 },
        ]
    }))
}

fn discussion_section(category: &str) -> Section {
    let topic = category.to_lowercase().replace(" drama", "");
    Section::new(
        "discussion",
        format!(
            "This isn't just about {topic}\u{2014}it's about the erosion of basic trust in an increasingly connected world. \
             When people can literally profit off others without their knowledge, what does that say about digital privacy and human decency?\n\n\
             The Terry notes this phenomenon reveals something deeper about modern society: \
             we've created systems so complex that exploitation can happen invisibly, right under our noses."
        ),
    )
    .with_title("The Bigger Picture")
}

fn insert_before_outro(sections: &mut Vec<Section>, section: Section) {
    match sections.iter().position(|s| s.section_type == "outro") {
        Some(i) => sections.insert(i, section),
        None => sections.push(section),
    }
}

fn improve_narrative(story: &mut Story, gaps: NarrativeGaps) -> Result<(), RewriteError> {
    let needs_discussion = gaps.discussion && !story.content.has_type("discussion");
    if needs_discussion && story.category.trim().is_empty() {
        return Err(RewriteError::MissingCategory {
            category: SuggestionCategory::Narrative,
        });
    }

    let sections = &mut story.content.sections;

    if gaps.quotes && !sections.iter().any(|s| s.is_quote()) {
        let at = sections
            .iter()
            .position(|s| s.section_type == "describe-1")
            .map_or(0, |i| i + 1);
        sections.insert(at, quote_section());
        debug!(at, "inserted quote section");
    }

    if gaps.comments && !sections.iter().any(|s| s.is_comments()) {
        insert_before_outro(sections, comments_section());
        debug!("inserted comments section");
    }

    if needs_discussion {
        insert_before_outro(sections, discussion_section(&story.category));
        debug!("inserted discussion section");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Voice
// ---------------------------------------------------------------------------

const VOICE_CLOSING: &str = "The Terry observes this is properly the sort of artificial chaos that defines modern digital life\u{2014}technically fascinating, ultimately pointless, but absolutely mesmerizing to witness.";

/// (pattern, marker) pairs. Group 1 matches the marker when it is already there.
static VOICE_MARKER_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"\bthis is\b( properly)?").unwrap(), "this is properly"),
        (
            Regex::new(r"(peak internet )?\bbehavior").unwrap(),
            "peak internet behavior",
        ),
        (
            Regex::new(r"(dystopian )?\bsituation").unwrap(),
            "dystopian situation",
        ),
        (Regex::new(r"(artificial )?\bpeople").unwrap(), "artificial people"),
    ]
});

pub(crate) fn add_voice_markers(content: &str) -> String {
    let mut content = content.replace("very strange", "properly mental");
    for (re, marker) in VOICE_MARKER_RES.iter() {
        content = re
            .replace_all(&content, |caps: &Captures| {
                if caps.get(1).is_some() {
                    caps[0].to_string()
                } else {
                    marker.to_string()
                }
            })
            .into_owned();
    }
    content
}

fn append_once(content: &mut String, paragraph: &str) {
    if !content.contains(paragraph) {
        content.push_str("\n\n");
        content.push_str(paragraph);
    }
}

fn improve_voice(story: &mut Story) -> Result<(), RewriteError> {
    if story.content.sections.is_empty() {
        return Err(RewriteError::NoSections {
            category: SuggestionCategory::TerryVoice,
        });
    }
    for section in prose_sections_mut(story) {
        section.content = add_voice_markers(&section.content);
        if section.section_type == "discussion" {
            append_once(&mut section.content, VOICE_CLOSING);
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Originality
// ---------------------------------------------------------------------------

const UNIQUE_ANGLE: &str = "What makes this particularly fascinating is how it accidentally reveals the hidden power dynamics in everyday relationships. Strip away the technology, and you have a story as old as civilization: someone taking advantage of trust for personal gain.";

const EXCERPT_ANGLE: &str =
    "A perfect case study in how trust becomes vulnerability in the digital age.";

static EXPLAINED_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r".*explained.*").unwrap());

fn improve_originality(story: &mut Story) {
    if let Some(discussion) = story
        .content
        .sections
        .iter_mut()
        .find(|s| s.section_type == "discussion")
    {
        append_once(&mut discussion.content, UNIQUE_ANGLE);
    }

    if let Some(excerpt) = story.excerpt.as_mut() {
        *excerpt = EXPLAINED_LINE_RE
            .replace(excerpt, EXCERPT_ANGLE)
            .into_owned();
    }
}

// ---------------------------------------------------------------------------
// Rewrite loop
// ---------------------------------------------------------------------------

fn percent(score: f64) -> f64 {
    (score * 100.0).round()
}

fn improvement_note(suggestion: &ImprovementSuggestion) -> String {
    let head: String = suggestion
        .suggestion
        .chars()
        .take(IMPROVEMENT_NOTE_CHARS)
        .collect();
    format!("{}: {head}...", suggestion.category)
}

#[derive(Debug, Clone, Default)]
pub struct StoryRewriter {
    config: RewriterConfig,
}

impl StoryRewriter {
    pub fn new(config: RewriterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewriterConfig {
        &self.config
    }

    pub fn should_rewrite(&self, story: &Story) -> RewriteCheck {
        let quality_metrics = analyze_content(&ContentAnalysisInput::from_story(story));
        RewriteCheck {
            should_rewrite: !quality_metrics.passes_publishing_threshold,
            quality_metrics,
        }
    }

    /// Scores `story` and runs the loop from attempt 1.
    pub fn rewrite_story(&self, story: &Story) -> RewriteResult {
        self.rewrite(RewriteRequest::new(story.clone()))
    }

    pub fn rewrite(&self, request: RewriteRequest) -> RewriteResult {
        let max_attempts = request.max_attempts.unwrap_or(self.config.max_attempts);
        let target = self.config.target_score;
        let mut story = request.original_story;
        let mut quality = request.quality_metrics;
        let mut attempt = request.attempt;
        let mut improvements = Vec::new();
        let mut errors = Vec::new();

        info!(
            attempt,
            max_attempts,
            score = percent(quality.overall_quality),
            target = percent(target),
            "starting rewrite"
        );

        let mut state = RewriteState::Scoring;
        loop {
            state = match state {
                RewriteState::Scoring => {
                    if quality.overall_quality >= target {
                        RewriteState::Converged
                    } else if attempt > max_attempts {
                        RewriteState::Exhausted
                    } else {
                        RewriteState::Rewriting
                    }
                }
                RewriteState::Rewriting => {
                    let selected: Vec<&ImprovementSuggestion> = quality
                        .improvement_suggestions
                        .iter()
                        .filter(|s| s.priority == Priority::High)
                        .take(self.config.suggestions_per_pass)
                        .collect();
                    if selected.is_empty() {
                        warn!(attempt, "no high-priority suggestions left to apply");
                        RewriteState::Exhausted
                    } else {
                        for s in &selected {
                            info!(attempt, category = %s.category, issue = %s.issue, "addressing");
                        }

                        let candidate = apply_pass(&story, &selected, attempt, &mut errors);
                        let next = analyze_content(&ContentAnalysisInput::from_story(&candidate));
                        improvements.extend(selected.iter().map(|s| improvement_note(s)));

                        info!(
                            attempt,
                            score = percent(next.overall_quality),
                            previous = percent(quality.overall_quality),
                            "rescored"
                        );
                        if next.overall_quality <= quality.overall_quality {
                            warn!(attempt, "no quality improvement detected");
                            errors.push(format!(
                                "Attempt {attempt}: No quality improvement despite changes"
                            ));
                        }

                        story = candidate;
                        quality = next;
                        attempt += 1;
                        RewriteState::Scoring
                    }
                }
                RewriteState::Converged | RewriteState::Exhausted => break,
            };
        }

        let success = state == RewriteState::Converged;
        if success {
            info!(score = percent(quality.overall_quality), "target score achieved");
        }

        RewriteResult {
            success,
            state,
            improved_story: success.then_some(story),
            final_quality_score: quality.overall_quality,
            attempts_used: attempt.saturating_sub(1),
            improvements,
            errors,
        }
    }
}

/// Applies each selected suggestion's transform to a copy of `story`.
/// A failing transform leaves the copy as the previous transforms left it.
fn apply_pass(
    story: &Story,
    selected: &[&ImprovementSuggestion],
    attempt: u32,
    errors: &mut Vec<String>,
) -> Story {
    let mut improved = story.clone();
    for transform in selected.iter().filter_map(|s| Transform::for_suggestion(s)) {
        let mut scratch = improved.clone();
        match transform.apply(&mut scratch) {
            Ok(()) => {
                debug!(attempt, category = %transform.category(), "applied transform");
                improved = scratch;
            }
            Err(e) => {
                warn!(attempt, error = %e, "transform failed");
                errors.push(format!("Attempt {attempt}: {e}"));
            }
        }
    }
    improved
}
