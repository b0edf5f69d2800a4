use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::analyze_content;
use crate::model::{
    ContentAnalysisInput, ContentQualityMetrics, QualityTier, RecommendedAction, Section,
    Story, StoryContent,
};
use crate::structure::limits_for;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizerConfig {
    pub enable_quality_based_length: bool,
    pub enable_structure_optimization: bool,
    pub enable_engagement_optimization: bool,
    /// Minutes.
    pub target_reading_time: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            enable_quality_based_length: true,
            enable_structure_optimization: true,
            enable_engagement_optimization: true,
            target_reading_time: 7,
        }
    }
}

const READING_TIME_MAX: u32 = 12;
const READING_TIME_MIN: u32 = 3;
const READING_TIME_EXTEND: u32 = 3;
const READING_TIME_TRIM: u32 = 2;
const WORDS_PER_MINUTE: usize = 200;
const ENGAGEMENT_HOOK_THRESHOLD: f64 = 0.7;
const UNKNOWN_SECTION_PRIORITY: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentOptimizationResult {
    pub original_content: StoryContent,
    pub optimized_content: StoryContent,
    pub quality_metrics: ContentQualityMetrics,
    pub optimization_applied: Vec<String>,
    pub recommendations: Vec<String>,
    pub target_reading_time: u32,
}

#[derive(Default)]
struct PassOutput {
    applied: Vec<String>,
    recommendations: Vec<String>,
}

impl PassOutput {
    fn apply(&mut self, note: &str) {
        self.applied.push(note.to_string());
    }

    fn recommend(&mut self, note: impl Into<String>) {
        self.recommendations.push(note.into());
    }
}

// ---------------------------------------------------------------------------
// Section ordering
// ---------------------------------------------------------------------------

fn section_priority(section_type: &str) -> u8 {
    match section_type {
        "describe-1" => 1,
        "image" => 2,
        "quotes" | "twitter-quote" => 3,
        "describe-2" => 4,
        "comments-1" => 5,
        "discussion" => 6,
        "comments-2" => 7,
        "outro" => 8,
        _ => UNKNOWN_SECTION_PRIORITY,
    }
}

/// Stable reorder into the opening-to-outro reading flow.
pub fn optimize_section_order(sections: &[Section]) -> Vec<Section> {
    let mut ordered = sections.to_vec();
    ordered.sort_by_key(|s| section_priority(&s.section_type));
    ordered
}

// ---------------------------------------------------------------------------
// Optimizer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ContentOptimizer {
    config: OptimizerConfig,
}

impl ContentOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn optimize_story_content(&self, story: &Story) -> ContentOptimizationResult {
        let input = ContentAnalysisInput::from_story(story);
        let quality = analyze_content(&input);
        let mut content = story.content.clone();
        let mut target_reading_time = self.config.target_reading_time;
        let mut optimization_applied = Vec::new();
        let mut recommendations = Vec::new();

        let mut merge = |out: PassOutput| {
            optimization_applied.extend(out.applied);
            recommendations.extend(out.recommendations);
        };

        if self.config.enable_quality_based_length {
            merge(length_pass(&content, &quality, &mut target_reading_time));
        }
        if self.config.enable_structure_optimization {
            merge(structure_pass(&mut content, &quality));
        }
        if self.config.enable_engagement_optimization {
            merge(engagement_pass(&quality));
        }

        debug!(
            tier = %quality.quality_tier,
            applied = optimization_applied.len(),
            recommendations = recommendations.len(),
            "optimized story content"
        );

        ContentOptimizationResult {
            original_content: story.content.clone(),
            optimized_content: content,
            quality_metrics: quality,
            optimization_applied,
            recommendations,
            target_reading_time,
        }
    }

    pub fn calculate_optimal_reading_time(
        &self,
        content: &StoryContent,
        quality: &ContentQualityMetrics,
    ) -> u32 {
        // Empty content still counts as one word.
        let words = content
            .sections
            .iter()
            .map(|s| s.content.split_whitespace().count())
            .sum::<usize>()
            .max(1);
        let base = words.div_ceil(WORDS_PER_MINUTE) as f64;
        let multiplier = match quality.quality_tier {
            QualityTier::Premium => 1.2,
            QualityTier::Standard => 1.0,
            QualityTier::Basic => 0.8,
        };
        (base * multiplier).round() as u32
    }
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

fn length_pass(
    content: &StoryContent,
    quality: &ContentQualityMetrics,
    target_reading_time: &mut u32,
) -> PassOutput {
    let mut out = PassOutput::default();
    let limits = limits_for(quality.quality_tier);
    let current = content.sections.len();

    match (quality.quality_tier, quality.recommended_action) {
        (QualityTier::Premium, RecommendedAction::Expand) => {
            *target_reading_time = u32::min(
                target_reading_time.saturating_add(READING_TIME_EXTEND),
                READING_TIME_MAX,
            );
            out.apply("Extended reading time for premium content");
            out.recommend("Consider adding more detailed analysis sections");
        }
        (QualityTier::Basic, RecommendedAction::Shorten) => {
            *target_reading_time = u32::max(
                target_reading_time.saturating_sub(READING_TIME_TRIM),
                READING_TIME_MIN,
            );
            out.apply("Reduced reading time for basic content");
            out.recommend("Focus on key points and remove verbose sections");
        }
        _ => {}
    }

    if quality.quality_tier == QualityTier::Premium && current < limits.min_sections {
        out.recommend(format!(
            "Consider adding {} more sections for better narrative flow",
            limits.min_sections - current
        ));
    } else if quality.quality_tier == QualityTier::Basic && current > limits.max_sections {
        out.recommend(format!(
            "Consider consolidating content into {} sections or fewer",
            limits.max_sections
        ));
    }

    out
}

fn structure_pass(content: &mut StoryContent, quality: &ContentQualityMetrics) -> PassOutput {
    let mut out = PassOutput::default();

    if !content.has_type("describe-1") {
        out.recommend("Add a strong opening section to hook readers");
    }
    if !content.has_type("outro") {
        out.recommend("Add a conclusion section to wrap up the story");
    }

    let has_quotes = content.sections.iter().any(|s| s.is_quote());
    let has_comments = content.sections.iter().any(|s| s.is_comments());
    if !has_quotes && quality.quality_tier != QualityTier::Basic {
        out.recommend("Consider adding memorable quotes to increase engagement");
    }
    if !has_comments && quality.quality_tier == QualityTier::Premium {
        out.recommend("Add comment sections to show community response");
    }

    let ordered = optimize_section_order(&content.sections);
    if ordered != content.sections {
        content.sections = ordered;
        out.apply("Optimized section order for better flow");
    }

    out
}

fn engagement_pass(quality: &ContentQualityMetrics) -> PassOutput {
    let mut out = PassOutput::default();

    if quality.engagement_potential > ENGAGEMENT_HOOK_THRESHOLD {
        out.recommend("Consider adding interactive elements like polls or questions");
        out.recommend("Optimize for social sharing with quotable moments");
    }
    if quality.quality_tier == QualityTier::Premium {
        out.recommend("Consider creating shareable graphics or memes");
        out.recommend("Add discussion prompts to encourage comments");
    }

    out
}
