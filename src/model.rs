use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Story documents
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "type")]
    pub section_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Section {
    pub fn new(section_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            section_type: section_type.into(),
            content: content.into(),
            title: None,
            metadata: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn is_description(&self) -> bool {
        self.section_type.starts_with("describe")
    }

    pub fn is_quote(&self) -> bool {
        self.section_type == "quotes" || self.section_type == "twitter-quote"
    }

    pub fn is_comments(&self) -> bool {
        self.section_type.contains("comments")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryContent {
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl StoryContent {
    /// Section bodies joined with a blank line, skipping empty ones.
    pub fn flattened_text(&self) -> String {
        self.sections
            .iter()
            .filter(|s| !s.content.is_empty())
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn has_type(&self, section_type: &str) -> bool {
        self.sections.iter().any(|s| s.section_type == section_type)
    }

    pub fn position_of(&self, section_type: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.section_type == section_type)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMetrics {
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub upvote_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub share_count: u64,
    #[serde(default)]
    pub bookmark_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub title: String,
    #[serde(default)]
    pub content: StoryContent,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_metrics: Option<SocialMetrics>,
}

// ---------------------------------------------------------------------------
// Analyzer input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAnalysisInput {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_metrics: Option<SocialMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ContentAnalysisInput {
    pub fn from_story(story: &Story) -> Self {
        Self {
            title: story.title.clone(),
            content: story.content.flattened_text(),
            sections: Some(story.content.sections.clone()),
            social_metrics: story.social_metrics,
            source: story.source.clone(),
            category: if story.category.is_empty() {
                None
            } else {
                Some(story.category.clone())
            },
        }
    }

    pub fn sections(&self) -> &[Section] {
        self.sections.as_deref().unwrap_or(&[])
    }

    pub fn section_count(&self) -> usize {
        self.sections().len()
    }
}

// ---------------------------------------------------------------------------
// Analyzer output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Premium,
    Standard,
    Basic,
}

impl QualityTier {
    pub fn as_str(self) -> &'static str {
        match self {
            QualityTier::Premium => "premium",
            QualityTier::Standard => "standard",
            QualityTier::Basic => "basic",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendedAction {
    Expand,
    Standard,
    Shorten,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionCategory {
    Readability,
    Engagement,
    Narrative,
    Originality,
    TerryVoice,
    SocialProof,
}

impl fmt::Display for SuggestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuggestionCategory::Readability => "readability",
            SuggestionCategory::Engagement => "engagement",
            SuggestionCategory::Narrative => "narrative",
            SuggestionCategory::Originality => "originality",
            SuggestionCategory::TerryVoice => "terry_voice",
            SuggestionCategory::SocialProof => "social_proof",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Higher rank sorts first.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementSuggestion {
    pub category: SuggestionCategory,
    pub issue: String,
    pub suggestion: String,
    pub priority: Priority,
    pub target_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQualityMetrics {
    pub readability_score: f64,
    pub engagement_potential: f64,
    pub narrative_structure: f64,
    pub originality_score: f64,
    pub social_proof_score: f64,
    pub overall_quality: f64,
    pub recommended_action: RecommendedAction,
    pub quality_tier: QualityTier,
    pub improvement_suggestions: Vec<ImprovementSuggestion>,
    pub passes_publishing_threshold: bool,
}
