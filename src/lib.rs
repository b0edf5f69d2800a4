//! Content-quality scoring and rewrite pipeline for viral story documents.
//!
//! [`analyze_content`] scores a story on five heuristics and ranks
//! improvement suggestions. [`get_recommended_structure`] turns the resulting
//! tier into section-count advice, [`ContentOptimizer`] applies advisory
//! passes and section reordering, and [`StoryRewriter`] patches low-scoring
//! stories in a bounded loop.

pub mod analyzer;
pub mod emotion;
pub mod error;
pub mod metaphor;
pub mod model;
pub mod optimizer;
pub mod rewriter;
pub mod structure;

pub use analyzer::{
    analyze_content, should_allow_extended_length, tier_for_score, ScoreWeights,
    PREMIUM_THRESHOLD, PUBLISHING_THRESHOLD, WEIGHTS,
};
pub use emotion::{analyze_section, Emotion, EmotionalAnalysis, StoryContext};
pub use error::RewriteError;
pub use metaphor::{extract_metaphor, MetaphorInsight};
pub use model::{
    ContentAnalysisInput, ContentQualityMetrics, ImprovementSuggestion, Priority, QualityTier,
    RecommendedAction, Section, SocialMetrics, Story, StoryContent, SuggestionCategory,
};
pub use optimizer::{ContentOptimizationResult, ContentOptimizer, OptimizerConfig};
pub use rewriter::{
    RewriteCheck, RewriteRequest, RewriteResult, RewriteState, RewriterConfig, StoryRewriter,
    Transform,
};
pub use structure::{get_recommended_structure, RecommendedStructure};
