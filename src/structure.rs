use serde::{Deserialize, Serialize};

use crate::analyzer::analyze_content;
use crate::model::{ContentAnalysisInput, QualityTier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedStructure {
    pub min_sections: usize,
    pub max_sections: usize,
    pub recommended_sections: Vec<String>,
    pub avg_section_length: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthLimits {
    pub min_sections: usize,
    pub max_sections: usize,
    pub avg_section_length: usize,
}

const PREMIUM_LIMITS: LengthLimits = LengthLimits {
    min_sections: 3,
    max_sections: 12,
    avg_section_length: 800,
};

const STANDARD_LIMITS: LengthLimits = LengthLimits {
    min_sections: 3,
    max_sections: 8,
    avg_section_length: 500,
};

const BASIC_LIMITS: LengthLimits = LengthLimits {
    min_sections: 2,
    max_sections: 6,
    avg_section_length: 300,
};

const BASE_SECTIONS: &[&str] = &["describe-1", "quotes", "describe-2", "outro"];

const STANDARD_EXTRA_SECTIONS: &[&str] = &["comments-1", "discussion"];

const PREMIUM_EXTRA_SECTIONS: &[&str] = &[
    "image",
    "twitter-quote",
    "comments-1",
    "discussion",
    "comments-2",
];

pub fn limits_for(tier: QualityTier) -> LengthLimits {
    match tier {
        QualityTier::Premium => PREMIUM_LIMITS,
        QualityTier::Standard => STANDARD_LIMITS,
        QualityTier::Basic => BASIC_LIMITS,
    }
}

/// Ordered section menu for a tier; each tier's menu contains the one below it.
pub fn section_menu(tier: QualityTier) -> Vec<&'static str> {
    let extra: &[&str] = match tier {
        QualityTier::Premium => PREMIUM_EXTRA_SECTIONS,
        QualityTier::Standard => STANDARD_EXTRA_SECTIONS,
        QualityTier::Basic => &[],
    };
    BASE_SECTIONS.iter().chain(extra).copied().collect()
}

pub fn structure_for_tier(tier: QualityTier) -> RecommendedStructure {
    let limits = limits_for(tier);
    RecommendedStructure {
        min_sections: limits.min_sections,
        max_sections: limits.max_sections,
        recommended_sections: section_menu(tier).into_iter().map(String::from).collect(),
        avg_section_length: limits.avg_section_length,
    }
}

pub fn get_recommended_structure(input: &ContentAnalysisInput) -> RecommendedStructure {
    structure_for_tier(analyze_content(input).quality_tier)
}
