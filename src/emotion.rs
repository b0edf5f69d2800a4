use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::QualityTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    OpeningTension,
    EscalatingDrama,
    PeakChaos,
    ShockedRealization,
    SatisfiedResolution,
    AwkwardSilence,
    CollectiveCringe,
    HereForIt,
    MildConcern,
    PureEntertainment,
}

impl Emotion {
    pub const ALL: [Emotion; 10] = [
        Emotion::OpeningTension,
        Emotion::EscalatingDrama,
        Emotion::PeakChaos,
        Emotion::ShockedRealization,
        Emotion::SatisfiedResolution,
        Emotion::AwkwardSilence,
        Emotion::CollectiveCringe,
        Emotion::HereForIt,
        Emotion::MildConcern,
        Emotion::PureEntertainment,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::OpeningTension => "opening_tension",
            Emotion::EscalatingDrama => "escalating_drama",
            Emotion::PeakChaos => "peak_chaos",
            Emotion::ShockedRealization => "shocked_realization",
            Emotion::SatisfiedResolution => "satisfied_resolution",
            Emotion::AwkwardSilence => "awkward_silence",
            Emotion::CollectiveCringe => "collective_cringe",
            Emotion::HereForIt => "here_for_it",
            Emotion::MildConcern => "mild_concern",
            Emotion::PureEntertainment => "pure_entertainment",
        }
    }

    fn keywords(self) -> &'static [&'static str] {
        match self {
            Emotion::OpeningTension => &[
                "started", "began", "innocent", "simple", "thought", "decided", "posted",
                "tweeted", "asked", "poll", "question",
            ],
            Emotion::EscalatingDrama => &[
                "replies", "quote tweets", "heated", "descended", "battlefield", "vultures",
                "argue", "debate", "angry", "furious", "rage",
            ],
            Emotion::PeakChaos => &[
                "meltdown", "chaos", "exploded", "viral", "trending", "disaster", "complete",
                "total", "absolute", "nuclear", "peak", "maximum",
            ],
            Emotion::ShockedRealization => &[
                "turns out", "realized", "actually", "plot twist", "discovered", "revelation",
                "suddenly", "meanwhile", "however", "but then",
            ],
            Emotion::SatisfiedResolution => &[
                "finally", "eventually", "concluded", "ended", "aftermath", "settled", "dust",
                "moral", "lesson", "learned",
            ],
            Emotion::AwkwardSilence => &[
                "silence", "quiet", "nobody", "crickets", "uncomfortable", "awkward", "pause",
                "moment", "beat", "wait",
            ],
            Emotion::CollectiveCringe => &[
                "cringe", "secondhand", "embarrassing", "painful", "yikes", "oof", "imagine",
                "watching", "witnessing",
            ],
            Emotion::HereForIt => &[
                "popcorn", "tea", "drama", "entertainment", "here for", "living for",
                "obsessed", "fascinating", "mesmerizing",
            ],
            Emotion::MildConcern => &[
                "concerning", "worried", "troubling", "problematic", "red flag", "alarm",
                "warning", "careful", "caution",
            ],
            Emotion::PureEntertainment => &[
                "hilarious", "brilliant", "perfect", "amazing", "incredible", "spectacular",
                "beautiful", "chef kiss", "magnificent",
            ],
        }
    }

    fn gif_terms(self) -> &'static [&'static str] {
        match self {
            Emotion::OpeningTension => &[
                "here we go again",
                "brace yourself",
                "oh boy here we go",
                "this should be good",
                "buckle up",
            ],
            Emotion::EscalatingDrama => &[
                "popcorn eating",
                "drama intensifies",
                "things heating up",
                "oh snap",
                "tea spilling",
            ],
            Emotion::PeakChaos => &[
                "this is fine fire",
                "chaos everywhere",
                "what just happened",
                "absolute madness",
                "world burning",
            ],
            Emotion::ShockedRealization => &[
                "plot twist",
                "mind blown",
                "wait what",
                "hold up",
                "record scratch",
            ],
            Emotion::SatisfiedResolution => &[
                "mic drop",
                "well that happened",
                "and scene",
                "case closed",
                "dust settling",
            ],
            Emotion::AwkwardSilence => &[
                "awkward silence",
                "cricket sounds",
                "uncomfortable",
                "yikes",
                "that was awkward",
            ],
            Emotion::CollectiveCringe => &[
                "secondhand embarrassment",
                "cringe watching",
                "painful to watch",
                "hiding behind hands",
                "oh no",
            ],
            Emotion::HereForIt => &[
                "living for this drama",
                "here for it",
                "absolutely fascinated",
                "can't look away",
                "obsessed with this",
            ],
            Emotion::MildConcern => &[
                "side eye",
                "raised eyebrow",
                "concerning behavior",
                "red flag alert",
                "worry face",
            ],
            Emotion::PureEntertainment => &[
                "chef kiss perfection",
                "absolutely brilliant",
                "pure comedy gold",
                "masterpiece",
                "standing ovation",
            ],
        }
    }

    fn food_gif_terms(self) -> &'static [&'static str] {
        match self {
            Emotion::OpeningTension => &["innocent food question"],
            Emotion::EscalatingDrama => &["food fight", "kitchen drama"],
            Emotion::PeakChaos => &["cooking disaster", "chef meltdown"],
            Emotion::PureEntertainment => &["chef kiss", "delicious drama"],
            _ => &[],
        }
    }

    fn caption(self) -> &'static str {
        match self {
            Emotion::OpeningTension => "Everyone sensing something's about to go down:",
            Emotion::EscalatingDrama => "Viewers watching this unfold:",
            Emotion::PeakChaos => "The internet right now:",
            Emotion::ShockedRealization => "Everyone when the plot twist hits:",
            Emotion::SatisfiedResolution => "Readers after that conclusion:",
            Emotion::AwkwardSilence => "The collective reaction:",
            Emotion::CollectiveCringe => "All of us watching this:",
            Emotion::HereForIt => "The audience absolutely living for this:",
            Emotion::MildConcern => "Everyone's internal reaction:",
            Emotion::PureEntertainment => "The unanimous response:",
        }
    }

    fn is_high_intensity(self) -> bool {
        matches!(
            self,
            Emotion::PeakChaos | Emotion::ShockedRealization | Emotion::PureEntertainment
        )
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryContext {
    pub category: String,
    pub section_type: String,
    pub section_index: usize,
    pub total_sections: usize,
    pub content_quality: QualityTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionalAnalysis {
    pub emotion: Emotion,
    pub intensity: f64,
    pub gif_search_terms: Vec<String>,
    pub context: String,
    pub confidence: f64,
}

// ---------------------------------------------------------------------------
// Sentiment lexicon
// ---------------------------------------------------------------------------

/// Word valences in [-5, 5], AFINN style.
const LEXICON: &[(&str, i32)] = &[
    ("amazing", 4),
    ("awesome", 4),
    ("beautiful", 3),
    ("best", 3),
    ("brilliant", 4),
    ("delicious", 3),
    ("enjoy", 2),
    ("excellent", 3),
    ("fantastic", 4),
    ("fascinating", 3),
    ("fun", 4),
    ("funny", 4),
    ("glad", 3),
    ("good", 3),
    ("great", 3),
    ("happy", 3),
    ("hilarious", 2),
    ("incredible", 2),
    ("innocent", 4),
    ("interesting", 2),
    ("laugh", 1),
    ("like", 2),
    ("love", 3),
    ("lucky", 3),
    ("magnificent", 3),
    ("nice", 3),
    ("perfect", 3),
    ("popular", 3),
    ("success", 2),
    ("support", 2),
    ("thank", 2),
    ("win", 4),
    ("wonderful", 4),
    ("yes", 1),
    ("absurd", -2),
    ("angry", -3),
    ("annoyed", -2),
    ("awful", -3),
    ("awkward", -2),
    ("bad", -3),
    ("baffled", -2),
    ("chaos", -2),
    ("complain", -2),
    ("confused", -2),
    ("crisis", -3),
    ("cringe", -2),
    ("dead", -3),
    ("devastated", -2),
    ("disaster", -2),
    ("disgusting", -3),
    ("embarrassing", -2),
    ("fail", -2),
    ("fight", -1),
    ("furious", -3),
    ("hate", -3),
    ("horrible", -3),
    ("mad", -3),
    ("meltdown", -2),
    ("nightmare", -3),
    ("no", -1),
    ("outrage", -3),
    ("painful", -2),
    ("problem", -2),
    ("rage", -2),
    ("sad", -2),
    ("scandal", -3),
    ("shocking", -2),
    ("stupid", -2),
    ("terrible", -3),
    ("ugly", -3),
    ("upset", -2),
    ("war", -2),
    ("worried", -3),
    ("worst", -3),
    ("wrong", -2),
    ("yikes", -1),
];

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z']+").unwrap());

/// Sum of lexicon valences over the tokens of already-lowercased text.
pub fn sentiment_score(lowercased: &str) -> i32 {
    TOKEN_RE
        .find_iter(lowercased)
        .filter_map(|m| {
            LEXICON
                .iter()
                .find(|(word, _)| *word == m.as_str())
                .map(|&(_, valence)| valence)
        })
        .sum()
}

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

static KEYWORD_RES: Lazy<Vec<Vec<Regex>>> = Lazy::new(|| {
    Emotion::ALL
        .iter()
        .map(|e| {
            e.keywords()
                .iter()
                .map(|k| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(k))).unwrap())
                .collect()
        })
        .collect()
});

static ATTRIBUTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\u{2014}|â€”)\s*@\w+").unwrap());

fn preprocess(content: &str) -> String {
    let stripped = ATTRIBUTION_RE.replace_all(content, "");
    stripped
        .trim_start()
        .trim_start_matches('"')
        .trim_end()
        .trim_end_matches('"')
        .to_lowercase()
}

fn keyword_matches(emotion: Emotion, text: &str) -> usize {
    KEYWORD_RES[emotion.index()]
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum()
}

fn story_position(context: &StoryContext) -> f64 {
    if context.total_sections <= 1 {
        0.0
    } else {
        context.section_index as f64 / (context.total_sections - 1) as f64
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

fn determine_emotion(text: &str, sentiment: i32, context: &StoryContext) -> Emotion {
    use Emotion::*;

    let mut scores: Vec<f64> = Emotion::ALL
        .iter()
        .map(|&e| keyword_matches(e, text) as f64)
        .collect();
    let mut boost = |e: Emotion, factor: f64| scores[e.index()] *= factor;

    let position = story_position(context);
    if position < 0.2 {
        boost(OpeningTension, 3.0);
    } else if position < 0.4 {
        boost(EscalatingDrama, 2.0);
    } else if position < 0.7 {
        boost(PeakChaos, 2.0);
        boost(ShockedRealization, 2.0);
    } else {
        boost(SatisfiedResolution, 2.0);
        boost(PureEntertainment, 1.5);
    }

    match context.section_type.as_str() {
        "quotes" => {
            boost(HereForIt, 2.0);
            boost(CollectiveCringe, 1.5);
        }
        "comments-1" | "comments-2" => {
            boost(EscalatingDrama, 1.5);
            boost(PeakChaos, 1.5);
        }
        "outro" => {
            boost(SatisfiedResolution, 2.0);
            boost(PureEntertainment, 1.5);
        }
        _ => {}
    }

    if sentiment > 3 {
        boost(PureEntertainment, 1.5);
        boost(HereForIt, 1.3);
    } else if sentiment < -3 {
        boost(PeakChaos, 1.5);
        boost(CollectiveCringe, 1.3);
    }

    // First maximum in declaration order wins ties.
    let mut top = OpeningTension;
    for e in Emotion::ALL {
        if scores[e.index()] > scores[top.index()] {
            top = e;
        }
    }

    if scores[top.index()] == 0.0 {
        return if position < 0.3 {
            OpeningTension
        } else if position < 0.6 {
            EscalatingDrama
        } else if position < 0.8 {
            PeakChaos
        } else {
            SatisfiedResolution
        };
    }
    top
}

fn intensity(sentiment: i32, emotion: Emotion, context: &StoryContext) -> f64 {
    let mut value = f64::min(sentiment.unsigned_abs() as f64 / 10.0, 1.0);
    if emotion.is_high_intensity() {
        value = f64::max(value, 0.7);
    }
    if context.content_quality == QualityTier::Premium {
        value *= 1.2;
    }
    f64::min(value, 1.0)
}

fn gif_search_terms(emotion: Emotion, context: &StoryContext) -> Vec<String> {
    let mut terms: Vec<String> = emotion.gif_terms().iter().map(|t| t.to_string()).collect();
    if context.category == "Food Wars" {
        terms.extend(emotion.food_gif_terms().iter().map(|t| t.to_string()));
    }
    terms
}

fn confidence(text: &str, emotion: Emotion, sentiment: i32) -> f64 {
    let keyword = f64::min(keyword_matches(emotion, text) as f64 / 3.0, 1.0);
    let sentiment = f64::min(sentiment.unsigned_abs() as f64 / 5.0, 1.0);
    (keyword + sentiment) / 2.0
}

pub fn analyze_section(content: &str, context: &StoryContext) -> EmotionalAnalysis {
    let text = preprocess(content);
    let sentiment = sentiment_score(&text);
    let emotion = determine_emotion(&text, sentiment, context);

    EmotionalAnalysis {
        emotion,
        intensity: intensity(sentiment, emotion, context),
        gif_search_terms: gif_search_terms(emotion, context),
        context: emotion.caption().to_string(),
        confidence: confidence(&text, emotion, sentiment),
    }
}
