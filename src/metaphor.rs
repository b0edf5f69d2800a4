use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::emotion::Emotion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    ClassWarfare,
    Gatekeeping,
    InternetPsychology,
    ModernAbsurdity,
    HumanNature,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryMoral {
    pub theme: Theme,
    pub lesson: String,
    pub absurdity: String,
    pub cultural_context: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaphorInsight {
    pub metaphor: String,
    pub moral: String,
    pub terry_voice: String,
    pub confidence: f64,
    pub triggers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

const METAPHORS: &[&str] = &[
    "like watching someone try to fold a fitted sheet while the house burns down",
    "like debating the proper way to sink on the Titanic",
    "like arguing about deck chair arrangements during an earthquake",
    "like critiquing someone's driving while the car is on fire",
    "like discussing interior design in a collapsing building",
    "like rating the band while the ship goes down",
    "like judging someone's table manners during food poisoning",
    "like complaining about the Wi-Fi during a zombie apocalypse",
    "like arguing about parking while being chased by bears",
    "like debating grammar during a hostage situation",
];

const OPENERS: &[&str] = &[
    "The Terry notes this is",
    "What we're witnessing here is",
    "This perfectly encapsulates",
    "The real story isn't about",
    "Beneath all this chaos lies",
    "Strip away the noise and you'll find",
    "This whole debacle reveals",
    "The beautiful absurdity here is",
    "What makes this fascinating is",
    "The deeper truth emerging is",
];

struct ThemeProfile {
    theme: Theme,
    detectors: &'static [&'static str],
    lesson: &'static str,
    absurdity: &'static str,
    cultural_context: &'static str,
    insights: &'static [&'static str],
    keywords: &'static [&'static str],
}

/// Checked in order; the first theme with any detector hit wins.
static THEMES: &[ThemeProfile] = &[
    ThemeProfile {
        theme: Theme::ClassWarfare,
        detectors: &[
            "privilege", "access", "afford", "class", "bougie", "sophisticated", "proper",
            "authentic", "real", "wrong way", "right way",
        ],
        lesson: "Food preferences become proxies for social status and economic access",
        absurdity: "Adults having passionate debates about condiment choices",
        cultural_context: "Late-stage capitalism where everything becomes a status symbol",
        insights: &[
            "just classism with better seasoning",
            "economic anxiety dressed up as taste preferences",
            "privilege disguised as sophistication",
            "social hierarchy with extra steps",
        ],
        keywords: &["privilege", "access", "afford", "bougie", "class"],
    },
    ThemeProfile {
        theme: Theme::Gatekeeping,
        detectors: &[
            "should", "shouldn't", "wrong", "right", "proper", "improper", "rules",
            "standards", "acceptable", "unacceptable", "taste",
        ],
        lesson: "The arbitrary nature of cultural rules and who gets to enforce them",
        absurdity: "Strangers on the internet appointing themselves taste police",
        cultural_context: "Social media platforms as modern public squares for moral judgment",
        insights: &[
            "who gets to decide what constitutes acceptable happiness",
            "the arbitrary nature of cultural superiority",
            "the psychology of manufactured exclusivity",
            "how we use taste to create in-groups and out-groups",
        ],
        keywords: &["should", "proper", "wrong", "standards", "acceptable"],
    },
    ThemeProfile {
        theme: Theme::InternetPsychology,
        detectors: &[
            "twitter", "viral", "trending", "ratio", "quote tweet", "replies", "internet",
            "online", "discourse", "social media",
        ],
        lesson: "How digital platforms amplify and distort human behavior",
        absurdity: "Turning every opinion into a battle for the soul of civilization",
        cultural_context: "The attention economy incentivizing performative outrage",
        insights: &[
            "how the internet turns every preference into a moral battlefield",
            "why we perform sophistication for strangers online",
            "the human need to be right about absolutely everything",
            "how social media weaponizes mundane disagreements",
        ],
        keywords: &["twitter", "viral", "online", "discourse", "social"],
    },
    ThemeProfile {
        theme: Theme::ModernAbsurdity,
        detectors: &[
            "peak", "energy", "behavior", "absolutely", "perfectly", "exactly", "classic",
            "typical", "standard",
        ],
        lesson: "The beautiful chaos of having strong opinions about everything",
        absurdity: "Making mountains out of molehills for entertainment value",
        cultural_context: "Information age overwhelming us with things to have opinions about",
        insights: &[
            "peak internet behavior",
            "the magnificent futility of online discourse",
            "how we've managed to make everything contentious",
            "the beautiful chaos of having opinions about everything",
        ],
        keywords: &["peak", "absolutely", "perfectly", "classic"],
    },
];

static HUMAN_NATURE: ThemeProfile = ThemeProfile {
    theme: Theme::HumanNature,
    detectors: &[],
    lesson: "",
    absurdity: "",
    cultural_context: "",
    insights: &[
        "our infinite capacity to miss the point spectacularly",
        "how we turn molehills into mountains for entertainment",
        "the psychology of manufactured outrage",
        "why humans will argue about literally anything",
    ],
    keywords: &["behavior", "psychology", "people", "human", "society"],
};

const TRIGGERS: &[(&str, &[&str])] = &[
    (
        "class_indicators",
        &["privilege", "access", "afford", "bougie", "sophisticated"],
    ),
    (
        "judgment_language",
        &["should", "wrong", "proper", "acceptable", "standards"],
    ),
    (
        "emotional_escalation",
        &["outrage", "angry", "furious", "chaos", "meltdown"],
    ),
    (
        "internet_culture",
        &["viral", "trending", "ratio", "discourse", "twitter"],
    ),
    (
        "food_culture",
        &["authentic", "traditional", "proper way", "right way"],
    ),
];

static THEME_KEYWORD_RES: Lazy<Vec<Vec<Regex>>> = Lazy::new(|| {
    THEMES
        .iter()
        .chain(std::iter::once(&HUMAN_NATURE))
        .map(|p| {
            p.keywords
                .iter()
                .map(|k| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(k))).unwrap())
                .collect()
        })
        .collect()
});

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Stable pick from `items`, keyed by `seed`.
fn pick<'a>(items: &[&'a str], seed: &str, salt: &str) -> &'a str {
    let hash = xxh3_64(format!("{salt}|{seed}").as_bytes());
    items[(hash % items.len() as u64) as usize]
}

fn profile_for(theme: Theme) -> (usize, &'static ThemeProfile) {
    THEMES
        .iter()
        .enumerate()
        .find(|(_, p)| p.theme == theme)
        .unwrap_or((THEMES.len(), &HUMAN_NATURE))
}

fn analyze_moral(title: &str, content: &str) -> StoryMoral {
    let combined = format!("{title} {content}").to_lowercase();
    let profile = THEMES
        .iter()
        .find(|p| p.detectors.iter().any(|d| combined.contains(d)))
        .unwrap_or(&HUMAN_NATURE);

    StoryMoral {
        theme: profile.theme,
        lesson: profile.lesson.to_string(),
        absurdity: profile.absurdity.to_string(),
        cultural_context: profile.cultural_context.to_string(),
    }
}

fn metaphor_band(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::PeakChaos | Emotion::PureEntertainment => &METAPHORS[..5],
        Emotion::EscalatingDrama => &METAPHORS[3..8],
        _ => &METAPHORS[5..],
    }
}

fn commentary(moral: &StoryMoral, metaphor: &str, seed: &str) -> String {
    let opener = pick(OPENERS, seed, "opener");
    let (_, profile) = profile_for(moral.theme);
    let insight = pick(profile.insights, seed, "insight");

    match moral.theme {
        Theme::ClassWarfare => format!(
            "{opener} {} is {insight}. {metaphor} - technically fascinating, ultimately pointless, but absolutely mesmerizing to witness.",
            moral.absurdity.to_lowercase()
        ),
        Theme::Gatekeeping => format!(
            "{opener} really about {insight}. {metaphor}, except the deck chairs are condiment preferences and the ocean is human dignity."
        ),
        Theme::InternetPsychology => format!(
            "{opener} {insight}. {metaphor}, except we're all voluntarily participating and somehow surprised by the outcome."
        ),
        Theme::ModernAbsurdity => format!(
            "{opener} {insight}. {metaphor}, and we're all here for it because apparently this is what entertainment looks like now."
        ),
        Theme::HumanNature => format!(
            "{opener} {insight}. {metaphor}, which perfectly captures the human condition in the digital age."
        ),
    }
}

fn confidence(content: &str, theme: Theme) -> f64 {
    let (index, _) = profile_for(theme);
    let matches: usize = THEME_KEYWORD_RES[index]
        .iter()
        .map(|re| re.find_iter(content).count())
        .sum();
    let length_factor = f64::min(content.chars().count() as f64 / 2000.0, 1.0);
    let keyword_factor = f64::min(matches as f64 / 5.0, 1.0);
    (length_factor + keyword_factor) / 2.0
}

fn triggers(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    TRIGGERS
        .iter()
        .filter(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(name, _)| name.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Commentary for a story. The same title and content always yield the same
/// metaphor and phrasing.
pub fn extract_metaphor(
    title: &str,
    content: &str,
    category: &str,
    emotion: Emotion,
) -> MetaphorInsight {
    let moral = analyze_moral(title, content);
    let seed = format!("{category}|{title}|{content}");
    let metaphor = pick(metaphor_band(emotion), &seed, "metaphor");
    let terry_voice = commentary(&moral, metaphor, &seed);

    MetaphorInsight {
        metaphor: metaphor.to_string(),
        moral: moral.lesson.clone(),
        terry_voice,
        confidence: confidence(content, moral.theme),
        triggers: triggers(content),
    }
}

pub fn detect_theme(title: &str, content: &str) -> StoryMoral {
    analyze_moral(title, content)
}
