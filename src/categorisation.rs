/*!
 * Categorisation of raw annotation values.
 *
 * Static lookup tables mapping free-text annotation values of the facial,
 * gaze and utterance tiers to a small set of categories. Every lookup has an
 * explicit fallback for unmapped values.
 */

use std::collections::HashMap;
use once_cell::sync::Lazy;

// @const: Fallback categories for unmapped values
pub const FACIAL_FALLBACK: &str = "neutral";
pub const GAZE_FALLBACK: &str = "distracted";
pub const UTTERANCE_FALLBACK: &str = "statement";

static FACIAL_MOT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("smile showing teeth", "positive"),
        ("smile", "positive"),
        ("widely opened eyes", "positive"),
        ("O-shaped mouth", "neutral"),
        ("neutral", "neutral"),
        ("biting lower lip", "neutral"),
        ("invisible", "invisible"),
    ])
});

static GAZE_MOT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("child", "child"),
        ("invisible", "invisible"),
        ("ball", "main_object"),
        ("toys", "object"),
        ("into the distance", "distracted"),
        ("dad", "distracted"),
        ("floor", "distracted"),
        ("glass", "object"),
        ("toy", "object"),
        ("aside", "distracted"),
    ])
});

static GAZE_CHI: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("mom", "mom"),
        ("mom's hand", "mom"),
        ("mom's legs", "mom"),
        ("ball", "main_object"),
        ("floor", "distracted"),
        ("toys", "object"),
        ("toy", "object"),
        ("glass", "object"),
        ("aside", "distracted"),
        ("ceiling", "distracted"),
        ("dad", "distracted"),
    ])
});

const QUESTIONS: &[&str] = &[
    "Ready?",
    "Can I please have a ball?",
    "What even set off you laughing so hard?",
];

// Not part of the utterance mapping; commands fall back to "statement"
pub const COMMANDS: &[&str] = &["Drop it.", "Drop it in.", "Put it in here.", "Can you sit up?"];

const AFFECTION: &[&str] = &["I love you."];

const PLAYFUL_SOUNDS: &[&str] = &["chooga", "... tickle you", "Yeaaah!"];

const STATEMENTS: &[&str] = &[
    "She’s laughing so hard that she literally can’t even stay seated.",
    "I hope this is not the laugh before the cry.",
    "Really far.",
    "Too far.",
    "I take this one.",
    "This is harmonious to hear.",
    "Keep falling.",
];

static UTTERANCE_MOT: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let lists: [(&str, &[&str]); 4] = [
        ("question", QUESTIONS),
        ("statement", STATEMENTS),
        ("affection", AFFECTION),
        ("playful_sounds", PLAYFUL_SOUNDS),
    ];
    lists
        .iter()
        .flat_map(|(category, values)| values.iter().map(move |value| (*value, *category)))
        .collect()
});

/// Facial@MOT category, `neutral` when unmapped
pub fn categorize_facial_mot(value: &str) -> &'static str {
    FACIAL_MOT.get(value).copied().unwrap_or(FACIAL_FALLBACK)
}

/// Utterance@MOT category, `statement` when unmapped
pub fn categorize_utterance_mot(value: &str) -> &'static str {
    UTTERANCE_MOT.get(value).copied().unwrap_or(UTTERANCE_FALLBACK)
}

/// Gaze@MOT category, `distracted` when unmapped
pub fn categorize_gaze_mot(value: &str) -> &'static str {
    GAZE_MOT.get(value).copied().unwrap_or(GAZE_FALLBACK)
}

/// Gaze@CHI category, `distracted` when unmapped
pub fn categorize_gaze_chi(value: &str) -> &'static str {
    GAZE_CHI.get(value).copied().unwrap_or(GAZE_FALLBACK)
}

/// Categorizer selected by tier name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Categorizer {
    FacialMot,
    GazeMot,
    GazeChi,
    UtteranceMot,
}

impl Categorizer {
    pub fn categorize(&self, value: &str) -> &'static str {
        match self {
            Self::FacialMot => categorize_facial_mot(value),
            Self::GazeMot => categorize_gaze_mot(value),
            Self::GazeChi => categorize_gaze_chi(value),
            Self::UtteranceMot => categorize_utterance_mot(value),
        }
    }
}

/// The categorizer for a tier, if that tier has one
pub fn categorizer_for_tier(tier: &str) -> Option<Categorizer> {
    match tier {
        "Facial@MOT" => Some(Categorizer::FacialMot),
        "Gaze@MOT" => Some(Categorizer::GazeMot),
        "Gaze@CHI" => Some(Categorizer::GazeChi),
        "Utterance@MOT" => Some(Categorizer::UtteranceMot),
        _ => None,
    }
}
