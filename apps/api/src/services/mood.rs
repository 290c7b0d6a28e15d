//! Mood profiles per weather condition
//!
//! Each canonical condition maps to a set of catalog search keywords plus the
//! mood we are aiming for. The table is static and shared process-wide.

use crate::models::CanonicalCondition;

/// Musical mood associated with a weather condition
#[derive(Debug, Clone, PartialEq)]
pub struct MoodProfile {
    pub condition: CanonicalCondition,
    /// Catalog search keywords, never empty
    pub keywords: &'static [&'static str],
    /// Label shown next to each recommended track
    pub mood_label: &'static str,
    /// Target musical positiveness, 0.0 to 1.0
    pub target_valence: f32,
    /// Target intensity, 0.0 to 1.0
    pub target_energy: f32,
}

static PROFILES: [MoodProfile; 4] = [
    MoodProfile {
        condition: CanonicalCondition::Sunny,
        keywords: &["happy", "summer hits", "feel good", "sunshine pop", "upbeat"],
        mood_label: "upbeat & energetic",
        target_valence: 0.85,
        target_energy: 0.8,
    },
    MoodProfile {
        condition: CanonicalCondition::Cloudy,
        keywords: &["chill", "indie folk", "mellow", "lo-fi", "acoustic"],
        mood_label: "mellow & reflective",
        target_valence: 0.45,
        target_energy: 0.4,
    },
    MoodProfile {
        condition: CanonicalCondition::Rainy,
        keywords: &["rainy day", "jazz", "lo-fi beats", "melancholy", "acoustic covers"],
        mood_label: "calm & cozy",
        target_valence: 0.3,
        target_energy: 0.3,
    },
    MoodProfile {
        condition: CanonicalCondition::Snowy,
        keywords: &["winter", "ambient", "piano", "cozy folk", "classical"],
        mood_label: "peaceful & dreamy",
        target_valence: 0.5,
        target_energy: 0.25,
    },
];

/// Profile for a condition; the Sunny profile is the default entry
pub fn lookup(condition: CanonicalCondition) -> &'static MoodProfile {
    PROFILES
        .iter()
        .find(|p| p.condition == condition)
        .unwrap_or(&PROFILES[0])
}
