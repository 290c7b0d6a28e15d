//! Curated fallback library
//!
//! Served whenever the catalog cannot be used. Three hand-picked tracks per
//! condition, no media links.

use crate::models::{CanonicalCondition, RecommendationResult, RecommendationSource, Track};
use crate::services::mood;

/// (name, artist, album)
type CuratedTrack = (&'static str, &'static str, &'static str);

const SUNNY: [CuratedTrack; 3] = [
    ("Here Comes the Sun", "The Beatles", "Abbey Road"),
    ("Walking on Sunshine", "Katrina and the Waves", "Walking on Sunshine"),
    ("Good Vibrations", "The Beach Boys", "Smiley Smile"),
];

const CLOUDY: [CuratedTrack; 3] = [
    ("Breathe Me", "Sia", "Colour the Small One"),
    ("Holocene", "Bon Iver", "Bon Iver, Bon Iver"),
    ("Fade Into You", "Mazzy Star", "So Tonight That I Might See"),
];

const RAINY: [CuratedTrack; 3] = [
    ("Riders on the Storm", "The Doors", "L.A. Woman"),
    ("Set Fire to the Rain", "Adele", "21"),
    ("Purple Rain", "Prince", "Purple Rain"),
];

const SNOWY: [CuratedTrack; 3] = [
    ("Snow (Hey Oh)", "Red Hot Chili Peppers", "Stadium Arcadium"),
    ("White Winter Hymnal", "Fleet Foxes", "Fleet Foxes"),
    ("Winter Song", "Sara Bareilles & Ingrid Michaelson", "Kaleidoscope Heart"),
];

fn curated(condition: CanonicalCondition) -> &'static [CuratedTrack; 3] {
    match condition {
        CanonicalCondition::Sunny => &SUNNY,
        CanonicalCondition::Cloudy => &CLOUDY,
        CanonicalCondition::Rainy => &RAINY,
        CanonicalCondition::Snowy => &SNOWY,
    }
}

/// The curated recommendation for a condition
pub fn fallback(condition: CanonicalCondition) -> RecommendationResult {
    let profile = mood::lookup(condition);
    let reason = format!("a curated {} day classic", condition.adjective());

    let tracks = curated(condition)
        .iter()
        .map(|(name, artist, album)| {
            Track::curated(name, artist, album, profile.mood_label, reason.clone())
        })
        .collect();

    RecommendationResult {
        tracks,
        source: RecommendationSource::Fallback,
    }
}
