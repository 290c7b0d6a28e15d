//! Canonical weather conditions
//!
//! Upstream providers describe the sky in free text ("Patchy light drizzle",
//! "Partly cloudy", ...). Everything downstream works with one of four
//! canonical conditions instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four weather conditions the service reasons about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanonicalCondition {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
}

/// Keyword rules, checked in order; the first matching rule wins
const RULES: &[(&[&str], CanonicalCondition)] = &[
    (&["sun", "clear"], CanonicalCondition::Sunny),
    (&["rain", "drizzle"], CanonicalCondition::Rainy),
    (&["snow"], CanonicalCondition::Snowy),
    (&["cloud", "overcast"], CanonicalCondition::Cloudy),
];

impl CanonicalCondition {
    /// All canonical conditions
    pub const ALL: [CanonicalCondition; 4] = [
        CanonicalCondition::Sunny,
        CanonicalCondition::Cloudy,
        CanonicalCondition::Rainy,
        CanonicalCondition::Snowy,
    ];

    /// Map free-text weather onto a canonical condition
    ///
    /// Case-insensitive substring match. Text matching no rule is `Cloudy`.
    pub fn normalize(raw: &str) -> Self {
        let lowered = raw.to_lowercase();
        RULES
            .iter()
            .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
            .map(|(_, condition)| *condition)
            .unwrap_or(CanonicalCondition::Cloudy)
    }

    /// Canonical name, e.g. "Rainy"
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Cloudy => "Cloudy",
            Self::Rainy => "Rainy",
            Self::Snowy => "Snowy",
        }
    }

    /// Lowercase adjective for prose, e.g. "rainy"
    pub fn adjective(&self) -> &'static str {
        match self {
            Self::Sunny => "sunny",
            Self::Cloudy => "cloudy",
            Self::Rainy => "rainy",
            Self::Snowy => "snowy",
        }
    }
}

impl fmt::Display for CanonicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
