//! The six companion attributes and how they are described to the player

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Agility,
    Toughness,
    Intelligence,
    Willpower,
    Ego,
}

/// Colours for the six value buckets, weakest first
pub const CATEGORY_COLORS: [&str; 6] = ["dark red", "red", "gray", "green", "orange", "extradimensional"];

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Agility,
        Attribute::Toughness,
        Attribute::Intelligence,
        Attribute::Willpower,
        Attribute::Ego,
    ];

    /// Host statistic name
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Strength => "Strength",
            Attribute::Agility => "Agility",
            Attribute::Toughness => "Toughness",
            Attribute::Intelligence => "Intelligence",
            Attribute::Willpower => "Willpower",
            Attribute::Ego => "Ego",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    pub fn comparative(&self) -> &'static str {
        match self {
            Attribute::Strength => "stronger",
            Attribute::Agility => "quicker",
            Attribute::Toughness => "tougher",
            Attribute::Intelligence => "smarter",
            Attribute::Willpower => "stronger-willed",
            Attribute::Ego => "more compelling",
        }
    }

    pub fn categories(&self) -> [&'static str; 6] {
        match self {
            Attribute::Strength => ["feeble", "weak", "average", "strong", "beefy", "heckin' swole"],
            Attribute::Agility => ["ponderous", "slow", "average", "quick", "olympian", "sonic fast"],
            Attribute::Toughness => ["frail", "vulnerable", "average", "tough", "tanky", "slug sponge"],
            Attribute::Intelligence => ["incompetent", "dull", "average", "smart", "brilliant", "galaxy brain"],
            Attribute::Willpower => ["pushover", "gullible", "average", "strong-willed", "stalwart", "indefatigable"],
            Attribute::Ego => ["intolerable", "abrasive", "average", "compelling", "magnificent", "deific"],
        }
    }

    /// Coloured category markup for a score, e.g. `{{green|strong}}`
    pub fn describe(&self, value: i64) -> String {
        let bucket = bucket(value);
        format!("{{{{{}|{}}}}}", CATEGORY_COLORS[bucket], self.categories()[bucket])
    }
}

/// Bucket a score: ≤6, ≤12, ≤17, ≤25, ≤35, above
pub fn bucket(value: i64) -> usize {
    match value {
        i64::MIN..=6 => 0,
        7..=12 => 1,
        13..=17 => 2,
        18..=25 => 3,
        26..=35 => 4,
        _ => 5,
    }
}
