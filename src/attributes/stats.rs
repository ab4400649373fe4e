//! Statistics collaborator

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Name of the attribute-point statistic
pub const AP: &str = "AP";

/// Named statistics of a creature
///
/// The effective value is the base plus bonuses minus penalties; spending an
/// attribute point is modelled as a penalty on [`AP`].
pub trait StatBlock {
    fn value(&self, stat: &str) -> Option<i64>;

    /// Returns false if the creature has no such statistic
    fn add_base(&mut self, stat: &str, delta: i64) -> bool;

    fn add_penalty(&mut self, stat: &str, delta: i64) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    pub base: i64,
    pub bonus: i64,
    pub penalty: i64,
}

impl Statistic {
    pub fn value(&self) -> i64 {
        self.base + self.bonus - self.penalty
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatSheet {
    stats: AHashMap<String, Statistic>,
}

impl StatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(mut self, stat: &str, base: i64) -> Self {
        self.stats.entry(stat.to_string()).or_default().base = base;
        self
    }

    pub fn get(&self, stat: &str) -> Option<&Statistic> {
        self.stats.get(stat)
    }
}

impl StatBlock for StatSheet {
    fn value(&self, stat: &str) -> Option<i64> {
        self.stats.get(stat).map(Statistic::value)
    }

    fn add_base(&mut self, stat: &str, delta: i64) -> bool {
        match self.stats.get_mut(stat) {
            Some(s) => {
                s.base += delta;
                true
            }
            None => false,
        }
    }

    fn add_penalty(&mut self, stat: &str, delta: i64) -> bool {
        match self.stats.get_mut(stat) {
            Some(s) => {
                s.penalty += delta;
                true
            }
            None => false,
        }
    }
}
