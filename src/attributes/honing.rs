//! Companion attribute honing
//!
//! The player picks which attributes a companion should hone. Whenever the
//! companion's attribute points change, one point is spent on a randomly
//! chosen honed attribute.

use serde::{Deserialize, Serialize};

use crate::attributes::attribute::Attribute;
use crate::attributes::stats::{StatBlock, AP};
use crate::core::random::SeededRandom;

/// Menu collaborator: shows options and returns the picked index, or `None`
/// when the player backs out
pub trait OptionList {
    fn show(&mut self, intro: &str, options: &[String], hotkeys: &[char]) -> Option<usize>;
}

/// A point spent on an attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HonedPoint {
    pub attribute: Attribute,
    pub message: String,
}

/// Result of a management session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageOutcome {
    pub changed: bool,
    /// False when nothing is honed and the companion need not listen for
    /// attribute points any more
    pub keep: bool,
    pub spent: Option<HonedPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoningAttributes {
    attributes: Vec<Attribute>,
}

impl HoningAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.attributes.contains(&attribute)
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.attributes.iter().copied()
    }

    /// Start honing if not honed, stop otherwise. Returns whether it is now honed.
    pub fn toggle(&mut self, attribute: Attribute) -> bool {
        if let Some(pos) = self.attributes.iter().position(|a| *a == attribute) {
            self.attributes.remove(pos);
            false
        } else {
            self.attributes.push(attribute);
            true
        }
    }

    /// Stat-change hook; only changes to [`AP`] matter
    pub fn on_stat_change(
        &self,
        stat: &str,
        companion: &str,
        stats: &mut dyn StatBlock,
        rng: &mut dyn SeededRandom,
    ) -> Option<HonedPoint> {
        if stat != AP {
            return None;
        }
        self.spend_ap(companion, stats, rng)
    }

    /// Spend one attribute point on a random honed attribute
    pub fn spend_ap(
        &self,
        companion: &str,
        stats: &mut dyn StatBlock,
        rng: &mut dyn SeededRandom,
    ) -> Option<HonedPoint> {
        if self.attributes.is_empty() || stats.value(AP).unwrap_or(0) <= 0 {
            return None;
        }

        let attribute = *self.attributes.get(rng.next_index(self.attributes.len()))?;
        if !stats.add_base(attribute.name(), 1) {
            tracing::warn!("{} has no {} statistic to hone", companion, attribute.name());
            return None;
        }
        stats.add_penalty(AP, 1);

        let message = format!("{} becomes {}!", companion, attribute.comparative());
        tracing::info!("{}", message);
        Some(HonedPoint { attribute, message })
    }

    /// Interactive management loop.
    ///
    /// Each pick toggles an attribute. Backing out spends any saved point
    /// when something is honed.
    pub fn manage(
        &mut self,
        companion: &str,
        stats: &mut dyn StatBlock,
        menu: &mut dyn OptionList,
        rng: &mut dyn SeededRandom,
    ) -> ManageOutcome {
        let mut options: Vec<String> = Attribute::ALL
            .iter()
            .map(|attr| self.option_line(*attr, stats.value(attr.name()).unwrap_or(0)))
            .collect();
        let hotkeys: Vec<char> = (0..options.len())
            .map(|i| u8::try_from(i).ok().filter(|i| *i < 26).map_or(' ', |i| (b'a' + i) as char))
            .collect();
        let intro = format!("What attributes should {} hone?", companion);

        let mut changed = false;
        loop {
            let Some(index) = menu.show(&intro, &options, &hotkeys) else {
                let spent = if self.is_empty() {
                    None
                } else {
                    self.spend_ap(companion, stats, rng)
                };
                return ManageOutcome {
                    changed,
                    keep: !self.is_empty(),
                    spent,
                };
            };

            let Some(attr) = Attribute::ALL.get(index).copied() else {
                continue;
            };
            self.toggle(attr);
            options[index] = self.option_line(attr, stats.value(attr.name()).unwrap_or(0));
            changed = true;
        }
    }

    fn option_line(&self, attribute: Attribute, value: i64) -> String {
        let prefix = if self.contains(attribute) { '+' } else { '-' };
        format!("{} {}: {}", prefix, attribute.name(), attribute.describe(value))
    }
}
