//! Companion attribute management

pub mod attribute;
pub mod honing;
pub mod stats;

pub use attribute::{bucket, Attribute, CATEGORY_COLORS};
pub use honing::{HonedPoint, HoningAttributes, ManageOutcome, OptionList};
pub use stats::{StatBlock, StatSheet, Statistic, AP};
