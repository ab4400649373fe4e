pub mod config;
pub mod error;
pub mod random;
pub mod types;

pub use config::CompatConfig;
pub use error::{CompatError, Result};
pub use random::SeededRandom;
pub use types::{FromValue, HostHandle, Value, ValueType};
