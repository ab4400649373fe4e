use thiserror::Error;

use crate::core::types::ValueType;
use crate::host::HostTypeId;

#[derive(Error, Debug)]
pub enum CompatError {
    #[error("Could not find {candidates} on {host_type}.")]
    UnresolvedMember {
        host_type: HostTypeId,
        candidates: &'static str,
    },

    #[error("{member} on {host_type} is {found:?}, expected {expected:?}")]
    TypeMismatch {
        host_type: HostTypeId,
        member: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("{operation}: {member} on {host_type} failed (resolved {candidate}): {reason}")]
    InvocationFailure {
        operation: &'static str,
        host_type: HostTypeId,
        member: String,
        /// Which candidate resolved, with its kind or overload signature
        candidate: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CompatError>;
