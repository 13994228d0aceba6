//! Resolution errors.
//!
//! Any of these aborts the current unit: a half-resolved graph would render
//! into a wrong hardware description. Every variant names the offending
//! qualified key and the condition it broke.

use thiserror::Error;
use tydi_ir::{KeyError, LogicKind};

/// Why a unit failed to resolve.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("malformed qualified key `{key}`: {reason}")]
    MalformedKey { key: String, reason: &'static str },

    #[error("`{key}` references unknown logic type `{target}`")]
    UnknownReference { key: String, target: String },

    #[error("reference chain revisits `{key}`")]
    CycleDetected { key: String },

    #[error("implementation `{key}` derives from unknown streamlet `{streamlet}`")]
    UnknownStreamlet { key: String, streamlet: String },

    #[error("instance `{key}` derives from unknown implementation `{implementation}`")]
    UnknownImplementation { key: String, implementation: String },

    #[error("net `{key}` is owned by unknown instance `{owner}`")]
    UnknownInstance { key: String, owner: String },

    #[error("net `{key}` connects unknown port `{port}` of `{owner}`")]
    UnknownPort {
        key: String,
        owner: String,
        port: String,
    },

    #[error("`{key}`: expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: String,
    },
}

impl ResolveError {
    /// Stable short code, printed as `error[R0003]`.
    pub fn code(&self) -> &'static str {
        match self {
            ResolveError::MalformedKey { .. } => "R0001",
            ResolveError::UnknownReference { .. } => "R0002",
            ResolveError::CycleDetected { .. } => "R0003",
            ResolveError::UnknownStreamlet { .. } => "R0004",
            ResolveError::UnknownImplementation { .. } => "R0005",
            ResolveError::UnknownInstance { .. } => "R0006",
            ResolveError::UnknownPort { .. } => "R0007",
            ResolveError::TypeMismatch { .. } => "R0008",
        }
    }

    /// The qualified key of the entity that broke the invariant.
    pub fn key(&self) -> &str {
        match self {
            ResolveError::MalformedKey { key, .. }
            | ResolveError::UnknownReference { key, .. }
            | ResolveError::CycleDetected { key }
            | ResolveError::UnknownStreamlet { key, .. }
            | ResolveError::UnknownImplementation { key, .. }
            | ResolveError::UnknownInstance { key, .. }
            | ResolveError::UnknownPort { key, .. }
            | ResolveError::TypeMismatch { key, .. } => key,
        }
    }

    pub(crate) fn kind_mismatch(key: &str, expected: &'static str, found: LogicKind) -> Self {
        ResolveError::TypeMismatch {
            key: key.to_owned(),
            expected,
            found: found.as_str().to_owned(),
        }
    }
}

impl From<KeyError> for ResolveError {
    fn from(err: KeyError) -> Self {
        ResolveError::MalformedKey {
            key: err.key,
            reason: err.reason,
        }
    }
}

/// Result type for the resolution passes.
pub type Result<T> = std::result::Result<T, ResolveError>;

#[cfg(test)]
mod tests;
