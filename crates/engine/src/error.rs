use fieldset_core::{CoreError, GroupIndex};
use thiserror::Error;

/// A problem with one grouped input. Collection keeps going after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectError {
    #[error("group index out of range in {name:?}")]
    InvalidGroupIndex { name: String },

    #[error("group {index}: unknown field {key:?}")]
    UnknownField { index: GroupIndex, key: String },

    #[error("group {index}: field {key:?} received {count} values")]
    DuplicateValues {
        index: GroupIndex,
        key: String,
        count: usize,
    },

    #[error("group {index}: field {key:?} rejected {value:?}: {reason}")]
    InvalidValue {
        index: GroupIndex,
        key: String,
        value: String,
        reason: String,
    },
}

impl CollectError {
    /// The record this error belongs to, if the name could be attributed to one.
    pub fn group_index(&self) -> Option<GroupIndex> {
        match self {
            Self::InvalidGroupIndex { .. } => None,
            Self::UnknownField { index, .. }
            | Self::DuplicateValues { index, .. }
            | Self::InvalidValue { index, .. } => Some(*index),
        }
    }

    pub fn field_key(&self) -> Option<&str> {
        match self {
            Self::InvalidGroupIndex { .. } => None,
            Self::UnknownField { key, .. }
            | Self::DuplicateValues { key, .. }
            | Self::InvalidValue { key, .. } => Some(key),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("submission rejected with {} error(s)", errors.len())]
    Rejected { errors: Vec<CollectError> },

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("sink error: {0}")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}
