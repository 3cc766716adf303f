use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid name pattern: {0}")]
    InvalidPattern(String),

    #[error("invalid group index: {0:?}")]
    InvalidGroupIndex(String),

    #[error("invalid {kind} value: {raw:?}")]
    InvalidValue { kind: &'static str, raw: String },
}
