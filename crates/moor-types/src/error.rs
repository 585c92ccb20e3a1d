/// Errors produced when parsing ids or composite keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("invalid id: {0}")]
    InvalidId(String),

    #[error("composite key too short: expected at least {expected} parts, found {actual}")]
    KeyTooShort { expected: usize, actual: usize },

    #[error("key part {index} is not {expected}")]
    UnexpectedPart { index: usize, expected: &'static str },
}
