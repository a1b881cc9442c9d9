use thiserror::Error;

use crate::field::FieldKey;

/// Errors surfaced by the embed widget.
///
/// The default encode/decode/render paths never return these; they back the
/// opt-in checked operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    #[error("unknown field: {0:?}")]
    UnknownField(String),

    #[error("state string has {found} segments, expected {expected}")]
    SegmentCount { expected: usize, found: usize },

    #[error("required field is empty: {0}")]
    MissingRequired(FieldKey),

    #[error("invalid embed options: {0}")]
    InvalidOptions(String),

    #[error("invalid player base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, EmbedError>;
