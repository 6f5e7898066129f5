use thiserror::Error;

pub type CoercionResult<T> = std::result::Result<T, CoercionError>;
pub type ChunkResult<T> = std::result::Result<T, ChunkError>;

/// Errors raised while coercing a rendered layout value into a requested type.
///
/// These surface only under [`ErrorPolicy::Throw`](crate::coerce::ErrorPolicy);
/// under `Suppress` the coercer absorbs the failure and substitutes the
/// target's default value.
#[derive(Debug, Error)]
pub enum CoercionError {
    #[error("value `{value}` cannot be coerced into {target}")]
    FormatError { value: String, target: String },
}

impl CoercionError {
    pub(crate) fn format(value: impl std::fmt::Display, target: impl std::fmt::Display) -> Self {
        CoercionError::FormatError {
            value: value.to_string(),
            target: target.to_string(),
        }
    }
}

/// Errors raised by the message chunker. Invalid chunking parameters are a
/// configuration-contract violation and are never silently defaulted.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("max entry size must be positive, got {size}")]
    InvalidMaxSize { size: usize },
}

/// Errors raised while driving chunks through a bounded sink writer.
#[derive(Debug, Error)]
pub enum SinkError<W: std::error::Error + 'static> {
    #[error(transparent)]
    Chunk(#[from] ChunkError),

    #[error("failed to write entry {position} of {total}: {source}")]
    Write {
        position: usize,
        total: usize,
        source: W,
    },
}
