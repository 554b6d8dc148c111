use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unrecognized thread folder: {0:?}")]
    UnknownFolder(String),

    #[error("millisecond timestamp out of range: {0}")]
    TimestampRange(i64),

    #[error("malformed message payload: {0}")]
    Message(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
