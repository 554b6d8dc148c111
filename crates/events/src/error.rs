use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The delta carries no `class` tag at all.
    #[error("delta is missing its \"class\" tag")]
    MissingClass,

    /// A payload of a recognized class is missing or mistypes a required
    /// field. The listening loop decides whether to drop the payload or
    /// tear down the stream; this layer never swallows it.
    #[error("malformed {shape} payload: {source}")]
    Malformed {
        shape: &'static str,
        source: serde_json::Error,
    },

    /// A millisecond timestamp field did not hold an integer.
    #[error("invalid millisecond timestamp: {0:?}")]
    Timestamp(String),

    /// A thread key carried neither a group id nor an other-user id.
    #[error("thread key carries neither a group id nor an other-user id")]
    EmptyThreadKey,

    /// A fetched participant-removal record listed nobody.
    #[error("fetched participant-removal record lists nobody")]
    NoRemovedParticipant,

    /// `ClientPayload` deltas are decoded by the payload parser upstream;
    /// routing one here is a caller bug, not a runtime condition.
    #[error("ClientPayload deltas must not be routed to parse_delta")]
    ClientPayload,

    #[error(transparent)]
    Model(#[from] models::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
