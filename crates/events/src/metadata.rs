//! Wire shapes shared across delta kinds.
//!
//! The server uses three different envelope shapes for actor/thread/time
//! metadata: the nested `messageMetadata` push envelope, the flatter
//! fetch-result shape, and bare thread keys on receipt deltas. The helpers
//! here collapse all three into triples over identity-only handles.

use chrono::{DateTime, Utc};
use models::{millis_to_timestamp, Session, ThreadRef, UserRef};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// Decode a wire shape, converting a missing or mistyped field into a
/// structural error naming the shape.
pub(crate) fn decode<T: DeserializeOwned>(shape: &'static str, data: &Value) -> Result<T> {
    T::deserialize(data).map_err(|source| Error::Malformed { shape, source })
}

/// Server ids arrive as strings or numbers depending on the endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    pub(crate) fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Millisecond timestamps likewise arrive as strings or numbers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawMillis {
    Number(i64),
    Text(String),
}

impl RawMillis {
    /// Exact conversion to a timestamp; a non-integer string fails.
    pub(crate) fn to_timestamp(&self) -> Result<DateTime<Utc>> {
        let ms = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.parse().map_err(|_| Error::Timestamp(s.clone()))?,
        };
        Ok(millis_to_timestamp(ms)?)
    }
}

/// The `threadKey` structure disambiguating group vs one-to-one threads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ThreadKey {
    #[serde(default)]
    thread_fb_id: Option<RawId>,
    #[serde(default)]
    other_user_fb_id: Option<RawId>,
}

impl ThreadKey {
    /// Group id present means a group thread; otherwise the key names the
    /// other user of a one-to-one thread. A key with neither id is
    /// structurally invalid.
    pub(crate) fn resolve(self, session: &Session) -> Result<ThreadRef> {
        if let Some(id) = self.thread_fb_id {
            Ok(ThreadRef::group(session.clone(), id.into_string()))
        } else if let Some(id) = self.other_user_fb_id {
            Ok(ThreadRef::one_to_one(session.clone(), id.into_string()))
        } else {
            Err(Error::EmptyThreadKey)
        }
    }
}

/// The nested `messageMetadata` envelope on push deltas.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PushMetadata {
    actor_fb_id: RawId,
    thread_key: ThreadKey,
    timestamp: RawMillis,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PushEnvelope {
    message_metadata: PushMetadata,
}

/// Pull `(author, thread, at)` out of a push delta's metadata envelope.
pub(crate) fn parse_metadata(
    session: &Session,
    data: &Value,
) -> Result<(UserRef, ThreadRef, DateTime<Utc>)> {
    let meta = decode::<PushEnvelope>("messageMetadata", data)?.message_metadata;
    let author = UserRef::new(session.clone(), meta.actor_fb_id.into_string());
    let thread = meta.thread_key.resolve(session)?;
    let at = meta.timestamp.to_timestamp()?;
    Ok((author, thread, at))
}

/// Pull `(author, at)` out of the flatter fetch-result shape.
pub(crate) fn parse_fetch(session: &Session, data: &Value) -> Result<(UserRef, DateTime<Utc>)> {
    #[derive(Debug, Deserialize)]
    struct FetchEnvelope {
        message_sender: FetchSender,
        timestamp_precise: RawMillis,
    }

    #[derive(Debug, Deserialize)]
    struct FetchSender {
        id: RawId,
    }

    let envelope = decode::<FetchEnvelope>("fetch metadata", data)?;
    let author = UserRef::new(session.clone(), envelope.message_sender.id.into_string());
    let at = envelope.timestamp_precise.to_timestamp()?;
    Ok((author, at))
}

/// Resolve a thread handle from a delta's top-level `threadKey`.
pub(crate) fn get_thread(session: &Session, data: &Value) -> Result<ThreadRef> {
    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct KeyEnvelope {
        thread_key: ThreadKey,
    }

    decode::<KeyEnvelope>("threadKey", data)?
        .thread_key
        .resolve(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::ThreadKind;
    use serde_json::json;

    fn session() -> Session {
        Session::new("1")
    }

    #[test]
    fn metadata_triple() {
        let data = json!({
            "messageMetadata": {
                "actorFbId": "5",
                "threadKey": {"threadFbId": "4444"},
                "timestamp": "1500000000000",
            }
        });
        let (author, thread, at) = parse_metadata(&session(), &data).unwrap();
        assert_eq!(author.id, "5");
        assert_eq!(thread.id, "4444");
        assert_eq!(thread.kind, ThreadKind::Group);
        assert_eq!(at.timestamp_millis(), 1_500_000_000_000);
    }

    #[test]
    fn metadata_missing_envelope_fails() {
        let err = parse_metadata(&session(), &json!({})).unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn fetch_shape() {
        let data = json!({
            "message_sender": {"id": "5"},
            "timestamp_precise": "1000",
        });
        let (author, at) = parse_fetch(&session(), &data).unwrap();
        assert_eq!(author.id, "5");
        assert_eq!(at.timestamp_millis(), 1000);
    }

    #[test]
    fn thread_key_group_wins_over_user() {
        let data = json!({"threadKey": {"threadFbId": "4444", "otherUserFbId": "5"}});
        let thread = get_thread(&session(), &data).unwrap();
        assert_eq!(thread.kind, ThreadKind::Group);
        assert_eq!(thread.id, "4444");
    }

    #[test]
    fn thread_key_one_to_one() {
        let data = json!({"threadKey": {"otherUserFbId": "5"}});
        let thread = get_thread(&session(), &data).unwrap();
        assert_eq!(thread.kind, ThreadKind::OneToOne);
        assert_eq!(thread.id, "5");
    }

    #[test]
    fn thread_key_numeric_id() {
        let data = json!({"threadKey": {"threadFbId": 4444}});
        let thread = get_thread(&session(), &data).unwrap();
        assert_eq!(thread.id, "4444");
    }

    #[test]
    fn empty_thread_key_fails() {
        let err = get_thread(&session(), &json!({"threadKey": {}})).unwrap_err();
        assert!(matches!(err, Error::EmptyThreadKey));
    }

    #[test]
    fn non_integer_millis_fails() {
        let data = json!({
            "message_sender": {"id": "5"},
            "timestamp_precise": "soon",
        });
        let err = parse_fetch(&session(), &data).unwrap_err();
        assert!(matches!(err, Error::Timestamp(_)));
    }
}
