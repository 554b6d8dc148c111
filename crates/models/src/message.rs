//! Message handles and resolved message data.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::{Result, ThreadRef};

/// Identity-only pointer to a message within a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub thread: ThreadRef,
    pub id: String,
}

impl MessageRef {
    pub fn new(thread: ThreadRef, id: impl Into<String>) -> Self {
        Self {
            thread,
            id: id.into(),
        }
    }
}

/// A resolved message record.
///
/// Distinct from [`MessageRef`] so an unresolved handle can never be
/// mistaken for fetched data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageData {
    pub thread: ThreadRef,
    pub id: String,
    /// Id of the user who sent the message.
    pub author: String,
    pub created_at: DateTime<Utc>,
    /// Plain-text body, if any.
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PushShape {
    message_metadata: PushShapeMetadata,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PushShapeMetadata {
    message_id: String,
}

impl MessageData {
    /// Decode a live push payload into message data.
    ///
    /// The author id and timestamp are passed through from the enclosing
    /// delta's metadata so the record stays consistent with the event
    /// carrying it.
    pub fn from_push(
        thread: &ThreadRef,
        data: &Value,
        author: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let shape = PushShape::deserialize(data)?;
        Ok(Self {
            thread: thread.clone(),
            id: shape.message_metadata.message_id,
            author: author.into(),
            created_at,
            text: shape.body,
        })
    }

    /// Identity handle to this message.
    pub fn to_ref(&self) -> MessageRef {
        MessageRef::new(self.thread.clone(), self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{millis_to_timestamp, Session};
    use serde_json::json;

    fn thread() -> ThreadRef {
        ThreadRef::group(Session::new("1"), "4444")
    }

    #[test]
    fn from_push_reads_id_and_body() {
        let data = json!({
            "messageMetadata": {"messageId": "mid.$abc"},
            "body": "hello",
        });
        let at = millis_to_timestamp(1_500_000_000_000).unwrap();
        let message = MessageData::from_push(&thread(), &data, "5", at).unwrap();
        assert_eq!(message.id, "mid.$abc");
        assert_eq!(message.author, "5");
        assert_eq!(message.created_at, at);
        assert_eq!(message.text.as_deref(), Some("hello"));
    }

    #[test]
    fn from_push_without_body() {
        let data = json!({"messageMetadata": {"messageId": "mid.$abc"}});
        let at = millis_to_timestamp(0).unwrap();
        let message = MessageData::from_push(&thread(), &data, "5", at).unwrap();
        assert_eq!(message.text, None);
    }

    #[test]
    fn from_push_requires_metadata() {
        let data = json!({"body": "hello"});
        let at = millis_to_timestamp(0).unwrap();
        assert!(MessageData::from_push(&thread(), &data, "5", at).is_err());
    }

    #[test]
    fn to_ref_keeps_identity() {
        let data = json!({"messageMetadata": {"messageId": "mid.$abc"}});
        let at = millis_to_timestamp(0).unwrap();
        let message = MessageData::from_push(&thread(), &data, "5", at).unwrap();
        let handle = message.to_ref();
        assert_eq!(handle.id, message.id);
        assert_eq!(handle.thread, message.thread);
    }
}
