//! Per-kind delta parsers and the dispatch table.
//!
//! Each event kind has up to three constructors producing the same shape
//! from different raw payloads:
//!
//! - `parse` — the live/streamed delta,
//! - `from_send` — an echo of an action the client itself just performed,
//!   before the server confirms it (author is the session's own user, no
//!   timestamp yet),
//! - `from_fetch` — reconciliation of a history record fetched later.
//!
//! [`parse_delta`] is the single entry point for the listening loop.

use serde::Deserialize;
use serde_json::Value;

use models::{MessageData, MessageRef, Session, ThreadLocation, ThreadRef, UserRef};

use crate::metadata::{decode, get_thread, parse_fetch, parse_metadata, RawId, RawMillis, ThreadKey};
use crate::model::{
    Actor, Event, MessageEvent, MessagesDelivered, ParticipantRemoved, ParticipantsAdded,
    ThreadFolder, ThreadsRead, TitleSet, UnfetchedThreadEvent, UnknownEvent,
};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
struct FetchedParticipant {
    id: RawId,
}

impl ParticipantsAdded {
    /// Decode a live `ParticipantsAddedToGroupThread` delta.
    pub fn parse(session: &Session, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Shape {
            added_participants: Vec<AddedParticipant>,
        }

        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct AddedParticipant {
            user_fb_id: RawId,
        }

        let (author, thread, at) = parse_metadata(session, data)?;
        let shape: Shape = decode("ParticipantsAddedToGroupThread", data)?;
        let added = shape
            .added_participants
            .into_iter()
            .map(|p| UserRef::new(session.clone(), p.user_fb_id.into_string()))
            .collect();
        Ok(Self {
            author: author.into(),
            thread,
            added,
            at: Some(at),
        })
    }

    /// Echo a local add before the server confirms it.
    pub fn from_send<I, S>(thread: &ThreadRef, added_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            author: thread.session.user().into(),
            thread: thread.clone(),
            added: added_ids
                .into_iter()
                .map(|id| UserRef::new(thread.session.clone(), id))
                .collect(),
            at: None,
        }
    }

    /// Reconcile a fetched history record.
    pub fn from_fetch(thread: &ThreadRef, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        struct Shape {
            participants_added: Vec<FetchedParticipant>,
        }

        let (author, at) = parse_fetch(&thread.session, data)?;
        let shape: Shape = decode("participants_added record", data)?;
        let added = shape
            .participants_added
            .into_iter()
            .map(|p| UserRef::new(thread.session.clone(), p.id.into_string()))
            .collect();
        Ok(Self {
            author: author.into(),
            thread: thread.clone(),
            added,
            at: Some(at),
        })
    }
}

impl ParticipantRemoved {
    /// Decode a live `ParticipantLeftGroupThread` delta. The live shape
    /// only ever names a single person; no plural form exists upstream.
    pub fn parse(session: &Session, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Shape {
            left_participant_fb_id: RawId,
        }

        let (author, thread, at) = parse_metadata(session, data)?;
        let shape: Shape = decode("ParticipantLeftGroupThread", data)?;
        let removed = UserRef::new(session.clone(), shape.left_participant_fb_id.into_string());
        Ok(Self {
            author: author.into(),
            thread,
            removed,
            at: Some(at),
        })
    }

    /// Echo a local removal before the server confirms it.
    pub fn from_send(thread: &ThreadRef, removed_id: impl Into<String>) -> Self {
        Self {
            author: thread.session.user().into(),
            thread: thread.clone(),
            removed: UserRef::new(thread.session.clone(), removed_id),
            at: None,
        }
    }

    /// Reconcile a fetched history record.
    pub fn from_fetch(thread: &ThreadRef, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        struct Shape {
            participants_removed: Vec<FetchedParticipant>,
        }

        let (author, at) = parse_fetch(&thread.session, data)?;
        let shape: Shape = decode("participants_removed record", data)?;
        let removed = shape
            .participants_removed
            .into_iter()
            .next()
            .ok_or(Error::NoRemovedParticipant)?;
        Ok(Self {
            author: author.into(),
            thread: thread.clone(),
            removed: UserRef::new(thread.session.clone(), removed.id.into_string()),
            at: Some(at),
        })
    }
}

/// An empty title on the wire means "cleared", not "set to empty".
fn normalize_title(raw: String) -> Option<String> {
    if raw.is_empty() { None } else { Some(raw) }
}

impl TitleSet {
    /// Decode a live `ThreadName` delta.
    pub fn parse(session: &Session, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        struct Shape {
            name: String,
        }

        let (author, thread, at) = parse_metadata(session, data)?;
        let shape: Shape = decode("ThreadName", data)?;
        Ok(Self {
            author: author.into(),
            thread,
            title: normalize_title(shape.name),
            at,
        })
    }

    /// Reconcile a fetched history record.
    pub fn from_fetch(thread: &ThreadRef, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        struct Shape {
            thread_name: String,
        }

        let (author, at) = parse_fetch(&thread.session, data)?;
        let shape: Shape = decode("thread_name record", data)?;
        Ok(Self {
            author: author.into(),
            thread: thread.clone(),
            title: normalize_title(shape.thread_name),
            at,
        })
    }
}

impl UnfetchedThreadEvent {
    /// Decode a live `ForcedFetch` delta.
    pub fn parse(session: &Session, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Shape {
            #[serde(default)]
            message_id: Option<String>,
        }

        let thread = get_thread(session, data)?;
        let shape: Shape = decode("ForcedFetch", data)?;
        let message = shape
            .message_id
            .map(|id| MessageRef::new(thread.clone(), id));
        Ok(Self { thread, message })
    }
}

impl MessagesDelivered {
    /// Decode a live `DeliveryReceipt` delta.
    pub fn parse(session: &Session, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Shape {
            #[serde(default)]
            actor_fb_id: Option<RawId>,
            message_ids: Vec<String>,
            delivered_watermark_timestamp_ms: RawMillis,
        }

        let thread = get_thread(session, data)?;
        let shape: Shape = decode("DeliveryReceipt", data)?;
        // No explicit actor means the mark applies thread-wide, so the
        // thread itself is the author.
        let author = match shape.actor_fb_id {
            Some(id) => Actor::User(UserRef::new(session.clone(), id.into_string())),
            None => Actor::Thread(thread.clone()),
        };
        let messages = shape
            .message_ids
            .into_iter()
            .map(|id| MessageRef::new(thread.clone(), id))
            .collect();
        let at = shape.delivered_watermark_timestamp_ms.to_timestamp()?;
        Ok(Self {
            author,
            thread,
            messages,
            at,
        })
    }
}

impl ThreadsRead {
    /// Decode a single-thread `ReadReceipt` delta (explicit actor).
    pub fn parse_read_receipt(session: &Session, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Shape {
            actor_fb_id: RawId,
            action_timestamp_ms: RawMillis,
        }

        let thread = get_thread(session, data)?;
        let shape: Shape = decode("ReadReceipt", data)?;
        Ok(Self {
            author: Actor::User(UserRef::new(session.clone(), shape.actor_fb_id.into_string())),
            threads: vec![thread],
            at: shape.action_timestamp_ms.to_timestamp()?,
        })
    }

    /// Decode a bulk `MarkRead` delta. The server names no actor; the
    /// session's own user marked the threads.
    pub fn parse(session: &Session, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Shape {
            thread_keys: Vec<ThreadKey>,
            action_timestamp: RawMillis,
        }

        let shape: Shape = decode("MarkRead", data)?;
        let threads = shape
            .thread_keys
            .into_iter()
            .map(|key| key.resolve(session))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            author: Actor::User(session.user()),
            threads,
            at: shape.action_timestamp.to_timestamp()?,
        })
    }
}

impl MessageEvent {
    /// Decode a live `NewMessage` delta. The message body parsing is
    /// delegated to [`MessageData::from_push`] with the resolved author id
    /// and timestamp passed through, so the record stays consistent with
    /// the event's own fields.
    pub fn parse(session: &Session, data: &Value) -> Result<Self> {
        let (author, thread, at) = parse_metadata(session, data)?;
        let message = MessageData::from_push(&thread, data, author.id.clone(), at)?;
        Ok(Self {
            author: author.into(),
            thread,
            message,
            at,
        })
    }
}

impl ThreadFolder {
    /// Decode a live `ThreadFolder` delta.
    pub fn parse(session: &Session, data: &Value) -> Result<Self> {
        #[derive(Debug, Deserialize)]
        struct Shape {
            folder: String,
        }

        let thread = get_thread(session, data)?;
        let shape: Shape = decode("ThreadFolder", data)?;
        Ok(Self {
            thread,
            folder: ThreadLocation::parse(&shape.folder)?,
        })
    }
}

/// `MarkFolderSeen` is recognized and validated, but there is no event
/// shape for it yet; the decoded folders and timestamp are logged and
/// dropped. See DESIGN.md.
fn mark_folder_seen(data: &Value) -> Result<()> {
    #[derive(Debug, Deserialize)]
    struct Shape {
        folders: Vec<String>,
        timestamp: RawMillis,
    }

    let shape: Shape = decode("MarkFolderSeen", data)?;
    let folders = shape
        .folders
        .iter()
        .map(|raw| ThreadLocation::parse(raw))
        .collect::<models::Result<Vec<_>>>()?;
    let at = shape.timestamp.to_timestamp()?;
    tracing::debug!(?folders, %at, "MarkFolderSeen delta decoded but not surfaced");
    Ok(())
}

/// Decode a single server delta into an event.
///
/// Returns `Ok(None)` for deltas that carry nothing to emit (`NoOp`, and
/// `MarkFolderSeen`, whose event shape is not surfaced yet). Unrecognized
/// classes never fail: they come back as [`Event::Unknown`] with the raw
/// payload intact. A malformed payload of a *recognized* class is a hard
/// error, as is routing a `ClientPayload` delta here — that class is
/// decoded by the payload parser upstream.
pub fn parse_delta(session: &Session, data: Value) -> Result<Option<Event>> {
    let class = match data.get("class").and_then(Value::as_str) {
        Some(class) => class,
        None => return Err(Error::MissingClass),
    };

    let event = match class {
        "ParticipantsAddedToGroupThread" => {
            Event::ParticipantsAdded(ParticipantsAdded::parse(session, &data)?)
        }
        "ParticipantLeftGroupThread" => {
            Event::ParticipantRemoved(ParticipantRemoved::parse(session, &data)?)
        }
        "ThreadName" => Event::TitleSet(TitleSet::parse(session, &data)?),
        "ForcedFetch" => Event::UnfetchedThread(UnfetchedThreadEvent::parse(session, &data)?),
        "DeliveryReceipt" => Event::MessagesDelivered(MessagesDelivered::parse(session, &data)?),
        "ReadReceipt" => Event::ThreadsRead(ThreadsRead::parse_read_receipt(session, &data)?),
        "MarkRead" => Event::ThreadsRead(ThreadsRead::parse(session, &data)?),
        "NewMessage" => Event::Message(MessageEvent::parse(session, &data)?),
        "ThreadFolder" => Event::ThreadFolder(ThreadFolder::parse(session, &data)?),
        "MarkFolderSeen" => {
            mark_folder_seen(&data)?;
            return Ok(None);
        }
        "NoOp" => return Ok(None),
        "ClientPayload" => return Err(Error::ClientPayload),
        other => {
            tracing::debug!(class = other, "unrecognized delta class");
            Event::Unknown(UnknownEvent {
                source: "Delta class",
                data,
            })
        }
    };
    Ok(Some(event))
}
