//! The event model: one immutable record per kind of server change.
//!
//! Every record is a plain value constructed once by a parser and handed to
//! the listening loop; nothing here mutates after construction.

use chrono::{DateTime, Utc};
use models::{MessageData, MessageRef, ThreadLocation, ThreadRef, UserRef};
use serde_json::Value;

/// Originator of an event: a user, or the thread itself when the server
/// reports no explicit actor (thread-wide delivery marks).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    User(UserRef),
    Thread(ThreadRef),
}

impl Actor {
    /// The underlying identity, regardless of which side it is.
    pub fn id(&self) -> &str {
        match self {
            Self::User(user) => &user.id,
            Self::Thread(thread) => &thread.id,
        }
    }
}

impl From<UserRef> for Actor {
    fn from(user: UserRef) -> Self {
        Self::User(user)
    }
}

impl From<ThreadRef> for Actor {
    fn from(thread: ThreadRef) -> Self {
        Self::Thread(thread)
    }
}

/// People were added to a group thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantsAdded {
    pub author: Actor,
    pub thread: ThreadRef,
    /// The people who got added.
    pub added: Vec<UserRef>,
    /// When they were added; `None` for a local echo the server has not
    /// timestamped yet.
    pub at: Option<DateTime<Utc>>,
}

/// Somebody removed a person from a group thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRemoved {
    pub author: Actor,
    pub thread: ThreadRef,
    /// The person who got removed. Upstream documentation calls this field
    /// a message, but the wire carries a single user id.
    pub removed: UserRef,
    /// When the person was removed; `None` for a local echo.
    pub at: Option<DateTime<Utc>>,
}

/// Somebody changed a group's title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSet {
    pub author: Actor,
    pub thread: ThreadRef,
    /// The new title; `None` means the title was cleared.
    pub title: Option<String>,
    pub at: DateTime<Utc>,
}

/// A message arrived whose data must be fetched separately.
///
/// Usually a group photo change, or a newly created pending group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfetchedThreadEvent {
    pub thread: ThreadRef,
    pub message: Option<MessageRef>,
}

/// Somebody marked messages as delivered in a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagesDelivered {
    /// The actor, or the thread itself when the server names none.
    pub author: Actor,
    pub thread: ThreadRef,
    pub messages: Vec<MessageRef>,
    pub at: DateTime<Utc>,
}

/// Somebody marked threads as read/seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadsRead {
    pub author: Actor,
    pub threads: Vec<ThreadRef>,
    pub at: DateTime<Utc>,
}

/// Somebody sent a message to a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub author: Actor,
    pub thread: ThreadRef,
    pub message: MessageData,
    pub at: DateTime<Utc>,
}

/// A thread was created in a folder.
///
/// Sent when somebody not connected with the user starts a conversation;
/// the messages themselves still have to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadFolder {
    pub thread: ThreadRef,
    pub folder: ThreadLocation,
}

/// A payload this layer does not recognize, kept raw for forward
/// compatibility. Constructing one never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEvent {
    /// Which parser family saw the payload.
    pub source: &'static str,
    pub data: Value,
}

/// A decoded server event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ParticipantsAdded(ParticipantsAdded),
    ParticipantRemoved(ParticipantRemoved),
    TitleSet(TitleSet),
    UnfetchedThread(UnfetchedThreadEvent),
    MessagesDelivered(MessagesDelivered),
    ThreadsRead(ThreadsRead),
    Message(MessageEvent),
    ThreadFolder(ThreadFolder),
    Unknown(UnknownEvent),
}

impl Event {
    /// The event's author, for kinds that have one.
    pub fn author(&self) -> Option<&Actor> {
        match self {
            Self::ParticipantsAdded(e) => Some(&e.author),
            Self::ParticipantRemoved(e) => Some(&e.author),
            Self::TitleSet(e) => Some(&e.author),
            Self::MessagesDelivered(e) => Some(&e.author),
            Self::ThreadsRead(e) => Some(&e.author),
            Self::Message(e) => Some(&e.author),
            Self::UnfetchedThread(_) | Self::ThreadFolder(_) | Self::Unknown(_) => None,
        }
    }

    /// The thread the event concerns, for kinds tied to exactly one.
    pub fn thread(&self) -> Option<&ThreadRef> {
        match self {
            Self::ParticipantsAdded(e) => Some(&e.thread),
            Self::ParticipantRemoved(e) => Some(&e.thread),
            Self::TitleSet(e) => Some(&e.thread),
            Self::UnfetchedThread(e) => Some(&e.thread),
            Self::MessagesDelivered(e) => Some(&e.thread),
            Self::Message(e) => Some(&e.thread),
            Self::ThreadFolder(e) => Some(&e.thread),
            Self::ThreadsRead(_) | Self::Unknown(_) => None,
        }
    }
}
