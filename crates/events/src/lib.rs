//! Delta decoding for chatwire — server push payloads to typed events.
//!
//! The server streams incremental changes ("deltas") as loosely-typed JSON
//! tagged with a `class` string. This crate is the layer that turns them
//! into a closed set of strongly-shaped [`Event`] values the rest of the
//! client can consume.
//!
//! # Overview
//!
//! - [`parse_delta`] is the sole entry point: one call per received delta,
//!   stateless and synchronous, safe to invoke concurrently.
//! - Each event kind also exposes direct constructors for its other source
//!   shapes — `from_send` to echo a local action before the server
//!   confirms it, and `from_fetch` to reconcile a history record fetched
//!   later. All paths produce field-identical events for the same logical
//!   occurrence.
//! - Unrecognized delta classes never fail: they come back as
//!   [`Event::Unknown`] with the raw payload preserved, so a long-lived
//!   stream survives server-side additions.
//!
//! # Example
//!
//! ```
//! use events::{parse_delta, Event};
//! use models::Session;
//! use serde_json::json;
//!
//! let session = Session::new("100000000000001");
//! let delta = json!({
//!     "class": "ReadReceipt",
//!     "actorFbId": "5",
//!     "threadKey": {"otherUserFbId": "5"},
//!     "actionTimestampMs": "1500000000000",
//! });
//!
//! let event = parse_delta(&session, delta)?.expect("receipts emit an event");
//! assert!(matches!(event, Event::ThreadsRead(_)));
//! # Ok::<(), events::Error>(())
//! ```

mod delta;
mod error;
mod metadata;
mod model;

pub use delta::parse_delta;
pub use error::{Error, Result};
pub use model::{
    Actor, Event, MessageEvent, MessagesDelivered, ParticipantRemoved, ParticipantsAdded,
    ThreadFolder, ThreadsRead, TitleSet, UnfetchedThreadEvent, UnknownEvent,
};
