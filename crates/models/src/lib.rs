//! Domain handles for chatwire — identity-only pointers into a chat service.
//!
//! The types here deliberately split into two families:
//!
//! 1. **Reference handles** ([`UserRef`], [`ThreadRef`], [`MessageRef`]) —
//!    an id plus the owning [`Session`], and nothing else. Holding one does
//!    *not* mean the entity's data has been fetched; resolving fields is a
//!    separate (out of scope) fetch step.
//!
//! 2. **Resolved records** ([`MessageData`]) — actual field data decoded
//!    from a server payload. Keeping these distinct from handles means a
//!    caller can never mistake an unresolved pointer for fetched data.
//!
//! Also here: [`ThreadLocation`] (which folder a thread sits in) and the
//! exact millisecond-epoch conversion [`millis_to_timestamp`].

mod error;
mod location;
mod message;
mod session;
mod thread;
mod time;

pub use error::{Error, Result};
pub use location::ThreadLocation;
pub use message::{MessageData, MessageRef};
pub use session::Session;
pub use thread::{ThreadKind, ThreadRef, UserRef};
pub use time::millis_to_timestamp;
