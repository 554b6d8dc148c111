//! Identity-only user and thread handles.

use crate::Session;

/// Whether a thread is a one-to-one conversation or a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadKind {
    OneToOne,
    Group,
}

/// Identity-only pointer to a user.
///
/// Carries an id and the owning session, nothing else. The user's actual
/// data (name, picture, ...) requires a separate fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    pub session: Session,
    pub id: String,
}

impl UserRef {
    pub fn new(session: Session, id: impl Into<String>) -> Self {
        Self {
            session,
            id: id.into(),
        }
    }
}

/// Identity-only pointer to a thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadRef {
    pub session: Session,
    pub id: String,
    pub kind: ThreadKind,
}

impl ThreadRef {
    pub fn new(session: Session, id: impl Into<String>, kind: ThreadKind) -> Self {
        Self {
            session,
            id: id.into(),
            kind,
        }
    }

    /// Handle to a group thread.
    pub fn group(session: Session, id: impl Into<String>) -> Self {
        Self::new(session, id, ThreadKind::Group)
    }

    /// Handle to a one-to-one thread. The thread id is the other user's id.
    pub fn one_to_one(session: Session, id: impl Into<String>) -> Self {
        Self::new(session, id, ThreadKind::OneToOne)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_constructors() {
        let session = Session::new("1");
        let group = ThreadRef::group(session.clone(), "4444");
        assert_eq!(group.kind, ThreadKind::Group);

        let direct = ThreadRef::one_to_one(session, "5555");
        assert_eq!(direct.kind, ThreadKind::OneToOne);
        assert_eq!(direct.id, "5555");
    }
}
