//! Thread folder/location.

use crate::{Error, Result};

/// Where a thread is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadLocation {
    Inbox,
    Pending,
    Archived,
    Other,
}

impl ThreadLocation {
    /// Parse the raw server value, with or without the `FOLDER_` prefix.
    pub fn parse(raw: &str) -> Result<Self> {
        match raw.strip_prefix("FOLDER_").unwrap_or(raw) {
            "INBOX" => Ok(Self::Inbox),
            "PENDING" => Ok(Self::Pending),
            "ARCHIVED" => Ok(Self::Archived),
            "OTHER" => Ok(Self::Other),
            _ => Err(Error::UnknownFolder(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_with_prefix() {
        assert_eq!(
            ThreadLocation::parse("FOLDER_INBOX").unwrap(),
            ThreadLocation::Inbox
        );
        assert_eq!(
            ThreadLocation::parse("FOLDER_PENDING").unwrap(),
            ThreadLocation::Pending
        );
    }

    #[test]
    fn parse_without_prefix() {
        assert_eq!(
            ThreadLocation::parse("ARCHIVED").unwrap(),
            ThreadLocation::Archived
        );
    }

    #[test]
    fn parse_unknown_fails() {
        assert!(ThreadLocation::parse("FOLDER_SPAM").is_err());
    }
}
