//! Mailbox folders and bulk message actions

use crate::{MailError, MailResult};
use std::fmt;
use std::str::FromStr;

/// Wire prefix of a standard folder id
pub const FOLDER_PREFIX: &str = "standardType_fmft_";

/// Wire prefix of a bulk message action.
///
/// Not yet confirmed against a live portal response; check it if bulk
/// actions start failing with a 4xx.
pub const ACTION_PREFIX: &str = "fmat_";

/// Standard family mailbox folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Folder {
    /// Received messages
    Inbox,
    /// Received and not yet read
    Unread,
    /// Marked for follow-up
    Follow,
    /// Trash
    Deleted,
    /// Unsent drafts
    Drafts,
    /// Sent messages
    Sent,
}

impl Folder {
    pub const ALL: [Folder; 6] = [
        Folder::Inbox,
        Folder::Unread,
        Folder::Follow,
        Folder::Deleted,
        Folder::Drafts,
        Folder::Sent,
    ];

    /// Lowercase name as used in URLs
    pub fn as_str(self) -> &'static str {
        match self {
            Folder::Inbox => "inbox",
            Folder::Unread => "unread",
            Folder::Follow => "follow",
            Folder::Deleted => "deleted",
            Folder::Drafts => "drafts",
            Folder::Sent => "sent",
        }
    }

    /// Folder id as the API expects it, e.g. `standardType_fmft_inbox`
    pub fn wire_id(self) -> String {
        format!("{}{}", FOLDER_PREFIX, self.as_str())
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Folder {
    type Err = MailError;

    fn from_str(s: &str) -> MailResult<Self> {
        Folder::ALL
            .into_iter()
            .find(|folder| folder.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MailError::InvalidFolder {
                given: s.to_string(),
                valid: join_names(Folder::ALL.iter().map(|f| f.as_str())),
            })
    }
}

/// Check a user-supplied folder name, ignoring case
pub fn validate_folder(name: &str) -> MailResult<Folder> {
    name.parse()
}

/// Action for the bulk perform-action endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MailAction {
    /// Move back out of the trash
    Refresh,
    /// Remove for good
    PermanentDelete,
    /// Move to the trash
    Delete,
}

impl MailAction {
    pub const ALL: [MailAction; 3] = [
        MailAction::Refresh,
        MailAction::PermanentDelete,
        MailAction::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MailAction::Refresh => "refresh",
            MailAction::PermanentDelete => "permanentDelete",
            MailAction::Delete => "delete",
        }
    }

    pub fn wire_id(self) -> String {
        format!("{}{}", ACTION_PREFIX, self.as_str())
    }

    /// Pick the delete flavour. Messages already in the trash or in Sent
    /// cannot be trashed again, so those are always removed permanently.
    pub fn for_delete(folder: Folder, permanently: bool) -> Self {
        if permanently || matches!(folder, Folder::Deleted | Folder::Sent) {
            MailAction::PermanentDelete
        } else {
            MailAction::Delete
        }
    }
}

impl fmt::Display for MailAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MailAction {
    type Err = MailError;

    fn from_str(s: &str) -> MailResult<Self> {
        MailAction::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MailError::InvalidAction {
                given: s.to_string(),
                valid: join_names(MailAction::ALL.iter().map(|a| a.as_str())),
            })
    }
}

/// Check a user-supplied action name, ignoring case
pub fn validate_action(name: &str) -> MailResult<MailAction> {
    name.parse()
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_case_insensitive() {
        assert_eq!(validate_folder("inbox").unwrap(), Folder::Inbox);
        assert_eq!(validate_folder("INBOX").unwrap(), Folder::Inbox);
        assert_eq!(validate_folder("Sent").unwrap(), Folder::Sent);
        assert_eq!(validate_folder("dElEtEd").unwrap(), Folder::Deleted);

        for folder in Folder::ALL {
            let upper = folder.as_str().to_uppercase();
            assert_eq!(validate_folder(&upper).unwrap().as_str(), folder.as_str());
        }
    }

    #[test]
    fn test_invalid_folder_lists_valid_ones() {
        let err = validate_folder("spam").unwrap_err();
        assert!(matches!(err, MailError::InvalidFolder { .. }));
        assert_eq!(
            err.to_string(),
            "spam is not a valid folder. Valid folders: inbox, unread, follow, deleted, drafts, sent"
        );

        assert!(validate_folder("").is_err());
        assert!(validate_folder(" inbox").is_err());
    }

    #[test]
    fn test_wire_ids() {
        assert_eq!(Folder::Inbox.wire_id(), "standardType_fmft_inbox");
        assert_eq!(Folder::Deleted.wire_id(), "standardType_fmft_deleted");
        assert_eq!(MailAction::PermanentDelete.wire_id(), "fmat_permanentDelete");
    }

    #[test]
    fn test_action_validation() {
        assert_eq!(
            validate_action("permanentdelete").unwrap(),
            MailAction::PermanentDelete
        );
        assert_eq!(validate_action("REFRESH").unwrap(), MailAction::Refresh);

        let err = validate_action("archive").unwrap_err();
        assert_eq!(
            err.to_string(),
            "archive is not a valid mail action. Valid actions: refresh, permanentDelete, delete"
        );
    }

    #[test]
    fn test_delete_action_selection() {
        assert_eq!(
            MailAction::for_delete(Folder::Sent, false),
            MailAction::PermanentDelete
        );
        assert_eq!(
            MailAction::for_delete(Folder::Deleted, false),
            MailAction::PermanentDelete
        );
        assert_eq!(MailAction::for_delete(Folder::Inbox, false), MailAction::Delete);
        assert_eq!(
            MailAction::for_delete(Folder::Inbox, true),
            MailAction::PermanentDelete
        );
    }
}
