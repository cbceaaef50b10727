//! Mailbox access for the e-klase family portal
//!
//! [`EklaseSession`] logs in through [`eklase_auth`] and then talks to the
//! portal's JSON mail API: folder id listings, ranged and streamed message
//! fetches, and the read/send/delete/restore actions.

pub mod config;
pub mod error;
pub mod folder;
pub mod item;
pub mod pagination;
pub mod session;
pub mod types;

#[cfg(test)]
mod test_server;

pub use config::SessionConfig;
pub use error::{MailError, MailResult};
pub use folder::{validate_action, validate_folder, Folder, MailAction};
pub use item::MailItem;
pub use pagination::{MailApi, MessageRange};
pub use session::EklaseSession;
pub use types::*;

pub use eklase_auth::{AuthError, ExtractedForm, FormExtractor, RegexFormExtractor};
