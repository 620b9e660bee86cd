// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::domain::models::{Contact, ContactSet};
use crate::pending::PendingOperation;

pub type DynGroupChannel = Arc<dyn GroupChannel>;
pub type GroupMembersChangedHandler = Arc<dyn Fn(&GroupMembersChanged) + Send + Sync>;

/// The group membership slice of a channel, e.g. one of the server-side contact lists.
///
/// Members are either current, local pending (waiting for us to accept them) or remote pending
/// (waiting for the remote side). A channel updates its member sets before it notifies the
/// handlers registered via `connect_members_changed`.
#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait GroupChannel: Send + Sync {
    fn group_contacts(&self) -> ContactSet;
    fn group_local_pending_contacts(&self) -> ContactSet;
    fn group_remote_pending_contacts(&self) -> ContactSet;

    fn group_can_add_contacts(&self) -> bool;
    fn group_can_remove_contacts(&self) -> bool;
    fn group_can_rescind_contacts(&self) -> bool;

    fn group_add_contacts(&self, contacts: &[Arc<Contact>], message: &str)
        -> PendingOperation<()>;
    fn group_remove_contacts(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
        reason: GroupChangeReason,
    ) -> PendingOperation<()>;

    fn connect_members_changed(&self, handler: GroupMembersChangedHandler);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupChangeReason {
    #[default]
    None,
    Offline,
    Kicked,
    Busy,
    Invited,
    Banned,
    Error,
    InvalidContact,
    NoAnswer,
    Renamed,
    PermissionDenied,
    Separated,
}

#[derive(Debug, Clone, Default)]
pub struct GroupMemberChangeDetails {
    pub actor: Option<Arc<Contact>>,
    pub reason: Option<GroupChangeReason>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub debug_message: Option<String>,
}

/// A snapshot of the members that changed in a single membership update.
#[derive(Debug, Clone, Default)]
pub struct GroupMembersChanged {
    pub added: ContactSet,
    pub local_pending_added: ContactSet,
    pub remote_pending_added: ContactSet,
    pub removed: ContactSet,
    pub details: GroupMemberChangeDetails,
}

impl GroupMembersChanged {
    /// All contacts mentioned in this update.
    pub fn all_contacts(&self) -> ContactSet {
        let mut contacts = self.added.clone();
        contacts.extend(&self.local_pending_added);
        contacts.extend(&self.remote_pending_added);
        contacts.extend(&self.removed);
        contacts
    }
}
