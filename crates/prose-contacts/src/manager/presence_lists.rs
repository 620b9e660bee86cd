// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, error};

use crate::connection::{DynGroupChannel, GroupChangeReason, GroupMembersChanged};
use crate::domain::models::{Contact, ContactChange, ContactSet, PresenceState};
use crate::pending::{OperationError, PendingOperation};

use super::{ContactManagerEvent, ContactManagerInner};

/// The purpose of a contact list channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContactListRole {
    /// Contacts whose presence we receive.
    Subscribe,
    /// Contacts that receive our presence.
    Publish,
    /// Blocked contacts.
    Deny,
    /// A user defined group of contacts.
    Group(String),
}

pub type ContactListChannels = BTreeMap<ContactListRole, DynGroupChannel>;

#[derive(Default)]
pub(crate) struct ContactLists {
    channels: RwLock<Option<ContactListChannels>>,
}

impl ContactLists {
    /// Stores `channels` unless channels were set before. Returns false in that case.
    fn install(&self, channels: ContactListChannels) -> bool {
        let mut current = self.channels.write();
        if current.is_some() {
            return false;
        }
        *current = Some(channels);
        true
    }

    fn channels(&self) -> ContactListChannels {
        self.channels.read().clone().unwrap_or_default()
    }

    fn channel(&self, role: &ContactListRole) -> Option<DynGroupChannel> {
        self.channels.read().as_ref()?.get(role).cloned()
    }

    /// The current and pending members of all contact lists.
    pub fn all_known_contacts(&self) -> ContactSet {
        let mut contacts = ContactSet::new();
        for channel in self.channels().values() {
            contacts.extend(&channel.group_contacts());
            contacts.extend(&channel.group_local_pending_contacts());
            contacts.extend(&channel.group_remote_pending_contacts());
        }
        contacts
    }

    pub fn can_request_presence_subscription(&self) -> bool {
        self.channel(&ContactListRole::Subscribe)
            .map_or(false, |channel| channel.group_can_add_contacts())
    }

    pub fn request_presence_subscription(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        match self.channel(&ContactListRole::Subscribe) {
            Some(channel) if channel.group_can_add_contacts() => {
                channel.group_add_contacts(contacts, message)
            }
            _ => not_implemented("Cannot request presence subscription"),
        }
    }

    pub fn can_remove_presence_subscription(&self) -> bool {
        self.channel(&ContactListRole::Subscribe)
            .map_or(false, |channel| channel.group_can_remove_contacts())
    }

    pub fn remove_presence_subscription(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        match self.channel(&ContactListRole::Subscribe) {
            Some(channel) if channel.group_can_remove_contacts() => {
                channel.group_remove_contacts(contacts, message, GroupChangeReason::None)
            }
            _ => not_implemented("Cannot remove presence subscription"),
        }
    }

    pub fn can_authorize_presence_publication(&self) -> bool {
        self.channel(&ContactListRole::Publish)
            .map_or(false, |channel| channel.group_can_add_contacts())
    }

    pub fn authorize_presence_publication(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        match self.channel(&ContactListRole::Publish) {
            Some(channel) if channel.group_can_add_contacts() => {
                channel.group_add_contacts(contacts, message)
            }
            _ => not_implemented("Cannot authorize presence publication"),
        }
    }

    pub fn can_deny_presence_publication(&self) -> bool {
        self.channel(&ContactListRole::Publish)
            .map_or(false, |channel| channel.group_can_rescind_contacts())
    }

    pub fn deny_presence_publication(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        match self.channel(&ContactListRole::Publish) {
            Some(channel) if channel.group_can_rescind_contacts() => {
                channel.group_remove_contacts(contacts, message, GroupChangeReason::None)
            }
            _ => not_implemented("Cannot deny presence publication"),
        }
    }

    pub fn can_remove_presence_publication(&self) -> bool {
        self.channel(&ContactListRole::Publish)
            .map_or(false, |channel| channel.group_can_remove_contacts())
    }

    pub fn remove_presence_publication(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        match self.channel(&ContactListRole::Publish) {
            Some(channel) if channel.group_can_remove_contacts() => {
                channel.group_remove_contacts(contacts, message, GroupChangeReason::None)
            }
            _ => not_implemented("Cannot remove presence publication"),
        }
    }

    pub fn can_block_contacts(&self) -> bool {
        self.channel(&ContactListRole::Deny)
            .map_or(false, |channel| channel.group_can_add_contacts())
    }

    pub fn can_unblock_contacts(&self) -> bool {
        self.channel(&ContactListRole::Deny)
            .map_or(false, |channel| channel.group_can_remove_contacts())
    }

    pub fn block_contacts(&self, contacts: &[Arc<Contact>], value: bool) -> PendingOperation<()> {
        let Some(channel) = self.channel(&ContactListRole::Deny) else {
            return not_implemented("Cannot block contacts without a deny list");
        };

        match value {
            true if channel.group_can_add_contacts() => channel.group_add_contacts(contacts, ""),
            false if channel.group_can_remove_contacts() => {
                channel.group_remove_contacts(contacts, "", GroupChangeReason::None)
            }
            true => not_implemented("Cannot block contacts"),
            false => not_implemented("Cannot unblock contacts"),
        }
    }
}

fn not_implemented(msg: &str) -> PendingOperation<()> {
    PendingOperation::failed(OperationError::not_implemented(msg))
}

impl ContactManagerInner {
    pub(super) fn set_contact_list_channels(&self, channels: ContactListChannels) {
        let installed = self.contact_lists.install(channels.clone());

        if !installed {
            error!("Contact list channels were set already. Ignoring the new channels.");
            debug_assert!(installed, "Contact list channels set twice");
            return;
        }

        for (role, channel) in channels {
            let manager = self.this.clone();
            channel.connect_members_changed(Arc::new(move |changes: &GroupMembersChanged| {
                if let Some(manager) = manager.upgrade() {
                    manager.handle_members_changed(&role, changes)
                }
            }));
        }

        let contacts = self.contact_lists.all_known_contacts();
        debug!("Computing contact list states of {} contacts", contacts.len());

        let changes = self.recompute_contact_lists(&contacts);
        self.dispatcher.dispatch_contact_changes(changes);
    }

    fn handle_members_changed(&self, role: &ContactListRole, changes: &GroupMembersChanged) {
        debug!(
            "Members of {:?} changed: {} added, {} local pending, {} remote pending, {} removed",
            role,
            changes.added.len(),
            changes.local_pending_added.len(),
            changes.remote_pending_added.len(),
            changes.removed.len()
        );

        let mut contacts = self.contact_lists.all_known_contacts();
        contacts.extend(&changes.all_contacts());

        let contact_changes = self.recompute_contact_lists(&contacts);

        let publication_requested = match role {
            ContactListRole::Publish => changes
                .remote_pending_added
                .iter()
                .filter(|contact| {
                    contact_changes.iter().any(|(changed, change)| {
                        changed.handle() == contact.handle()
                            && *change == ContactChange::PublishState(PresenceState::Ask)
                    })
                })
                .cloned()
                .collect::<Vec<_>>(),
            _ => vec![],
        };

        self.dispatcher.dispatch_contact_changes(contact_changes);

        if !publication_requested.is_empty() {
            debug!(
                "{} contacts requested our presence",
                publication_requested.len()
            );
            self.dispatcher
                .dispatch_event(ContactManagerEvent::PresencePublicationRequested {
                    contacts: publication_requested,
                    details: changes.details.clone(),
                });
        }
    }

    /// Derives the contact list state of `contacts` from the current members of the channels.
    fn recompute_contact_lists(&self, contacts: &ContactSet) -> Vec<(Arc<Contact>, ContactChange)> {
        let channels = self.contact_lists.channels();
        let members = |role: &ContactListRole| {
            channels
                .get(role)
                .map(|channel| channel.group_contacts())
                .unwrap_or_default()
        };

        let subscribe = channels.get(&ContactListRole::Subscribe);
        let subscribed = members(&ContactListRole::Subscribe);
        let subscription_pending = subscribe
            .map(|channel| channel.group_local_pending_contacts())
            .unwrap_or_default();

        let publish = channels.get(&ContactListRole::Publish);
        let published = members(&ContactListRole::Publish);
        let publication_pending = publish
            .map(|channel| channel.group_remote_pending_contacts())
            .unwrap_or_default();

        let blocked = members(&ContactListRole::Deny);
        let groups = channels
            .iter()
            .filter_map(|(role, channel)| match role {
                ContactListRole::Group(name) => Some((name.as_str(), channel.group_contacts())),
                _ => None,
            })
            .collect::<Vec<_>>();

        let mut changes = vec![];

        for contact in contacts.iter() {
            let contact_changes = [
                contact.set_subscription_state(presence_state(
                    contact,
                    &subscribed,
                    &subscription_pending,
                )),
                contact.set_publish_state(presence_state(
                    contact,
                    &published,
                    &publication_pending,
                )),
                contact.set_blocked(blocked.contains(contact)),
            ]
            .into_iter()
            .chain(
                groups
                    .iter()
                    .map(|(name, members)| {
                        contact.set_member_of_group(name, members.contains(contact))
                    })
                    .collect::<Vec<_>>(),
            )
            .flatten();

            changes.extend(contact_changes.map(|change| (contact.clone(), change)));
        }

        changes
    }
}

fn presence_state(contact: &Contact, current: &ContactSet, pending: &ContactSet) -> PresenceState {
    if current.contains(contact) {
        PresenceState::Yes
    } else if pending.contains(contact) {
        PresenceState::Ask
    } else {
        PresenceState::No
    }
}
