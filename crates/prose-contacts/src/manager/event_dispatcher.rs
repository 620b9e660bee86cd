// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::{Arc, Weak};

use crate::connection::GroupMemberChangeDetails;
use crate::domain::models::{Contact, ContactChange};

use super::{ContactManager, ContactManagerInner};

#[derive(Debug, Clone)]
pub enum ContactManagerEvent {
    ContactChanged {
        contact: Arc<Contact>,
        change: ContactChange,
    },
    /// Contacts asked to see our presence.
    PresencePublicationRequested {
        contacts: Vec<Arc<Contact>>,
        details: GroupMemberChangeDetails,
    },
}

#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait ContactManagerDelegate: Send + Sync {
    fn handle_event(&self, manager: ContactManager, event: ContactManagerEvent);
}

pub(crate) struct EventDispatcher {
    manager: Weak<ContactManagerInner>,
    delegate: Option<Box<dyn ContactManagerDelegate>>,
}

impl EventDispatcher {
    pub fn new(
        manager: Weak<ContactManagerInner>,
        delegate: Option<Box<dyn ContactManagerDelegate>>,
    ) -> Self {
        Self { manager, delegate }
    }

    pub fn dispatch_event(&self, event: ContactManagerEvent) {
        self.dispatch_events([event])
    }

    pub fn dispatch_events(&self, events: impl IntoIterator<Item = ContactManagerEvent>) {
        let Some(ref delegate) = self.delegate else {
            return;
        };
        let Some(manager) = self.manager.upgrade() else {
            return;
        };

        for event in events {
            delegate.handle_event(ContactManager::from(manager.clone()), event)
        }
    }

    pub fn dispatch_contact_changes(
        &self,
        changes: impl IntoIterator<Item = (Arc<Contact>, ContactChange)>,
    ) {
        self.dispatch_events(
            changes
                .into_iter()
                .map(|(contact, change)| ContactManagerEvent::ContactChanged { contact, change }),
        )
    }
}
