// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use parking_lot::Mutex;

use crate::connection::GroupMemberChangeDetails;
use crate::domain::models::{ContactChange, Handle};
use crate::manager::{ContactManager, ContactManagerDelegate, ContactManagerEvent};

/// A `ContactManagerEvent` without the contacts, so that recording it does not keep them alive.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    ContactChanged {
        handle: Handle,
        change: ContactChange,
    },
    PresencePublicationRequested {
        handles: Vec<Handle>,
        message: Option<String>,
    },
}

#[derive(Clone, Default)]
pub struct RecordingDelegate {
    events: Arc<Mutex<Vec<RecordedEvent>>>,
}

impl RecordingDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().clone()
    }

    pub fn take_events(&self) -> Vec<RecordedEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn contact_changes(&self, handle: Handle) -> Vec<ContactChange> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::ContactChanged {
                    handle: changed,
                    change,
                } if *changed == handle => Some(change.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn publication_requests(&self) -> Vec<Vec<Handle>> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                RecordedEvent::PresencePublicationRequested { handles, .. } => {
                    Some(handles.clone())
                }
                _ => None,
            })
            .collect()
    }
}

impl ContactManagerDelegate for RecordingDelegate {
    fn handle_event(&self, _manager: ContactManager, event: ContactManagerEvent) {
        let event = match event {
            ContactManagerEvent::ContactChanged { contact, change } => {
                RecordedEvent::ContactChanged {
                    handle: contact.handle(),
                    change,
                }
            }
            ContactManagerEvent::PresencePublicationRequested {
                contacts,
                details: GroupMemberChangeDetails { message, .. },
            } => RecordedEvent::PresencePublicationRequested {
                handles: contacts.iter().map(|contact| contact.handle()).collect(),
                message,
            },
        };
        self.events.lock().push(event)
    }
}
