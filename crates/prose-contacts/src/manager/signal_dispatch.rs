// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use tracing::debug;

use crate::connection::ConnectionEvent;
use crate::domain::models::{Contact, ContactChange, Feature, Handle};

use super::ContactManagerInner;

impl ContactManagerInner {
    /// Connects to the change signal of `feature` unless that happened before.
    pub(super) fn ensure_tracking(&self, feature: Feature) {
        let Some(signal) = self.features.begin_tracking(feature) else {
            return;
        };

        debug!("Tracking {} via {}", feature, signal);

        let manager = self.this.clone();
        self.connection.connect_signal(
            signal,
            Arc::new(move |event: &ConnectionEvent| {
                if let Some(manager) = manager.upgrade() {
                    manager.handle_connection_event(event)
                }
            }),
        );
    }

    fn handle_connection_event(&self, event: &ConnectionEvent) {
        let changes = match event {
            ConnectionEvent::AliasesChanged { aliases } => {
                debug!("Got AliasesChanged for {} contacts", aliases.len());
                aliases
                    .iter()
                    .filter_map(|(handle, alias)| {
                        self.update_contact(*handle, |contact| contact.receive_alias(alias))
                    })
                    .collect::<Vec<_>>()
            }
            ConnectionEvent::AvatarUpdated { handle, token } => {
                debug!("Got AvatarUpdated for contact with handle {}", handle);
                self.update_contact(*handle, |contact| contact.receive_avatar_token(token))
                    .into_iter()
                    .collect()
            }
            ConnectionEvent::AvatarRetrieved {
                handle,
                token,
                avatar,
            } => {
                debug!("Got AvatarRetrieved for contact with handle {}", handle);
                let Some(contact) = self.cache.lookup(*handle) else {
                    return;
                };
                contact
                    .receive_avatar_data(token, avatar.clone())
                    .into_iter()
                    .map(|change| (contact.clone(), change))
                    .collect()
            }
            ConnectionEvent::PresencesChanged { presences } => {
                debug!("Got PresencesChanged for {} contacts", presences.len());
                presences
                    .iter()
                    .filter_map(|(handle, presence)| {
                        self.update_contact(*handle, |contact| {
                            contact.receive_simple_presence(presence)
                        })
                    })
                    .collect()
            }
            ConnectionEvent::CapabilitiesChanged { capabilities } => {
                debug!("Got CapabilitiesChanged for {} contacts", capabilities.len());
                capabilities
                    .iter()
                    .filter_map(|(handle, capabilities)| {
                        self.update_contact(*handle, |contact| {
                            contact.receive_capabilities(capabilities)
                        })
                    })
                    .collect()
            }
            ConnectionEvent::LocationUpdated { handle, location } => {
                debug!("Got LocationUpdated for contact with handle {}", handle);
                self.update_contact(*handle, |contact| contact.receive_location(location))
                    .into_iter()
                    .collect()
            }
            ConnectionEvent::ContactInfoChanged { handle, info } => {
                debug!("Got ContactInfoChanged for contact with handle {}", handle);
                self.update_contact(*handle, |contact| contact.receive_info(info))
                    .into_iter()
                    .collect()
            }
        };

        self.dispatcher.dispatch_contact_changes(changes)
    }

    /// Applies `update` to the live contact for `handle`. Updates for handles without a live
    /// contact are dropped.
    fn update_contact<F>(&self, handle: Handle, update: F) -> Option<(Arc<Contact>, ContactChange)>
    where
        F: FnOnce(&Contact) -> Option<ContactChange>,
    {
        let contact = self.cache.lookup(handle)?;
        let change = update(&contact)?;
        Some((contact, change))
    }
}
