// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::domain::models::{AttributeMap, Contact, Features, Handle, HandleType};
use crate::pending::{OperationError, PendingOperation};

use super::{ContactManagerInner, ResolvedContacts};

impl ContactManagerInner {
    pub(super) fn contacts_for_handles(
        &self,
        handles: &[Handle],
        features: &Features,
    ) -> PendingOperation<ResolvedContacts> {
        let features = self.with_default_features(features);

        debug!(
            "Building contacts for {} handles with {} features",
            handles.len(),
            features.len()
        );

        let mut satisfying_contacts = HashMap::<Handle, Arc<Contact>>::new();
        let mut other_contacts = IndexSet::<Handle>::new();
        // Keeps the contacts that get upgraded alive until the fetch completed.
        let mut upgraded_contacts = vec![];
        let mut missing_features = Features::new();

        for handle in handles {
            if satisfying_contacts.contains_key(handle) || other_contacts.contains(handle) {
                continue;
            }

            let Some(contact) = self.cache.lookup(*handle) else {
                missing_features.extend(features.iter().copied());
                other_contacts.insert(*handle);
                continue;
            };

            let actual_features = contact.actual_features();
            let missing = features.difference(&actual_features).copied().collect::<Vec<_>>();

            if missing.is_empty() {
                satisfying_contacts.insert(*handle, contact);
            } else {
                missing_features.extend(missing);
                other_contacts.insert(*handle);
                upgraded_contacts.push(contact);
            }
        }

        debug!(
            "{} satisfying and {} other contacts, {} features missing",
            satisfying_contacts.len(),
            other_contacts.len(),
            missing_features.len()
        );

        let supported_features = self.features.supported_features(self.connection.as_ref());
        let mut interfaces = BTreeSet::new();

        for feature in &missing_features {
            self.ensure_tracking(*feature);

            if !supported_features.contains(feature) {
                continue;
            }
            match self.features.registry().interface_for(*feature) {
                Ok(interface) => {
                    interfaces.insert(interface.clone());
                }
                Err(err) => warn!("Not fetching feature {}. {}", feature, err),
            }
        }

        // Either every contact satisfies the request already, or all of them are cached and
        // nothing that is still missing can be fetched from the backend.
        if interfaces.is_empty() && upgraded_contacts.len() == other_contacts.len() {
            satisfying_contacts.extend(
                upgraded_contacts
                    .into_iter()
                    .map(|contact| (contact.handle(), contact)),
            );
            return PendingOperation::ready(ResolvedContacts::new(handles, &satisfying_contacts));
        }

        debug!(
            "Fetching {} interfaces for {} contacts",
            interfaces.len(),
            other_contacts.len()
        );

        let requested_handles = other_contacts.into_iter().collect::<Vec<_>>();
        let interfaces = interfaces.into_iter().collect::<Vec<_>>();
        let handles = handles.to_vec();
        let manager = self.this.clone();

        self.connection
            .get_contact_attributes(&requested_handles, &interfaces, self.config.hold_handles)
            .map_result(move |result| {
                let attributes = result?;
                let Some(manager) = manager.upgrade() else {
                    return Err(OperationError::not_available(
                        "The contact manager was dropped before the contacts were fetched",
                    ));
                };
                drop(upgraded_contacts);

                Ok(manager.attributes_fetched(
                    &handles,
                    &features,
                    satisfying_contacts,
                    attributes,
                ))
            })
    }

    pub(super) fn contacts_for_identifiers(
        &self,
        identifiers: &[String],
        features: &Features,
    ) -> PendingOperation<ResolvedContacts> {
        debug!(
            "Building contacts for {} identifiers with {} features",
            identifiers.len(),
            features.len()
        );

        let manager = self.this.clone();
        let features = features.clone();

        self.connection
            .request_handles(HandleType::Contact, identifiers)
            .and_then(move |handles| match manager.upgrade() {
                Some(manager) => manager.contacts_for_handles(&handles, &features),
                None => PendingOperation::failed(OperationError::not_available(
                    "The contact manager was dropped before the handles were resolved",
                )),
            })
    }

    pub(super) fn upgrade_contacts(
        &self,
        contacts: &[Arc<Contact>],
        features: &Features,
    ) -> PendingOperation<ResolvedContacts> {
        debug!(
            "Upgrading {} contacts to have at least {} features",
            contacts.len(),
            features.len()
        );

        let handles = contacts
            .iter()
            .map(|contact| contact.handle())
            .collect::<Vec<_>>();
        self.contacts_for_handles(&handles, features)
    }

    fn attributes_fetched(
        &self,
        requested_handles: &[Handle],
        features: &Features,
        mut resolved: HashMap<Handle, Arc<Contact>>,
        attributes: BTreeMap<Handle, AttributeMap>,
    ) -> ResolvedContacts {
        let supported_features = self.features.supported_features(self.connection.as_ref());
        let mut changes = vec![];

        for (handle, attributes) in attributes {
            let (contact, contact_changes) = self.cache.insert_or_augment(
                &self.this,
                handle,
                features,
                &attributes,
                &supported_features,
            );
            changes.extend(
                contact_changes
                    .into_iter()
                    .map(|change| (contact.clone(), change)),
            );
            resolved.insert(handle, contact);
        }

        let result = ResolvedContacts::new(requested_handles, &resolved);
        if !result.invalid_handles.is_empty() {
            debug!(
                "Backend did not report {} of the requested handles",
                result.invalid_handles.len()
            );
        }

        self.dispatcher.dispatch_contact_changes(changes);
        result
    }

    fn with_default_features(&self, features: &Features) -> Features {
        features
            .union(&self.config.default_features)
            .copied()
            .collect()
    }
}
