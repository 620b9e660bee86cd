// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::domain::models::{AttributeMap, Contact, ContactChange, Features, Handle};

use super::ContactManagerInner;

/// Maps handles to the contacts currently alive for them. The cache never keeps a contact alive
/// by itself, it only remembers where to find it while someone else owns it.
#[derive(Default)]
pub(crate) struct IdentityCache {
    contacts: Mutex<HashMap<Handle, Weak<Contact>>>,
}

impl IdentityCache {
    /// Returns the live contact for `handle`. An entry whose contact has been dropped already is
    /// removed.
    pub fn lookup(&self, handle: Handle) -> Option<Arc<Contact>> {
        let mut contacts = self.contacts.lock();
        let contact = contacts.get(&handle)?.upgrade();

        if contact.is_none() {
            contacts.remove(&handle);
        }
        contact
    }

    /// Returns the contact for `handle` augmented with `features` and `attributes`, creating it
    /// if there is no live contact for `handle`. The returned changes only ever refer to an
    /// existing contact, a fresh contact reports none.
    pub fn insert_or_augment(
        &self,
        manager: &Weak<ContactManagerInner>,
        handle: Handle,
        features: &Features,
        attributes: &AttributeMap,
        supported_features: &Features,
    ) -> (Arc<Contact>, Vec<ContactChange>) {
        let mut contacts = self.contacts.lock();

        if let Some(contact) = contacts.get(&handle).and_then(Weak::upgrade) {
            let changes = contact.augment(features, attributes, supported_features);
            return (contact, changes);
        }

        let contact = Arc::new(Contact::new(
            manager.clone(),
            handle,
            features,
            attributes,
            supported_features,
        ));
        contacts.insert(handle, Arc::downgrade(&contact));
        (contact, vec![])
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.contacts.lock().len()
    }
}
