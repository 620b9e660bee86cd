// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use indexmap::IndexMap;

use super::{Contact, Handle};

/// An insertion-ordered set of contacts, unique by handle.
#[derive(Debug, Clone, Default)]
pub struct ContactSet {
    contacts: IndexMap<Handle, Arc<Contact>>,
}

impl ContactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `contact` unless a contact with the same handle is already part of the set.
    pub fn insert(&mut self, contact: Arc<Contact>) -> bool {
        if self.contacts.contains_key(&contact.handle()) {
            return false;
        }
        self.contacts.insert(contact.handle(), contact);
        true
    }

    pub fn remove(&mut self, handle: Handle) -> Option<Arc<Contact>> {
        self.contacts.shift_remove(&handle)
    }

    pub fn contains(&self, contact: &Contact) -> bool {
        self.contains_handle(contact.handle())
    }

    pub fn contains_handle(&self, handle: Handle) -> bool {
        self.contacts.contains_key(&handle)
    }

    pub fn extend(&mut self, other: &ContactSet) {
        for contact in other.iter() {
            self.insert(contact.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Contact>> {
        self.contacts.values()
    }

    pub fn handles(&self) -> Vec<Handle> {
        self.contacts.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Arc<Contact>> {
        self.contacts.values().cloned().collect()
    }
}

impl FromIterator<Arc<Contact>> for ContactSet {
    fn from_iter<I: IntoIterator<Item = Arc<Contact>>>(iter: I) -> Self {
        let mut set = ContactSet::new();
        for contact in iter {
            set.insert(contact);
        }
        set
    }
}

impl IntoIterator for ContactSet {
    type Item = Arc<Contact>;
    type IntoIter = indexmap::map::IntoValues<Handle, Arc<Contact>>;

    fn into_iter(self) -> Self::IntoIter {
        self.contacts.into_values()
    }
}
