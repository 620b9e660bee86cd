// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use itertools::Itertools;

use crate::domain::models::{Contact, Handle};

/// The outcome of a contact request.
#[derive(Debug, Clone, Default)]
pub struct ResolvedContacts {
    /// The contacts in the order of the requested handles. Handles requested more than once
    /// appear more than once.
    pub contacts: Vec<Arc<Contact>>,
    /// Requested handles the backend did not report attributes for.
    pub invalid_handles: Vec<Handle>,
}

impl ResolvedContacts {
    pub(crate) fn new(requested: &[Handle], resolved: &HashMap<Handle, Arc<Contact>>) -> Self {
        let contacts = requested
            .iter()
            .filter_map(|handle| resolved.get(handle).cloned())
            .collect();
        let invalid_handles = requested
            .iter()
            .filter(|handle| !resolved.contains_key(handle))
            .copied()
            .unique()
            .collect();

        ResolvedContacts {
            contacts,
            invalid_handles,
        }
    }

    pub fn handles(&self) -> Vec<Handle> {
        self.contacts.iter().map(|contact| contact.handle()).collect()
    }
}
