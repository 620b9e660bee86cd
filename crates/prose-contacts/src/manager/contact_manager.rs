// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Weak};

use crate::connection::DynConnection;
use crate::domain::models::{Contact, Features, Handle};
use crate::pending::PendingOperation;

use super::event_dispatcher::EventDispatcher;
use super::feature_registry::{self, FeatureTracker};
use super::identity_cache::IdentityCache;
use super::presence_lists::ContactLists;
use super::{
    ContactListChannels, ContactManagerBuilder, ContactManagerConfig, ContactManagerDelegate,
    FeatureRegistry, ResolvedContacts, UndefinedConnection,
};

/// Hands out the contacts of a connection and keeps them up to date.
///
/// A `ContactManager` is cheap to clone. All clones share the same cache, so there is never more
/// than one `Contact` alive for a given handle.
#[derive(Clone)]
pub struct ContactManager {
    pub(super) inner: Arc<ContactManagerInner>,
}

pub(crate) struct ContactManagerInner {
    pub(super) this: Weak<ContactManagerInner>,
    pub(super) connection: DynConnection,
    pub(super) config: ContactManagerConfig,
    pub(super) cache: IdentityCache,
    pub(super) features: FeatureTracker,
    pub(super) contact_lists: ContactLists,
    pub(super) dispatcher: EventDispatcher,
}

impl From<Arc<ContactManagerInner>> for ContactManager {
    fn from(inner: Arc<ContactManagerInner>) -> Self {
        ContactManager { inner }
    }
}

impl ContactManager {
    pub fn builder() -> ContactManagerBuilder<UndefinedConnection> {
        ContactManagerBuilder::new()
    }

    pub(super) fn new(
        connection: DynConnection,
        config: ContactManagerConfig,
        feature_registry: FeatureRegistry,
        delegate: Option<Box<dyn ContactManagerDelegate>>,
    ) -> Self {
        let inner = Arc::new_cyclic(|this: &Weak<ContactManagerInner>| ContactManagerInner {
            this: this.clone(),
            connection,
            config,
            cache: Default::default(),
            features: FeatureTracker::new(feature_registry),
            contact_lists: Default::default(),
            dispatcher: EventDispatcher::new(this.clone(), delegate),
        });
        ContactManager { inner }
    }

    pub fn connection(&self) -> DynConnection {
        self.inner.connection.clone()
    }

    /// Whether the connection is ready and implements the contacts interface.
    pub fn is_supported(&self) -> bool {
        feature_registry::is_supported(self.inner.connection.as_ref())
    }

    pub fn supported_features(&self) -> Features {
        self.inner
            .features
            .supported_features(self.inner.connection.as_ref())
    }

    pub fn feature_registry(&self) -> &FeatureRegistry {
        self.inner.features.registry()
    }

    /// Returns the contact that is currently alive for `handle`, if any.
    pub fn lookup_contact_by_handle(&self, handle: Handle) -> Option<Arc<Contact>> {
        self.inner.cache.lookup(handle)
    }
}

impl ContactManager {
    pub fn contacts_for_handles(
        &self,
        handles: &[Handle],
        features: &Features,
    ) -> PendingOperation<ResolvedContacts> {
        self.inner.contacts_for_handles(handles, features)
    }

    pub fn contacts_for_identifiers<I, S>(
        &self,
        identifiers: I,
        features: &Features,
    ) -> PendingOperation<ResolvedContacts>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let identifiers = identifiers.into_iter().map(Into::into).collect::<Vec<_>>();
        self.inner.contacts_for_identifiers(&identifiers, features)
    }

    /// Makes sure `contacts` have at least `features`.
    pub fn upgrade_contacts(
        &self,
        contacts: &[Arc<Contact>],
        features: &Features,
    ) -> PendingOperation<ResolvedContacts> {
        self.inner.upgrade_contacts(contacts, features)
    }

    /// Every contact that is a member of one of the contact lists, with at least `features`.
    pub fn all_known_contacts(&self, features: &Features) -> PendingOperation<ResolvedContacts> {
        let contacts = self.inner.contact_lists.all_known_contacts();
        self.inner.upgrade_contacts(&contacts.to_vec(), features)
    }
}

impl ContactManager {
    /// Installs the contact list channels. Must not be called more than once.
    pub fn set_contact_list_channels(&self, channels: ContactListChannels) {
        self.inner.set_contact_list_channels(channels)
    }

    pub fn can_request_presence_subscription(&self) -> bool {
        self.inner.contact_lists.can_request_presence_subscription()
    }

    pub fn request_presence_subscription(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        self.inner
            .contact_lists
            .request_presence_subscription(contacts, message)
    }

    pub fn can_remove_presence_subscription(&self) -> bool {
        self.inner.contact_lists.can_remove_presence_subscription()
    }

    pub fn remove_presence_subscription(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        self.inner
            .contact_lists
            .remove_presence_subscription(contacts, message)
    }

    pub fn can_authorize_presence_publication(&self) -> bool {
        self.inner.contact_lists.can_authorize_presence_publication()
    }

    pub fn authorize_presence_publication(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        self.inner
            .contact_lists
            .authorize_presence_publication(contacts, message)
    }

    pub fn can_deny_presence_publication(&self) -> bool {
        self.inner.contact_lists.can_deny_presence_publication()
    }

    pub fn deny_presence_publication(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        self.inner
            .contact_lists
            .deny_presence_publication(contacts, message)
    }

    pub fn can_remove_presence_publication(&self) -> bool {
        self.inner.contact_lists.can_remove_presence_publication()
    }

    pub fn remove_presence_publication(
        &self,
        contacts: &[Arc<Contact>],
        message: &str,
    ) -> PendingOperation<()> {
        self.inner
            .contact_lists
            .remove_presence_publication(contacts, message)
    }

    pub fn can_block_contacts(&self) -> bool {
        self.inner.contact_lists.can_block_contacts()
    }

    pub fn can_unblock_contacts(&self) -> bool {
        self.inner.contact_lists.can_unblock_contacts()
    }

    /// Adds `contacts` to (`value == true`) or removes them from the deny list.
    pub fn block_contacts(&self, contacts: &[Arc<Contact>], value: bool) -> PendingOperation<()> {
        self.inner.contact_lists.block_contacts(contacts, value)
    }
}

impl Debug for ContactManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactManager")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
