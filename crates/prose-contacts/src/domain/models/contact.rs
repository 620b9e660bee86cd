// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Weak};

use anyhow::Result;
use parking_lot::RwLock;
use tracing::warn;

use crate::connection::ns;
use crate::manager::{ContactManager, ContactManagerInner};
use crate::pending::{OperationError, PendingOperation};

use super::attributes::{attribute, FromAttributeValue};
use super::{
    AttributeMap, AvatarData, ContactCapabilities, ContactLocation, Feature, Features, Handle,
    InfoFields, PresenceType, SimplePresence,
};

/// The state of one direction of a presence subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresenceState {
    #[default]
    No,
    Ask,
    Yes,
}

/// A change to a contact as reported to the `ContactManagerDelegate`.
#[derive(Debug, Clone, PartialEq)]
pub enum ContactChange {
    Alias(String),
    AvatarToken(String),
    AvatarData(AvatarData),
    SimplePresence(SimplePresence),
    Capabilities(ContactCapabilities),
    Location(ContactLocation),
    InfoFields(InfoFields),
    SubscriptionState(PresenceState),
    PublishState(PresenceState),
    Blocked(bool),
    AddedToGroup(String),
    RemovedFromGroup(String),
}

/// A remote contact reachable through a connection.
///
/// There is at most one live `Contact` per handle. Contacts are only ever handed out as
/// `Arc<Contact>` by the `ContactManager`, which owns every mutation. Callers read through the
/// accessors below and observe changes through the manager's delegate.
pub struct Contact {
    manager: Weak<ContactManagerInner>,
    handle: Handle,
    id: String,
    state: RwLock<ContactState>,
}

#[derive(Default)]
struct ContactState {
    requested_features: Features,
    actual_features: Features,
    alias: String,
    avatar_token: Option<String>,
    avatar_data: Option<AvatarData>,
    presence: SimplePresence,
    capabilities: ContactCapabilities,
    location: ContactLocation,
    info: InfoFields,
    subscription_state: PresenceState,
    publish_state: PresenceState,
    blocked: bool,
    groups: BTreeSet<String>,
}

impl Contact {
    pub(crate) fn new(
        manager: Weak<ContactManagerInner>,
        handle: Handle,
        features: &Features,
        attributes: &AttributeMap,
        supported_features: &Features,
    ) -> Self {
        let id = match attribute::<String>(attributes, ns::attr::CONTACT_ID) {
            Ok(Some(id)) => id,
            Ok(None) => {
                warn!("Backend did not report an identifier for handle {}", handle);
                String::new()
            }
            Err(err) => {
                warn!("Failed to read identifier for handle {}. {}", handle, err);
                String::new()
            }
        };

        let contact = Contact {
            manager,
            handle,
            id,
            state: Default::default(),
        };
        contact.augment(features, attributes, supported_features);
        contact
    }

    pub fn manager(&self) -> Option<ContactManager> {
        self.manager.upgrade().map(ContactManager::from)
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// All features any caller ever asked for on this contact.
    pub fn requested_features(&self) -> Features {
        self.state.read().requested_features.clone()
    }

    /// The features whose data has actually been populated. Always a subset of
    /// `requested_features`.
    pub fn actual_features(&self) -> Features {
        self.state.read().actual_features.clone()
    }

    pub fn alias(&self) -> String {
        self.state.read().alias.clone()
    }

    pub fn is_avatar_token_known(&self) -> bool {
        self.state.read().avatar_token.is_some()
    }

    pub fn avatar_token(&self) -> Option<String> {
        self.state.read().avatar_token.clone()
    }

    pub fn avatar_data(&self) -> Option<AvatarData> {
        self.state.read().avatar_data.clone()
    }

    pub fn presence(&self) -> SimplePresence {
        self.state.read().presence.clone()
    }

    pub fn presence_type(&self) -> PresenceType {
        self.state.read().presence.presence_type
    }

    pub fn presence_status(&self) -> String {
        self.state.read().presence.status.clone()
    }

    pub fn presence_message(&self) -> String {
        self.state.read().presence.message.clone()
    }

    pub fn capabilities(&self) -> ContactCapabilities {
        self.state.read().capabilities.clone()
    }

    pub fn location(&self) -> ContactLocation {
        self.state.read().location.clone()
    }

    pub fn info_fields(&self) -> InfoFields {
        self.state.read().info.clone()
    }

    pub fn subscription_state(&self) -> PresenceState {
        self.state.read().subscription_state
    }

    pub fn publish_state(&self) -> PresenceState {
        self.state.read().publish_state
    }

    pub fn is_blocked(&self) -> bool {
        self.state.read().blocked
    }

    pub fn groups(&self) -> BTreeSet<String> {
        self.state.read().groups.clone()
    }
}

impl Contact {
    pub fn request_presence_subscription(self: &Arc<Self>, message: &str) -> PendingOperation<()> {
        match self.manager() {
            Some(manager) => manager.request_presence_subscription(&[self.clone()], message),
            None => manager_gone(),
        }
    }

    pub fn remove_presence_subscription(self: &Arc<Self>, message: &str) -> PendingOperation<()> {
        match self.manager() {
            Some(manager) => manager.remove_presence_subscription(&[self.clone()], message),
            None => manager_gone(),
        }
    }

    pub fn authorize_presence_publication(
        self: &Arc<Self>,
        message: &str,
    ) -> PendingOperation<()> {
        match self.manager() {
            Some(manager) => manager.authorize_presence_publication(&[self.clone()], message),
            None => manager_gone(),
        }
    }

    pub fn deny_presence_publication(self: &Arc<Self>, message: &str) -> PendingOperation<()> {
        match self.manager() {
            Some(manager) => manager.deny_presence_publication(&[self.clone()], message),
            None => manager_gone(),
        }
    }

    pub fn block(self: &Arc<Self>, value: bool) -> PendingOperation<()> {
        match self.manager() {
            Some(manager) => manager.block_contacts(&[self.clone()], value),
            None => manager_gone(),
        }
    }
}

fn manager_gone() -> PendingOperation<()> {
    PendingOperation::failed(OperationError::not_available(
        "The contact manager of this contact has been dropped",
    ))
}

impl Contact {
    /// Merges `features` and the data found in `attributes` into the contact. Features that are
    /// populated already are left untouched, so the contact is never downgraded.
    pub(crate) fn augment(
        &self,
        features: &Features,
        attributes: &AttributeMap,
        supported_features: &Features,
    ) -> Vec<ContactChange> {
        let mut state = self.state.write();
        let mut changes = vec![];

        state.requested_features.extend(features.iter().copied());

        for feature in features {
            if state.actual_features.contains(feature) {
                continue;
            }

            match state.apply_attributes(*feature, attributes, supported_features) {
                Ok(Applied::Populated(change)) => {
                    state.actual_features.insert(*feature);
                    changes.extend(change);
                }
                Ok(Applied::Missing) => (),
                Err(err) => warn!(
                    "Ignoring attributes of feature {} for contact {}. {}",
                    feature, self.handle, err
                ),
            }
        }

        changes
    }

    pub(crate) fn receive_alias(&self, alias: &str) -> Option<ContactChange> {
        self.receive(
            Feature::Alias,
            alias.to_string(),
            |s| &mut s.alias,
            ContactChange::Alias,
        )
    }

    pub(crate) fn receive_avatar_token(&self, token: &str) -> Option<ContactChange> {
        let mut state = self.state.write();
        if !state.requested_features.contains(&Feature::AvatarToken) {
            return None;
        }
        state.actual_features.insert(Feature::AvatarToken);
        state.set_avatar_token(token.to_string())
    }

    pub(crate) fn receive_avatar_data(
        &self,
        token: &str,
        avatar: AvatarData,
    ) -> Vec<ContactChange> {
        let mut state = self.state.write();
        if !state.requested_features.contains(&Feature::AvatarData) {
            return vec![];
        }
        state.actual_features.insert(Feature::AvatarData);

        let mut changes = vec![];
        if state.requested_features.contains(&Feature::AvatarToken) {
            state.actual_features.insert(Feature::AvatarToken);
            changes.extend(state.set_avatar_token(token.to_string()));
        }
        if state.avatar_data.as_ref() != Some(&avatar) {
            state.avatar_data = Some(avatar.clone());
            changes.push(ContactChange::AvatarData(avatar));
        }
        changes
    }

    pub(crate) fn receive_simple_presence(
        &self,
        presence: &SimplePresence,
    ) -> Option<ContactChange> {
        self.receive(
            Feature::SimplePresence,
            presence.clone(),
            |s| &mut s.presence,
            ContactChange::SimplePresence,
        )
    }

    pub(crate) fn receive_capabilities(
        &self,
        capabilities: &ContactCapabilities,
    ) -> Option<ContactChange> {
        self.receive(
            Feature::Capabilities,
            capabilities.clone(),
            |s| &mut s.capabilities,
            ContactChange::Capabilities,
        )
    }

    pub(crate) fn receive_location(&self, location: &ContactLocation) -> Option<ContactChange> {
        self.receive(
            Feature::Location,
            location.clone(),
            |s| &mut s.location,
            ContactChange::Location,
        )
    }

    pub(crate) fn receive_info(&self, info: &InfoFields) -> Option<ContactChange> {
        self.receive(
            Feature::Info,
            info.clone(),
            |s| &mut s.info,
            ContactChange::InfoFields,
        )
    }

    pub(crate) fn set_subscription_state(&self, value: PresenceState) -> Option<ContactChange> {
        let mut state = self.state.write();
        if state.subscription_state == value {
            return None;
        }
        state.subscription_state = value;
        Some(ContactChange::SubscriptionState(value))
    }

    pub(crate) fn set_publish_state(&self, value: PresenceState) -> Option<ContactChange> {
        let mut state = self.state.write();
        if state.publish_state == value {
            return None;
        }
        state.publish_state = value;
        Some(ContactChange::PublishState(value))
    }

    pub(crate) fn set_blocked(&self, value: bool) -> Option<ContactChange> {
        let mut state = self.state.write();
        if state.blocked == value {
            return None;
        }
        state.blocked = value;
        Some(ContactChange::Blocked(value))
    }

    pub(crate) fn set_member_of_group(&self, group: &str, is_member: bool) -> Option<ContactChange> {
        let mut state = self.state.write();
        if is_member {
            state
                .groups
                .insert(group.to_string())
                .then(|| ContactChange::AddedToGroup(group.to_string()))
        } else {
            state
                .groups
                .remove(group)
                .then(|| ContactChange::RemovedFromGroup(group.to_string()))
        }
    }

    fn receive<T, S>(
        &self,
        feature: Feature,
        value: T,
        slot: S,
        change: fn(T) -> ContactChange,
    ) -> Option<ContactChange>
    where
        T: PartialEq + Clone,
        S: FnOnce(&mut ContactState) -> &mut T,
    {
        let mut state = self.state.write();
        if !state.requested_features.contains(&feature) {
            return None;
        }
        state.actual_features.insert(feature);

        let current = slot(&mut *state);
        if *current == value {
            return None;
        }
        *current = value.clone();
        Some(change(value))
    }
}

enum Applied {
    Populated(Option<ContactChange>),
    Missing,
}

impl ContactState {
    fn apply_attributes(
        &mut self,
        feature: Feature,
        attributes: &AttributeMap,
        supported_features: &Features,
    ) -> Result<Applied> {
        let applied = match feature {
            Feature::Alias => Self::apply(
                attributes,
                ns::attr::ALIAS,
                &mut self.alias,
                ContactChange::Alias,
            )?,
            Feature::SimplePresence => Self::apply(
                attributes,
                ns::attr::PRESENCE,
                &mut self.presence,
                ContactChange::SimplePresence,
            )?,
            Feature::Capabilities => Self::apply(
                attributes,
                ns::attr::CAPABILITIES,
                &mut self.capabilities,
                ContactChange::Capabilities,
            )?,
            Feature::Location => Self::apply(
                attributes,
                ns::attr::LOCATION,
                &mut self.location,
                ContactChange::Location,
            )?,
            Feature::Info => Self::apply(
                attributes,
                ns::attr::INFO,
                &mut self.info,
                ContactChange::InfoFields,
            )?,
            Feature::AvatarToken => {
                match attribute::<String>(attributes, ns::attr::AVATAR_TOKEN)? {
                    Some(token) => Applied::Populated(self.set_avatar_token(token)),
                    // The avatar interface works but the token is not known (yet).
                    None if supported_features.contains(&feature) => Applied::Populated(None),
                    None => Applied::Missing,
                }
            }
            // Avatar bytes only ever arrive through `receive_avatar_data`. An empty token is the
            // backend confirming that the contact has no avatar.
            Feature::AvatarData => {
                match attribute::<String>(attributes, ns::attr::AVATAR_TOKEN)? {
                    Some(token) if token.is_empty() => Applied::Populated(None),
                    _ => Applied::Missing,
                }
            }
        };
        Ok(applied)
    }

    fn apply<T>(
        attributes: &AttributeMap,
        key: &str,
        slot: &mut T,
        change: impl FnOnce(T) -> ContactChange,
    ) -> Result<Applied>
    where
        T: FromAttributeValue + PartialEq + Clone,
    {
        let Some(value) = attribute::<T>(attributes, key)? else {
            return Ok(Applied::Missing);
        };
        if *slot == value {
            return Ok(Applied::Populated(None));
        }
        *slot = value.clone();
        Ok(Applied::Populated(Some(change(value))))
    }

    fn set_avatar_token(&mut self, token: String) -> Option<ContactChange> {
        if self.avatar_token.as_ref() == Some(&token) {
            return None;
        }
        self.avatar_token = Some(token.clone());
        Some(ContactChange::AvatarToken(token))
    }
}

impl Debug for Contact {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contact")
            .field("handle", &self.handle)
            .field("id", &self.id)
            .finish()
    }
}
