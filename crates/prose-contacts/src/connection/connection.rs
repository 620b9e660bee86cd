// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use strum_macros::Display;

use crate::domain::models::{
    AttributeMap, AvatarData, ContactCapabilities, ContactLocation, Handle, HandleType,
    InfoFields, InterfaceId, SimplePresence,
};
use crate::pending::PendingOperation;

pub type DynConnection = Arc<dyn Connection>;
pub type ConnectionEventHandler = Arc<dyn Fn(&ConnectionEvent) + Send + Sync>;

/// The connection to the backend the contacts live on.
///
/// Every call is expected to return immediately. Calls that involve a round trip to the backend
/// return a `PendingOperation` which the connection finishes once the response arrived.
#[cfg_attr(any(test, feature = "test"), mockall::automock)]
pub trait Connection: Send + Sync {
    /// Whether the connection finished its own setup and can answer `interfaces`.
    fn is_ready(&self) -> bool;
    fn interfaces(&self) -> BTreeSet<InterfaceId>;
    /// The interfaces `get_contact_attributes` can report attributes for.
    fn contact_attribute_interfaces(&self) -> BTreeSet<InterfaceId>;

    fn request_handles(
        &self,
        handle_type: HandleType,
        identifiers: &[String],
    ) -> PendingOperation<Vec<Handle>>;

    /// Fetches the attributes of `interfaces` for all `handles` in one batch. Handles that are
    /// invalid are missing from the result.
    fn get_contact_attributes(
        &self,
        handles: &[Handle],
        interfaces: &[InterfaceId],
        hold_handles: bool,
    ) -> PendingOperation<BTreeMap<Handle, AttributeMap>>;

    /// Registers `handler` to be called for every event of kind `signal`.
    fn connect_signal(&self, signal: ConnectionSignal, handler: ConnectionEventHandler);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum ConnectionSignal {
    AliasesChanged,
    AvatarUpdated,
    AvatarRetrieved,
    PresencesChanged,
    CapabilitiesChanged,
    LocationUpdated,
    ContactInfoChanged,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    AliasesChanged {
        aliases: Vec<(Handle, String)>,
    },
    AvatarUpdated {
        handle: Handle,
        token: String,
    },
    AvatarRetrieved {
        handle: Handle,
        token: String,
        avatar: AvatarData,
    },
    PresencesChanged {
        presences: BTreeMap<Handle, SimplePresence>,
    },
    CapabilitiesChanged {
        capabilities: BTreeMap<Handle, ContactCapabilities>,
    },
    LocationUpdated {
        handle: Handle,
        location: ContactLocation,
    },
    ContactInfoChanged {
        handle: Handle,
        info: InfoFields,
    },
}

impl ConnectionEvent {
    pub fn signal(&self) -> ConnectionSignal {
        match self {
            ConnectionEvent::AliasesChanged { .. } => ConnectionSignal::AliasesChanged,
            ConnectionEvent::AvatarUpdated { .. } => ConnectionSignal::AvatarUpdated,
            ConnectionEvent::AvatarRetrieved { .. } => ConnectionSignal::AvatarRetrieved,
            ConnectionEvent::PresencesChanged { .. } => ConnectionSignal::PresencesChanged,
            ConnectionEvent::CapabilitiesChanged { .. } => ConnectionSignal::CapabilitiesChanged,
            ConnectionEvent::LocationUpdated { .. } => ConnectionSignal::LocationUpdated,
            ConnectionEvent::ContactInfoChanged { .. } => ConnectionSignal::ContactInfoChanged,
        }
    }
}
