// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use attributes::{AttributeMap, AttributeValue};
pub use contact::{Contact, ContactChange, PresenceState};
pub use contact_details::{
    AvatarData, ContactCapabilities, ContactInfoField, ContactLocation, InfoFields,
    RequestableChannelClass,
};
pub use contact_set::ContactSet;
pub use feature::{Feature, Features};
pub use handle::{Handle, HandleType};
pub use interface_id::InterfaceId;
pub use simple_presence::{PresenceType, SimplePresence};

pub(crate) mod attributes;
mod contact;
mod contact_details;
mod contact_set;
mod feature;
mod handle;
mod interface_id;
mod simple_presence;
