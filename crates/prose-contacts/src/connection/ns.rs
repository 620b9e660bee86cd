// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub const CONNECTION: &str = "org.freedesktop.Telepathy.Connection";
pub const CONTACTS: &str = "org.freedesktop.Telepathy.Connection.Interface.Contacts";

pub const ALIASING: &str = "org.freedesktop.Telepathy.Connection.Interface.Aliasing";
pub const AVATARS: &str = "org.freedesktop.Telepathy.Connection.Interface.Avatars";
pub const CONTACT_CAPABILITIES: &str =
    "org.freedesktop.Telepathy.Connection.Interface.ContactCapabilities";
pub const CONTACT_INFO: &str = "org.freedesktop.Telepathy.Connection.Interface.ContactInfo";
pub const LOCATION: &str = "org.freedesktop.Telepathy.Connection.Interface.Location";
pub const SIMPLE_PRESENCE: &str = "org.freedesktop.Telepathy.Connection.Interface.SimplePresence";

pub mod attr {
    pub const CONTACT_ID: &str = "org.freedesktop.Telepathy.Connection/contact-id";
    pub const ALIAS: &str = "org.freedesktop.Telepathy.Connection.Interface.Aliasing/alias";
    pub const AVATAR_TOKEN: &str = "org.freedesktop.Telepathy.Connection.Interface.Avatars/token";
    pub const CAPABILITIES: &str =
        "org.freedesktop.Telepathy.Connection.Interface.ContactCapabilities/capabilities";
    pub const INFO: &str = "org.freedesktop.Telepathy.Connection.Interface.ContactInfo/info";
    pub const LOCATION: &str = "org.freedesktop.Telepathy.Connection.Interface.Location/location";
    pub const PRESENCE: &str =
        "org.freedesktop.Telepathy.Connection.Interface.SimplePresence/presence";
}
