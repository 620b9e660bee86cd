// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::BTreeMap;

use super::HandleType;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvatarData {
    pub mime_type: String,
    pub data: Vec<u8>,
}

/// A kind of channel that can be requested from a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestableChannelClass {
    pub channel_type: String,
    pub target_handle_type: HandleType,
    pub allowed_properties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactCapabilities {
    pub classes: Vec<RequestableChannelClass>,
}

impl ContactCapabilities {
    pub fn new(classes: Vec<RequestableChannelClass>) -> Self {
        Self { classes }
    }

    pub fn supports(&self, channel_type: &str) -> bool {
        self.classes
            .iter()
            .any(|class| class.channel_type == channel_type)
    }

    pub fn supports_text_chats(&self) -> bool {
        self.supports("org.freedesktop.Telepathy.Channel.Type.Text")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactLocation {
    pub fields: BTreeMap<String, String>,
}

impl ContactLocation {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn country(&self) -> Option<&str> {
        self.fields.get("country").map(String::as_str)
    }

    pub fn locality(&self) -> Option<&str> {
        self.fields.get("locality").map(String::as_str)
    }

    pub fn latitude(&self) -> Option<f64> {
        self.fields.get("lat").and_then(|lat| lat.parse().ok())
    }

    pub fn longitude(&self) -> Option<f64> {
        self.fields.get("lon").and_then(|lon| lon.parse().ok())
    }
}

/// A single vCard-like field, e.g. `tel` with parameters `["type=work"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactInfoField {
    pub field_name: String,
    pub parameters: Vec<String>,
    pub field_value: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfoFields {
    fields: Vec<ContactInfoField>,
}

impl InfoFields {
    pub fn new(fields: Vec<ContactInfoField>) -> Self {
        Self { fields }
    }

    pub fn fields(&self, name: &str) -> Vec<&ContactInfoField> {
        self.fields
            .iter()
            .filter(|field| field.field_name == name)
            .collect()
    }

    pub fn all_fields(&self) -> &[ContactInfoField] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
