// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use anyhow::{anyhow, Result};

use super::{ContactCapabilities, ContactLocation, InfoFields, SimplePresence};

/// The attributes the backend reports for a single contact, keyed by `<interface>/<name>`.
pub type AttributeMap = HashMap<String, AttributeValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    Presence(SimplePresence),
    Capabilities(ContactCapabilities),
    Location(ContactLocation),
    Info(InfoFields),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<SimplePresence> for AttributeValue {
    fn from(value: SimplePresence) -> Self {
        AttributeValue::Presence(value)
    }
}

impl From<ContactCapabilities> for AttributeValue {
    fn from(value: ContactCapabilities) -> Self {
        AttributeValue::Capabilities(value)
    }
}

impl From<ContactLocation> for AttributeValue {
    fn from(value: ContactLocation) -> Self {
        AttributeValue::Location(value)
    }
}

impl From<InfoFields> for AttributeValue {
    fn from(value: InfoFields) -> Self {
        AttributeValue::Info(value)
    }
}

pub(crate) trait FromAttributeValue: Sized {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self>;
}

impl FromAttributeValue for String {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::String(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FromAttributeValue for SimplePresence {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Presence(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FromAttributeValue for ContactCapabilities {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Capabilities(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FromAttributeValue for ContactLocation {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Location(value) => Some(value.clone()),
            _ => None,
        }
    }
}

impl FromAttributeValue for InfoFields {
    fn from_attribute_value(value: &AttributeValue) -> Option<Self> {
        match value {
            AttributeValue::Info(value) => Some(value.clone()),
            _ => None,
        }
    }
}

/// Returns the attribute stored under `key`, `None` if it is absent or an error if it has an
/// unexpected type.
pub(crate) fn attribute<T: FromAttributeValue>(
    attributes: &AttributeMap,
    key: &str,
) -> Result<Option<T>> {
    let Some(value) = attributes.get(key) else {
        return Ok(None);
    };
    T::from_attribute_value(value)
        .map(Some)
        .ok_or_else(|| anyhow!("Unexpected value {:?} for attribute '{}'", value, key))
}
