// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Display, Formatter};

/// The name of a capability interface a connection may implement, e.g.
/// `org.freedesktop.Telepathy.Connection.Interface.Aliasing`.
#[derive(Debug, Eq, PartialEq, Hash, Clone, PartialOrd, Ord)]
pub struct InterfaceId(String);

impl InterfaceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// The attribute key `<interface>/<name>` under which the backend reports `name`.
    pub fn attribute(&self, name: &str) -> String {
        format!("{}/{}", self.0, name)
    }
}

impl<T> From<T> for InterfaceId
where
    T: Into<String>,
{
    fn from(s: T) -> InterfaceId {
        InterfaceId(s.into())
    }
}

impl AsRef<str> for InterfaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::borrow::Borrow<str> for InterfaceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for InterfaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
