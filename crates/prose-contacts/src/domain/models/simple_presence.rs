// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PresenceType {
    Unset,
    Offline,
    Available,
    Away,
    ExtendedAway,
    Hidden,
    Busy,
    #[default]
    Unknown,
    Error,
}

/// The presence of a contact as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePresence {
    pub presence_type: PresenceType,
    /// The backend specific status identifier, e.g. "available" or "dnd".
    pub status: String,
    pub message: String,
}

impl SimplePresence {
    pub fn new(
        presence_type: PresenceType,
        status: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            presence_type,
            status: status.into(),
            message: message.into(),
        }
    }

    pub fn available(message: impl Into<String>) -> Self {
        Self::new(PresenceType::Available, "available", message)
    }

    pub fn offline() -> Self {
        Self::new(PresenceType::Offline, "offline", "")
    }
}

impl Default for SimplePresence {
    fn default() -> Self {
        Self::new(PresenceType::Unknown, "unknown", "")
    }
}
