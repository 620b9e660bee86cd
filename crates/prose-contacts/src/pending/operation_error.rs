// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

const ERROR_NOT_IMPLEMENTED: &str = "org.freedesktop.Telepathy.Error.NotImplemented";
const ERROR_NOT_AVAILABLE: &str = "org.freedesktop.Telepathy.Error.NotAvailable";
const ERROR_INVALID_ARGUMENT: &str = "org.freedesktop.Telepathy.Error.InvalidArgument";

/// The reason a `PendingOperation` failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// The operation has no backing implementation, e.g. a presence list mutation without a
    /// channel that allows it. Nothing was sent to the backend.
    #[error("Not implemented: {msg}")]
    NotImplemented { msg: String },
    /// The object the operation depends on went away before it could complete.
    #[error("Not available: {msg}")]
    NotAvailable { msg: String },
    #[error("Invalid argument: {msg}")]
    InvalidArgument { msg: String },
    /// A failure reported by the backend, passed on verbatim.
    #[error("{name}: {msg}")]
    Backend { name: String, msg: String },
}

impl OperationError {
    pub fn backend(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Backend {
            name: name.into(),
            msg: msg.into(),
        }
    }

    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Self::NotImplemented { msg: msg.into() }
    }

    pub fn not_available(msg: impl Into<String>) -> Self {
        Self::NotAvailable { msg: msg.into() }
    }

    /// The D-Bus style error name, i.e. the kind of the error.
    pub fn name(&self) -> &str {
        match self {
            Self::NotImplemented { .. } => ERROR_NOT_IMPLEMENTED,
            Self::NotAvailable { .. } => ERROR_NOT_AVAILABLE,
            Self::InvalidArgument { .. } => ERROR_INVALID_ARGUMENT,
            Self::Backend { name, .. } => name,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotImplemented { msg }
            | Self::NotAvailable { msg }
            | Self::InvalidArgument { msg }
            | Self::Backend { msg, .. } => msg,
        }
    }

    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented { .. })
    }
}
