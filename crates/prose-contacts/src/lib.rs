// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connection::{
    ns, Connection, ConnectionEvent, ConnectionEventHandler, ConnectionSignal, DynConnection,
    DynGroupChannel, GroupChangeReason, GroupChannel, GroupMemberChangeDetails,
    GroupMembersChanged, GroupMembersChangedHandler,
};
pub use domain::models::*;
pub use manager::{
    ContactListChannels, ContactListRole, ContactManager, ContactManagerBuilder,
    ContactManagerConfig, ContactManagerDelegate, ContactManagerEvent, FeatureError,
    FeatureRegistry, FeatureSpec, ResolvedContacts, UndefinedConnection,
};
pub use pending::{join_all, OperationError, PendingOperation};

mod connection;
mod domain;
mod manager;
mod pending;

#[cfg(any(test, feature = "test"))]
pub mod test;
