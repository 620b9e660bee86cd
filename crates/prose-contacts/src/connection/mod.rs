// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use connection::{
    Connection, ConnectionEvent, ConnectionEventHandler, ConnectionSignal, DynConnection,
};
pub use group_channel::{
    DynGroupChannel, GroupChangeReason, GroupChannel, GroupMemberChangeDetails,
    GroupMembersChanged, GroupMembersChangedHandler,
};

#[cfg(any(test, feature = "test"))]
pub mod mocks {
    pub use super::connection::MockConnection;
    pub use super::group_channel::MockGroupChannel;
}

mod connection;
mod group_channel;
pub mod ns;
